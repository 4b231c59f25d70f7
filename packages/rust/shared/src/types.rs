//! Normalized output shapes for listing records and detail pages.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// The resolved classification attached to a normalized initiative.
///
/// Only levels that were resolved to a value are serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyData {
    /// Initiative type code (prefix of the initiative id).
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supertype: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsubtype: Option<String>,
}

/// One listing record after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedInitiative {
    /// Legislative term; 0 is the constituent term.
    pub term: u32,
    /// Full initiative id, e.g. `121/000001`.
    pub initiative_id: String,
    /// Prefix of the id before `/`.
    pub initiative_type: String,
    pub title: Option<String>,
    pub presented_date: Option<String>,
    pub qualified_date: Option<String>,
    pub result: Option<String>,
    pub topology_data: TopologyData,
}

/// A normalized listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPage {
    /// Total number of initiatives reported by the source.
    pub items: u64,
    /// Number of pages needed to list `items`.
    pub pages: u64,
    pub initiatives: Vec<NormalizedInitiative>,
}

/// One entry of the term catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub term: u32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// Author of an initiative, as listed on its detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthorRef {
    /// A deputy, identified by parliamentary code.
    Representative { id: String },
    /// A parliamentary group.
    Group { id: String },
    Commission { name: String },
    Subcommission { name: String },
    /// Anything else (the Government, an autonomous parliament, ...).
    Other { name: String },
}

/// A competent commission entry. `body` and `sub_body` are parallel: one slot
/// per link in the list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetentCommission {
    pub body: Vec<Option<String>>,
    pub sub_body: Vec<Option<String>>,
    pub name: String,
}

/// A step of the parliamentary procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TramitationEvent {
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Official bulletin publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bulletin {
    pub text: String,
    pub urls: Vec<String>,
}

/// Session diary publication, with its HTML and PDF renditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diary {
    pub text: String,
    #[serde(rename = "urlText")]
    pub url_text: Option<String>,
    #[serde(rename = "urlPDF")]
    pub url_pdf: Option<String>,
}

/// Publication in the state gazette (BOE).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boe {
    pub text: String,
    pub url: Option<String>,
}

/// Everything extracted from one detail page, before pruning.
///
/// Every field serializes (as `null` or `[]` when empty); pruning removes the
/// empty ones from the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    pub term: Option<u32>,
    pub initiative_id: Option<String>,
    pub dossier_urls: Vec<String>,
    pub author: Vec<AuthorRef>,
    pub status: Option<String>,
    pub result: Option<String>,
    pub tramitation_type: Option<String>,
    pub competent_commissions: Vec<CompetentCommission>,
    pub parlamentary_codes: Vec<String>,
    pub initiative_tramitation: Vec<TramitationEvent>,
    pub bulletins: Vec<Bulletin>,
    pub diaries: Vec<Diary>,
    pub boes: Vec<Boe>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn author_ref_uses_type_tag() {
        let author = AuthorRef::Representative { id: "123".into() };
        assert_eq!(
            serde_json::to_value(&author).unwrap(),
            json!({"type": "representative", "id": "123"})
        );

        let parsed: AuthorRef =
            serde_json::from_value(json!({"type": "subcommission", "name": "Subcomisión X"}))
                .unwrap();
        assert_eq!(
            parsed,
            AuthorRef::Subcommission {
                name: "Subcomisión X".into()
            }
        );
    }

    #[test]
    fn topology_data_skips_unresolved_levels() {
        let data = TopologyData {
            code: "121".into(),
            supertype: Some("proyectos".into()),
            kind: Some("ley".into()),
            subtype: None,
            subsubtype: None,
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"code": "121", "supertype": "proyectos", "type": "ley"})
        );
    }

    #[test]
    fn detail_record_uses_source_key_names() {
        let record = DetailRecord {
            diaries: vec![Diary {
                text: "DS. Pleno".into(),
                url_text: Some("/a".into()),
                url_pdf: None,
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("parlamentaryCodes").is_some());
        assert!(value.get("initiativeTramitation").is_some());
        assert_eq!(value["diaries"][0]["urlPDF"], serde_json::Value::Null);
        assert_eq!(value["diaries"][0]["urlText"], "/a");
    }
}
