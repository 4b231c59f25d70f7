//! Raw listing records and their one-to-one mapping into [`NormalizedInitiative`].

use std::sync::LazyLock;

use congreso_shared::{CongresoError, NormalizedInitiative, Result, TopologyData, parse_term_code};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::topology::TopologyFields;

/// Separator between the type code and the sequence number of an initiative id.
const ID_SEPARATOR: char = '/';

/// Matches record keys of the form `<prefix><integer>`, e.g. `iniciativa12`.
static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\D*(\d+)$").expect("record key regex"));

/// One record of `lista_iniciativas`, as returned by the listing API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListingRecord {
    #[serde(flatten)]
    pub topology: TopologyFields,
    #[serde(default)]
    pub id_iniciativa: Option<String>,
    #[serde(default)]
    pub legislatura: Option<String>,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub fecha_presentado: Option<String>,
    #[serde(default)]
    pub fecha_calificado: Option<String>,
    #[serde(default)]
    pub resultado_tram: Option<String>,
}

/// Numeric suffix of a record key.
pub fn key_order(key: &str) -> Result<u64> {
    let caps = KEY_RE
        .captures(key)
        .ok_or_else(|| CongresoError::listing(key, "key has no numeric suffix"))?;
    caps[1]
        .parse()
        .map_err(|e| CongresoError::listing(key, format!("key suffix out of range: {e}")))
}

/// Decode every record of a keyed listing mapping and sort by key suffix.
///
/// Fails on the first key or record that is not well formed.
pub fn order_records(records: &Map<String, Value>) -> Result<Vec<(String, RawListingRecord)>> {
    let mut ordered = records
        .iter()
        .map(|(key, value)| {
            let order = key_order(key)?;
            let raw = RawListingRecord::deserialize(value)
                .map_err(|e| CongresoError::listing(key, e.to_string()))?;
            Ok((order, key.clone(), raw))
        })
        .collect::<Result<Vec<_>>>()?;

    ordered.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    Ok(ordered
        .into_iter()
        .map(|(_, key, raw)| (key, raw))
        .collect())
}

/// Prefix of an initiative id before its separator (the whole id if there is none).
pub fn initiative_type(initiative_id: &str) -> &str {
    initiative_id
        .split(ID_SEPARATOR)
        .next()
        .unwrap_or(initiative_id)
}

/// Map one raw record to its normalized shape.
///
/// The topology carries only the type code; levels are attached once the
/// whole batch has been resolved.
pub fn transform_record(key: &str, raw: &RawListingRecord) -> Result<NormalizedInitiative> {
    let initiative_id = raw
        .id_iniciativa
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CongresoError::listing(key, "missing id_iniciativa"))?;
    let legislatura = raw
        .legislatura
        .as_deref()
        .ok_or_else(|| CongresoError::listing(key, "missing legislatura"))?;
    let term = parse_term_code(legislatura)
        .map_err(|e| CongresoError::listing(key, e.to_string()))?;
    let code = initiative_type(initiative_id).to_string();

    Ok(NormalizedInitiative {
        term,
        initiative_id: initiative_id.to_string(),
        initiative_type: code.clone(),
        title: raw.titulo.clone(),
        presented_date: raw.fecha_presentado.clone(),
        qualified_date: raw.fecha_calificado.clone(),
        result: raw.resultado_tram.clone(),
        topology_data: TopologyData {
            code,
            supertype: None,
            kind: None,
            subtype: None,
            subsubtype: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawListingRecord {
        serde_json::from_value(value).expect("raw record")
    }

    #[test]
    fn key_order_reads_numeric_suffix() {
        assert_eq!(key_order("iniciativa12").unwrap(), 12);
        assert_eq!(key_order("iniciativa0007").unwrap(), 7);
        assert!(key_order("iniciativa").is_err());
        assert!(key_order("12iniciativa").is_err());
    }

    #[test]
    fn records_sort_numerically_not_lexically() {
        let map = json!({
            "iniciativa10": {"id_iniciativa": "121/10", "legislatura": "XV"},
            "iniciativa9": {"id_iniciativa": "121/9", "legislatura": "XV"},
            "iniciativa1": {"id_iniciativa": "121/1", "legislatura": "XV"},
        });
        let ordered = order_records(map.as_object().unwrap()).unwrap();
        let keys: Vec<&str> = ordered.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["iniciativa1", "iniciativa9", "iniciativa10"]);
    }

    #[test]
    fn non_object_record_is_fatal() {
        let map = json!({"iniciativa1": "oops"});
        let err = order_records(map.as_object().unwrap()).unwrap_err();
        assert!(err.to_string().contains("iniciativa1"));
    }

    #[test]
    fn transform_maps_fields() {
        let record = raw(json!({
            "atis": "Proyectos",
            "id_iniciativa": "121/000036",
            "legislatura": "XIV",
            "titulo": "Proyecto de Ley de ...",
            "fecha_presentado": "05/03/2021",
            "fecha_calificado": "09/03/2021",
            "resultado_tram": "Aprobado con modificaciones",
        }));
        let initiative = transform_record("iniciativa1", &record).unwrap();
        assert_eq!(initiative.term, 14);
        assert_eq!(initiative.initiative_id, "121/000036");
        assert_eq!(initiative.initiative_type, "121");
        assert_eq!(initiative.title.as_deref(), Some("Proyecto de Ley de ..."));
        assert_eq!(initiative.presented_date.as_deref(), Some("05/03/2021"));
        assert_eq!(initiative.qualified_date.as_deref(), Some("09/03/2021"));
        assert_eq!(
            initiative.result.as_deref(),
            Some("Aprobado con modificaciones")
        );
        assert_eq!(initiative.topology_data.code, "121");
        assert_eq!(record.topology.atis.as_deref(), Some("Proyectos"));
    }

    #[test]
    fn constituent_term_is_zero() {
        let record = raw(json!({"id_iniciativa": "1/1", "legislatura": "C"}));
        assert_eq!(transform_record("k1", &record).unwrap().term, 0);
    }

    #[test]
    fn id_without_separator_is_its_own_type() {
        assert_eq!(initiative_type("121"), "121");
        assert_eq!(initiative_type("162/000123"), "162");
    }

    #[test]
    fn missing_identity_is_fatal() {
        let record = raw(json!({"legislatura": "XV"}));
        assert!(transform_record("k1", &record).is_err());

        let record = raw(json!({"id_iniciativa": "1/1", "legislatura": "ZZ"}));
        let err = transform_record("k1", &record).unwrap_err();
        assert!(err.to_string().contains("k1"));
    }
}
