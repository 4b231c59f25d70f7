//! Topology resolution for listing records.
//!
//! The listing API only states a classification level on the record where
//! that level changes; every following record inherits it. Resolution is a
//! left fold over the batch in key order, with [`TopologyState`] as the
//! accumulator. Each batch starts from its own state value, so unrelated or
//! concurrent batches never observe each other.

use congreso_shared::TopologyData;
use serde::Deserialize;

/// The topology fields a raw listing record may carry.
///
/// A field counts as present only when it holds a non-empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TopologyFields {
    /// Supertype label.
    #[serde(default)]
    pub atis: Option<String>,
    /// Type label (resets subtypes).
    #[serde(default)]
    pub atip: Option<String>,
    /// Alternate type label; becomes the subtype when `atis` and `atip` are both present.
    #[serde(default)]
    pub tpai: Option<String>,
    /// Leaf label, placed relative to the other fields or the carried state.
    #[serde(default)]
    pub tipo: Option<String>,
}

impl TopologyFields {
    /// Whether the record carries no topology information at all.
    pub fn is_empty(&self) -> bool {
        [&self.atis, &self.atip, &self.tpai, &self.tipo]
            .into_iter()
            .all(|f| level(f).is_none())
    }
}

/// Lowercased value of a present field.
fn level(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// The four-level classification carried from record to record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyState {
    pub supertype: Option<String>,
    pub kind: Option<String>,
    pub subtype: Option<String>,
    pub subsubtype: Option<String>,
}

impl TopologyState {
    /// Apply one record's fields. The first matching rule wins:
    ///
    /// 1. `atis` starts a new supertype and rebuilds the lower levels from
    ///    `atip` / `tpai` / `tipo` on the same record.
    /// 2. `atip` (or else `tpai`) replaces the type; `tipo` becomes the subtype.
    /// 3. A lone `tipo` fills the type if no subtype is set, else the subtype
    ///    if no subsubtype is set, else the subsubtype.
    /// 4. No fields: the state carries forward unchanged.
    pub fn apply(&mut self, fields: &TopologyFields) {
        let atis = level(&fields.atis);
        let atip = level(&fields.atip);
        let tpai = level(&fields.tpai);
        let tipo = level(&fields.tipo);

        if let Some(supertype) = atis {
            *self = Self {
                supertype: Some(supertype),
                ..Self::default()
            };
            if let Some(kind) = atip {
                self.kind = Some(kind);
                if let Some(subtype) = tpai {
                    self.subtype = Some(subtype);
                    self.subsubtype = tipo;
                } else {
                    self.subtype = tipo;
                }
            } else {
                self.kind = tipo;
            }
        } else if let Some(kind) = atip.or(tpai) {
            self.kind = Some(kind);
            self.subtype = tipo;
            self.subsubtype = None;
        } else if let Some(tipo) = tipo {
            if self.subtype.is_none() {
                self.kind = Some(tipo);
                self.subsubtype = None;
            } else if self.subsubtype.is_none() {
                self.subtype = Some(tipo);
            } else {
                self.subsubtype = Some(tipo);
            }
        }
    }

    /// Output form for an initiative of type `code`, keeping only set levels.
    pub fn to_data(&self, code: &str) -> TopologyData {
        TopologyData {
            code: code.to_string(),
            supertype: self.supertype.clone(),
            kind: self.kind.clone(),
            subtype: self.subtype.clone(),
            subsubtype: self.subsubtype.clone(),
        }
    }
}

/// Resolve a batch of records, already in ascending key order.
///
/// Returns the final state together with the resolved state of every record,
/// by position.
pub fn resolve_batch<'a>(
    state: TopologyState,
    records: impl IntoIterator<Item = &'a TopologyFields>,
) -> (TopologyState, Vec<TopologyState>) {
    records
        .into_iter()
        .fold((state, Vec::new()), |(mut state, mut resolved), fields| {
            state.apply(fields);
            resolved.push(state.clone());
            (state, resolved)
        })
}
