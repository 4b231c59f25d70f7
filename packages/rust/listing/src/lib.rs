//! Listing payload normalization.
//!
//! This crate provides:
//! - [`topology`]: the order-dependent topology resolver
//! - [`record`]: raw listing records and their normalized mapping
//! - [`normalize_listing`] / [`normalize_listing_page`]: the batch entry points
//! - [`terms`]: the term catalogue of the listing page

pub mod record;
pub mod terms;
pub mod topology;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use congreso_shared::{CongresoError, ExtractOptions, ListingPage, NormalizedInitiative, Result};

pub use record::{RawListingRecord, key_order, order_records, transform_record};
pub use terms::parse_terms;
pub use topology::{TopologyFields, TopologyState, resolve_batch};

/// Normalize one batch of listing records (the `lista_iniciativas` mapping).
///
/// Every record is decoded and validated before topology resolution starts, so
/// a malformed record fails the whole batch without a partial result.
#[instrument(skip_all, fields(records = records.len()))]
pub fn normalize_listing(records: &Map<String, Value>) -> Result<Vec<NormalizedInitiative>> {
    let ordered = order_records(records)?;

    let mut initiatives = ordered
        .iter()
        .map(|(key, raw)| transform_record(key, raw))
        .collect::<Result<Vec<_>>>()?;

    let (_, resolved) = resolve_batch(
        TopologyState::default(),
        ordered.iter().map(|(_, raw)| &raw.topology),
    );

    for (initiative, topology) in initiatives.iter_mut().zip(&resolved) {
        initiative.topology_data = topology.to_data(&initiative.initiative_type);
    }

    debug!(initiatives = initiatives.len(), "listing batch normalized");
    Ok(initiatives)
}

/// Normalize a full listing response:
/// `{"iniciativas_encontradas": n, "lista_iniciativas": {...}}`.
#[instrument(skip_all, fields(page_size = opts.page_size))]
pub fn normalize_listing_page(payload: &Value, opts: &ExtractOptions) -> Result<ListingPage> {
    let items = match payload.get("iniciativas_encontradas") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        CongresoError::listing(
            "iniciativas_encontradas",
            "expected a non-negative item count",
        )
    })?;

    let empty = Map::new();
    let records = match payload.get("lista_iniciativas") {
        Some(Value::Object(map)) => map,
        // The API encodes an empty result set as an empty array.
        Some(Value::Array(list)) if list.is_empty() => &empty,
        None | Some(Value::Null) => &empty,
        Some(_) => {
            return Err(CongresoError::listing(
                "lista_iniciativas",
                "expected a keyed mapping of records",
            ));
        }
    };

    let initiatives = normalize_listing(records)?;
    let pages = items.div_ceil(u64::from(opts.page_size.max(1)));

    Ok(ListingPage {
        items,
        pages,
        initiatives,
    })
}
