//! Detail page extraction.
//!
//! Parses the HTML detail page of one initiative into a [`DetailRecord`]:
//! - [`authors`]: author list, classified into [`AuthorRef`](congreso_shared::AuthorRef)
//! - [`commissions`]: competent commissions with parallel body / sub-body codes
//! - [`tramitation`]: the procedure timeline
//! - publication lists (bulletins, diaries, BOE) through positional schemas
//! - [`prune`]: removal of empty fields from the finished record
//!
//! Each sub-extraction is independent: a missing section yields an empty
//! result and never affects the others. Only a page without the initiative
//! container is an error.

pub mod authors;
pub mod commissions;
pub mod links;
pub mod prune;
mod schema;
pub mod tramitation;

use scraper::{Html, Selector};
use tracing::{debug, instrument};

use congreso_shared::{CongresoError, DetailRecord, ExtractOptions, Result};

pub use authors::{classify_author, classify_by_name};
pub use prune::{prune, prune_record};

/// Extract every sub-entity of a detail page, before pruning.
///
/// `term` and `initiative_id` are left unset; they belong to the caller.
#[instrument(skip_all, fields(bytes = html.len()))]
pub fn extract_detail(html: &str, opts: &ExtractOptions) -> Result<DetailRecord> {
    let container_sel = Selector::parse(&opts.container_selector).map_err(|e| {
        CongresoError::config(format!(
            "invalid container selector {:?}: {e}",
            opts.container_selector
        ))
    })?;

    let doc = Html::parse_document(html);
    let container = doc.select(&container_sel).next().ok_or_else(|| {
        CongresoError::parse(format!(
            "no initiative container matching {:?}",
            opts.container_selector
        ))
    })?;

    let record = DetailRecord {
        term: None,
        initiative_id: None,
        dossier_urls: links::dossier_urls(container),
        author: authors::extract_authors(container, &opts.base_url),
        status: links::text_of(container, ".situacionActual"),
        result: links::text_of(container, ".resultadoTramitacion"),
        tramitation_type: links::text_of(container, ".tipoTramitacion"),
        competent_commissions: commissions::extract_commissions(container),
        parlamentary_codes: links::parlamentary_codes(container),
        initiative_tramitation: tramitation::extract_tramitation(container),
        bulletins: schema::bulletins(container),
        diaries: schema::diaries(container),
        boes: schema::boes(container),
    };

    debug!(
        authors = record.author.len(),
        commissions = record.competent_commissions.len(),
        events = record.initiative_tramitation.len(),
        bulletins = record.bulletins.len(),
        diaries = record.diaries.len(),
        boes = record.boes.len(),
        "detail page extracted"
    );

    Ok(record)
}
