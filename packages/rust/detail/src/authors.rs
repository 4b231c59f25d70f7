//! Author list of a detail page.
//!
//! Authors are the `li` items of the `ul` that directly follows the "Autor"
//! heading. Deputies and groups are linked and told apart by the query of
//! their link; everything else is classified by its label.

use congreso_shared::AuthorRef;
use scraper::ElementRef;
use url::Url;

use crate::links::{element_text, query_param, sel};

/// Query parameter identifying a deputy.
pub const REPRESENTATIVE_PARAM: &str = "codParlamentario";
/// Query parameter identifying a parliamentary group.
pub const GROUP_PARAM: &str = "idGrupo";

const AUTHOR_HEADING: &str = "Autor";
const COMMISSION_PREFIX: &str = "comisión";
const SUBCOMMISSION_PREFIX: &str = "subcomisión";

/// Classify one author entry from its (first) link target and its text.
///
/// A link identifying a deputy or a group wins regardless of the text; any
/// other link falls through to classification by label.
pub fn classify_author(href: Option<&str>, text: &str, base: &Url) -> AuthorRef {
    if let Some(href) = href {
        if let Some(id) = query_param(href, base, REPRESENTATIVE_PARAM) {
            return AuthorRef::Representative { id };
        }
        if let Some(id) = query_param(href, base, GROUP_PARAM) {
            return AuthorRef::Group { id };
        }
    }
    classify_by_name(text)
}

/// Classify an unlinked author by the case-insensitive prefix of its label.
pub fn classify_by_name(text: &str) -> AuthorRef {
    let lower = text.to_lowercase();
    let name = text.to_string();
    if lower.starts_with(COMMISSION_PREFIX) {
        AuthorRef::Commission { name }
    } else if lower.starts_with(SUBCOMMISSION_PREFIX) {
        AuthorRef::Subcommission { name }
    } else {
        AuthorRef::Other { name }
    }
}

/// Extract every author under `container`. No heading, or no list right after
/// it, yields an empty list.
pub(crate) fn extract_authors(container: ElementRef<'_>, base: &Url) -> Vec<AuthorRef> {
    let heading_sel = sel("h3");
    let item_sel = sel("li");
    let link_sel = sel("a");

    container
        .select(&heading_sel)
        .filter(|h3| h3.text().any(|t| t.contains(AUTHOR_HEADING)))
        .filter_map(|h3| h3.next_siblings().find_map(ElementRef::wrap))
        .filter(|next| next.value().name() == "ul")
        .flat_map(|list| list.select(&item_sel).collect::<Vec<_>>())
        .map(|item| {
            let href = item
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"));
            classify_author(href, &element_text(item), base)
        })
        .collect()
}
