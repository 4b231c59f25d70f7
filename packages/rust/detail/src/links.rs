//! Link and text helpers shared by the detail extractors.

use scraper::{ElementRef, Selector};
use url::Url;

/// Parse a selector that is fixed at compile time.
pub(crate) fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

/// Trimmed text content of an element.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Concatenated text of every match under `scope`, trimmed; `None` when empty.
pub(crate) fn text_of(scope: ElementRef<'_>, css: &str) -> Option<String> {
    let selector = sel(css);
    let text = scope
        .select(&selector)
        .flat_map(|el| el.text())
        .collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Value of query parameter `name` in `href`, resolved against `base`.
///
/// A parameter present with an empty value yields `Some("")`.
pub fn query_param(href: &str, base: &Url, name: &str) -> Option<String> {
    let url = base.join(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Every `href` of links under `scope` whose target contains `dosieres`.
pub(crate) fn dossier_urls(scope: ElementRef<'_>) -> Vec<String> {
    let selector = sel(r#"a[href*="dosieres"]"#);
    scope
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Code carried by a rapporteur link: the text after the first `=` up to the next `&`.
pub fn parlamentary_code(href: &str) -> Option<&str> {
    let (_, rest) = href.split_once('=')?;
    rest.split('&').next()
}

/// Codes of every rapporteur link (`.ponentes a`). Links without a code are skipped.
pub(crate) fn parlamentary_codes(scope: ElementRef<'_>) -> Vec<String> {
    let selector = sel(".ponentes a");
    scope
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(parlamentary_code)
        .map(str::to_string)
        .collect()
}
