//! Term catalogue of the listing page.
//!
//! The term `<select>` lists one `<option>` per legislature, e.g.
//! `XV Legislatura (17/08/2023 - )` or
//! `Legislatura Constituyente (13/07/1977 - 02/01/1979)`.

use congreso_shared::{Term, roman_to_int};
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};

/// Word that opens the constituent term's label.
const CONSTITUENT_LABEL: &str = "Legislatura";

/// Parse every term option of a listing page.
///
/// Options without a term token (e.g. "Todas") are skipped, as are options
/// whose numeral cannot be read.
#[instrument(skip_all)]
pub fn parse_terms(html: &str) -> Vec<Term> {
    let doc = Html::parse_document(html);
    let option_sel = Selector::parse("#_iniciativas_legislatura option").expect("option selector");

    let terms: Vec<Term> = doc
        .select(&option_sel)
        .filter_map(|option| {
            let label = option.text().collect::<String>();
            parse_term_label(label.trim())
        })
        .collect();

    debug!(terms = terms.len(), "term catalogue parsed");
    terms
}

/// Parse a single option label.
fn parse_term_label(label: &str) -> Option<Term> {
    let (head, rest) = label.split_once('(')?;
    let token = head.split_whitespace().next()?;

    let term = if token == CONSTITUENT_LABEL {
        0
    } else {
        match roman_to_int(token) {
            Ok(term) => term,
            Err(e) => {
                warn!(label, error = %e, "skipping term option");
                return None;
            }
        }
    };

    let dates = rest.split(')').next().unwrap_or(rest);
    let mut parts = dates.split('-').map(str::trim);
    let date = |part: Option<&str>| part.filter(|s| !s.is_empty()).map(str::to_string);

    Some(Term {
        term,
        start_date: date(parts.next()),
        end_date: date(parts.next()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_fixture(name: &str) -> String {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/html")
            .join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("missing fixture: {}", path.display()))
    }

    #[test]
    fn label_with_open_end() {
        let term = parse_term_label("XV Legislatura (17/08/2023 - )").unwrap();
        assert_eq!(term.term, 15);
        assert_eq!(term.start_date.as_deref(), Some("17/08/2023"));
        assert_eq!(term.end_date, None);
    }

    #[test]
    fn constituent_label_is_term_zero() {
        let term =
            parse_term_label("Legislatura Constituyente (13/07/1977 - 02/01/1979)").unwrap();
        assert_eq!(term.term, 0);
        assert_eq!(term.end_date.as_deref(), Some("02/01/1979"));
    }

    #[test]
    fn labels_without_dates_are_skipped() {
        assert!(parse_term_label("Todas").is_none());
        assert!(parse_term_label("QQ Legislatura (01/01/2000 - 01/01/2004)").is_none());
    }

    #[test]
    fn terms_fixture() {
        let terms = parse_terms(&load_fixture("terms.html"));
        let numbers: Vec<u32> = terms.iter().map(|t| t.term).collect();
        assert_eq!(numbers, [15, 14, 13, 0]);
        assert_eq!(terms[1].start_date.as_deref(), Some("03/12/2019"));
        assert_eq!(terms[1].end_date.as_deref(), Some("16/08/2023"));
    }

    #[test]
    fn page_without_selector_yields_nothing() {
        assert!(parse_terms("<html><body><p>mantenimiento</p></body></html>").is_empty());
    }
}
