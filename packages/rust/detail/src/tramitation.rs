//! Procedure timeline of a detail page.
//!
//! `.iniciativaTramitacion` holds one event per line, separated by `<br>`:
//! `Comisión de Justicia Publicación desde 12/12/2023 hasta 19/12/2023`.

use congreso_shared::TramitationEvent;
use scraper::ElementRef;

use crate::links::sel;

const LINE_BREAK: &str = "br";
const START_WORD: &str = "desde";
const END_WORD: &str = "hasta";

/// Parse one timeline line. The name is every token before the first `desde`
/// (the whole line when there is none).
pub fn parse_event(line: &str) -> TramitationEvent {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let after = |word: &str| {
        tokens
            .iter()
            .position(|t| *t == word)
            .and_then(|i| tokens.get(i + 1))
            .map(|t| t.to_string())
    };
    let name_end = tokens
        .iter()
        .position(|t| *t == START_WORD)
        .unwrap_or(tokens.len());

    TramitationEvent {
        name: tokens[..name_end].join(" "),
        start_date: after(START_WORD),
        end_date: after(END_WORD),
    }
}

/// Events of the first `.iniciativaTramitacion` under `container`.
pub(crate) fn extract_tramitation(container: ElementRef<'_>) -> Vec<TramitationEvent> {
    let fragment_sel = sel(".iniciativaTramitacion");
    let Some(fragment) = container.select(&fragment_sel).next() else {
        return Vec::new();
    };

    let mut lines = vec![String::new()];
    for node in fragment.descendants() {
        let value = node.value();
        if let Some(text) = value.as_text() {
            if let Some(line) = lines.last_mut() {
                line.push_str(text);
            }
        } else if value.as_element().is_some_and(|el| el.name() == LINE_BREAK) {
            lines.push(String::new());
        }
    }

    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_event(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn full_event() {
        let event = parse_event("Comisión de Justicia Enmiendas desde 12/12/2023 hasta 19/12/2023");
        assert_eq!(event.name, "Comisión de Justicia Enmiendas");
        assert_eq!(event.start_date.as_deref(), Some("12/12/2023"));
        assert_eq!(event.end_date.as_deref(), Some("19/12/2023"));
    }

    #[test]
    fn open_event() {
        let event = parse_event("Pleno desde 20/02/2024");
        assert_eq!(event.name, "Pleno");
        assert_eq!(event.start_date.as_deref(), Some("20/02/2024"));
        assert_eq!(event.end_date, None);
    }

    #[test]
    fn event_without_dates_keeps_whole_name() {
        let event = parse_event("  Concluido   -  Aprobado ");
        assert_eq!(event.name, "Concluido - Aprobado");
        assert_eq!(event.start_date, None);
        assert_eq!(event.end_date, None);
    }

    #[test]
    fn trailing_keyword_has_no_date() {
        let event = parse_event("Senado desde");
        assert_eq!(event.name, "Senado");
        assert_eq!(event.start_date, None);
    }

    #[test]
    fn splits_on_line_breaks_and_strips_markup() {
        let html = r#"<div class="iniciativaTramitacion">
            Gobierno Contestación desde 05/09/2023 hasta 30/10/2023<br>
            <b>Comisión</b> de Igualdad&nbsp;Tramitación desde 31/10/2023<br/>
        </div>"#;
        let doc = Html::parse_fragment(html);
        let events = extract_tramitation(doc.root_element());

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Gobierno Contestación");
        assert_eq!(events[1].name, "Comisión de Igualdad Tramitación");
        assert_eq!(events[1].start_date.as_deref(), Some("31/10/2023"));
    }

    #[test]
    fn line_break_with_attributes_still_splits() {
        let html = r#"<div class="iniciativaTramitacion">A desde 01/01/2020<br class="x">B desde 02/02/2020</div>"#;
        let doc = Html::parse_fragment(html);
        let events = extract_tramitation(doc.root_element());

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].start_date.as_deref(), Some("01/01/2020"));
        assert_eq!(events[1].name, "B");
        assert_eq!(events[1].start_date.as_deref(), Some("02/02/2020"));
    }

    #[test]
    fn missing_fragment_yields_empty_timeline() {
        let doc = Html::parse_fragment("<div class='iniciativa'></div>");
        assert!(extract_tramitation(doc.root_element()).is_empty());
    }
}
