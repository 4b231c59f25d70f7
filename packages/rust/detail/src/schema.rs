//! Positional schemas for the publication lists of a detail page.
//!
//! Bulletins, diaries and BOE entries are all `li` items whose first `div`
//! carries the label and whose links sit at fixed positions. Each list gets
//! its own [`ListSchema`]; [`extract_rows`] applies one schema and a typed
//! constructor shapes the row.

use congreso_shared::{Boe, Bulletin, Diary};
use scraper::ElementRef;

use crate::links::sel;

/// Where the links of a list item live.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Slot {
    /// Every link matched by the selector.
    All(&'static str),
    /// Only the first element matched by the selector.
    First(&'static str),
}

/// Positional layout of one publication list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListSchema {
    /// Selector of the list items, relative to the initiative container.
    pub items: &'static str,
    /// Selector of the label, relative to the item.
    pub label: &'static str,
    /// Link slots, relative to the item.
    pub slots: &'static [Slot],
}

pub(crate) const BULLETINS: ListSchema = ListSchema {
    items: ".boletines li",
    label: "div:first-child",
    slots: &[Slot::All("a")],
};

pub(crate) const DIARIES: ListSchema = ListSchema {
    items: ".diarios li",
    label: "div:first-child",
    slots: &[
        Slot::First("div:nth-child(2) a:first-child"),
        Slot::First("div:nth-child(2) a:nth-child(2)"),
    ],
};

pub(crate) const BOES: ListSchema = ListSchema {
    items: ".boes li",
    label: "div:first-child",
    slots: &[Slot::First("div:nth-child(2) a")],
};

/// One list item read through a schema: the label and the hrefs per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Row {
    pub text: String,
    pub links: Vec<Vec<String>>,
}

impl Row {
    fn first(&self, slot: usize) -> Option<String> {
        self.links.get(slot).and_then(|l| l.first()).cloned()
    }

    fn all(&self, slot: usize) -> Vec<String> {
        self.links.get(slot).cloned().unwrap_or_default()
    }
}

/// Read every item of `schema` under `container`.
///
/// A slot with no matching link, or whose first match has no `href`, is empty.
pub(crate) fn extract_rows(container: ElementRef<'_>, schema: &ListSchema) -> Vec<Row> {
    let item_sel = sel(schema.items);
    let label_sel = sel(schema.label);
    let slot_sels: Vec<_> = schema
        .slots
        .iter()
        .map(|slot| match *slot {
            Slot::All(css) => (true, sel(css)),
            Slot::First(css) => (false, sel(css)),
        })
        .collect();

    container
        .select(&item_sel)
        .map(|item| {
            let text = item
                .select(&label_sel)
                .flat_map(|el| el.text())
                .collect::<String>()
                .trim()
                .to_string();

            let links = slot_sels
                .iter()
                .map(|(all, selector)| -> Vec<String> {
                    let hrefs = item.select(selector).map(|a| a.value().attr("href"));
                    if *all {
                        hrefs.flatten().map(str::to_string).collect()
                    } else {
                        hrefs
                            .take(1)
                            .flatten()
                            .map(str::to_string)
                            .collect()
                    }
                })
                .collect();

            Row { text, links }
        })
        .collect()
}

pub(crate) fn bulletins(container: ElementRef<'_>) -> Vec<Bulletin> {
    extract_rows(container, &BULLETINS)
        .into_iter()
        .map(|row| Bulletin {
            urls: row.all(0),
            text: row.text,
        })
        .collect()
}

pub(crate) fn diaries(container: ElementRef<'_>) -> Vec<Diary> {
    extract_rows(container, &DIARIES)
        .into_iter()
        .map(|row| Diary {
            url_text: row.first(0),
            url_pdf: row.first(1),
            text: row.text,
        })
        .collect()
}

pub(crate) fn boes(container: ElementRef<'_>) -> Vec<Boe> {
    extract_rows(container, &BOES)
        .into_iter()
        .map(|row| Boe {
            url: row.first(0),
            text: row.text,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn bulletin_collects_every_link() {
        let html = r#"<ul class="boletines"><li>
            <div>BOCG. Congreso de los Diputados Núm. A-1-1 de 01/12/2023</div>
            <div><a href="/b/1.PDF">PDF</a> <a href="/b/1.CODI.">Texto</a></div>
        </li></ul>"#;
        let doc = Html::parse_fragment(html);
        let rows = bulletins(doc.root_element());
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].text,
            "BOCG. Congreso de los Diputados Núm. A-1-1 de 01/12/2023"
        );
        assert_eq!(rows[0].urls, vec!["/b/1.PDF", "/b/1.CODI."]);
    }

    #[test]
    fn diary_reads_two_fixed_positions() {
        let html = r#"<ul class="diarios">
            <li><div>DS. Pleno Núm. 10</div><div><a href="/d/10.CODI.">Texto</a><a href="/d/10.PDF">PDF</a></div></li>
            <li><div>DS. Comisión Núm. 4</div><div><a href="/d/4.CODI.">Texto</a></div></li>
            <li><div>DS. sin enlaces</div></li>
        </ul>"#;
        let doc = Html::parse_fragment(html);
        let rows = diaries(doc.root_element());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].url_text.as_deref(), Some("/d/10.CODI."));
        assert_eq!(rows[0].url_pdf.as_deref(), Some("/d/10.PDF"));
        assert_eq!(rows[1].url_pdf, None);
        assert_eq!(rows[2].text, "DS. sin enlaces");
        assert_eq!(rows[2].url_text, None);
    }

    #[test]
    fn boe_reads_single_link() {
        let html = r#"<ul class="boes">
            <li><div>BOE Núm. 75 de 26/03/2024</div><div><a href="https://www.boe.es/x">BOE</a></div></li>
            <li><div>BOE sin enlace</div><div><a>BOE</a></div></li>
        </ul>"#;
        let doc = Html::parse_fragment(html);
        let rows = boes(doc.root_element());

        assert_eq!(rows[0].url.as_deref(), Some("https://www.boe.es/x"));
        assert_eq!(rows[1].url, None);
    }

    #[test]
    fn missing_list_is_empty() {
        let doc = Html::parse_fragment("<div></div>");
        assert!(extract_rows(doc.root_element(), &BULLETINS).is_empty());
    }
}
