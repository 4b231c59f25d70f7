//! Competent commissions of a detail page.

use std::sync::LazyLock;

use congreso_shared::CompetentCommission;
use regex::Regex;
use scraper::ElementRef;

use crate::links::{element_text, sel};

/// Parent body code in a commission link.
static BODY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_organos_selectedOrganoSup=([^&]+)").expect("body regex")
});

/// Sub-body code in a commission link.
static SUB_BODY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_organos_selectedSuborgano=([^&]+)").expect("sub-body regex")
});

fn capture(re: &Regex, href: Option<&str>) -> Option<String> {
    re.captures(href?).map(|caps| caps[1].to_string())
}

/// `(body, sub_body)` codes of a single commission link.
pub fn body_codes(href: Option<&str>) -> (Option<String>, Option<String>) {
    (capture(&BODY_RE, href), capture(&SUB_BODY_RE, href))
}

/// One entry per `.comisionesCompetentes li`, with one body/sub-body slot per link.
pub(crate) fn extract_commissions(container: ElementRef<'_>) -> Vec<CompetentCommission> {
    let item_sel = sel(".comisionesCompetentes li");
    let link_sel = sel("a");

    container
        .select(&item_sel)
        .map(|item| {
            let mut body = Vec::new();
            let mut sub_body = Vec::new();
            let mut names = Vec::new();

            for link in item.select(&link_sel) {
                let (b, s) = body_codes(link.value().attr("href"));
                body.push(b);
                sub_body.push(s);
                names.push(element_text(link));
            }

            CompetentCommission {
                body,
                sub_body,
                name: names.join(", "),
            }
        })
        .collect()
}
