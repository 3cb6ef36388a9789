//! Search-result page parsing.

use kupo_core::CandidateEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Class token that marks one search result.
pub const ENTRY_CLASS: &str = "entry";

static CLASSED: Lazy<Selector> = Lazy::new(|| Selector::parse("[class]").expect("static selector"));
static ENTRY_NAME: Lazy<Selector> = Lazy::new(|| Selector::parse("p.entry__name").expect("static selector"));
static LINKS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("static selector"));
static DETAIL_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/lodestone/character/(\d+)/").expect("static regex"));

/// True only when the element's class list is exactly `["entry"]`.
///
/// `class="entry entry--active"` and `class="entry__name"` are rejected.
pub fn is_entry_marker(element: &Element) -> bool {
    element
        .attr("class")
        .is_some_and(|classes| classes.split_whitespace().eq([ENTRY_CLASS]))
}

/// Extract every well-formed entry in document order.
///
/// Entries without a name element or without a detail link are skipped.
pub fn parse_search_results(html: &str) -> Vec<CandidateEntry> {
    let document = Html::parse_document(html);
    document
        .select(&CLASSED)
        .filter(|el| is_entry_marker(el.value()))
        .filter_map(parse_entry)
        .collect()
}

fn parse_entry(entry: ElementRef<'_>) -> Option<CandidateEntry> {
    let Some(name_el) = entry.select(&ENTRY_NAME).next() else {
        debug!("Skipping search entry without a name element");
        return None;
    };
    let display_name = name_el.text().collect::<String>().trim().to_string();

    let identifier = entry
        .select(&LINKS)
        .filter_map(|a| a.value().attr("href"))
        .find_map(|href| DETAIL_LINK.captures(href).map(|caps| caps[1].to_string()));

    match identifier {
        Some(identifier) => Some(CandidateEntry { display_name, identifier }),
        None => {
            debug!(name = %display_name, "Skipping search entry without a detail link");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = r#"
<html><body>
  <div class="ldst__window">
    <div class="entry">
      <a href="/lodestone/character/100/" class="entry__link">
        <div class="entry__box"><p class="entry__name"> Alice Smith </p><p class="entry__world">Gaia</p></div>
      </a>
    </div>
    <div class="entry">
      <a href="/lodestone/character/200/" class="entry__link"><p class="entry__name">Alice Smithson</p></a>
    </div>
    <div class="entry entry--featured">
      <a href="/lodestone/character/300/"><p class="entry__name">Alice Smith</p></a>
    </div>
    <div class="entry">
      <a href="/lodestone/character/400/"><span>no name element</span></a>
    </div>
    <div class="entry">
      <p class="entry__name">No Link</p><a href="/lodestone/freecompany/9/">fc</a>
    </div>
  </div>
</body></html>"#;

    fn element(html: &str) -> Element {
        let fragment = Html::parse_fragment(html);
        let div = Selector::parse("div").unwrap();
        let el = fragment.select(&div).next().unwrap().value().clone();
        el
    }

    #[test]
    fn marker_requires_the_single_entry_class() {
        assert!(is_entry_marker(&element(r#"<div class="entry"></div>"#)));
        assert!(is_entry_marker(&element(r#"<div class=" entry "></div>"#)));
        assert!(!is_entry_marker(&element(r#"<div class="entry entry--featured"></div>"#)));
        assert!(!is_entry_marker(&element(r#"<div class="entry__name"></div>"#)));
        assert!(!is_entry_marker(&element(r#"<div class=""></div>"#)));
        assert!(!is_entry_marker(&element(r#"<div></div>"#)));
    }

    #[test]
    fn parses_entries_in_document_order_and_skips_malformed() {
        let entries = parse_search_results(RESULTS);
        assert_eq!(
            entries,
            vec![
                CandidateEntry::new("Alice Smith", "100"),
                CandidateEntry::new("Alice Smithson", "200"),
            ]
        );
    }

    #[test]
    fn page_without_entries_parses_to_nothing() {
        assert!(parse_search_results("<html><body><p>0 results</p></body></html>").is_empty());
    }
}
