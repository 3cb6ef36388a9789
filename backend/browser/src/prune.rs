//! DOM pruning.
//!
//! Keeps one element together with its chain of ancestors up to `<body>` and
//! drops everything else in the body, so the kept region renders with the
//! page's own layout and stylesheets but without surrounding chrome.
//!
//! [`prune_script`] runs the walk on a live page; [`prune_document`] is the
//! same walk over parsed HTML.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use thiserror::Error;

static STRIPPED: Lazy<Selector> = Lazy::new(|| Selector::parse("nav, script").expect("static selector"));

/// In-page pruning function. Takes the keep selector and returns `false`
/// when nothing matches. Written without arrow functions so the CDP client
/// evaluates it as a plain expression.
const PRUNE_FUNCTION: &str = r#"(function (selector) {
  var keep = document.querySelector(selector);
  if (!keep) { return false; }
  var current = keep;
  while (current !== document.body && current.parentElement) {
    var parent = current.parentElement;
    Array.prototype.slice.call(parent.childNodes).forEach(function (child) {
      if (child !== current) { parent.removeChild(child); }
    });
    current = parent;
  }
  document.querySelectorAll("nav, script").forEach(function (el) { el.remove(); });
  return true;
})"#;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PruneError {
    #[error("invalid keep selector `{0}`")]
    InvalidSelector(String),
    #[error("keep selector `{0}` matched no element")]
    NoMatch(String),
}

/// Prune `html` down to the first element matching `keep_selector`.
///
/// At every level from the kept element up to `<body>`, all sibling nodes
/// not on the path are removed. Every `nav` and `script` element in the
/// document is removed as well. `<head>` is left intact.
pub fn prune_document(html: &str, keep_selector: &str) -> Result<String, PruneError> {
    let selector =
        Selector::parse(keep_selector).map_err(|_| PruneError::InvalidSelector(keep_selector.to_string()))?;
    let mut document = Html::parse_document(html);

    let keep = document
        .select(&selector)
        .next()
        .ok_or_else(|| PruneError::NoMatch(keep_selector.to_string()))?;

    let mut doomed = Vec::new();
    let mut current = *keep;
    while !is_element_named(current.value(), "body") {
        let Some(parent) = current.parent() else { break };
        if !parent.value().is_element() {
            break;
        }
        doomed.extend(parent.children().filter(|c| c.id() != current.id()).map(|c| c.id()));
        current = parent;
    }
    doomed.extend(document.select(&STRIPPED).map(|el| el.id()));

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    Ok(document.html())
}

/// JavaScript expression that prunes the current document to the first
/// element matching `keep_selector` and evaluates to whether it matched.
pub fn prune_script(keep_selector: &str) -> String {
    // A JSON string literal is a valid JS string literal.
    let literal = serde_json::Value::String(keep_selector.to_string()).to_string();
    format!("{PRUNE_FUNCTION}({literal})")
}

fn is_element_named(node: &scraper::Node, name: &str) -> bool {
    node.as_element().is_some_and(|el| el.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Profile</title><link rel="stylesheet" href="/app.css"><script>var a = 1;</script></head>
<body>
  <nav id="top">menu</nav>
  <header id="banner">banner</header>
  <div id="layout">
    <aside id="sidebar">ads</aside>
    <main id="main">
      <div id="crumbs">a / b</div>
      <section id="keep" class="flex flex-row">
        <h1>Alice Smith</h1>
        <div id="stats"><span>Lv 100</span><script>track()</script><nav id="inner-nav">tabs</nav></div>
      </section>
      <div id="comments">comments</div>
    </main>
  </div>
  <footer id="footer">footer</footer>
  <script src="/bundle.js"></script>
</body></html>"#;

    fn ids(html: &str) -> Vec<String> {
        let doc = Html::parse_document(html);
        let sel = Selector::parse("body [id]").unwrap();
        doc.select(&sel).map(|el| el.value().id().unwrap().to_string()).collect()
    }

    fn count(html: &str, selector: &str) -> usize {
        Html::parse_document(html).select(&Selector::parse(selector).unwrap()).count()
    }

    #[test]
    fn keeps_only_ancestor_chain_and_kept_subtree() {
        let pruned = prune_document(PAGE, "#keep").unwrap();
        assert_eq!(ids(&pruned), vec!["layout", "main", "keep", "stats"]);
        assert!(pruned.contains("Alice Smith"));
        assert!(pruned.contains("Lv 100"));
        assert!(!pruned.contains("comments"));
        assert!(!pruned.contains("banner"));
    }

    #[test]
    fn removes_every_nav_and_script() {
        let pruned = prune_document(PAGE, "#keep").unwrap();
        assert_eq!(count(&pruned, "nav"), 0);
        assert_eq!(count(&pruned, "script"), 0);
    }

    #[test]
    fn head_styles_survive() {
        let pruned = prune_document(PAGE, "#keep").unwrap();
        assert_eq!(count(&pruned, r#"head link[rel="stylesheet"]"#), 1);
        assert_eq!(count(&pruned, "head title"), 1);
    }

    #[test]
    fn every_ancestor_has_a_single_child_on_the_path() {
        let pruned = prune_document(PAGE, ".flex.flex-row").unwrap();
        let doc = Html::parse_document(&pruned);
        for sel in ["body", "#layout", "#main"] {
            let el = doc.select(&Selector::parse(sel).unwrap()).next().unwrap();
            assert_eq!(el.children().count(), 1, "{sel} should only hold the path child");
        }
    }

    #[test]
    fn first_match_is_kept() {
        let html = r#"<html><body><p class="x" id="a">one</p><p class="x" id="b">two</p></body></html>"#;
        let pruned = prune_document(html, ".x").unwrap();
        assert_eq!(ids(&pruned), vec!["a"]);
    }

    #[test]
    fn missing_element_is_an_error() {
        assert_eq!(
            prune_document(PAGE, "#does-not-exist"),
            Err(PruneError::NoMatch("#does-not-exist".into()))
        );
    }

    #[test]
    fn invalid_selector_is_an_error() {
        assert!(matches!(prune_document(PAGE, "div[["), Err(PruneError::InvalidSelector(_))));
    }

    #[test]
    fn script_embeds_selector_as_string_literal() {
        let script = prune_script(r#"div[class="tab"]"#);
        assert!(script.ends_with(r#"})("div[class=\"tab\"]")"#));
        assert!(!script.contains("=>"));
        assert!(script.starts_with("(function (selector)"));
    }
}
