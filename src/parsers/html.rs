use crate::parsers::ParseResult;
use crate::parsers::text::collapse_whitespace;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Elements whose text never counts as page content
pub const NOISE_TAGS: [&str; 6] = ["script", "style", "noscript", "nav", "footer", "header"];

static BODY: LazyLock<Selector> = LazyLock::new(|| css("body"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| css("a[href]"));

/// Compile one of the crate's built-in CSS selectors
pub(crate) fn css(selector: &str) -> Selector {
    Selector::parse(selector)
        .unwrap_or_else(|e| panic!("invalid built-in selector {:?}: {}", selector, e))
}

/// Compile an ordered list of built-in selectors
pub(crate) fn css_list(selectors: &[&str]) -> Vec<Selector> {
    selectors.iter().map(|selector| css(selector)).collect()
}

/// Parses HTML content to extract visible text and links
pub fn parse(html: &str) -> ParseResult {
    parse_document(&Html::parse_document(html))
}

/// Visible text and links of an already parsed document
pub fn parse_document(doc: &Html) -> ParseResult {
    let content = visible_text(doc);
    let links = links(doc);

    ::log::debug!("HTML parser found {} links", links.len());
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    ParseResult::new(content, links)
}

/// Body text without script, style, navigation, header and footer content.
///
/// The document itself is not modified, so field extractors can still look
/// at `<footer>` and friends on the same parse.
pub fn visible_text(doc: &Html) -> String {
    let root = doc.select(&BODY).next().unwrap_or_else(|| doc.root_element());
    let mut raw = String::new();
    push_visible_text(root, &mut raw);
    collapse_whitespace(&raw)
}

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !NOISE_TAGS.contains(&child_element.value().name()) {
                push_visible_text(child_element, out);
            }
        }
    }
}

/// Raw `href` values of every anchor, in document order
pub fn links(doc: &Html) -> Vec<String> {
    doc.select(&ANCHOR)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect()
}

/// All text below `element`, whitespace collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}
