//! Field extractors.
//!
//! Every field is found by an ordered list of strategies. Single-valued
//! fields take the first strategy that yields something; list-valued
//! fields concatenate what every strategy yields, in order. The lists are
//! plain data so strategies can be reordered or tested one at a time.

pub mod certifications;
pub mod company;
pub mod contact;
pub mod headings;
pub mod images;
pub mod services;
pub mod social;

use crate::parsers::ParseResult;
use crate::parsers::html::{self, element_text};
use crate::results::PageData;
use scraper::{Html, Selector};
use url::Url;

/// Everything a strategy may look at for one page
pub struct PageContext<'a> {
    /// The parsed document, with nothing removed
    pub doc: &'a Html,
    /// The HTML source as received
    pub raw: &'a str,
    /// Final URL of the page, used to resolve relative references
    pub url: &'a Url,
    /// Visible body text (no script, style, nav, header or footer)
    pub text: &'a str,
}

/// One way of finding a single-valued field
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub run: fn(&PageContext<'_>) -> Option<String>,
}

/// One source of candidates for a list-valued field
#[derive(Clone, Copy)]
pub struct ListStrategy {
    pub name: &'static str,
    pub run: fn(&PageContext<'_>) -> Vec<String>,
}

/// Run `strategies` in order and return the first hit
pub fn first_match(ctx: &PageContext<'_>, strategies: &[Strategy]) -> Option<String> {
    strategies.iter().find_map(|strategy| {
        let found = (strategy.run)(ctx);
        if found.is_some() {
            ::log::trace!("{} matched on {}", strategy.name, ctx.url);
        }
        found
    })
}

/// Run every strategy and concatenate the candidates in strategy order
pub fn collect_all(ctx: &PageContext<'_>, strategies: &[ListStrategy]) -> Vec<String> {
    strategies
        .iter()
        .flat_map(|strategy| (strategy.run)(ctx))
        .collect()
}

/// Parse `raw` once and run every field extractor over it
pub fn extract_page(raw: &str, url: &Url) -> PageData {
    let doc = Html::parse_document(raw);
    let ParseResult { content, links } = html::parse_document(&doc);

    let ctx = PageContext {
        doc: &doc,
        raw,
        url,
        text: &content,
    };

    let company_name = company::company_name(&ctx);
    let description = company::description(&ctx);
    let phone = contact::phone(&ctx);
    let email = contact::email(&ctx);
    let address = contact::address(&ctx);
    let opening_hours = contact::opening_hours(&ctx);
    let social_media = social::social_media(&ctx);
    let services = services::services(&ctx);
    let images = images::images(&ctx);
    let certifications = certifications::certifications(&ctx);
    let headings = headings::headings(&ctx);
    let subheadings = headings::subheadings(&ctx);

    PageData {
        url: url.to_string(),
        company_name,
        description,
        phone,
        email,
        address,
        opening_hours,
        social_media,
        services,
        images,
        certifications,
        headings,
        subheadings,
        content,
        links,
    }
}

/// Trimmed value of `attr` on the first element matching `selector`
pub(crate) fn first_attr(doc: &Html, selector: &Selector, attr: &str) -> Option<String> {
    doc.select(selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Collapsed text of the first element matching `selector`, if non-empty
pub(crate) fn first_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Text of every element matching `selector`, joined with spaces
pub(crate) fn joined_text(doc: &Html, selector: &Selector) -> String {
    doc.select(selector)
        .map(element_text)
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod tests {
    use super::test_support::Fixture;
    use super::*;

    fn never(_: &PageContext<'_>) -> Option<String> {
        None
    }

    fn always_a(_: &PageContext<'_>) -> Option<String> {
        Some("a".to_string())
    }

    fn always_b(_: &PageContext<'_>) -> Option<String> {
        Some("b".to_string())
    }

    #[test]
    fn test_first_match_respects_order() {
        let fixture = Fixture::new("<p>x</p>");
        let ctx = fixture.ctx();

        let strategies = [
            Strategy { name: "never", run: never },
            Strategy { name: "b", run: always_b },
            Strategy { name: "a", run: always_a },
        ];
        assert_eq!(first_match(&ctx, &strategies), Some("b".to_string()));
        assert_eq!(first_match(&ctx, &strategies[..1]), None);
        assert_eq!(first_match(&ctx, &[]), None);
    }

    #[test]
    fn test_extract_page_on_empty_document() {
        let url = Url::parse("https://bedrift.no/").unwrap();
        let page = extract_page("", &url);
        assert_eq!(page.url, "https://bedrift.no/");
        assert!(page.company_name.is_none());
        assert!(page.phone.is_none());
        assert!(page.services.is_empty());
        assert!(page.images.is_empty());
        assert!(page.social_media.is_empty());
        assert!(page.content.is_empty());
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_extract_page_is_repeatable() {
        let raw = r#"<html><head><title>Bergen Rør AS | Rørlegger</title></head>
            <body><main><h1>Rørlegger i Bergen</h1>
            <ul class="tjenester"><li>Baderom</li><li>Varmepumpe</li></ul>
            <a href="tel:55123456">Ring</a><a href="/kontakt">Kontakt</a></main></body></html>"#;
        let url = Url::parse("https://bergenror.no/").unwrap();

        let first = extract_page(raw, &url);
        let second = extract_page(raw, &url);
        assert_eq!(first.company_name, second.company_name);
        assert_eq!(first.services, second.services);
        assert_eq!(first.headings, second.headings);
        assert_eq!(first.phone.as_deref(), Some("55123456"));
        assert_eq!(first.links, vec!["tel:55123456", "/kontakt"]);
    }
}
