use super::{ListStrategy, PageContext, collect_all};
use crate::parsers::html::{css, element_text};
use crate::parsers::text::{contains_any, first_sentence, split_sentences};
use crate::utils::char_len;
use scraper::Selector;
use std::sync::LazyLock;

/// Navigation and legal boilerplate that never makes a good heading
pub const HEADING_EXCLUDE_WORDS: [&str; 10] = [
    "menu",
    "kontakt",
    "cookie",
    "privacy",
    "terms",
    "vilkaar",
    "personvern",
    "logg inn",
    "login",
    "registrer",
];

/// Like the heading list, but "registrer" is allowed in subheadings
pub const SUBHEADING_EXCLUDE_WORDS: [&str; 9] = [
    "menu",
    "kontakt",
    "cookie",
    "privacy",
    "terms",
    "vilkaar",
    "personvern",
    "logg inn",
    "login",
];

static ALL_HEADINGS: LazyLock<Selector> = LazyLock::new(|| css("h1, h2, h3, h4, h5, h6"));
static HERO_REGIONS: LazyLock<Selector> = LazyLock::new(|| {
    css(r#".hero, .heroine, .banner, .cta, .call-to-action, .intro, .lead, [class*="hero"], [class*="banner"]"#)
});
static HERO_TITLES: LazyLock<Selector> = LazyLock::new(|| css("h1, h2, h3, .title, .headline"));
static BODY_PARAGRAPHS: LazyLock<Selector> =
    LazyLock::new(|| css("main p, article p, .content p, .text p"));
static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| css(r#"meta[property="og:title"]"#));

static SUB_HEADINGS: LazyLock<Selector> = LazyLock::new(|| css("h2, h3, h4, h5, h6"));
static DESCRIPTIVE_PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| {
    css("main p, article p, .content p, .text p, .about-us p, .om-oss p, .description p, .intro p")
});
static META_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    css(r#"meta[name="description"], meta[property="og:description"]"#)
});
static CONTENT_ITEMS: LazyLock<Selector> = LazyLock::new(|| css("main li, article li, .content li"));

pub const HEADING_STRATEGIES: &[ListStrategy] = &[
    ListStrategy { name: "heading tags", run: heading_tags },
    ListStrategy { name: "hero regions", run: hero_regions },
    ListStrategy { name: "short sentences", run: short_sentences },
    ListStrategy { name: "og:title", run: og_title },
];

pub const SUBHEADING_STRATEGIES: &[ListStrategy] = &[
    ListStrategy { name: "sub-heading tags", run: subheading_tags },
    ListStrategy { name: "paragraph openers", run: paragraph_openers },
    ListStrategy { name: "meta description", run: meta_description },
    ListStrategy { name: "content list items", run: content_list_items },
];

/// Short, punchy candidates for an ad heading
pub fn headings(ctx: &PageContext<'_>) -> Vec<String> {
    collect_all(ctx, HEADING_STRATEGIES)
}

/// Medium-length candidates for an ad subheading
pub fn subheadings(ctx: &PageContext<'_>) -> Vec<String> {
    collect_all(ctx, SUBHEADING_STRATEGIES)
}

/// Whether `text` fits the heading length window (exclusive bounds)
pub fn is_heading_length(text: &str) -> bool {
    let len = char_len(text);
    len > 5 && len < 80
}

/// Whether `text` fits the subheading length window (exclusive bounds)
pub fn is_subheading_length(text: &str) -> bool {
    let len = char_len(text);
    len > 10 && len < 150
}

fn heading_tags(ctx: &PageContext<'_>) -> Vec<String> {
    ctx.doc
        .select(&ALL_HEADINGS)
        .map(element_text)
        .filter(|text| is_heading_length(text) && !contains_any(text, &HEADING_EXCLUDE_WORDS))
        .collect()
}

/// The title of each hero or call-to-action block, or its first sentence
fn hero_regions(ctx: &PageContext<'_>) -> Vec<String> {
    ctx.doc
        .select(&HERO_REGIONS)
        .filter_map(|region| {
            let title = region
                .select(&HERO_TITLES)
                .next()
                .map(element_text)
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| first_sentence(&element_text(region)).to_string());
            is_heading_length(&title).then_some(title)
        })
        .collect()
}

fn short_sentences(ctx: &PageContext<'_>) -> Vec<String> {
    let mut found = Vec::new();
    for paragraph in ctx.doc.select(&BODY_PARAGRAPHS) {
        let text = element_text(paragraph);
        found.extend(
            split_sentences(&text)
                .into_iter()
                .filter(|sentence| {
                    let len = char_len(sentence);
                    len > 8 && len < 60 && !contains_any(sentence, &HEADING_EXCLUDE_WORDS)
                })
                .map(str::to_string),
        );
    }
    found
}

fn og_title(ctx: &PageContext<'_>) -> Vec<String> {
    super::first_attr(ctx.doc, &OG_TITLE, "content")
        .filter(|title| is_heading_length(title))
        .into_iter()
        .collect()
}

fn subheading_tags(ctx: &PageContext<'_>) -> Vec<String> {
    ctx.doc
        .select(&SUB_HEADINGS)
        .map(element_text)
        .filter(|text| {
            is_subheading_length(text) && !contains_any(text, &SUBHEADING_EXCLUDE_WORDS)
        })
        .collect()
}

/// The first two usable sentences of every descriptive paragraph
fn paragraph_openers(ctx: &PageContext<'_>) -> Vec<String> {
    let mut found = Vec::new();
    for paragraph in ctx.doc.select(&DESCRIPTIVE_PARAGRAPHS) {
        let text = element_text(paragraph);
        if char_len(&text) < 20 {
            continue;
        }
        found.extend(
            split_sentences(&text)
                .into_iter()
                .filter(|sentence| {
                    let len = char_len(sentence);
                    len > 15
                        && len < 150
                        && !contains_any(sentence, &SUBHEADING_EXCLUDE_WORDS)
                        && !contains_any(sentence, &["gdpr"])
                })
                .take(2)
                .map(str::to_string),
        );
    }
    found
}

fn meta_description(ctx: &PageContext<'_>) -> Vec<String> {
    ctx.doc
        .select(&META_DESCRIPTION)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .filter(|content| {
            let len = char_len(content);
            len > 15 && len < 150
        })
        .map(str::to_string)
        .into_iter()
        .collect()
}

fn content_list_items(ctx: &PageContext<'_>) -> Vec<String> {
    ctx.doc
        .select(&CONTENT_ITEMS)
        .map(element_text)
        .filter(|text| is_subheading_length(text))
        .collect()
}
