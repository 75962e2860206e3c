use super::{PageContext, Strategy, first_match, first_text, joined_text};
use crate::parsers::html::{css, css_list};
use crate::parsers::text::{collapse_whitespace, contains_any};
use crate::utils::char_len;
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

/// Norwegian phone numbers: optional +47, then 8 digits grouped 2-2-2-2, 3-2-3 or ungrouped
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+47\s?)?(?:\d{2}\s?\d{2}\s?\d{2}\s?\d{2}|\d{3}\s?\d{2}\s?\d{3}|\d{8})").unwrap()
});
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());
/// "Storgata 12, 5003 Bergen"
static POSTAL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-ZÆØÅ][\p{L}.\-]*(?:\s[\p{L}.\-]+){0,2}\s\d{1,4}[A-Za-z]?,?\s+\d{4}\s+[A-ZÆØÅ][\p{L}\-]+")
        .unwrap()
});

static TEL_LINK: LazyLock<Selector> = LazyLock::new(|| css(r#"a[href^="tel:"]"#));
static MAILTO_LINKS: LazyLock<Selector> = LazyLock::new(|| css(r#"a[href^="mailto:"]"#));
static PHONE_REGIONS: LazyLock<Selector> =
    LazyLock::new(|| css(".contact, .kontakt, footer, #contact, #kontakt"));
static EMAIL_REGIONS: LazyLock<Selector> = LazyLock::new(|| css(".contact, .kontakt, footer"));
static ADDRESS_ELEMENTS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    css_list(&[
        ".address",
        ".adresse",
        r#"[itemprop="address"]"#,
        "footer address",
        ".contact-address",
    ])
});
static FOOTER: LazyLock<Selector> = LazyLock::new(|| css("footer"));
static OPENING_HOURS_ELEMENTS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    css_list(&[
        ".opening-hours",
        ".åpningstider",
        ".hours",
        r#"[itemprop="openingHours"]"#,
    ])
});

/// Addresses containing these are placeholders or platform defaults
const EXCLUDED_EMAIL_WORDS: [&str; 5] = ["example", "wordpress", "noreply", "no-reply", "donotreply"];

/// Retina image names such as `logo@2x.png` look like addresses to the regex
const IMAGE_SUFFIXES: [&str; 6] = [".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp"];

/// Cookie banners and copyright lines often carry address-like classes
const ADDRESS_BOILERPLATE: [&str; 6] = [
    "cookie",
    "personvern",
    "privacy",
    "copyright",
    "©",
    "alle rettigheter",
];

pub const PHONE_STRATEGIES: &[Strategy] = &[
    Strategy { name: "tel link", run: tel_link },
    Strategy { name: "contact region phone", run: contact_region_phone },
    Strategy { name: "longest phone in source", run: longest_phone_in_source },
];

pub const EMAIL_STRATEGIES: &[Strategy] = &[
    Strategy { name: "mailto link", run: mailto_link },
    Strategy { name: "contact region email", run: contact_region_email },
    Strategy { name: "email in source", run: email_in_source },
];

pub const ADDRESS_STRATEGIES: &[Strategy] = &[
    Strategy { name: "address element", run: address_element },
    Strategy { name: "footer postal address", run: footer_postal_address },
];

pub const OPENING_HOURS_STRATEGIES: &[Strategy] = &[Strategy {
    name: "opening hours element",
    run: opening_hours_element,
}];

pub fn phone(ctx: &PageContext<'_>) -> Option<String> {
    first_match(ctx, PHONE_STRATEGIES)
}

pub fn email(ctx: &PageContext<'_>) -> Option<String> {
    first_match(ctx, EMAIL_STRATEGIES)
}

pub fn address(ctx: &PageContext<'_>) -> Option<String> {
    first_match(ctx, ADDRESS_STRATEGIES)
}

pub fn opening_hours(ctx: &PageContext<'_>) -> Option<String> {
    first_match(ctx, OPENING_HOURS_STRATEGIES)
}

fn digit_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}

fn tel_link(ctx: &PageContext<'_>) -> Option<String> {
    let href = ctx.doc.select(&TEL_LINK).next()?.value().attr("href")?;
    let number = href.trim_start_matches("tel:").trim();
    (!number.is_empty()).then(|| number.to_string())
}

fn contact_region_phone(ctx: &PageContext<'_>) -> Option<String> {
    let text = joined_text(ctx.doc, &PHONE_REGIONS);
    PHONE.find(&text).map(|m| m.as_str().trim().to_string())
}

/// The match with the most digits wins; earlier matches win ties
fn longest_phone_in_source(ctx: &PageContext<'_>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in PHONE.find_iter(ctx.raw) {
        let number = candidate.as_str().trim();
        let digits = digit_count(number);
        if digits < 8 {
            continue;
        }
        if best.is_none_or(|(_, best_digits)| digits > best_digits) {
            best = Some((number, digits));
        }
    }
    best.map(|(number, _)| number.to_string())
}

/// Whether a regex hit looks like a real contact address
pub fn is_plausible_email(address: &str) -> bool {
    let lower = address.to_lowercase();
    !EXCLUDED_EMAIL_WORDS.iter().any(|word| lower.contains(word))
        && !IMAGE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

fn first_plausible_email(text: &str) -> Option<String> {
    EMAIL
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|candidate| is_plausible_email(candidate))
        .map(str::to_string)
}

fn mailto_link(ctx: &PageContext<'_>) -> Option<String> {
    ctx.doc
        .select(&MAILTO_LINKS)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| {
            let address = href.trim_start_matches("mailto:");
            address.split('?').next().unwrap_or_default().trim()
        })
        .find(|address| !address.is_empty() && is_plausible_email(address))
        .map(str::to_string)
}

fn contact_region_email(ctx: &PageContext<'_>) -> Option<String> {
    first_plausible_email(&joined_text(ctx.doc, &EMAIL_REGIONS))
}

fn email_in_source(ctx: &PageContext<'_>) -> Option<String> {
    first_plausible_email(ctx.raw)
}

fn address_element(ctx: &PageContext<'_>) -> Option<String> {
    ADDRESS_ELEMENTS.iter().find_map(|selector| {
        first_text(ctx.doc, selector).filter(|text| {
            let len = char_len(text);
            len > 5 && len < 200 && !contains_any(text, &ADDRESS_BOILERPLATE)
        })
    })
}

fn footer_postal_address(ctx: &PageContext<'_>) -> Option<String> {
    let footer = joined_text(ctx.doc, &FOOTER);
    POSTAL_ADDRESS
        .find(&footer)
        .map(|m| collapse_whitespace(m.as_str()))
}

/// Only an explicit element counts; free text is too ambiguous
fn opening_hours_element(ctx: &PageContext<'_>) -> Option<String> {
    OPENING_HOURS_ELEMENTS
        .iter()
        .find_map(|selector| first_text(ctx.doc, selector))
}
