use super::{ListStrategy, PageContext, collect_all};
use crate::parsers::html::css;
use crate::utils::push_unique;
use scraper::Selector;
use std::sync::LazyLock;

static IMAGES: LazyLock<Selector> = LazyLock::new(|| css("img[alt]"));

/// Lowercase fragments that mark a certification badge
pub const BADGE_KEYWORDS: [&str; 7] = [
    "iso",
    "sertifiser",
    "godkjent",
    "startbank",
    "mef",
    "miljøfyrtårn",
    "lærebedrift",
];

/// Lowercase phrase in the page text and the name it is reported as
pub const KNOWN_CERTIFICATIONS: [(&str, &str); 5] = [
    ("iso 9001", "ISO 9001"),
    ("iso 14001", "ISO 14001"),
    ("startbank", "StartBANK"),
    ("godkjent lærebedrift", "Godkjent lærebedrift"),
    ("miljøfyrtårn", "Miljøfyrtårn"),
];

pub const CERTIFICATION_STRATEGIES: &[ListStrategy] = &[
    ListStrategy { name: "badge alt text", run: badge_alt_text },
    ListStrategy { name: "known names in text", run: known_names_in_text },
];

/// Certifications mentioned on one page, without duplicates
pub fn certifications(ctx: &PageContext<'_>) -> Vec<String> {
    let mut unique = Vec::new();
    for name in collect_all(ctx, CERTIFICATION_STRATEGIES) {
        push_unique(&mut unique, name);
    }
    unique
}

fn badge_alt_text(ctx: &PageContext<'_>) -> Vec<String> {
    ctx.doc
        .select(&IMAGES)
        .filter_map(|image| image.value().attr("alt"))
        .map(str::trim)
        .filter(|alt| {
            let lower = alt.to_lowercase();
            BADGE_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        })
        .map(str::to_string)
        .collect()
}

fn known_names_in_text(ctx: &PageContext<'_>) -> Vec<String> {
    let lower = ctx.text.to_lowercase();
    KNOWN_CERTIFICATIONS
        .iter()
        .filter(|(phrase, _)| lower.contains(phrase))
        .map(|(_, name)| name.to_string())
        .collect()
}
