use super::{ListStrategy, PageContext, collect_all};
use crate::parsers::html::{css_list, element_text};
use crate::utils::{char_len, push_unique};
use scraper::Selector;
use std::sync::LazyLock;

static SERVICE_ITEMS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    css_list(&[
        ".tjenester li",
        ".services li",
        "#tjenester li",
        "#services li",
        ".service-list li",
        "ul.services li",
        ".offerings li",
        ".what-we-do li",
        ".produkter li",
        ".products li",
        "main li",
    ])
});

pub const SERVICE_STRATEGIES: &[ListStrategy] = &[ListStrategy {
    name: "service list items",
    run: service_list_items,
}];

/// Service and product names found on one page, in discovery order
pub fn services(ctx: &PageContext<'_>) -> Vec<String> {
    collect_all(ctx, SERVICE_STRATEGIES)
}

fn service_list_items(ctx: &PageContext<'_>) -> Vec<String> {
    let mut found = Vec::new();
    for selector in SERVICE_ITEMS.iter() {
        for item in ctx.doc.select(selector) {
            let text = element_text(item);
            let len = char_len(&text);
            if len > 2 && len < 100 {
                push_unique(&mut found, text);
            }
        }
    }
    found
}
