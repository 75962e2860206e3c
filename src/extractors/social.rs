use super::{PageContext, first_attr};
use crate::parsers::html::css;
use crate::results::SocialMedia;
use scraper::Selector;
use std::sync::LazyLock;

static FACEBOOK: LazyLock<Selector> = LazyLock::new(|| css(r#"a[href*="facebook.com"]"#));
static INSTAGRAM: LazyLock<Selector> = LazyLock::new(|| css(r#"a[href*="instagram.com"]"#));
static LINKEDIN: LazyLock<Selector> = LazyLock::new(|| css(r#"a[href*="linkedin.com"]"#));

/// First profile link per platform
pub fn social_media(ctx: &PageContext<'_>) -> SocialMedia {
    SocialMedia {
        facebook: first_attr(ctx.doc, &FACEBOOK, "href"),
        instagram: first_attr(ctx.doc, &INSTAGRAM, "href"),
        linkedin: first_attr(ctx.doc, &LINKEDIN, "href"),
    }
}
