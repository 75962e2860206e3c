use super::{ListStrategy, PageContext, collect_all};
use crate::parsers::html::css_list;
use crate::utils::push_unique;
use scraper::Selector;
use std::sync::LazyLock;
use url::Url;

static CONTENT_IMAGES: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    css_list(&[
        ".hero img",
        ".banner img",
        ".gallery img",
        "main img",
        "article img",
    ])
});

pub const IMAGE_STRATEGIES: &[ListStrategy] = &[ListStrategy {
    name: "content images",
    run: content_images,
}];

/// Absolute URLs of content images on one page
pub fn images(ctx: &PageContext<'_>) -> Vec<String> {
    collect_all(ctx, IMAGE_STRATEGIES)
}

fn content_images(ctx: &PageContext<'_>) -> Vec<String> {
    let mut found = Vec::new();
    for selector in CONTENT_IMAGES.iter() {
        for image in ctx.doc.select(selector) {
            // Lazy-loading placeholders in src fall through to data-src
            let resolved = [image.value().attr("src"), image.value().attr("data-src")]
                .into_iter()
                .flatten()
                .map(str::trim)
                .filter(|src| !src.is_empty())
                .find_map(|src| resolve_image(ctx.url, src));

            if let Some(url) = resolved {
                push_unique(&mut found, url.to_string());
            }
        }
    }
    found
}

/// Absolute http(s) URL of `src`, unless it is unresolvable or an icon
fn resolve_image(base: &Url, src: &str) -> Option<Url> {
    let url = match base.join(src) {
        Ok(url) => url,
        Err(e) => {
            ::log::trace!("Skipping image {:?}: {}", src, e);
            return None;
        }
    };

    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    let file_name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_lowercase();
    // also covers favicon
    if file_name.contains("icon") {
        return None;
    }

    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::test_support::Fixture;

    #[test]
    fn test_images_are_absolute_and_unique() {
        let fixture = Fixture::at(
            "https://bedrift.no/tjenester/graving",
            r#"<body>
                <div class="hero"><img src="/bilder/hero.jpg"></div>
                <main>
                    <img src="gravemaskin.jpg">
                    <img data-src="//cdn.bedrift.no/lazy.webp">
                    <img src="/bilder/hero.jpg">
                </main>
            </body>"#,
        );
        assert_eq!(
            images(&fixture.ctx()),
            vec![
                "https://bedrift.no/bilder/hero.jpg",
                "https://bedrift.no/tjenester/gravemaskin.jpg",
                "https://cdn.bedrift.no/lazy.webp",
            ]
        );
    }

    #[test]
    fn test_icons_and_bad_sources_are_dropped() {
        let fixture = Fixture::new(
            r#"<body><main>
                <img src="/favicon.png">
                <img src="/ikoner/phone-icon.svg">
                <img src="data:image/gif;base64,R0lGOD">
                <img src="http://[::1">
                <img src="">
                <img src="/icons/../bilder/team.jpg">
            </main></body>"#,
        );
        assert_eq!(images(&fixture.ctx()), vec!["https://bedrift.no/bilder/team.jpg"]);
    }

    #[test]
    fn test_placeholder_src_falls_back_to_data_src() {
        let fixture = Fixture::new(
            r#"<body><main>
                <img src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" data-src="/bilder/prosjekt.jpg">
                <img src="  " data-src="/bilder/team.jpg">
            </main></body>"#,
        );
        assert_eq!(
            images(&fixture.ctx()),
            vec![
                "https://bedrift.no/bilder/prosjekt.jpg",
                "https://bedrift.no/bilder/team.jpg"
            ]
        );
    }

    #[test]
    fn test_images_outside_content_regions_are_ignored() {
        let fixture = Fixture::new(r#"<body><header><img src="/logo.png"></header></body>"#);
        assert!(images(&fixture.ctx()).is_empty());
    }
}
