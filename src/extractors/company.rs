use super::{PageContext, Strategy, first_attr, first_match, first_text};
use crate::parsers::html::{css, css_list};
use crate::utils::char_len;
use scraper::Selector;
use std::sync::LazyLock;

static OG_SITE_NAME: LazyLock<Selector> = LazyLock::new(|| css(r#"meta[property="og:site_name"]"#));
static APPLICATION_NAME: LazyLock<Selector> =
    LazyLock::new(|| css(r#"meta[name="application-name"]"#));
static LOGO_IMAGES: LazyLock<Vec<Selector>> = LazyLock::new(|| css_list(&[".logo img", "#logo img"]));
static TITLE_ELEMENTS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| css_list(&["header .logo", ".site-title", "h1"]));
static TITLE: LazyLock<Selector> = LazyLock::new(|| css("title"));

static META_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| css(r#"meta[name="description"]"#));
static OG_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| css(r#"meta[property="og:description"]"#));
static ABOUT_PARAGRAPHS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    css_list(&[
        ".about-us p",
        ".om-oss p",
        "#about p",
        ".description",
        "main p",
        "article p",
    ])
});

/// Company-name strategies, most trusted first
pub const COMPANY_NAME_STRATEGIES: &[Strategy] = &[
    Strategy { name: "og:site_name", run: og_site_name },
    Strategy { name: "application-name", run: application_name },
    Strategy { name: "logo alt", run: logo_alt },
    Strategy { name: "title element", run: title_element },
    Strategy { name: "document title", run: document_title },
];

/// Description strategies, most trusted first
pub const DESCRIPTION_STRATEGIES: &[Strategy] = &[
    Strategy { name: "meta description", run: meta_description },
    Strategy { name: "about paragraph", run: about_paragraph },
];

pub fn company_name(ctx: &PageContext<'_>) -> Option<String> {
    first_match(ctx, COMPANY_NAME_STRATEGIES)
}

pub fn description(ctx: &PageContext<'_>) -> Option<String> {
    first_match(ctx, DESCRIPTION_STRATEGIES)
}

fn og_site_name(ctx: &PageContext<'_>) -> Option<String> {
    first_attr(ctx.doc, &OG_SITE_NAME, "content")
}

fn application_name(ctx: &PageContext<'_>) -> Option<String> {
    first_attr(ctx.doc, &APPLICATION_NAME, "content")
}

fn logo_alt(ctx: &PageContext<'_>) -> Option<String> {
    LOGO_IMAGES
        .iter()
        .find_map(|selector| first_attr(ctx.doc, selector, "alt"))
}

/// Short text of a logo, site-title or first `<h1>` element
fn title_element(ctx: &PageContext<'_>) -> Option<String> {
    TITLE_ELEMENTS.iter().find_map(|selector| {
        first_text(ctx.doc, selector).filter(|text| char_len(text) < 100)
    })
}

/// First segment of `<title>`, split on the usual separators
fn document_title(ctx: &PageContext<'_>) -> Option<String> {
    let title = first_text(ctx.doc, &TITLE)?;
    let name = title
        .split('|')
        .next()
        .and_then(|s| s.split('-').next())
        .and_then(|s| s.split('–').next())
        .unwrap_or_default()
        .trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn meta_description(ctx: &PageContext<'_>) -> Option<String> {
    first_attr(ctx.doc, &META_DESCRIPTION, "content")
        .or_else(|| first_attr(ctx.doc, &OG_DESCRIPTION, "content"))
}

/// First about-us style paragraph of a reasonable length
fn about_paragraph(ctx: &PageContext<'_>) -> Option<String> {
    ABOUT_PARAGRAPHS.iter().find_map(|selector| {
        first_text(ctx.doc, selector).filter(|text| {
            let len = char_len(text);
            len > 50 && len < 500
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::test_support::Fixture;

    #[test]
    fn test_og_site_name_wins() {
        let fixture = Fixture::new(
            r#"<html><head>
                <meta property="og:site_name" content=" Bergen Rør AS ">
                <meta name="application-name" content="BRør">
                <title>Forside | Noe annet</title>
            </head><body><h1>Velkommen</h1></body></html>"#,
        );
        assert_eq!(company_name(&fixture.ctx()), Some("Bergen Rør AS".to_string()));
    }

    #[test]
    fn test_logo_alt_before_headings() {
        let fixture = Fixture::new(
            r#"<body><div id="logo"><img src="/logo.png" alt="Graveservice Vest"></div>
               <h1>Velkommen til oss</h1></body>"#,
        );
        assert_eq!(
            company_name(&fixture.ctx()),
            Some("Graveservice Vest".to_string())
        );
    }

    #[test]
    fn test_long_h1_falls_through_to_title() {
        let long_heading = "Vi er et firma som ".repeat(8);
        let fixture = Fixture::new(&format!(
            "<html><head><title>Snekker Hansen – Tømrer i Tromsø</title></head><body><h1>{}</h1></body></html>",
            long_heading
        ));
        assert_eq!(company_name(&fixture.ctx()), Some("Snekker Hansen".to_string()));
    }

    #[test]
    fn test_title_split_on_separators() {
        let fixture = Fixture::new("<html><head><title>Elektro Nord - Elektriker | Bodø</title></head></html>");
        assert_eq!(company_name(&fixture.ctx()), Some("Elektro Nord".to_string()));
    }

    #[test]
    fn test_no_company_name() {
        let fixture = Fixture::new("<html><body><p>Bare tekst</p></body></html>");
        assert_eq!(company_name(&fixture.ctx()), None);
    }

    #[test]
    fn test_description_prefers_meta() {
        let fixture = Fixture::new(
            r#"<html><head><meta property="og:description" content="Rørlegger med lang erfaring"></head>
               <body><main><p>Dette er en lang nok paragraf om bedriften vår som har holdt på i mange år.</p></main></body></html>"#,
        );
        assert_eq!(
            description(&fixture.ctx()),
            Some("Rørlegger med lang erfaring".to_string())
        );
    }

    #[test]
    fn test_description_from_about_paragraph() {
        let fixture = Fixture::new(
            r#"<body>
                <div class="om-oss"><p>Kort.</p></div>
                <main><p>Vi har levert grunnarbeid og drenering på Vestlandet siden 1985, alltid med fornøyde kunder.</p></main>
            </body>"#,
        );
        assert_eq!(
            description(&fixture.ctx()),
            Some(
                "Vi har levert grunnarbeid og drenering på Vestlandet siden 1985, alltid med fornøyde kunder."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_description_absent() {
        let fixture = Fixture::new("<body><main><p>For kort.</p></main></body>");
        assert_eq!(description(&fixture.ctx()), None);
    }
}
