use crate::parsers::html;
use scraper::{Html, Selector};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_skips_noise() {
        let doc = Html::parse_document(
            r#"<html><head><title>Tittel</title><style>p { color: red }</style></head>
            <body>
              <header><a href="/">Logo</a></header>
              <nav><ul><li>Hjem</li><li>Om oss</li></ul></nav>
              <main>
                <h1>Rørlegger   i Bergen</h1>
                <p>Vi fikser   alt.</p>
                <script>var tracking = "skjult";</script>
                <noscript>Slå på JavaScript</noscript>
              </main>
              <footer>Org.nr 123 456 789</footer>
            </body></html>"#,
        );
        assert_eq!(html::visible_text(&doc), "Rørlegger i Bergen Vi fikser alt.");
    }

    #[test]
    fn test_visible_text_leaves_document_intact() {
        let doc = Html::parse_document(
            "<body><p>Innhold</p><footer class=\"kontakt\">Tlf 55 12 34 56</footer></body>",
        );
        assert_eq!(html::visible_text(&doc), "Innhold");

        let footer = Selector::parse("footer").unwrap();
        let element = doc.select(&footer).next().unwrap();
        assert_eq!(html::element_text(element), "Tlf 55 12 34 56");
    }

    #[test]
    fn test_links_in_document_order() {
        let doc = Html::parse_document(
            r##"<body>
              <a href="/om-oss">Om oss</a>
              <a name="anker">Uten href</a>
              <a href="https://facebook.com/bedrift">Facebook</a>
              <a href="#topp">Til toppen</a>
            </body>"##,
        );
        assert_eq!(
            html::links(&doc),
            vec!["/om-oss", "https://facebook.com/bedrift", "#topp"]
        );
    }

    #[test]
    fn test_parse_empty_document() {
        let result = html::parse("");
        assert!(result.content.is_empty());
        assert!(result.links.is_empty());
    }
}
