pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

/// Enum to represent the kinds of response bodies the crawler can meet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// HTML page, parsed for fields, text and links
    Html,
    /// XML document (sitemaps)
    Xml,
    /// Plain text (sitemap.txt)
    Text,
    /// Anything else: images, PDFs, scripts
    Other,
}

impl ContentKind {
    /// Classify a response from its `Content-Type` header.
    ///
    /// A missing header is treated as HTML, since many small sites
    /// serve pages without one.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return ContentKind::Html;
        };

        // Drop parameters such as "; charset=utf-8"
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime.is_empty() || mime.contains("html") {
            ContentKind::Html
        } else if mime.contains("xml") {
            ContentKind::Xml
        } else if mime == "text/plain" {
            ContentKind::Text
        } else {
            ::log::debug!("Classifying content type {:?} as Other", content_type);
            ContentKind::Other
        }
    }

    /// Classify a document from its URL path when no header is available
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or_default().to_ascii_lowercase();
        if path.ends_with(".xml") {
            ContentKind::Xml
        } else if path.ends_with(".txt") {
            ContentKind::Text
        } else {
            ContentKind::Html
        }
    }

    /// Whether field extraction and link discovery should run on this body
    pub fn is_page(&self) -> bool {
        matches!(self, ContentKind::Html)
    }
}

/// Result of parsing content
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Extracted visible text, whitespace collapsed
    pub content: String,
    /// Extracted links (if applicable)
    pub links: Vec<String>,
}

impl ParseResult {
    /// Creates a new parse result with the given content and links
    pub fn new(content: String, links: Vec<String>) -> Self {
        Self { content, links }
    }
}
