use serde::{Deserialize, Serialize};

/// First-found profile link per social platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMedia {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
}

impl SocialMedia {
    /// Fill every platform that is still missing from `other`
    pub fn merge_missing(&mut self, other: &SocialMedia) {
        if self.facebook.is_none() {
            self.facebook = other.facebook.clone();
        }
        if self.instagram.is_none() {
            self.instagram = other.instagram.clone();
        }
        if self.linkedin.is_none() {
            self.linkedin = other.linkedin.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.facebook.is_none() && self.instagram.is_none() && self.linkedin.is_none()
    }
}

/// Structured facts harvested from crawling one advertiser website
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedData {
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub services: Vec<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub images: Vec<String>,
    pub social_media: SocialMedia,
    pub certifications: Vec<String>,
    pub all_page_content: String,
    pub pages_scraped: usize,
    pub potential_headings: Vec<String>,
    pub potential_subheadings: Vec<String>,
}

impl ScrapedData {
    /// The shape returned when nothing could be scraped
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

/// Everything the field extractors found on a single page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageData {
    /// URL the page was fetched from
    pub url: String,

    pub company_name: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub social_media: SocialMedia,

    pub services: Vec<String>,
    pub images: Vec<String>,
    pub certifications: Vec<String>,
    pub headings: Vec<String>,
    pub subheadings: Vec<String>,

    /// Visible text with script, style, nav, header and footer removed
    pub content: String,

    /// Raw href values found on the page
    pub links: Vec<String>,
}

/// How a scrape ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScrapeStatus {
    /// At least one page was fetched and the crawl ran to its natural end
    Completed,
    /// Nothing usable could be fetched
    Failed { reason: String },
    /// The wall-clock budget ran out before the crawl finished
    TimedOut { after_secs: u64 },
}

/// Result of a scrape together with how it ended
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeReport {
    pub data: ScrapedData,
    #[serde(flatten)]
    pub status: ScrapeStatus,
    pub elapsed_ms: u64,
}

impl ScrapeReport {
    pub fn completed(data: ScrapedData, elapsed_ms: u64) -> Self {
        Self {
            data,
            status: ScrapeStatus::Completed,
            elapsed_ms,
        }
    }

    pub fn failed(reason: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            data: ScrapedData::empty(),
            status: ScrapeStatus::Failed {
                reason: reason.into(),
            },
            elapsed_ms,
        }
    }

    pub fn timed_out(after_secs: u64, elapsed_ms: u64) -> Self {
        Self {
            data: ScrapedData::empty(),
            status: ScrapeStatus::TimedOut { after_secs },
            elapsed_ms,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ScrapeStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_shape() {
        let data = ScrapedData::empty();
        assert!(data.company_name.is_none());
        assert!(data.services.is_empty());
        assert!(data.social_media.is_empty());
        assert_eq!(data.pages_scraped, 0);
        assert!(data.is_empty());
    }

    #[test]
    fn test_field_names_are_camel_case() {
        let json = serde_json::to_value(ScrapedData::empty()).unwrap();
        for key in [
            "companyName",
            "openingHours",
            "socialMedia",
            "allPageContent",
            "pagesScraped",
            "potentialHeadings",
            "potentialSubheadings",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json["socialMedia"].get("linkedin").is_some());
    }

    #[test]
    fn test_social_merge_keeps_first_found() {
        let mut first = SocialMedia {
            facebook: Some("https://facebook.com/a".into()),
            ..Default::default()
        };
        let second = SocialMedia {
            facebook: Some("https://facebook.com/b".into()),
            instagram: Some("https://instagram.com/b".into()),
            linkedin: None,
        };
        first.merge_missing(&second);
        assert_eq!(first.facebook.as_deref(), Some("https://facebook.com/a"));
        assert_eq!(first.instagram.as_deref(), Some("https://instagram.com/b"));
        assert!(first.linkedin.is_none());
    }

    #[test]
    fn test_report_distinguishes_timeout_from_failure() {
        let failed = ScrapeReport::failed("seed unreachable", 12);
        let timed_out = ScrapeReport::timed_out(30, 30_000);
        assert_eq!(failed.data, timed_out.data);
        assert_ne!(failed.status, timed_out.status);
        assert!(!failed.is_completed());

        let json = serde_json::to_value(&timed_out).unwrap();
        assert_eq!(json["status"], "timedOut");
        assert_eq!(json["afterSecs"], 30);
    }
}
