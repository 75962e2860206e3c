//! Picks which scraped items go into each tier of an ad proposal.

use crate::formats::{
    AdFormat, FormatContent, Tier, calculate_price_difference, content_rules, get_format_details,
    get_second_upgrade_format, get_upgrade_format, is_common_certification,
};
use crate::results::{ScrapedData, SocialMedia};
use crate::utils::{char_len, truncate_chars};
use serde::Serialize;

/// Generic services used only when the site yielded none
pub const FALLBACK_SERVICES: [&str; 4] = ["Rådgivning", "Prosjektering", "Utførelse", "Service"];

/// Longest description shown in an ad, ellipsis included
pub const MAX_AD_DESCRIPTION_CHARS: usize = 150;

/// Formats at or below this one get no social media buttons
const SOCIAL_THRESHOLD_FORMAT: &str = "tredjedel";

/// At most `count` items, in scraped order
pub fn select_items(items: &[String], count: usize) -> Vec<String> {
    items.iter().take(count).cloned().collect()
}

/// Like [`select_items`], but falls back to [`FALLBACK_SERVICES`] when
/// nothing was scraped
pub fn select_services(scraped: &[String], count: usize) -> Vec<String> {
    if scraped.is_empty() {
        FALLBACK_SERVICES
            .iter()
            .take(count)
            .map(|service| service.to_string())
            .collect()
    } else {
        select_items(scraped, count)
    }
}

/// At most `count` certifications, widely recognised ones first, otherwise in
/// scraped order
pub fn select_certifications(scraped: &[String], count: usize) -> Vec<String> {
    let (common, other): (Vec<&String>, Vec<&String>) = scraped
        .iter()
        .partition(|certification| is_common_certification(certification));
    common.into_iter().chain(other).take(count).cloned().collect()
}

/// Shorten a description to fit an ad
pub fn ad_description(description: &str) -> String {
    if char_len(description) > MAX_AD_DESCRIPTION_CHARS {
        format!("{}...", truncate_chars(description, MAX_AD_DESCRIPTION_CHARS - 3))
    } else {
        description.to_string()
    }
}

/// Content of one tier, already cut to its allowance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierContent {
    pub tier: Tier,
    pub format: AdFormat,
    pub allowance: FormatContent,
    /// Extra cost over the ordered format
    pub price_difference: i64,

    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub description: Option<String>,
    pub services: Vec<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub opening_hours: Option<String>,
    pub certifications: Vec<String>,
    pub images: Vec<String>,
    pub social_media: Option<SocialMedia>,
}

impl TierContent {
    fn build(
        data: &ScrapedData,
        ordered: &AdFormat,
        format: &AdFormat,
        tier: Tier,
        allowance: &FormatContent,
    ) -> Self {
        let gated = |allowed: bool, value: &Option<String>| value.clone().filter(|_| allowed);
        let shows_social = get_format_details(SOCIAL_THRESHOLD_FORMAT)
            .is_some_and(|threshold| format.price > threshold.price);

        Self {
            tier,
            format: *format,
            allowance: *allowance,
            price_difference: calculate_price_difference(ordered.key, format.key),
            heading: data
                .potential_headings
                .first()
                .cloned()
                .or_else(|| data.company_name.clone())
                .filter(|_| allowance.heading),
            subheading: gated(allowance.subheading, &data.potential_subheadings.first().cloned()),
            description: data
                .description
                .as_deref()
                .filter(|_| allowance.description)
                .map(ad_description),
            services: select_services(&data.services, allowance.service_list),
            phone: gated(allowance.contact_phone, &data.phone),
            address: gated(allowance.contact_address, &data.address),
            email: gated(allowance.contact_email, &data.email),
            opening_hours: gated(allowance.opening_hours, &data.opening_hours),
            certifications: select_certifications(&data.certifications, allowance.certifications),
            images: select_items(&data.images, allowance.images),
            social_media: (shows_social && !data.social_media.is_empty())
                .then(|| data.social_media.clone()),
        }
    }
}

/// The ordered ad plus up to two upsell alternatives
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPlan {
    pub company_name: Option<String>,
    pub ordered: TierContent,
    /// `None` at the top of the upgrade chain
    pub upgrade1: Option<TierContent>,
    pub upgrade2: Option<TierContent>,
}

impl ContentPlan {
    pub fn tier(&self, tier: Tier) -> Option<&TierContent> {
        match tier {
            Tier::Ordered => Some(&self.ordered),
            Tier::Upgrade1 => self.upgrade1.as_ref(),
            Tier::Upgrade2 => self.upgrade2.as_ref(),
        }
    }

    /// Available upsell tiers, nearest first
    pub fn upgrades(&self) -> impl Iterator<Item = &TierContent> {
        self.upgrade1.iter().chain(self.upgrade2.iter())
    }
}

/// Lay out `data` for the ordered format `format_key` and its upgrades.
///
/// Returns `None` when the format is unknown.
pub fn plan_content(data: &ScrapedData, format_key: &str) -> Option<ContentPlan> {
    let ordered = get_format_details(format_key)?;
    let rules = content_rules(format_key)?;

    let upgrade = |tier: Tier, key: Option<&str>| {
        let format = get_format_details(key?)?;
        Some(TierContent::build(data, ordered, format, tier, rules.get(tier)))
    };

    let plan = ContentPlan {
        company_name: data.company_name.clone(),
        ordered: TierContent::build(data, ordered, ordered, Tier::Ordered, rules.get(Tier::Ordered)),
        upgrade1: upgrade(Tier::Upgrade1, get_upgrade_format(format_key)),
        upgrade2: upgrade(Tier::Upgrade2, get_second_upgrade_format(format_key)),
    };
    ::log::debug!(
        "Planned {} with {} upgrade(s)",
        format_key,
        plan.upgrades().count()
    );
    Some(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn rorlegger() -> ScrapedData {
        ScrapedData {
            company_name: Some("Bergen Rør AS".to_string()),
            description: Some("Vi er en rørleggerbedrift i Bergen med lang erfaring.".to_string()),
            services: strings(&["Baderom", "Varmepumpe", "Lekkasje", "Service", "Nybygg", "Rehab", "Avløp"]),
            phone: Some("55 12 34 56".to_string()),
            email: Some("post@bergenror.no".to_string()),
            address: Some("Strandgaten 1, 5013 Bergen".to_string()),
            opening_hours: Some("Man-Fre 07-16".to_string()),
            certifications: strings(&["Mesterbrev", "StartBANK", "Sentral godkjenning"]),
            images: strings(&["https://bergenror.no/bad.jpg"]),
            social_media: SocialMedia {
                facebook: Some("https://facebook.com/bergenror".to_string()),
                ..SocialMedia::default()
            },
            pages_scraped: 4,
            potential_headings: strings(&["Din lokale rørlegger"]),
            potential_subheadings: strings(&["Vi fikser lekkasjen i dag"]),
            ..ScrapedData::default()
        }
    }

    #[test]
    fn test_select_services_prefers_scraped() {
        let scraped = strings(&["Maling", "Tapetsering"]);
        assert_eq!(select_services(&scraped, 6), scraped);
        assert_eq!(select_services(&scraped, 1), strings(&["Maling"]));
        assert_eq!(select_services(&scraped, 0), Vec::<String>::new());
    }

    #[test]
    fn test_select_services_falls_back_only_when_empty() {
        assert_eq!(select_services(&[], 6), strings(&FALLBACK_SERVICES));
        assert_eq!(select_services(&[], 2), strings(&["Rådgivning", "Prosjektering"]));
    }

    #[test]
    fn test_select_certifications_puts_common_first() {
        let scraped = strings(&["Årets lærling 2021", "Mesterbrev", "Kundeservice i toppklasse", "ISO 14001"]);
        assert_eq!(
            select_certifications(&scraped, 3),
            strings(&["Mesterbrev", "ISO 14001", "Årets lærling 2021"])
        );
        assert_eq!(select_certifications(&scraped, 10).len(), 4);
        assert!(select_certifications(&[], 5).is_empty());
    }

    #[test]
    fn test_ad_description_is_shortened() {
        assert_eq!(ad_description("Kort tekst"), "Kort tekst");
        let long = "æ".repeat(200);
        let short = ad_description(&long);
        assert_eq!(char_len(&short), MAX_AD_DESCRIPTION_CHARS);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_visittkort_plan() {
        let plan = plan_content(&rorlegger(), "visittkort").unwrap();

        assert_eq!(plan.ordered.format.key, "visittkort");
        assert_eq!(plan.ordered.price_difference, 0);
        assert_eq!(plan.ordered.heading.as_deref(), Some("Din lokale rørlegger"));
        assert!(plan.ordered.subheading.is_none());
        assert!(plan.ordered.services.is_empty());
        assert!(plan.ordered.phone.is_none());

        let upgrade1 = plan.upgrade1.as_ref().unwrap();
        assert_eq!(upgrade1.format.key, "banner");
        assert_eq!(upgrade1.price_difference, 6800);
        assert_eq!(upgrade1.services.len(), 3);
        assert_eq!(upgrade1.phone.as_deref(), Some("55 12 34 56"));
        assert!(upgrade1.address.is_none());
        assert!(upgrade1.social_media.is_none());

        let upgrade2 = plan.upgrade2.as_ref().unwrap();
        assert_eq!(upgrade2.format.key, "tredjedel");
        assert_eq!(upgrade2.price_difference, 10000);
        assert_eq!(upgrade2.services.len(), 6);
        assert_eq!(upgrade2.certifications, strings(&["Mesterbrev", "StartBANK"]));
        assert!(upgrade2.description.is_some());
        assert!(upgrade2.email.is_none());
    }

    #[test]
    fn test_counts_never_exceed_scraped_lists() {
        let data = rorlegger();
        let plan = plan_content(&data, "halvside").unwrap();
        for tier in plan.upgrades() {
            assert!(tier.services.len() <= data.services.len());
            assert!(tier.certifications.len() <= data.certifications.len());
            assert!(tier.images.len() <= data.images.len());
        }
        let upgrade2 = plan.upgrade2.as_ref().unwrap();
        assert_eq!(upgrade2.format.key, "spread");
        assert!(upgrade2.social_media.is_some());
    }

    #[test]
    fn test_top_of_chain() {
        let plan = plan_content(&rorlegger(), "helside").unwrap();
        assert_eq!(plan.upgrade1.as_ref().map(|tier| tier.format.key), Some("spread"));
        assert!(plan.upgrade2.is_none());

        let plan = plan_content(&rorlegger(), "spread").unwrap();
        assert!(plan.upgrade1.is_none() && plan.upgrade2.is_none());
        assert!(plan.tier(Tier::Upgrade1).is_none());
        assert_eq!(plan.upgrades().count(), 0);
    }

    #[test]
    fn test_unknown_format() {
        assert!(plan_content(&rorlegger(), "kvartside").is_none());
    }

    #[test]
    fn test_empty_scrape_uses_fallback_services() {
        let plan = plan_content(&ScrapedData::empty(), "banner").unwrap();
        assert!(plan.ordered.heading.is_none());
        let upgrade1 = plan.upgrade1.unwrap();
        assert_eq!(upgrade1.services, strings(&FALLBACK_SERVICES));
        assert!(upgrade1.certifications.is_empty());
        assert!(upgrade1.phone.is_none());
    }
}
