//! Print ad formats, the upgrade chain between them and how much content
//! each format is allowed to show.

pub mod catalog;
pub mod rules;

pub use catalog::{
    AD_FORMATS, AdFormat, calculate_price_difference, get_format_details, get_second_upgrade_format,
    get_upgrade_format,
};
pub use rules::{FormatContent, FormatContentRules, Tier, content_rules};

/// Certifications Norwegian businesses commonly advertise
pub const COMMON_CERTIFICATIONS: [&str; 14] = [
    "ISO 9001",
    "ISO 14001",
    "ISO 45001",
    "Godkjent lærebedrift",
    "StartBANK",
    "MEF",
    "Mesterbrev",
    "BREEAM",
    "Miljøfyrtårn",
    "Sentral godkjenning",
    "Autorisert forhandler",
    "NHO-medlem",
    "FG-godkjent",
    "NEMKO",
];

/// Whether `name` mentions one of [`COMMON_CERTIFICATIONS`], ignoring case
pub fn is_common_certification(name: &str) -> bool {
    let lower = name.to_lowercase();
    COMMON_CERTIFICATIONS
        .iter()
        .any(|certification| lower.contains(&certification.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_common_certification() {
        assert!(is_common_certification("ISO 9001 sertifisert"));
        assert!(is_common_certification("miljøfyrtårn-sertifisert bedrift"));
        assert!(is_common_certification("Medlem av StartBANK"));
        assert!(!is_common_certification("Våre ansatte"));
        assert!(!is_common_certification("Kvalitetsgaranti"));
    }
}
