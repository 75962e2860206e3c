use super::catalog::{AD_FORMATS, validate_chain};
use crate::error::RulesError;
use serde::Serialize;
use std::sync::LazyLock;

/// What an ad of a given size and tier may show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatContent {
    pub logo: bool,
    pub heading: bool,
    pub subheading: bool,
    pub description: bool,
    /// Number of services to list
    pub service_list: usize,
    pub contact_phone: bool,
    pub contact_address: bool,
    pub contact_email: bool,
    pub opening_hours: bool,
    pub website: bool,
    /// Number of certification badges
    pub certifications: usize,
    /// Number of content images
    pub images: usize,
}

/// Logo, heading and website only
const BASE: FormatContent = FormatContent {
    logo: true,
    heading: true,
    subheading: false,
    description: false,
    service_list: 0,
    contact_phone: false,
    contact_address: false,
    contact_email: false,
    opening_hours: false,
    website: true,
    certifications: 0,
    images: 0,
};

/// Every flag enabled, with the given counts
const fn everything(service_list: usize, certifications: usize, images: usize) -> FormatContent {
    FormatContent {
        subheading: true,
        description: true,
        service_list,
        contact_phone: true,
        contact_address: true,
        contact_email: true,
        opening_hours: true,
        certifications,
        images,
        ..BASE
    }
}

impl FormatContent {
    /// Boolean allowances by name, in declaration order
    pub fn flags(&self) -> [(&'static str, bool); 9] {
        [
            ("logo", self.logo),
            ("heading", self.heading),
            ("subheading", self.subheading),
            ("description", self.description),
            ("contactPhone", self.contact_phone),
            ("contactAddress", self.contact_address),
            ("contactEmail", self.contact_email),
            ("openingHours", self.opening_hours),
            ("website", self.website),
        ]
    }

    /// Count allowances by name
    pub fn counts(&self) -> [(&'static str, usize); 3] {
        [
            ("serviceList", self.service_list),
            ("certifications", self.certifications),
            ("images", self.images),
        ]
    }

    /// The first allowance that `next` takes away compared to `self`
    pub fn first_shrinking_field(&self, next: &FormatContent) -> Option<&'static str> {
        let flags = self
            .flags()
            .into_iter()
            .zip(next.flags())
            .find(|((_, before), (_, after))| *before && !*after)
            .map(|((name, _), _)| name);
        flags.or_else(|| {
            self.counts()
                .into_iter()
                .zip(next.counts())
                .find(|((_, before), (_, after))| after < before)
                .map(|((name, _), _)| name)
        })
    }
}

/// Ordered format, first upgrade, second upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    Ordered,
    Upgrade1,
    Upgrade2,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Ordered, Tier::Upgrade1, Tier::Upgrade2];
}

/// The three allowance profiles of one format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatContentRules {
    pub ordered: FormatContent,
    pub upgrade1: FormatContent,
    pub upgrade2: FormatContent,
}

impl FormatContentRules {
    pub fn get(&self, tier: Tier) -> &FormatContent {
        match tier {
            Tier::Ordered => &self.ordered,
            Tier::Upgrade1 => &self.upgrade1,
            Tier::Upgrade2 => &self.upgrade2,
        }
    }
}

const SPREAD: FormatContent = FormatContent {
    subheading: true,
    description: true,
    service_list: 6,
    contact_phone: true,
    contact_address: true,
    certifications: 2,
    images: 1,
    ..BASE
};

const HELSIDE_UPGRADE: FormatContent = everything(10, 4, 2);

/// Allowances keyed by format
pub const RULE_TABLE: [(&str, FormatContentRules); 6] = [
    (
        "visittkort",
        FormatContentRules {
            ordered: BASE,
            upgrade1: FormatContent {
                subheading: true,
                service_list: 3,
                contact_phone: true,
                ..BASE
            },
            upgrade2: FormatContent {
                subheading: true,
                description: true,
                service_list: 6,
                contact_phone: true,
                contact_address: true,
                certifications: 2,
                ..BASE
            },
        },
    ),
    (
        "banner",
        FormatContentRules {
            ordered: FormatContent {
                contact_phone: true,
                ..BASE
            },
            upgrade1: FormatContent {
                subheading: true,
                description: true,
                service_list: 4,
                contact_phone: true,
                certifications: 1,
                ..BASE
            },
            upgrade2: FormatContent {
                subheading: true,
                description: true,
                service_list: 8,
                contact_phone: true,
                contact_address: true,
                contact_email: true,
                opening_hours: true,
                certifications: 3,
                images: 1,
                ..BASE
            },
        },
    ),
    (
        "tredjedel",
        FormatContentRules {
            ordered: FormatContent {
                subheading: true,
                service_list: 3,
                contact_phone: true,
                ..BASE
            },
            upgrade1: FormatContent {
                subheading: true,
                description: true,
                service_list: 5,
                contact_phone: true,
                contact_address: true,
                certifications: 2,
                ..BASE
            },
            upgrade2: everything(10, 4, 2),
        },
    ),
    (
        "halvside",
        FormatContentRules {
            ordered: FormatContent {
                subheading: true,
                contact_phone: true,
                ..BASE
            },
            upgrade1: FormatContent {
                subheading: true,
                description: true,
                service_list: 6,
                contact_phone: true,
                contact_address: true,
                contact_email: true,
                certifications: 3,
                images: 1,
                ..BASE
            },
            upgrade2: everything(12, 5, 3),
        },
    ),
    (
        "helside",
        FormatContentRules {
            ordered: FormatContent {
                subheading: true,
                service_list: 4,
                contact_phone: true,
                certifications: 1,
                ..BASE
            },
            upgrade1: HELSIDE_UPGRADE,
            upgrade2: HELSIDE_UPGRADE,
        },
    ),
    (
        "spread",
        FormatContentRules {
            ordered: SPREAD,
            upgrade1: SPREAD,
            upgrade2: SPREAD,
        },
    ),
];

/// Check that every catalog format has rules, that no tier shrinks an
/// allowance of the tier below it, and that prices rise along the chain.
pub fn validate_rules(table: &[(&'static str, FormatContentRules)]) -> Result<(), RulesError> {
    validate_chain(&AD_FORMATS)?;

    for format in &AD_FORMATS {
        if !table.iter().any(|(key, _)| *key == format.key) {
            return Err(RulesError::MissingFormat(format.key));
        }
    }

    for (key, rules) in table {
        for pair in Tier::ALL.windows(2) {
            if let Some(field) = rules.get(pair[0]).first_shrinking_field(rules.get(pair[1])) {
                return Err(RulesError::NonMonotonic { format: *key, field });
            }
        }
    }
    Ok(())
}

static RULES: LazyLock<Vec<(&'static str, FormatContentRules)>> = LazyLock::new(|| {
    let table = RULE_TABLE.to_vec();
    if let Err(e) = validate_rules(&table) {
        panic!("Built-in format rules are invalid: {}", e);
    }
    table
});

/// Allowance profiles for `key`, `None` for an unknown format
pub fn content_rules(key: &str) -> Option<&'static FormatContentRules> {
    RULES
        .iter()
        .find(|(format, _)| *format == key)
        .map(|(_, rules)| rules)
}
