use crate::error::RulesError;
use serde::Serialize;

/// A print ad size and its list price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdFormat {
    pub key: &'static str,
    pub label: &'static str,
    /// Width × height in millimetres
    pub dimensions: &'static str,
    /// Price in NOK, excluding VAT
    pub price: u32,
}

/// Every format, cheapest first. The order is also the upgrade chain.
pub const AD_FORMATS: [AdFormat; 6] = [
    AdFormat {
        key: "visittkort",
        label: "Visittkort",
        dimensions: "90×55mm",
        price: 8000,
    },
    AdFormat {
        key: "banner",
        label: "Banner",
        dimensions: "186×55mm",
        price: 14800,
    },
    AdFormat {
        key: "tredjedel",
        label: "Tredjedel",
        dimensions: "186×95mm",
        price: 18000,
    },
    AdFormat {
        key: "halvside",
        label: "Halvside",
        dimensions: "210×146mm",
        price: 24400,
    },
    AdFormat {
        key: "helside",
        label: "Helside",
        dimensions: "210×297mm",
        price: 39400,
    },
    AdFormat {
        key: "spread",
        label: "Spread",
        dimensions: "420×297mm",
        price: 58400,
    },
];

fn position(key: &str) -> Option<usize> {
    AD_FORMATS.iter().position(|format| format.key == key)
}

pub fn get_format_details(key: &str) -> Option<&'static AdFormat> {
    AD_FORMATS.iter().find(|format| format.key == key)
}

/// The next larger format, or `None` at the top of the chain or for an unknown key
pub fn get_upgrade_format(key: &str) -> Option<&'static str> {
    let index = position(key)?;
    AD_FORMATS.get(index + 1).map(|format| format.key)
}

/// Two steps up the chain
pub fn get_second_upgrade_format(key: &str) -> Option<&'static str> {
    get_upgrade_format(key).and_then(get_upgrade_format)
}

/// `price(to) - price(from)`, or 0 if either key is unknown
pub fn calculate_price_difference(from: &str, to: &str) -> i64 {
    match (get_format_details(from), get_format_details(to)) {
        (Some(from), Some(to)) => i64::from(to.price) - i64::from(from.price),
        _ => 0,
    }
}

/// Prices must rise strictly along the chain, which also rules out cycles
pub fn validate_chain(formats: &[AdFormat]) -> Result<(), RulesError> {
    for pair in formats.windows(2) {
        if pair[1].price <= pair[0].price {
            return Err(RulesError::PriceOrder {
                previous: pair[0].key,
                next: pair[1].key,
            });
        }
    }
    Ok(())
}
