//! Upsell e-mail drafts sent to the customer along with the proposed ads.

use crate::formats::Tier;
use crate::sizing::{ContentPlan, TierContent};
use serde::Serialize;

pub const EMAIL_TEMPLATE: &str = "Hei, {KUNDENAVN} 😊

Jeg er designeren på dette prosjektet, og har vært heldig å få designe annonsen du har bestilt.

{PERSONLIG_KOMMENTAR}

Jeg har også laget en {UPGRADE_FORMAT} ({UPGRADE_DIMENSJONER}) i tillegg til {BESTILT_FORMAT} ({BESTILT_DIMENSJONER}) du bestilte. Annonsen vil bli mer synlig i brosjyren, noe som er bra for deg. 😊

{INTERAKTIV_TEKST}

Vil du heller gå for det uforpliktende tilbudet på den store annonsen er prisen kr. {PRIS_DIFFERANSE} (ekskl.mva) ekstra.

Begge annonsene er vedlagt så det er bare å komme tilbake til meg om hvilken annonse du velger :)

Ønsker deg en god dag 😊";

pub const INTERACTIVE_TEXT: &str = "På den interaktive annonsen har jeg satt opp noen klikkbare knapper til dine sosiale medier sider.\nHer er link til den interaktive annonsen: [LINK]";

pub const DEFAULT_CONTACT_NAME: &str = "der";
pub const DEFAULT_PERSONAL_COMMENT: &str = "Dere hadde godt materiell på nettsiden!";

/// Digit group separator used by Norwegian number formatting (no-break space)
const GROUP_SEPARATOR: char = '\u{a0}';

/// Format a whole number of kroner the way Norwegian locales do, e.g. `6 800`
pub fn format_price_nb(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }
    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Personalisation for the drafts; empty fields fall back to the defaults
#[derive(Debug, Clone, Default)]
pub struct DraftOptions {
    pub contact_name: Option<String>,
    pub personal_comment: Option<String>,
}

impl DraftOptions {
    fn contact_name(&self) -> &str {
        non_blank(self.contact_name.as_deref()).unwrap_or(DEFAULT_CONTACT_NAME)
    }

    fn personal_comment(&self) -> &str {
        non_blank(self.personal_comment.as_deref()).unwrap_or(DEFAULT_PERSONAL_COMMENT)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// One rendered e-mail offering a single upgrade
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDraft {
    pub tier: Tier,
    pub upgrade_format: &'static str,
    pub body: String,
}

/// Fill [`EMAIL_TEMPLATE`] for an upgrade from `ordered` to `upgrade`
pub fn render_draft(ordered: &TierContent, upgrade: &TierContent, options: &DraftOptions) -> String {
    EMAIL_TEMPLATE
        .replace("{KUNDENAVN}", options.contact_name())
        .replace("{PERSONLIG_KOMMENTAR}", options.personal_comment())
        .replace("{UPGRADE_FORMAT}", &upgrade.format.label.to_lowercase())
        .replace("{UPGRADE_DIMENSJONER}", upgrade.format.dimensions)
        .replace("{BESTILT_FORMAT}", &ordered.format.label.to_lowercase())
        .replace("{BESTILT_DIMENSJONER}", ordered.format.dimensions)
        .replace("{PRIS_DIFFERANSE}", &format_price_nb(upgrade.price_difference))
        .replace("{INTERAKTIV_TEKST}", INTERACTIVE_TEXT)
}

/// A draft for every upgrade the plan offers, nearest upgrade first
pub fn email_drafts(plan: &ContentPlan, options: &DraftOptions) -> Vec<EmailDraft> {
    plan.upgrades()
        .map(|upgrade| EmailDraft {
            tier: upgrade.tier,
            upgrade_format: upgrade.format.key,
            body: render_draft(&plan.ordered, upgrade, options),
        })
        .collect()
}
