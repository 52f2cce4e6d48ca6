use crate::core::config::{AgeBracket, AgeTable};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Itemized deduction categories accepted by the old regime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeductionCategory {
    Section80C,
    Section80D,
    Hra,
    HomeLoanInterest,
    Section80TtaTtb,
    Section80Ccd1B,
    Other,
}

impl DeductionCategory {
    pub const ALL: [DeductionCategory; 7] = [
        DeductionCategory::Section80C,
        DeductionCategory::Section80D,
        DeductionCategory::Hra,
        DeductionCategory::HomeLoanInterest,
        DeductionCategory::Section80TtaTtb,
        DeductionCategory::Section80Ccd1B,
        DeductionCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DeductionCategory::Section80C => "80C",
            DeductionCategory::Section80D => "80D",
            DeductionCategory::Hra => "HRA",
            DeductionCategory::HomeLoanInterest => "Home loan interest (24b)",
            DeductionCategory::Section80TtaTtb => "80TTA/80TTB",
            DeductionCategory::Section80Ccd1B => "80CCD(1B)",
            DeductionCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for DeductionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Claimed deduction amounts. Only the old regime looks at these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DeductionSet {
    /// PPF, ELSS, life insurance premiums and similar
    #[schemars(with = "f64")]
    pub section_80c: Decimal,
    /// Health insurance premiums, as the already-eligible amount
    #[schemars(with = "f64")]
    pub section_80d: Decimal,
    /// House rent allowance exemption, as the already-eligible amount
    #[schemars(with = "f64")]
    pub hra: Decimal,
    /// Interest on a self-occupied property loan, section 24(b)
    #[schemars(with = "f64")]
    pub home_loan_interest: Decimal,
    /// Savings and deposit interest
    #[schemars(with = "f64")]
    pub section_80tta_ttb: Decimal,
    /// Additional NPS contribution
    #[schemars(with = "f64")]
    pub section_80ccd_1b: Decimal,
    #[schemars(with = "f64")]
    pub other: Decimal,
}

impl DeductionSet {
    pub fn amount(&self, category: DeductionCategory) -> Decimal {
        match category {
            DeductionCategory::Section80C => self.section_80c,
            DeductionCategory::Section80D => self.section_80d,
            DeductionCategory::Hra => self.hra,
            DeductionCategory::HomeLoanInterest => self.home_loan_interest,
            DeductionCategory::Section80TtaTtb => self.section_80tta_ttb,
            DeductionCategory::Section80Ccd1B => self.section_80ccd_1b,
            DeductionCategory::Other => self.other,
        }
    }

    fn amount_mut(&mut self, category: DeductionCategory) -> &mut Decimal {
        match category {
            DeductionCategory::Section80C => &mut self.section_80c,
            DeductionCategory::Section80D => &mut self.section_80d,
            DeductionCategory::Hra => &mut self.hra,
            DeductionCategory::HomeLoanInterest => &mut self.home_loan_interest,
            DeductionCategory::Section80TtaTtb => &mut self.section_80tta_ttb,
            DeductionCategory::Section80Ccd1B => &mut self.section_80ccd_1b,
            DeductionCategory::Other => &mut self.other,
        }
    }

    /// Builder-style setter, mostly for tests and command-line input
    pub fn with(mut self, category: DeductionCategory, amount: Decimal) -> Self {
        *self.amount_mut(category) = amount;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeductionCategory, Decimal)> + '_ {
        DeductionCategory::ALL
            .into_iter()
            .map(move |category| (category, self.amount(category)))
    }

    pub fn total(&self) -> Decimal {
        self.iter().map(|(_, amount)| amount).sum()
    }
}

/// Year-level deduction ceilings, some of which depend on age
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionLimits {
    pub section_80c: Decimal,
    pub section_80ccd_1b: Decimal,
    pub home_loan_interest: Decimal,
    pub savings_interest: AgeTable<Decimal>,
}

impl DeductionLimits {
    /// Resolve the ceilings that apply to one age bracket
    pub fn resolve(&self, age: AgeBracket) -> DeductionCaps {
        DeductionCaps {
            section_80c: Some(self.section_80c),
            section_80d: None,
            hra: None,
            home_loan_interest: Some(self.home_loan_interest),
            section_80tta_ttb: Some(*self.savings_interest.get(age)),
            section_80ccd_1b: Some(self.section_80ccd_1b),
            other: None,
        }
    }
}

/// Per-category ceilings for one age bracket. `None` leaves the claim
/// uncapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionCaps {
    pub section_80c: Option<Decimal>,
    pub section_80d: Option<Decimal>,
    pub hra: Option<Decimal>,
    pub home_loan_interest: Option<Decimal>,
    pub section_80tta_ttb: Option<Decimal>,
    pub section_80ccd_1b: Option<Decimal>,
    pub other: Option<Decimal>,
}

impl DeductionCaps {
    pub fn cap(&self, category: DeductionCategory) -> Option<Decimal> {
        match category {
            DeductionCategory::Section80C => self.section_80c,
            DeductionCategory::Section80D => self.section_80d,
            DeductionCategory::Hra => self.hra,
            DeductionCategory::HomeLoanInterest => self.home_loan_interest,
            DeductionCategory::Section80TtaTtb => self.section_80tta_ttb,
            DeductionCategory::Section80Ccd1B => self.section_80ccd_1b,
            DeductionCategory::Other => self.other,
        }
    }

    /// Cap each claim independently. Negative claims count as zero.
    pub fn apply(&self, claimed: &DeductionSet) -> DeductionSet {
        claimed
            .iter()
            .fold(DeductionSet::default(), |capped, (category, amount)| {
                let amount = amount.max(Decimal::ZERO);
                let allowed = self.cap(category).map_or(amount, |cap| amount.min(cap));
                if allowed < amount {
                    log::debug!("{} claim {} capped at {}", category, amount, allowed);
                }
                capped.with(category, allowed)
            })
    }
}
