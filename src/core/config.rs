use crate::core::deductions::{DeductionCaps, DeductionLimits};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported financial year: {0} (supported: 2024-25, 2025-26)")]
    UnsupportedYear(FinancialYear),
}

/// Age bracket of the taxpayer, selects the old regime slab table and the
/// savings interest deduction cap
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum AgeBracket {
    #[default]
    #[serde(rename = "under60", alias = "below60")]
    Under60,
    #[serde(rename = "senior60to80", alias = "60to80")]
    Senior60To80,
    #[serde(
        rename = "superSenior80plus",
        alias = "super_senior80plus",
        alias = "above80"
    )]
    SuperSenior80Plus,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 3] = [
        AgeBracket::Under60,
        AgeBracket::Senior60To80,
        AgeBracket::SuperSenior80Plus,
    ];

    pub fn display(&self) -> &'static str {
        match self {
            AgeBracket::Under60 => "below 60",
            AgeBracket::Senior60To80 => "60 to 80",
            AgeBracket::SuperSenior80Plus => "above 80",
        }
    }
}

/// One of the two mutually exclusive regimes a taxpayer may elect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Old,
    New,
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regime::Old => write!(f, "Old Regime"),
            Regime::New => write!(f, "New Regime"),
        }
    }
}

/// Values that differ per age bracket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeTable<T> {
    pub under_60: T,
    pub senior: T,
    pub super_senior: T,
}

impl<T> AgeTable<T> {
    pub fn get(&self, age: AgeBracket) -> &T {
        match age {
            AgeBracket::Under60 => &self.under_60,
            AgeBracket::Senior60To80 => &self.senior,
            AgeBracket::SuperSenior80Plus => &self.super_senior,
        }
    }

    pub fn try_from_fn<E>(mut f: impl FnMut(AgeBracket) -> Result<T, E>) -> Result<Self, E> {
        Ok(AgeTable {
            under_60: f(AgeBracket::Under60)?,
            senior: f(AgeBracket::Senior60To80)?,
            super_senior: f(AgeBracket::SuperSenior80Plus)?,
        })
    }
}

/// A contiguous income range taxed at a single marginal rate.
///
/// Slabs are ordered; each one starts where the previous one ends (the first
/// at zero). `upper_bound` is inclusive, `None` meaning unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxSlab {
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxSlab {
    pub fn up_to(upper_bound: Decimal, rate: Decimal) -> Self {
        TaxSlab {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        TaxSlab {
            upper_bound: None,
            rate,
        }
    }
}

/// Surcharge levied on the tax itself once taxable income exceeds
/// `lower_bound`. `upper_bound` is exclusive, `None` meaning unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurchargeBracket {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl SurchargeBracket {
    fn new(lower_bound: Decimal, upper_bound: Option<Decimal>, rate: Decimal) -> Self {
        SurchargeBracket {
            lower_bound,
            upper_bound,
            rate,
        }
    }
}

/// Immutable rule set for one regime (and, for the old regime, one age
/// bracket) in one financial year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegimeConfig {
    pub regime: Regime,
    pub slabs: Vec<TaxSlab>,
    /// Applies only to salaried taxpayers
    pub standard_deduction: Decimal,
    pub surcharge_brackets: Vec<SurchargeBracket>,
    pub rebate_income_limit: Decimal,
    pub rebate_max_amount: Decimal,
    pub cess_rate: Decimal,
    /// Caps on itemized deductions, `None` when the regime accepts none
    pub deduction_caps: Option<DeductionCaps>,
}

/// Indian financial year (runs 1 April to 31 March)
/// The year value represents the end year (e.g., 2026 = FY 2025-26)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct FinancialYear(pub i32);

impl FinancialYear {
    pub const LATEST: FinancialYear = FinancialYear(2026);
    pub const SUPPORTED: [FinancialYear; 2] = [FinancialYear(2025), FinancialYear(2026)];

    /// Display as "2025-26" format
    pub fn display(&self) -> String {
        format!("{}-{:02}", self.0 - 1, self.0 % 100)
    }

    /// The assessment year in which income of this year is assessed
    pub fn assessment_year(&self) -> String {
        format!("{}-{:02}", self.0, (self.0 + 1) % 100)
    }

    fn ensure_supported(&self) -> Result<(), ConfigError> {
        if Self::SUPPORTED.contains(self) {
            Ok(())
        } else {
            Err(ConfigError::UnsupportedYear(*self))
        }
    }

    /// Health and education cess on the final liability
    pub fn cess_rate(&self) -> Decimal {
        dec!(0.04)
    }

    /// Old regime rules for one age bracket
    pub fn old_regime(&self, age: AgeBracket) -> Result<RegimeConfig, ConfigError> {
        self.ensure_supported()?;
        Ok(RegimeConfig {
            regime: Regime::Old,
            slabs: self.old_regime_slabs().get(age).clone(),
            standard_deduction: dec!(50000),
            surcharge_brackets: self.old_regime_surcharge(),
            rebate_income_limit: dec!(500000),
            rebate_max_amount: dec!(12500),
            cess_rate: self.cess_rate(),
            deduction_caps: Some(self.deduction_limits().resolve(age)),
        })
    }

    /// New regime rules, identical for every age bracket
    pub fn new_regime(&self) -> Result<RegimeConfig, ConfigError> {
        self.ensure_supported()?;
        let (rebate_income_limit, rebate_max_amount) = match self.0 {
            2026.. => (dec!(1200000), dec!(60000)),
            _ => (dec!(700000), dec!(25000)),
        };
        Ok(RegimeConfig {
            regime: Regime::New,
            slabs: self.new_regime_slabs(),
            standard_deduction: dec!(75000),
            surcharge_brackets: self.new_regime_surcharge(),
            rebate_income_limit,
            rebate_max_amount,
            cess_rate: self.cess_rate(),
            deduction_caps: None,
        })
    }

    fn old_regime_slabs(&self) -> AgeTable<Vec<TaxSlab>> {
        // Unchanged since FY 2014-15
        AgeTable {
            under_60: vec![
                TaxSlab::up_to(dec!(250000), dec!(0)),
                TaxSlab::up_to(dec!(500000), dec!(0.05)),
                TaxSlab::up_to(dec!(1000000), dec!(0.20)),
                TaxSlab::unbounded(dec!(0.30)),
            ],
            senior: vec![
                TaxSlab::up_to(dec!(300000), dec!(0)),
                TaxSlab::up_to(dec!(500000), dec!(0.05)),
                TaxSlab::up_to(dec!(1000000), dec!(0.20)),
                TaxSlab::unbounded(dec!(0.30)),
            ],
            super_senior: vec![
                TaxSlab::up_to(dec!(500000), dec!(0)),
                TaxSlab::up_to(dec!(1000000), dec!(0.20)),
                TaxSlab::unbounded(dec!(0.30)),
            ],
        }
    }

    fn new_regime_slabs(&self) -> Vec<TaxSlab> {
        match self.0 {
            // Budget 2025
            2026.. => vec![
                TaxSlab::up_to(dec!(400000), dec!(0)),
                TaxSlab::up_to(dec!(800000), dec!(0.05)),
                TaxSlab::up_to(dec!(1200000), dec!(0.10)),
                TaxSlab::up_to(dec!(1600000), dec!(0.15)),
                TaxSlab::up_to(dec!(2000000), dec!(0.20)),
                TaxSlab::up_to(dec!(2400000), dec!(0.25)),
                TaxSlab::unbounded(dec!(0.30)),
            ],
            _ => vec![
                TaxSlab::up_to(dec!(300000), dec!(0)),
                TaxSlab::up_to(dec!(700000), dec!(0.05)),
                TaxSlab::up_to(dec!(1000000), dec!(0.10)),
                TaxSlab::up_to(dec!(1200000), dec!(0.15)),
                TaxSlab::up_to(dec!(1500000), dec!(0.20)),
                TaxSlab::unbounded(dec!(0.30)),
            ],
        }
    }

    fn old_regime_surcharge(&self) -> Vec<SurchargeBracket> {
        vec![
            SurchargeBracket::new(dec!(5000000), Some(dec!(10000000)), dec!(0.10)),
            SurchargeBracket::new(dec!(10000000), Some(dec!(20000000)), dec!(0.15)),
            SurchargeBracket::new(dec!(20000000), Some(dec!(50000000)), dec!(0.25)),
            SurchargeBracket::new(dec!(50000000), None, dec!(0.37)),
        ]
    }

    fn new_regime_surcharge(&self) -> Vec<SurchargeBracket> {
        // Top rate capped at 25%
        vec![
            SurchargeBracket::new(dec!(5000000), Some(dec!(10000000)), dec!(0.10)),
            SurchargeBracket::new(dec!(10000000), Some(dec!(20000000)), dec!(0.15)),
            SurchargeBracket::new(dec!(20000000), None, dec!(0.25)),
        ]
    }

    fn deduction_limits(&self) -> DeductionLimits {
        DeductionLimits {
            section_80c: dec!(150000),
            section_80ccd_1b: dec!(50000),
            home_loan_interest: dec!(200000),
            // 80TTA below 60, 80TTB for seniors
            savings_interest: AgeTable {
                under_60: dec!(10000),
                senior: dec!(50000),
                super_senior: dec!(50000),
            },
        }
    }
}

impl std::fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
