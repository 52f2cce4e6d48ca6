use crate::core::config::{AgeBracket, AgeTable, ConfigError, FinancialYear, Regime, RegimeConfig};
use crate::core::input::ComparisonRequest;
use crate::core::pipeline::{RegimeTaxPipeline, TaxBreakdown};
use rust_decimal::Decimal;
use serde::Serialize;

/// Which regime leaves the taxpayer with less to pay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheaperRegime {
    Old,
    New,
    Equal,
}

/// Both regimes' breakdowns for the same taxpayer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub financial_year: FinancialYear,
    pub old_regime: TaxBreakdown,
    pub new_regime: TaxBreakdown,
    pub cheaper_regime: CheaperRegime,
    /// Absolute difference between the two totals
    pub savings: Decimal,
}

impl Comparison {
    fn new(
        financial_year: FinancialYear,
        old_regime: TaxBreakdown,
        new_regime: TaxBreakdown,
    ) -> Self {
        let old_total = old_regime.total_tax;
        let new_total = new_regime.total_tax;
        let cheaper_regime = match old_total.cmp(&new_total) {
            std::cmp::Ordering::Less => CheaperRegime::Old,
            std::cmp::Ordering::Greater => CheaperRegime::New,
            std::cmp::Ordering::Equal => CheaperRegime::Equal,
        };

        Comparison {
            financial_year,
            old_regime,
            new_regime,
            cheaper_regime,
            savings: (old_total - new_total).abs(),
        }
    }

    pub fn breakdown(&self, regime: Regime) -> &TaxBreakdown {
        match regime {
            Regime::Old => &self.old_regime,
            Regime::New => &self.new_regime,
        }
    }

    /// One sentence suggesting which regime to elect
    pub fn recommendation(&self) -> String {
        match self.cheaper_regime {
            CheaperRegime::Old => format!(
                "The Old Regime is more beneficial, saving ₹{:.2}.",
                self.savings
            ),
            CheaperRegime::New => format!(
                "The New Regime (FY {}) is more beneficial, saving ₹{:.2}.",
                self.financial_year, self.savings
            ),
            CheaperRegime::Equal => "Both regimes result in the same tax liability.".to_string(),
        }
    }
}

/// Compares the old and new regimes of one financial year.
///
/// All regime configs are built once on construction and only read
/// afterwards, so one engine can serve any number of comparisons.
#[derive(Debug, Clone)]
pub struct RegimeComparisonEngine {
    financial_year: FinancialYear,
    old_regime: AgeTable<RegimeConfig>,
    new_regime: RegimeConfig,
}

impl RegimeComparisonEngine {
    pub fn for_year(financial_year: FinancialYear) -> Result<Self, ConfigError> {
        Ok(RegimeComparisonEngine {
            financial_year,
            old_regime: AgeTable::try_from_fn(|age| financial_year.old_regime(age))?,
            new_regime: financial_year.new_regime()?,
        })
    }

    pub fn financial_year(&self) -> FinancialYear {
        self.financial_year
    }

    pub fn old_regime(&self, age: AgeBracket) -> &RegimeConfig {
        self.old_regime.get(age)
    }

    pub fn new_regime(&self) -> &RegimeConfig {
        &self.new_regime
    }

    pub fn compare(&self, request: &ComparisonRequest) -> Comparison {
        let old_regime = RegimeTaxPipeline::new(self.old_regime(request.age_bracket)).run(
            request.gross_income,
            request.is_salaried,
            &request.deductions,
        );
        let new_regime = RegimeTaxPipeline::new(&self.new_regime).run(
            request.gross_income,
            request.is_salaried,
            &request.deductions,
        );

        let comparison = Comparison::new(self.financial_year, old_regime, new_regime);
        log::info!(
            "FY {}: old {} vs new {}, cheaper {:?} by {}",
            self.financial_year,
            comparison.old_regime.total_tax,
            comparison.new_regime.total_tax,
            comparison.cheaper_regime,
            comparison.savings
        );
        comparison
    }
}
