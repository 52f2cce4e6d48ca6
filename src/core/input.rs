use crate::core::config::AgeBracket;
use crate::core::deductions::{DeductionCategory, DeductionSet};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("gross income must not be negative: {0}")]
    NegativeIncome(Decimal),
    #[error("deduction {category} must not be negative: {amount}")]
    NegativeDeduction {
        category: DeductionCategory,
        amount: Decimal,
    },
    #[error("invalid comparison request: {0}")]
    InvalidJson(String),
}

/// Everything needed to compare both regimes for one taxpayer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComparisonRequest {
    /// Gross annual income
    #[schemars(with = "f64")]
    pub gross_income: Decimal,
    /// Whether the income is salary, which earns the standard deduction
    #[serde(default)]
    pub is_salaried: bool,
    #[serde(default)]
    pub age_bracket: AgeBracket,
    /// Itemized deductions, used by the old regime only
    #[serde(default)]
    pub deductions: DeductionSet,
}

impl ComparisonRequest {
    /// Reject negative amounts. The calculators themselves clamp them to
    /// zero, this surfaces the mistake to the caller instead.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.gross_income < Decimal::ZERO {
            return Err(InputError::NegativeIncome(self.gross_income));
        }
        match self
            .deductions
            .iter()
            .find(|(_, amount)| *amount < Decimal::ZERO)
        {
            Some((category, amount)) => Err(InputError::NegativeDeduction { category, amount }),
            None => Ok(()),
        }
    }
}

/// Read and validate a request from JSON
pub fn read_request_json<R: Read>(reader: R) -> Result<ComparisonRequest, InputError> {
    let request: ComparisonRequest =
        serde_json::from_reader(reader).map_err(|e| InputError::InvalidJson(e.to_string()))?;
    request.validate()?;
    Ok(request)
}
