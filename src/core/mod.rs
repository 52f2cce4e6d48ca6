pub mod compare;
pub mod config;
pub mod deductions;
pub mod input;
pub mod pipeline;
pub mod rebate;
pub mod slab;
pub mod surcharge;

// Flat public surface for domain types and functions.
pub use compare::{CheaperRegime, Comparison, RegimeComparisonEngine};
pub use config::{
    AgeBracket, AgeTable, ConfigError, FinancialYear, Regime, RegimeConfig, SurchargeBracket,
    TaxSlab,
};
pub use deductions::{DeductionCaps, DeductionCategory, DeductionLimits, DeductionSet};
pub use input::{read_request_json, ComparisonRequest, InputError};
pub use pipeline::{BreakdownLine, RegimeTaxPipeline, TaxBreakdown};
pub use rebate::compute_rebate;
pub use slab::compute_slab_tax;
pub use surcharge::{active_bracket, assess_surcharge, compute_surcharge, SurchargeAssessment};
