//! Surcharge on income tax with marginal relief.
//!
//! Crossing a surcharge threshold must never cost more in tax plus surcharge
//! than the income earned above the threshold. The relieved surcharge is
//! capped so that
//!
//! ```text
//! tax + surcharge <= payable_at_threshold + (income - threshold)
//! ```
//!
//! where `payable_at_threshold` is the slab tax at the threshold plus the
//! surcharge of the bracket active at the threshold itself (relieved in turn).
//! Both are computed with the same slab table as the income being assessed.

use crate::core::config::{SurchargeBracket, TaxSlab};
use crate::core::slab::compute_slab_tax;
use rust_decimal::Decimal;

/// How the surcharge for one income was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurchargeAssessment {
    pub rate: Decimal,
    /// Surcharge before marginal relief
    pub gross: Decimal,
    pub relief: Decimal,
    /// Surcharge payable
    pub surcharge: Decimal,
}

/// The highest bracket whose lower bound the income strictly exceeds
pub fn active_bracket(
    taxable_income: Decimal,
    brackets: &[SurchargeBracket],
) -> Option<&SurchargeBracket> {
    brackets
        .iter()
        .take_while(|bracket| taxable_income > bracket.lower_bound)
        .last()
}

/// Surcharge payable on `tax_on_income`, after marginal relief.
pub fn compute_surcharge(
    taxable_income: Decimal,
    tax_on_income: Decimal,
    slabs: &[TaxSlab],
    brackets: &[SurchargeBracket],
) -> Decimal {
    assess_surcharge(taxable_income, tax_on_income, slabs, brackets).surcharge
}

pub fn assess_surcharge(
    taxable_income: Decimal,
    tax_on_income: Decimal,
    slabs: &[TaxSlab],
    brackets: &[SurchargeBracket],
) -> SurchargeAssessment {
    let taxable_income = taxable_income.max(Decimal::ZERO);
    if tax_on_income <= Decimal::ZERO {
        return SurchargeAssessment::default();
    }

    let Some(bracket) = active_bracket(taxable_income, brackets) else {
        return SurchargeAssessment::default();
    };

    let gross = tax_on_income * bracket.rate;
    let payable_at_threshold = payable_at(bracket.lower_bound, slabs, brackets);
    let excess = taxable_income - bracket.lower_bound;
    let ceiling = payable_at_threshold + excess - tax_on_income;
    let surcharge = gross.min(ceiling).max(Decimal::ZERO);

    log::debug!(
        "Surcharge @ {} above {}: gross {}, threshold payable {}, excess {}, payable {}",
        bracket.rate,
        bracket.lower_bound,
        gross,
        payable_at_threshold,
        excess,
        surcharge
    );

    SurchargeAssessment {
        rate: bracket.rate,
        gross,
        relief: gross - surcharge,
        surcharge,
    }
}

/// Tax plus surcharge payable at exactly `income`. At a bracket's lower bound
/// only lower brackets are active, so the recursion always descends.
fn payable_at(income: Decimal, slabs: &[TaxSlab], brackets: &[SurchargeBracket]) -> Decimal {
    let tax = compute_slab_tax(income, slabs);
    tax + compute_surcharge(income, tax, slabs, brackets)
}
