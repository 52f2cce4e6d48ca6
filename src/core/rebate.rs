use rust_decimal::Decimal;

/// Rebate u/s 87A.
///
/// Eligibility is a hard cliff on taxable income: at or below the limit the
/// rebate wipes out tax up to `rebate_max_amount`, one rupee above it nothing.
pub fn compute_rebate(
    taxable_income: Decimal,
    tax_after_surcharge: Decimal,
    rebate_income_limit: Decimal,
    rebate_max_amount: Decimal,
) -> Decimal {
    if taxable_income <= rebate_income_limit {
        tax_after_surcharge.min(rebate_max_amount).max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}
