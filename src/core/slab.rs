use crate::core::config::TaxSlab;
use rust_decimal::Decimal;

/// Progressive tax on `income` under an ordered slab table.
///
/// Each slab taxes the part of income between the previous slab's upper bound
/// and its own at the slab's rate. Income sitting exactly on a bound is taxed
/// entirely within the slab that bound closes. Negative income is treated as
/// zero.
pub fn compute_slab_tax(income: Decimal, slabs: &[TaxSlab]) -> Decimal {
    let income = income.max(Decimal::ZERO);
    let mut tax = Decimal::ZERO;
    let mut previous_bound = Decimal::ZERO;

    for slab in slabs {
        if income <= previous_bound {
            break;
        }

        let top = slab.upper_bound.map_or(income, |bound| income.min(bound));
        tax += (top - previous_bound) * slab.rate;

        match slab.upper_bound {
            Some(bound) if income > bound => previous_bound = bound,
            _ => break,
        }
    }

    tax
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{AgeBracket, FinancialYear};
    use proptest::prelude::{prop_assert, proptest};
    use rust_decimal_macros::dec;

    fn old_slabs(age: AgeBracket) -> Vec<TaxSlab> {
        FinancialYear::LATEST.old_regime(age).unwrap().slabs
    }

    fn new_slabs() -> Vec<TaxSlab> {
        FinancialYear::LATEST.new_regime().unwrap().slabs
    }

    #[test]
    fn zero_income_owes_nothing() {
        assert_eq!(compute_slab_tax(Decimal::ZERO, &old_slabs(AgeBracket::Under60)), Decimal::ZERO);
        assert_eq!(compute_slab_tax(Decimal::ZERO, &new_slabs()), Decimal::ZERO);
    }

    #[test]
    fn negative_income_is_clamped() {
        assert_eq!(compute_slab_tax(dec!(-1000), &new_slabs()), Decimal::ZERO);
    }

    #[test]
    fn income_within_nil_slab_owes_nothing() {
        assert_eq!(compute_slab_tax(dec!(250000), &old_slabs(AgeBracket::Under60)), Decimal::ZERO);
        assert_eq!(
            compute_slab_tax(dec!(500000), &old_slabs(AgeBracket::SuperSenior80Plus)),
            Decimal::ZERO
        );
    }

    #[test]
    fn old_regime_below_60() {
        // 0 on 2.5L, 5% on 2.5L, 20% on 1L
        assert_eq!(compute_slab_tax(dec!(600000), &old_slabs(AgeBracket::Under60)), dec!(32500));
    }

    #[test]
    fn old_regime_senior_and_super_senior() {
        assert_eq!(
            compute_slab_tax(dec!(600000), &old_slabs(AgeBracket::Senior60To80)),
            dec!(30000)
        );
        assert_eq!(
            compute_slab_tax(dec!(600000), &old_slabs(AgeBracket::SuperSenior80Plus)),
            dec!(20000)
        );
    }

    #[test]
    fn income_on_boundary_stays_in_lower_band() {
        let slabs = old_slabs(AgeBracket::Under60);
        assert_eq!(compute_slab_tax(dec!(500000), &slabs), dec!(12500));
        assert_eq!(compute_slab_tax(dec!(1000000), &slabs), dec!(112500));
        assert_eq!(compute_slab_tax(dec!(1000001), &slabs), dec!(112500.30));
    }

    #[test]
    fn new_regime_after_standard_deduction() {
        assert_eq!(compute_slab_tax(dec!(925000), &new_slabs()), dec!(32500));
    }

    #[test]
    fn new_regime_top_slab() {
        // 20000 + 40000 + 60000 + 80000 + 100000 on the first 24L
        assert_eq!(compute_slab_tax(dec!(2400000), &new_slabs()), dec!(300000));
        assert_eq!(compute_slab_tax(dec!(3400000), &new_slabs()), dec!(600000));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_slab_tax_is_non_decreasing(a in 0u64..100_000_000, b in 0u64..100_000_000) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            for slabs in [old_slabs(AgeBracket::Under60), new_slabs()] {
                prop_assert!(
                    compute_slab_tax(Decimal::from(low), &slabs)
                        <= compute_slab_tax(Decimal::from(high), &slabs)
                );
            }
        }

        #[test]
        fn prop_slab_tax_is_continuous_at_boundaries(epsilon_paise in 1u64..100) {
            let epsilon = Decimal::new(epsilon_paise as i64, 2);
            let tables = [
                old_slabs(AgeBracket::Under60),
                old_slabs(AgeBracket::Senior60To80),
                new_slabs(),
            ];
            for slabs in tables {
                let max_rate = slabs.iter().map(|s| s.rate).max().unwrap();
                for bound in slabs.iter().filter_map(|s| s.upper_bound) {
                    let jump = compute_slab_tax(bound, &slabs)
                        - compute_slab_tax(bound - epsilon, &slabs);
                    prop_assert!(jump >= Decimal::ZERO);
                    prop_assert!(jump <= epsilon * max_rate);
                }
            }
        }
    }
}
