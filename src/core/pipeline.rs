use crate::core::config::{Regime, RegimeConfig};
use crate::core::deductions::DeductionSet;
use crate::core::rebate::compute_rebate;
use crate::core::slab::compute_slab_tax;
use crate::core::surcharge::assess_surcharge;
use itax_derive::BreakdownLines;
use rust_decimal::Decimal;
use serde::Serialize;

/// A labelled monetary line of a breakdown, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakdownLine {
    pub key: &'static str,
    pub label: &'static str,
    pub amount: Decimal,
}

/// Tax computed under one regime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, BreakdownLines)]
pub struct TaxBreakdown {
    pub regime: Regime,
    /// Gross Annual Income
    pub gross_income: Decimal,
    /// Standard Deduction
    pub standard_deduction: Decimal,
    /// Total Deductions
    pub total_deductions: Decimal,
    /// Net Taxable Income
    pub taxable_income: Decimal,
    /// Tax on Income (slabs)
    pub tax_on_income: Decimal,
    /// Surcharge
    pub surcharge: Decimal,
    /// Marginal Relief
    pub marginal_relief: Decimal,
    /// Tax after Surcharge
    pub tax_after_surcharge: Decimal,
    /// Rebate u/s 87A
    pub rebate: Decimal,
    /// Tax before Cess
    pub tax_before_cess: Decimal,
    /// Health & Education Cess
    pub cess: Decimal,
    /// Total Tax Payable
    pub total_tax: Decimal,
}

impl TaxBreakdown {
    /// Total tax as a fraction of gross income
    pub fn effective_rate(&self) -> Decimal {
        if self.gross_income.is_zero() {
            Decimal::ZERO
        } else {
            self.total_tax / self.gross_income
        }
    }
}

/// Runs one regime's rules over a taxpayer's income.
///
/// Stages run strictly in order: deductions, taxable income, slab tax,
/// surcharge, rebate, cess. Each stage only reads the previous stages'
/// values and the config.
pub struct RegimeTaxPipeline<'a> {
    config: &'a RegimeConfig,
}

impl<'a> RegimeTaxPipeline<'a> {
    pub fn new(config: &'a RegimeConfig) -> Self {
        RegimeTaxPipeline { config }
    }

    /// Itemized `deductions` are ignored when the regime does not accept them.
    pub fn run(
        &self,
        gross_income: Decimal,
        is_salaried: bool,
        deductions: &DeductionSet,
    ) -> TaxBreakdown {
        let config = self.config;
        let gross_income = gross_income.max(Decimal::ZERO);

        let standard_deduction = if is_salaried {
            config.standard_deduction
        } else {
            Decimal::ZERO
        };
        let itemized = config
            .deduction_caps
            .as_ref()
            .map_or(Decimal::ZERO, |caps| caps.apply(deductions).total());
        let total_deductions = standard_deduction + itemized;

        let taxable_income = (gross_income - total_deductions).max(Decimal::ZERO);

        let tax_on_income = compute_slab_tax(taxable_income, &config.slabs);

        let surcharge = assess_surcharge(
            taxable_income,
            tax_on_income,
            &config.slabs,
            &config.surcharge_brackets,
        );
        let tax_after_surcharge = tax_on_income + surcharge.surcharge;

        let rebate = compute_rebate(
            taxable_income,
            tax_after_surcharge,
            config.rebate_income_limit,
            config.rebate_max_amount,
        );
        let tax_before_cess = tax_after_surcharge - rebate;

        let cess = tax_before_cess * config.cess_rate;
        let total_tax = tax_before_cess + cess;

        log::debug!(
            "{}: taxable {}, slab tax {}, surcharge {}, rebate {}, cess {}, total {}",
            config.regime,
            taxable_income,
            tax_on_income,
            surcharge.surcharge,
            rebate,
            cess,
            total_tax
        );

        TaxBreakdown {
            regime: config.regime,
            gross_income,
            standard_deduction,
            total_deductions,
            taxable_income,
            tax_on_income,
            surcharge: surcharge.surcharge,
            marginal_relief: surcharge.relief,
            tax_after_surcharge,
            rebate,
            tax_before_cess,
            cess,
            total_tax,
        }
    }
}
