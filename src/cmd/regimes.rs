//! Regimes command - print the rate tables of a financial year

use crate::cmd::{format_inr, format_pct, AgeArg};
use clap::{Args, ValueEnum};
use itax::core::{
    AgeBracket, DeductionCaps, DeductionCategory, FinancialYear, RegimeComparisonEngine,
    RegimeConfig, SurchargeBracket, TaxSlab,
};
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RegimesCommand {
    /// Financial year by its end year (e.g., 2026 for 2025-26)
    #[arg(short, long, default_value_t = FinancialYear::LATEST.0)]
    year: i32,

    /// Age bracket for the old regime slabs and deduction caps
    #[arg(short, long, value_enum, default_value_t = AgeArg::Under60)]
    age: AgeArg,

    /// Only show one regime
    #[arg(short, long, value_enum)]
    regime: Option<RegimeArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegimeArg {
    Old,
    New,
}

#[derive(Debug, Clone, Tabled)]
struct SlabRow {
    #[tabled(rename = "Taxable Income")]
    range: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

#[derive(Debug, Clone, Tabled)]
struct SurchargeRow {
    #[tabled(rename = "Taxable Income")]
    range: String,
    #[tabled(rename = "Surcharge")]
    rate: String,
}

#[derive(Debug, Clone, Tabled)]
struct CapRow {
    #[tabled(rename = "Deduction")]
    category: &'static str,
    #[tabled(rename = "Cap")]
    cap: String,
}

impl RegimesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let engine = RegimeComparisonEngine::for_year(FinancialYear(self.year))?;
        let age: AgeBracket = self.age.into();

        if self.regime != Some(RegimeArg::New) {
            self.print_regime(engine.financial_year(), engine.old_regime(age), Some(age));
        }
        if self.regime != Some(RegimeArg::Old) {
            self.print_regime(engine.financial_year(), engine.new_regime(), None);
        }
        Ok(())
    }

    fn print_regime(&self, year: FinancialYear, config: &RegimeConfig, age: Option<AgeBracket>) {
        println!();
        match age {
            Some(age) => println!("{} (FY {}) - age {}", config.regime, year, age.display()),
            None => println!("{} (FY {})", config.regime, year),
        }
        println!();

        print_table(slab_rows(&config.slabs));
        print_table(surcharge_rows(&config.surcharge_brackets));

        println!(
            "  Standard deduction (salaried): {}",
            format_inr(config.standard_deduction)
        );
        println!(
            "  Rebate u/s 87A: up to {} when taxable income <= {}",
            format_inr(config.rebate_max_amount),
            format_inr(config.rebate_income_limit)
        );
        println!("  Health & education cess: {}", format_pct(config.cess_rate));
        println!();

        match &config.deduction_caps {
            Some(caps) => print_table(cap_rows(caps)),
            None => {
                println!("  No itemized deductions");
                println!();
            }
        }
    }
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

fn slab_rows(slabs: &[TaxSlab]) -> Vec<SlabRow> {
    let mut lower = Decimal::ZERO;
    slabs
        .iter()
        .map(|slab| {
            let range = match slab.upper_bound {
                Some(upper) => format!("{} - {}", format_inr(lower), format_inr(upper)),
                None => format!("above {}", format_inr(lower)),
            };
            lower = slab.upper_bound.unwrap_or(lower);
            SlabRow {
                range,
                rate: format_pct(slab.rate),
            }
        })
        .collect()
}

fn surcharge_rows(brackets: &[SurchargeBracket]) -> Vec<SurchargeRow> {
    brackets
        .iter()
        .map(|bracket| SurchargeRow {
            range: match bracket.upper_bound {
                Some(upper) => format!(
                    "{} - {}",
                    format_inr(bracket.lower_bound),
                    format_inr(upper)
                ),
                None => format!("above {}", format_inr(bracket.lower_bound)),
            },
            rate: format_pct(bracket.rate),
        })
        .collect()
}

fn cap_rows(caps: &DeductionCaps) -> Vec<CapRow> {
    DeductionCategory::ALL
        .into_iter()
        .map(|category| CapRow {
            category: category.label(),
            cap: caps
                .cap(category)
                .map_or("eligible amount".to_string(), format_inr),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_rows_show_contiguous_ranges() {
        let config = FinancialYear::LATEST.old_regime(AgeBracket::Under60).unwrap();
        let rows = slab_rows(&config.slabs);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].range, "₹0.00 - ₹250000.00");
        assert_eq!(rows[0].rate, "0%");
        assert_eq!(rows[1].range, "₹250000.00 - ₹500000.00");
        assert_eq!(rows[1].rate, "5%");
        assert_eq!(rows[3].range, "above ₹1000000.00");
        assert_eq!(rows[3].rate, "30%");
    }

    #[test]
    fn surcharge_rows_for_new_regime() {
        let config = FinancialYear::LATEST.new_regime().unwrap();
        let rows = surcharge_rows(&config.surcharge_brackets);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].range, "above ₹20000000.00");
        assert_eq!(rows[2].rate, "25%");
    }

    #[test]
    fn cap_rows_mark_uncapped_categories() {
        let config = FinancialYear::LATEST
            .old_regime(AgeBracket::Senior60To80)
            .unwrap();
        let rows = cap_rows(config.deduction_caps.as_ref().unwrap());

        assert_eq!(rows[0].cap, "₹150000.00");
        assert_eq!(rows[1].cap, "eligible amount");
        assert_eq!(rows[4].category, "80TTA/80TTB");
        assert_eq!(rows[4].cap, "₹50000.00");
    }
}
