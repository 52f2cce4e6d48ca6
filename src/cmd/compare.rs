//! Compare command - tax under both regimes side by side, and the cheaper one

use crate::cmd::{format_inr, format_pct, AgeArg};
use crate::utils::write_csv;
use clap::Args;
use itax::core::{
    read_request_json, CheaperRegime, Comparison, ComparisonRequest, DeductionSet,
    FinancialYear, RegimeComparisonEngine, TaxBreakdown,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Gross annual income
    #[arg(
        short,
        long,
        allow_hyphen_values = true,
        required_unless_present = "input"
    )]
    income: Option<Decimal>,

    /// Income is salary, which claims the standard deduction
    #[arg(short, long, conflicts_with = "input")]
    salaried: bool,

    /// Age bracket of the taxpayer
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = AgeArg::Under60,
        conflicts_with = "input"
    )]
    age: AgeArg,

    /// Section 80C investments (PPF, ELSS, insurance premiums)
    #[arg(
        long,
        default_value_t = Decimal::ZERO,
        allow_hyphen_values = true,
        conflicts_with = "input"
    )]
    section_80c: Decimal,

    /// Section 80D health insurance premiums (eligible amount)
    #[arg(
        long,
        default_value_t = Decimal::ZERO,
        allow_hyphen_values = true,
        conflicts_with = "input"
    )]
    section_80d: Decimal,

    /// HRA exemption (eligible amount)
    #[arg(
        long,
        default_value_t = Decimal::ZERO,
        allow_hyphen_values = true,
        conflicts_with = "input"
    )]
    hra: Decimal,

    /// Home loan interest on a self-occupied property, section 24(b)
    #[arg(
        long,
        default_value_t = Decimal::ZERO,
        allow_hyphen_values = true,
        conflicts_with = "input"
    )]
    home_loan_interest: Decimal,

    /// Savings interest, section 80TTA (below 60) or 80TTB (60 and above)
    #[arg(
        long,
        default_value_t = Decimal::ZERO,
        allow_hyphen_values = true,
        conflicts_with = "input"
    )]
    section_80tta_ttb: Decimal,

    /// Additional NPS contribution, section 80CCD(1B)
    #[arg(
        long,
        default_value_t = Decimal::ZERO,
        allow_hyphen_values = true,
        conflicts_with = "input"
    )]
    section_80ccd_1b: Decimal,

    /// Any other eligible old regime deductions
    #[arg(
        long,
        default_value_t = Decimal::ZERO,
        allow_hyphen_values = true,
        conflicts_with = "input"
    )]
    other_deductions: Decimal,

    /// JSON file containing the whole request. Reads stdin with "-".
    #[arg(long, conflicts_with = "income")]
    input: Option<PathBuf>,

    /// Financial year by its end year (e.g., 2026 for 2025-26)
    #[arg(short, long, default_value_t = FinancialYear::LATEST.0)]
    year: i32,

    /// Output as JSON instead of formatted table
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

/// Comparison data for JSON output
#[derive(Debug, Serialize)]
struct ComparisonOutput<'a> {
    financial_year: String,
    assessment_year: String,
    age_bracket: &'static str,
    old_regime: &'a TaxBreakdown,
    new_regime: &'a TaxBreakdown,
    cheaper_regime: CheaperRegime,
    savings: String,
    recommendation: String,
}

/// One line of the side-by-side table
#[derive(Debug, Clone, Tabled, Serialize)]
struct ComparisonRow {
    #[tabled(skip)]
    item: &'static str,
    #[tabled(rename = "Item")]
    #[serde(skip)]
    label: &'static str,
    #[tabled(rename = "Old Regime")]
    old_regime: String,
    #[tabled(rename = "New Regime")]
    new_regime: String,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let request = self.request()?;
        let engine = RegimeComparisonEngine::for_year(FinancialYear(self.year))?;
        let comparison = engine.compare(&request);

        if self.json {
            self.print_json(&comparison, &request)
        } else if self.csv {
            write_csv(build_rows(&comparison, |a| format!("{:.2}", a)), io::stdout())
        } else {
            self.print_table(&comparison, &request);
            Ok(())
        }
    }

    fn request(&self) -> anyhow::Result<ComparisonRequest> {
        let request = match &self.input {
            Some(path) => read_request(path)?,
            None => {
                let Some(gross_income) = self.income else {
                    anyhow::bail!("--income is required unless --input is given");
                };
                ComparisonRequest {
                    gross_income,
                    is_salaried: self.salaried,
                    age_bracket: self.age.into(),
                    deductions: self.deductions(),
                }
            }
        };
        request.validate()?;
        Ok(request)
    }

    fn deductions(&self) -> DeductionSet {
        DeductionSet {
            section_80c: self.section_80c,
            section_80d: self.section_80d,
            hra: self.hra,
            home_loan_interest: self.home_loan_interest,
            section_80tta_ttb: self.section_80tta_ttb,
            section_80ccd_1b: self.section_80ccd_1b,
            other: self.other_deductions,
        }
    }

    fn print_table(&self, comparison: &Comparison, request: &ComparisonRequest) {
        let year = comparison.financial_year;
        println!();
        println!(
            "INCOME TAX COMPARISON (FY {}, AY {}) - age {}{}",
            year.display(),
            year.assessment_year(),
            request.age_bracket.display(),
            if request.is_salaried { ", salaried" } else { "" }
        );
        println!();

        let table = Table::new(build_rows(comparison, format_inr))
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();

        println!(
            "Effective rate: old {} | new {}",
            format_pct(comparison.old_regime.effective_rate().round_dp(4)),
            format_pct(comparison.new_regime.effective_rate().round_dp(4))
        );
        println!("{}", comparison.recommendation());
        println!();
    }

    fn print_json(
        &self,
        comparison: &Comparison,
        request: &ComparisonRequest,
    ) -> anyhow::Result<()> {
        let output = ComparisonOutput {
            financial_year: comparison.financial_year.display(),
            assessment_year: comparison.financial_year.assessment_year(),
            age_bracket: request.age_bracket.display(),
            old_regime: &comparison.old_regime,
            new_regime: &comparison.new_regime,
            cheaper_regime: comparison.cheaper_regime,
            savings: format!("{:.2}", comparison.savings),
            recommendation: comparison.recommendation(),
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

fn build_rows(comparison: &Comparison, format: impl Fn(Decimal) -> String) -> Vec<ComparisonRow> {
    comparison
        .old_regime
        .lines()
        .into_iter()
        .zip(comparison.new_regime.lines())
        .map(|(old, new)| ComparisonRow {
            item: old.key,
            label: old.label,
            old_regime: format(old.amount),
            new_regime: format(new.amount),
        })
        .collect()
}

/// Read a request from a JSON file (or stdin with "-")
fn read_request(path: &Path) -> anyhow::Result<ComparisonRequest> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        BufReader::new(io::stdin().lock()).read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a file or pipe a request to stdin.");
        }
        Ok(read_request_json(io::Cursor::new(buffer))?)
    } else {
        let file = File::open(path)?;
        Ok(read_request_json(BufReader::new(file))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn comparison(gross_income: Decimal) -> Comparison {
        RegimeComparisonEngine::for_year(FinancialYear::LATEST)
            .unwrap()
            .compare(&ComparisonRequest {
                gross_income,
                ..Default::default()
            })
    }

    #[test]
    fn rows_pair_old_and_new_lines() {
        let rows = build_rows(&comparison(dec!(600000)), |a| format!("{:.2}", a));

        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].item, "gross_income");
        assert_eq!(rows[0].old_regime, "600000.00");
        assert_eq!(rows[0].new_regime, "600000.00");

        let total = rows.last().unwrap();
        assert_eq!(total.item, "total_tax");
        assert_eq!(total.old_regime, "33800.00");
        assert_eq!(total.new_regime, "0.00");
    }

    #[test]
    fn table_rows_use_rupee_formatting() {
        let rows = build_rows(&comparison(dec!(600000)), format_inr);
        assert_eq!(rows[0].label, "Gross Annual Income");
        assert_eq!(rows[0].old_regime, "₹600000.00");
    }
}
