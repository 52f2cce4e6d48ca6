//! Schema command - print the expected request format

use clap::Args;
use itax::core::{AgeBracket, ComparisonRequest, DeductionCategory, DeductionSet};
use rust_decimal_macros::dec;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or example
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the comparison request
    JsonSchema,
    /// A filled-in example request
    Example,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::Example => self.print_example(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(ComparisonRequest);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_example(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(&example_request())?);
        Ok(())
    }
}

fn example_request() -> ComparisonRequest {
    ComparisonRequest {
        gross_income: dec!(1800000),
        is_salaried: true,
        age_bracket: AgeBracket::Under60,
        deductions: DeductionSet::default()
            .with(DeductionCategory::Section80C, dec!(150000))
            .with(DeductionCategory::Section80D, dec!(25000))
            .with(DeductionCategory::Hra, dec!(120000)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itax::core::read_request_json;

    #[test]
    fn example_round_trips_through_reader() {
        let json = serde_json::to_string(&example_request()).unwrap();
        assert_eq!(read_request_json(json.as_bytes()).unwrap(), example_request());
    }

    #[test]
    fn schema_names_request_fields() {
        let schema = serde_json::to_string(&schema_for!(ComparisonRequest)).unwrap();
        for field in ["gross_income", "is_salaried", "age_bracket", "section_80tta_ttb"] {
            assert!(schema.contains(field), "missing {}", field);
        }
    }
}
