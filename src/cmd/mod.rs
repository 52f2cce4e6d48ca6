pub mod compare;
pub mod regimes;
pub mod schema;

use clap::ValueEnum;
use itax::core::AgeBracket;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum AgeArg {
    /// Below 60
    #[default]
    Under60,
    /// 60 to 80
    Senior,
    /// Above 80
    SuperSenior,
}

impl From<AgeArg> for AgeBracket {
    fn from(arg: AgeArg) -> Self {
        match arg {
            AgeArg::Under60 => AgeBracket::Under60,
            AgeArg::Senior => AgeBracket::Senior60To80,
            AgeArg::SuperSenior => AgeBracket::SuperSenior80Plus,
        }
    }
}

fn format_inr(amount: Decimal) -> String {
    format!("₹{:.2}", amount)
}

fn format_pct(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
