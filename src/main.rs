use clap::{Parser, Subcommand};

mod cmd;
mod utils;

#[derive(Parser, Debug)]
#[command(name = "itax", version, author)]
#[command(about = "Compare Indian income tax under the old and new regimes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate tax under both regimes and suggest the cheaper one
    Compare(cmd::compare::CompareCommand),
    /// Print slab, surcharge, rebate and deduction tables
    Regimes(cmd::regimes::RegimesCommand),
    /// Print the comparison request format
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compare(command) => command.exec(),
        Command::Regimes(command) => command.exec(),
        Command::Schema(command) => command.exec(),
    }
}
