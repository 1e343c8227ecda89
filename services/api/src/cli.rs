use crate::report::{run_calculate, run_compare, run_tiers};
use crate::server;
use clap::{Args, Parser, Subcommand};
use milecalc::earning::EliteTier;
use milecalc::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Mileage Earning Calculator",
    about = "Calculate frequent-flyer miles earned per flight segment, or serve the calculator over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Calculate miles earned for one segment and program
    Calculate(CalculateArgs),
    /// Rank every known program for one segment
    Compare(CompareArgs),
    /// List the elite tiers a program accepts
    Tiers(TiersArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct SegmentArgs {
    /// Origin airport IATA code
    #[arg(long)]
    pub(crate) origin: String,
    /// Destination airport IATA code
    #[arg(long)]
    pub(crate) destination: String,
    /// Operating carrier code
    #[arg(long)]
    pub(crate) carrier: String,
    /// Booking class letter printed on the ticket
    #[arg(long)]
    pub(crate) booking_class: String,
    /// Elite tier (none, silver, gold, platinum, top)
    #[arg(long, default_value = "none")]
    pub(crate) tier: EliteTier,
    /// Fare paid in USD, used by revenue-based programs
    #[arg(long)]
    pub(crate) ticket_price: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    #[command(flatten)]
    pub(crate) segment: SegmentArgs,
    /// Crediting loyalty program id (e.g. aa-aadvantage)
    #[arg(long)]
    pub(crate) program: String,
    /// Print the breakdown as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    #[command(flatten)]
    pub(crate) segment: SegmentArgs,
    /// Also write the ranking to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct TiersArgs {
    /// Loyalty program id (e.g. delta-skymiles)
    #[arg(long)]
    pub(crate) program: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calculate(args) => run_calculate(args),
        Command::Compare(args) => run_compare(args),
        Command::Tiers(args) => run_tiers(args),
    }
}
