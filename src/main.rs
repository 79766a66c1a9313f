use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;

mod config;
mod extractor;
mod ranking;
mod table;
mod telemetry;
mod util;

mod countries;
mod games;
mod best;
mod providers;
mod details;
mod urls;
mod rank;
mod pivot;
mod export;

#[derive(Parser)]
#[command(name = "slotcat", about = "Slot catalog page extraction CLI")]
struct Cli {
    /// Directory all default input/output paths are resolved against
    #[arg(global = true, long, env = "SLOTCAT_BASE_DIR", default_value = ".")]
    base_dir: PathBuf,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Countries(countries::CountriesCmd),
    Games(games::GamesCmd),
    Best(best::BestCmd),
    Providers(providers::ProvidersCmd),
    Details(details::DetailsCmd),
    Urls(urls::UrlsCmd),
    Missing(urls::MissingCmd),
    Rank(rank::RankCmd),
    Pivot(pivot::PivotCmd),
    Export(export::ExportCmd),
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and SLOTCAT_LOG_FORMAT
    telemetry::config::init_tracing();
    let base = cli.base_dir.as_path();

    match cli.command {
        Commands::Countries(args) => countries::run(base, args)?,
        Commands::Games(args) => games::run(base, args)?,
        Commands::Best(args) => best::run(base, args)?,
        Commands::Providers(args) => providers::run(base, args)?,
        Commands::Details(args) => details::run(base, args)?,
        Commands::Urls(args) => urls::run(base, args)?,
        Commands::Missing(args) => urls::run_missing(base, args)?,
        Commands::Rank(args) => rank::run(base, args)?,
        Commands::Pivot(args) => pivot::run(base, args)?,
        Commands::Export(args) => export::run(base, args)?,
    }

    Ok(())
}
