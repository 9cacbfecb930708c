mod pipeline;
mod render;
mod repl;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::pipeline::WatchArg;

#[derive(Debug, Parser)]
#[command(name = "stockwatch")]
#[command(about = "Stock availability dashboard and out-of-stock alerts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load the stock sheet and list every brand with its row count
    Brands,
    /// Load the stock sheet once and report on the selected brands
    Report {
        /// Brand to include (repeatable, up to 10)
        #[arg(long = "brand", required = true)]
        brands: Vec<String>,

        /// Which view to print
        #[arg(long, value_enum, default_value_t = View::All)]
        view: View,

        /// Watch a brand for this run, optionally with an alert address (BRAND or BRAND=EMAIL)
        #[arg(long = "watch", value_parser = pipeline::parse_watch_arg)]
        watches: Vec<WatchArg>,

        /// Email out-of-stock alerts for watched brands
        #[arg(long)]
        notify: bool,

        /// Print summaries as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Interactive session: load, watch, select, show and notify from a prompt
    Session,
}

/// Dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum View {
    /// Per-brand counts
    Overview,
    /// Out-of-stock products per brand
    OutOfStock,
    /// Every product per brand
    Products,
    /// All three views
    All,
    /// Sheet columns and the first rows as loaded
    Raw,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("stockwatch: run `stockwatch --help` for available commands");
        return Ok(());
    };

    let config = stockwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match command {
        Commands::Brands => report::run_brands(&config).await,
        Commands::Report {
            brands,
            view,
            watches,
            notify,
            json,
        } => {
            let options = report::ReportOptions {
                brands,
                view,
                watches,
                notify,
                json,
            };
            report::run_report(&config, options).await
        }
        Commands::Session => repl::run_session(&config).await,
    }
}

#[cfg(test)]
mod tests;
