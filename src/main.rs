use clap::Parser;
use p2pwatch::application::collect::CollectOptions;
use p2pwatch::cli::commands::{Cli, Commands};
use p2pwatch::config::AppConfig;
use p2pwatch::domain::ports::listing_repository::ListingFilter;
use p2pwatch::domain::values::trade_type::TradeType;
use p2pwatch::infrastructure::export::spreadsheet::SpreadsheetFormat;
use p2pwatch::P2pWatch;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let app = match P2pWatch::new(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing p2pwatch: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(&app, &config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(
    app: &P2pWatch,
    config: &AppConfig,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Search { filter } => {
            let records = app.search_advertisements(&filter.to_filter()).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Collect {
            filter,
            format,
            prefix,
            output_dir,
            no_db,
        } => {
            let format: SpreadsheetFormat = format.parse().map_err(|e: String| e)?;
            let options = CollectOptions {
                output_dir: output_dir
                    .map(PathBuf::from)
                    .unwrap_or_else(|| config.output_dir.clone()),
                prefix,
                format,
                store: !no_db,
            };
            let report = app.collect(&filter.to_filter(), &options).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::History {
            limit,
            desc,
            asset,
            fiat,
            trade_type,
        } => {
            let trade_type: Option<TradeType> = trade_type
                .map(|t| t.parse())
                .transpose()
                .map_err(|e: String| e)?;
            let listings = app.listings(&ListingFilter {
                exchange: None,
                asset,
                fiat,
                trade_type,
                limit: Some(limit),
                descending: desc,
            })?;
            println!("{}", serde_json::to_string_pretty(&listings)?);
        }
        Commands::Runs { limit } => {
            let runs = app.runs(limit)?;
            println!("{}", serde_json::to_string_pretty(&runs)?);
        }
    }
    Ok(())
}
