use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod table;
mod tui;

use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "roster=info");
    }

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let file_appender = tracing_appender::rolling::never(".", "roster.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env()),
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    match &cli.command {
        Commands::Tui { endpoint } => {
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint.clone();
            }
            config.validate()?;

            info!("Launching TUI interface");
            match tui::run_tui(config).await {
                Ok(_) => info!("TUI exited successfully"),
                Err(e) => error!("TUI failed: {}", e),
            }
        }

        Commands::List {
            endpoint,
            search,
            page,
        } => {
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint.clone();
            }
            config.validate()?;

            if *page == 0 {
                return Err(anyhow::anyhow!("Page numbers start at 1"));
            }

            let client = fetch::build_client(&config)?;
            let loader = fetch::Loader::spawn(client, config.endpoint.clone());
            match loader.join().await {
                Ok(records) => {
                    let slice = table::page_slice(&records, *page, config.rows_per_page);
                    let rows = table::filter_rows(slice, search).unwrap_or_default();
                    println!("Page {} - {} of {} records:", page, rows.len(), records.len());
                    let labels: Vec<&str> =
                        models::COLUMNS.iter().map(|column| column.label).collect();
                    println!("{}", labels.join(" | "));
                    for row in rows {
                        println!(
                            "{} | {} | {} | {} | {}",
                            row.id, row.name, row.email, row.phone, row.address.city
                        );
                    }
                }
                Err(e) => error!("Fetch failed: {}", e),
            }
        }
    }

    Ok(())
}
