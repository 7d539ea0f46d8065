//! Txweb main entry point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use txweb_api::start_server;
use txweb_client::HttpTransactionsApi;
use txweb_config::Config;
use txweb_core::{DraftStore, FileKvStore, Session};

#[derive(Parser, Debug)]
#[command(name = "txweb")]
#[command(author = "Txweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight transaction management web interface", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match Config::load(args.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] Failed to load configuration:\n{}", e.to_details());
            std::process::exit(1);
        }
    };

    // RUST_LOG still wins; the config level is the default filter.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    log::info!(
        "Config loaded: api={}, page_size={}, debounce={}ms",
        config.api.base_url,
        config.pagination.page_size,
        config.search.debounce_ms
    );

    let rt = Runtime::new()?;

    rt.block_on(async {
        let api = match HttpTransactionsApi::new(
            config.api.base_url.clone(),
            Duration::from_secs(config.api.timeout_secs),
        ) {
            Ok(api) => Arc::new(api),
            Err(e) => {
                log::error!("Failed to build API client: {}", e);
                std::process::exit(1);
            }
        };

        let drafts = DraftStore::new(Arc::new(FileKvStore::new(config.drafts.path.clone())));
        let session = Arc::new(Session::new(config.clone(), api, drafts));

        // Warm the snapshot; a failure here is not fatal, the list page
        // surfaces it with a retry button.
        if let Err(e) = session.load().await {
            log::warn!("Initial transaction fetch failed: {}", e);
        }

        start_server(config, session).await
    });

    Ok(())
}
