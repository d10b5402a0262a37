use std::{io, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, ApiClient};
use list_screen::{FailureMode, ListScreen};
use tracing_subscriber::EnvFilter;

mod controller;

use controller::{ApiManager, UsersTableController};

/// Users list, model-view-controller flavour: fetches once on load and prints
/// the list.
#[derive(Parser, Debug)]
struct Args {
    /// Overrides the directory base URL from config/env.
    #[arg(long)]
    base_url: Option<String>,
    /// TOML config file (default: ./users_app.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build network runtime")?;

    let api = ApiManager::new(
        runtime.handle().clone(),
        Arc::new(ApiClient::new()),
        settings.base_url,
    );
    let screen = ListScreen::new("Users", FailureMode::Terminal, io::stdout());
    let mut controller = UsersTableController::new(api, screen);

    controller.view_did_load();
    controller.run_until_settled();
    tracing::info!(
        state = ?controller.screen().state(),
        rows = controller.screen().row_count(),
        "users screen settled"
    );

    Ok(())
}
