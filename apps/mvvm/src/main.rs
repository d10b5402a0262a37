use std::{io, path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, ApiClient};
use shared::endpoint::Endpoint;
use tracing_subscriber::EnvFilter;

mod controller;
mod screen;
mod view_model;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

use controller::commands::spawn_stdin_reader;
use screen::UsersTableScreen;
use view_model::UsersViewModel;

/// Users list, model-view-viewmodel flavour. Type `r` to reload, `q` to quit.
#[derive(Parser, Debug)]
struct Args {
    /// Overrides the directory base URL from config/env.
    #[arg(long)]
    base_url: Option<String>,
    /// Which list to show: users or comments.
    #[arg(long)]
    endpoint: Option<Endpoint>,
    /// TOML config file (default: ./users_app.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Exit after the first fetch result instead of reading commands.
    #[arg(long)]
    once: bool,
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
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build network runtime")?;

    let view_model = UsersViewModel::new(
        Arc::new(ApiClient::new()),
        settings.endpoint,
        settings.base_url,
        runtime.handle().clone(),
    );
    let title = match settings.endpoint {
        Endpoint::UsersFetch => "Users",
        Endpoint::CommentsFetch => "Comments",
    };
    let mut screen = UsersTableScreen::new(view_model, title, io::stdout())
        .ok_or_else(|| anyhow!("view-model already has a subscriber"))?;

    let commands = if args.once {
        crossbeam_channel::never()
    } else {
        spawn_stdin_reader()
    };

    screen.view_did_load();
    screen.run(commands, args.once);
    tracing::info!(
        state = ?screen.screen().state(),
        rows = screen.screen().row_count(),
        fetches = screen.view_model().current_generation(),
        "users screen closed"
    );

    Ok(())
}
