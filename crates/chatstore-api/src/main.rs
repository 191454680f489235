//! chatstore CLI and REST API entry point.
//!
//! Parses CLI arguments, initializes tracing, config, and the database, then
//! dispatches to a command handler or starts the REST API server.

mod cli;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use console::style;

use chatstore_api::http::router::build_router;
use chatstore_api::state::AppState;
use chatstore_infra::config::{load_service_config, resolve_database_url};
use chatstore_infra::sqlite::pool::default_data_dir;
use chatstore_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

use cli::{ChatAction, Cli, Commands, MessageAction, Output};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_data_dir()).join("config.toml"));
    let config = load_service_config(&config_path).await;
    let database_url = resolve_database_url(&config, cli.database_url.as_deref());

    let state = AppState::init(config, &database_url)
        .await
        .context("failed to open chat store")?;

    let result = run(cli, &state).await;

    state.shutdown().await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, state: &AppState) -> anyhow::Result<()> {
    let output = Output::from_flags(cli.json, cli.quiet);

    match cli.command {
        Commands::Serve { port, host } => serve(state, port, host, cli.quiet).await?,

        Commands::Chat { action } => match action {
            ChatAction::Create { title } => {
                cli::chat::create_chat(state, &title, output).await?;
            }
            ChatAction::Show { id, limit } => {
                cli::chat::show_chat(state, id, limit, output).await?;
            }
            ChatAction::Delete { id } => {
                cli::chat::delete_chat(state, id, output).await?;
            }
        },

        Commands::Message { action } => match action {
            MessageAction::Post { chat_id, text } => {
                cli::message::post_message(state, chat_id, &text, output).await?;
            }
        },
    }

    Ok(())
}

async fn serve(
    state: &AppState,
    port: Option<u16>,
    host: Option<String>,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut server = state.config.server.clone();
    if let Some(port) = port {
        server.port = port;
    }
    if let Some(host) = host {
        server.host = host;
    }

    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    if !quiet {
        println!();
        println!(
            "  {} chatstore listening on {}",
            style("▶").green().bold(),
            style(format!("http://{addr}")).cyan()
        );
        println!();
    }
    tracing::info!(%addr, "REST API server started");

    let app = build_router(state.chat_service.clone(), server.max_body_bytes);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("REST API server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
