//! Holland Bridge CLI and REST API entry point.
//!
//! Binary name: `hbridge`
//!
//! Parses CLI arguments, initializes tracing and services, then dispatches
//! to the interactive wizard, a one-shot command, or the REST API server.

mod cli;
mod http;
mod state;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use hollandbridge_observe::tracing_setup::{init_tracing, shutdown_tracing};
use state::AppState;

/// Upper bound on how often idle sessions are swept.
const SWEEP_INTERVAL_SECS: u64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,hollandbridge=debug",
        _ => "trace",
    };
    init_tracing(filter, cli.otel).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = dispatch(cli).await;
    shutdown_tracing();
    result
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "hbridge", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Run {
            output,
            answers,
            save_answers,
        } => {
            let options = cli::wizard::RunOptions {
                output,
                answers,
                save_answers,
                json: cli.json,
            };
            cli::wizard::run(&state, options).await?;
        }

        Commands::Prompt { answers } => {
            cli::prompt::print_prompt(&answers, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;

            if !cli.quiet {
                println!(
                    "  {} Holland Bridge API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, "server started");

            let sweeper = spawn_session_sweeper(&state);
            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            sweeper.abort();

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Periodically evict sessions idle past `[server] session_idle_secs`.
fn spawn_session_sweeper(state: &AppState) -> tokio::task::JoinHandle<()> {
    let sessions = state.sessions.clone();
    let idle_secs = state.config.server.session_idle_secs;
    let max_idle = chrono::TimeDelta::seconds(idle_secs.min(i32::MAX as u64) as i64);
    let period = Duration::from_secs(idle_secs.clamp(1, SWEEP_INTERVAL_SECS));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            sessions.evict_idle(max_idle);
        }
    })
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
