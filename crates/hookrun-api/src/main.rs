//! hookrun entry point.
//!
//! Binary name: `hookrun`
//!
//! Parses CLI arguments, loads the trigger file (any error is fatal), then
//! serves the webhook endpoints until Ctrl+C or SIGTERM.

mod cli;
mod http;
mod state;

use clap::Parser;
use hookrun_observe::tracing_setup::{
    LogFormat, filter_for_verbosity, init_tracing, shutdown_tracing,
};

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(
        filter_for_verbosity(cli.verbose, cli.quiet),
        LogFormat::from_json_flag(cli.json_logs),
        cli.otel,
    )
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init(&cli.config).await.map_err(|e| {
        tracing::error!(config = %cli.config.display(), error = %e, "failed to load triggers");
        anyhow::anyhow!(
            "{e}\nPass the trigger file as the first argument, set TRIGGERS_FILE, or create ./triggers.yaml"
        )
    })?;

    let registry = state.dispatcher.registry();
    tracing::info!(count = registry.len(), triggers = ?registry.ids(), "triggers loaded");

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(port = cli.port, "Listening to port {}", cli.port);
    if !cli.quiet {
        println!(
            "  {} hookrun listening on {}",
            console::style("⚡").bold(),
            console::style(format!("http://{addr}")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
