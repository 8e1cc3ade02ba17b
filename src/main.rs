//! `TypeRush` - Timed typing-accuracy game for the terminal

use clap::Parser;
use tokio_util::sync::CancellationToken;

use typerush::cli::args::Cli;
use typerush::cli::commands;
use typerush::error::ExitCode;
use typerush::observability::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Usage errors exit 64; clap's default of 2 is the config error code here.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::USAGE_ERROR
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    // First signal ends the game gracefully, the second one exits at once.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        eprintln!("\nShutting down... (press Ctrl+C again to force)");
        signal_cancel.cancel();

        let code = shutdown_signal().await;
        std::process::exit(code);
    });

    let result = commands::dispatch(cli, cancel).await;

    match result {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

/// Waits for SIGINT or SIGTERM and returns the matching exit code.
async fn shutdown_signal() -> i32 {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => ExitCode::INTERRUPTED,
                    _ = sigterm.recv() => ExitCode::TERMINATED,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to register SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
                ExitCode::INTERRUPTED
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        ExitCode::INTERRUPTED
    }
}
