//! Projex command-line front-end.
//!
//! Loads projects from the CRM backend (or a local file), then exports,
//! prints, or summarizes them.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use projex_shared::ProjexError;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level().into());
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Only typed errors carry an operator message and a specific exit code
            let (message, code) = match err.downcast_ref::<ProjexError>() {
                Some(projex) => {
                    error!(code = projex.error_code(), error = %projex, "command failed");
                    (projex.user_message(), projex.exit_code())
                }
                None => {
                    error!(error = %err, "command failed");
                    (err.to_string(), 1)
                }
            };
            eprintln!("Ошибка: {message}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
