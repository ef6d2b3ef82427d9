//! s3b - S3 bucket and object management CLI
//!
//! A flag-driven command-line interface for S3-compatible object storage.
//! Credentials come from the SDK's ambient credential chain.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use s3butler_cli::args::Cli;
use s3butler_cli::dispatch;
use s3butler_cli::output::Formatter;
use sb_s3::S3Client;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let formatter = Formatter::new(cli.output_config());

    let client = match S3Client::connect().await {
        Ok(client) => client,
        Err(e) => {
            formatter.error(&e.to_string());
            std::process::exit(1);
        }
    };

    let exit_code = dispatch::run(cli, &client).await;
    std::process::exit(exit_code);
}
