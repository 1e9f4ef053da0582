//! repolog: dump a repository's commit history and file churn as JSON

use clap::Parser;
use repolog::config::Config;
use tracing::error;

fn main() -> std::process::ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match repolog::run(&config) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
