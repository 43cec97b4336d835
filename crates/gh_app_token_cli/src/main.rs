use clap::error::ErrorKind;
use clap::Parser;
use gh_app_token_cli::config::LOG_ENV_VAR;
use gh_app_token_cli::{run, AppConfig, CliArgs};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Standard output carries only the token, so logs go to standard error.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("off")))
        .init();

    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                e.print().ok();
                std::process::exit(1);
            }
        },
    };

    let result = match AppConfig::from_args(args) {
        Ok(config) => run(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(token) => println!("{}", token.expose_secret()),
        Err(e) => {
            error!(error = %e, "Failed to issue installation token");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
