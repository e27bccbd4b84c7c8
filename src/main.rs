mod certificate;
mod cli;
mod dispatch;
mod error;
mod notifications;
mod settings;
#[cfg(test)]
mod test_fixtures;

use clap::Parser;
use cli::Cli;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub static VERSION: &str = "APNS2 v0.20.3";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout only carries the response line
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_env("RUST_LOG"))
        .init();

    let cli = Cli::parse();

    match dispatch::execute(cli, &mut io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("run failed: {:?}", err);
            ExitCode::from(dispatch::report(&err, &mut io::stderr()))
        }
    }
}
