mod cli;
mod client;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod responses;
mod sprints;
mod tasks;
mod transport;
mod types;

use std::error::Error;
use std::io;

use clap::Parser;

use cli::Cli;
use client::JiraClient;
use config::Config;
use error::{JiraError, Result};
use transport::HttpTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    logging::init(verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            if let JiraError::Api { body, .. } = &e {
                eprintln!("Response body: {body}");
            }
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.output_format();
    let config = Config::from_env()?;
    let transport = HttpTransport::new(config.base_url.clone())?;
    let client = JiraClient::new(Box::new(transport), &config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::dispatch(cli.command, &client, &config, format, &mut out).await
}
