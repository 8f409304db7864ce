pub mod create;
pub mod sprints;

use std::io::Write;

use crate::cli::Commands;
use crate::client::JiraClient;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputFormat;

pub async fn dispatch(
    command: Commands,
    client: &JiraClient,
    config: &Config,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::Create(args) => create::run(client, config, args, format, out).await,
        Commands::Sprints(args) => sprints::list(client, config, args, format, out).await,
    }
}
