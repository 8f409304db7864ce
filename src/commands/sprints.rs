use std::io::Write;

use tabled::Tabled;

use crate::cli::SprintsArgs;
use crate::client::JiraClient;
use crate::config::Config;
use crate::error::Result;
use crate::output::{self, format_date_only, state_colored, OutputFormat};
use crate::sprints::SprintResolver;
use crate::types::Sprint;

#[derive(Tabled)]
struct SprintRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
}

impl From<&Sprint> for SprintRow {
    fn from(sprint: &Sprint) -> Self {
        Self {
            name: sprint.name.clone(),
            id: sprint.id,
            state: state_colored(sprint.state),
            start: format_date_only(sprint.start_date.as_ref()),
            end: format_date_only(sprint.end_date.as_ref()),
        }
    }
}

pub async fn list(
    client: &JiraClient,
    config: &Config,
    args: SprintsArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let board_id = match args.board {
        Some(id) => id,
        None => config.team.board_id()?,
    };

    let mut sprints = SprintResolver::new(client).list_sprints(board_id).await?;
    if !args.state.is_empty() {
        sprints.retain(|s| args.state.contains(&s.state));
    }

    if sprints.is_empty() && format == OutputFormat::Table {
        writeln!(out, "No sprints found on board {board_id}")?;
        return Ok(());
    }

    output::print_table(out, format, &sprints, |s| SprintRow::from(s))
}
