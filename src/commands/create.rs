use std::io::Write;

use crate::cli::CreateArgs;
use crate::client::JiraClient;
use crate::config::Config;
use crate::error::Result;
use crate::output::{self, OutputFormat};
use crate::tasks::TaskCreator;
use crate::types::{IssueDraft, SprintRef};

pub async fn run(
    client: &JiraClient,
    config: &Config,
    args: CreateArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let draft = IssueDraft {
        summary: args.summary,
        description: args.description,
        issue_type: args.issue_type,
        assignee: args.assignee,
        sprint: args.sprint.as_deref().map(SprintRef::from),
    };

    let created = TaskCreator::new(client, config).create_task(draft).await?;

    output::print_item(out, format, &created, |out, issue| {
        writeln!(out, "Created {}", issue.key)?;
        writeln!(out, "{}", issue.url)
    })
}
