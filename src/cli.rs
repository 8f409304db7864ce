use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;
use crate::types::SprintState;

#[derive(Parser)]
#[command(name = "jira-task")]
#[command(about = "Manage Jira internal tasks and sprints", version)]
#[command(after_help = "EXAMPLES:
    jira-task sprints                              List sprints on your board
    jira-task create -s \"Fix flake\" --sprint current  Create a task in the active sprint

ENVIRONMENT:
    JIRA_EMAIL          Your Atlassian account email (required)
    JIRA_API_TOKEN      API token from https://id.atlassian.com/manage-profile/security/api-tokens (required)
    JIRA_ENG_TEAM       The \"Engineering Team\" dropdown value, e.g. KV (required for create)
    JIRA_KV_BOARD_ID    Board ID from your board's URL, e.g. 400 (required for sprints)
    JIRA_BASE_URL       Jira site (default: https://cockroachlabs.atlassian.net)
    JIRA_PROJECT_KEY    Project key override for the engineering team
    JIRA_ISSUE_TYPES    Comma-separated allowed issue types
    JIRA_SPRINT_FIELD   Sprint custom field (default: customfield_10020)
    JIRA_ENG_TEAM_FIELD Custom field holding the Engineering Team dropdown
    JIRA_TIMEOUT_SECS   Per-request timeout (default: 30)
    JIRA_MAX_PAGES      Pagination limit (default: 50)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a task
    #[command(after_help = "EXAMPLES:
    jira-task create -s \"Fix flake\"
    jira-task create -s \"Fix flake\" -d \"Seen on master\" -t Bug --sprint current
    jira-task create -s \"Follow up\" -a alice@cockroachlabs.com --sprint next
    jira-task create -s \"Cleanup\" --sprint \"Sprint 12\"")]
    Create(CreateArgs),
    /// List sprints for the board (read-only)
    #[command(after_help = "EXAMPLES:
    jira-task sprints
    jira-task sprints --state active --state future
    jira-task sprints --board 401 --json")]
    Sprints(SprintsArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    /// Issue summary
    #[arg(long, short)]
    pub summary: String,

    /// Issue description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Issue type
    #[arg(long = "type", short = 't', default_value = "Task")]
    pub issue_type: String,

    /// Assignee email or Jira account ID
    #[arg(long, short)]
    pub assignee: Option<String>,

    /// Target sprint: "current", "next", or a sprint name
    #[arg(long)]
    pub sprint: Option<String>,
}

#[derive(Args)]
pub struct SprintsArgs {
    /// Only show sprints in this state (repeatable)
    #[arg(long, value_enum)]
    pub state: Vec<SprintState>,

    /// Board ID (overrides JIRA_KV_BOARD_ID)
    #[arg(long)]
    pub board: Option<u64>,
}
