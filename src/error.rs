use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JiraError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown engineering team '{0}'. Set JIRA_PROJECT_KEY or use a known team")]
    UnknownTeam(String),

    #[error(
        "Unauthorized (status {status}) for {path}. Check JIRA_EMAIL and JIRA_API_TOKEN credentials and your Jira permissions"
    )]
    Unauthorized { status: u16, path: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No Jira user found for assignee: {0}")]
    AssigneeNotFound(String),

    #[error("Assignee '{query}' is ambiguous, candidates: {}", candidates.join(", "))]
    AmbiguousAssignee {
        query: String,
        candidates: Vec<String>,
    },

    #[error("Sprint not found: {0}")]
    SprintNotFound(String),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Raw response body as Jira sent it.
        body: String,
    },

    #[error("Gave up listing {path} after {limit} pages")]
    TooManyPages { path: String, limit: usize },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request to {path} timed out after {}s", timeout.as_secs())]
    Timeout { path: String, timeout: Duration },

    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, JiraError>;
