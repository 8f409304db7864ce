use serde::Serialize;

use super::SprintRef;

/// What the user asked for; lives only for one create call.
#[derive(Debug, Clone)]
pub struct IssueDraft {
    pub summary: String,
    pub description: Option<String>,
    pub issue_type: String,
    /// Email address or Jira account ID.
    pub assignee: Option<String>,
    pub sprint: Option<SprintRef>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    pub key: String,
    pub url: String,
}
