//! Turning an issue draft into exactly one new Jira issue.

use serde_json::{json, Map, Value};
use tracing::{debug, info};
use url::form_urlencoded;

use crate::client::JiraClient;
use crate::config::Config;
use crate::error::{JiraError, Result};
use crate::responses::CreatedIssueResponse;
use crate::sprints::SprintResolver;
use crate::types::{CreatedIssue, IssueDraft, User};

const CREATE_ISSUE_PATH: &str = "/rest/api/2/issue";

pub struct TaskCreator<'a> {
    client: &'a JiraClient,
    config: &'a Config,
}

impl<'a> TaskCreator<'a> {
    pub fn new(client: &'a JiraClient, config: &'a Config) -> Self {
        Self { client, config }
    }

    pub async fn create_task(&self, draft: IssueDraft) -> Result<CreatedIssue> {
        // Everything that can fail locally fails before the first request.
        let issue_type = self.validate(&draft)?;
        let project_key = self.config.team.project_key()?;
        let board_id = match &draft.sprint {
            Some(_) => Some(self.config.team.board_id()?),
            None => None,
        };
        let team_value = match &self.config.team_field {
            Some(field) => Some((field.clone(), self.config.team.engineering_team()?.to_string())),
            None => None,
        };

        let assignee = match draft.assignee.as_deref().map(str::trim) {
            Some(reference) if !reference.is_empty() => Some(self.resolve_assignee(reference).await?),
            _ => None,
        };

        let sprint = match (&draft.sprint, board_id) {
            (Some(reference), Some(board_id)) => {
                let sprint = SprintResolver::new(self.client)
                    .resolve(board_id, reference)
                    .await?;
                debug!(sprint = %sprint.name, id = sprint.id, "Resolved sprint");
                Some(sprint)
            }
            _ => None,
        };

        let mut fields = Map::new();
        fields.insert("project".to_string(), json!({ "key": project_key }));
        fields.insert("issuetype".to_string(), json!({ "name": issue_type }));
        fields.insert("summary".to_string(), json!(draft.summary.trim()));

        if let Some(desc) = draft.description.filter(|d| !d.trim().is_empty()) {
            fields.insert("description".to_string(), json!(desc));
        }
        if let Some(account_id) = assignee {
            fields.insert("assignee".to_string(), json!({ "accountId": account_id }));
        }
        if let Some(sprint) = &sprint {
            fields.insert(self.config.sprint_field.clone(), json!(sprint.id));
        }
        if let Some((field, team)) = team_value {
            fields.insert(field, json!({ "value": team }));
        }

        let payload = json!({ "fields": Value::Object(fields) });
        let response: CreatedIssueResponse = self.client.post(CREATE_ISSUE_PATH, payload).await?;

        let created = CreatedIssue {
            url: self.config.browse_url(&response.key),
            key: response.key,
        };
        info!(key = %created.key, project = %project_key, "Created issue");

        Ok(created)
    }

    /// Local checks. Returns the issue type to send.
    fn validate(&self, draft: &IssueDraft) -> Result<String> {
        if draft.summary.trim().is_empty() {
            return Err(JiraError::Validation("summary must not be empty".to_string()));
        }

        let issue_type = draft.issue_type.trim();
        if issue_type.is_empty() {
            return Err(JiraError::Validation("issue type must not be empty".to_string()));
        }

        match &self.config.team.issue_types {
            None => Ok(issue_type.to_string()),
            Some(allowed) => allowed
                .iter()
                .find(|t| t.eq_ignore_ascii_case(issue_type))
                .cloned()
                .ok_or_else(|| {
                    JiraError::Validation(format!(
                        "issue type '{issue_type}' is not one of: {}",
                        allowed.join(", ")
                    ))
                }),
        }
    }

    /// Map an email to an account ID. Anything else is taken as an account ID already.
    async fn resolve_assignee(&self, reference: &str) -> Result<String> {
        if !reference.contains('@') {
            return Ok(reference.to_string());
        }

        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("query", reference)
            .finish();
        let users: Vec<User> = self
            .client
            .get(&format!("/rest/api/3/user/search?{query}"))
            .await?;

        pick_user(reference, users)
    }
}

fn pick_user(email: &str, users: Vec<User>) -> Result<String> {
    if let Some(exact) = users.iter().find(|u| {
        u.email_address
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case(email))
    }) {
        return Ok(exact.account_id.clone());
    }

    match users.as_slice() {
        [] => Err(JiraError::AssigneeNotFound(email.to_string())),
        // Jira hides emails per privacy settings; a visible mismatch is someone else.
        [only] if only.email_address.is_none() => Ok(only.account_id.clone()),
        [_] => Err(JiraError::AssigneeNotFound(email.to_string())),
        _ => Err(JiraError::AmbiguousAssignee {
            query: email.to_string(),
            candidates: users.iter().map(User::label).collect(),
        }),
    }
}
