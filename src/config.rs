use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{JiraError, Result};

const DEFAULT_BASE_URL: &str = "https://cockroachlabs.atlassian.net";
const DEFAULT_SPRINT_FIELD: &str = "customfield_10020";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_PAGES: usize = 50;

/// Engineering Team labels and the Jira project each one files into.
/// Other teams set JIRA_PROJECT_KEY.
const TEAM_PROJECTS: &[(&str, &str)] = &[("KV", "KV")];

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub api_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeamConfig {
    pub engineering_team: Option<String>,
    pub board_id: Option<u64>,
    /// Explicit project key, bypassing the team table.
    pub project_key: Option<String>,
    /// Allowed issue types. `None` leaves validation to Jira.
    pub issue_types: Option<Vec<String>>,
}

impl TeamConfig {
    pub fn board_id(&self) -> Result<u64> {
        self.board_id.ok_or_else(|| {
            JiraError::Configuration("JIRA_KV_BOARD_ID is not set".to_string())
        })
    }

    pub fn engineering_team(&self) -> Result<&str> {
        self.engineering_team
            .as_deref()
            .ok_or_else(|| JiraError::Configuration("JIRA_ENG_TEAM is not set".to_string()))
    }

    /// Resolve the project key new issues are filed under.
    pub fn project_key(&self) -> Result<String> {
        if let Some(key) = &self.project_key {
            return Ok(key.clone());
        }

        let team = self.engineering_team()?;
        TEAM_PROJECTS
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(team.trim()))
            .map(|(_, key)| key.to_string())
            .ok_or_else(|| JiraError::UnknownTeam(team.to_string()))
    }
}

/// Everything read from the environment, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub team: TeamConfig,
    pub base_url: Url,
    pub sprint_field: String,
    pub team_field: Option<String>,
    pub timeout: Duration,
    pub max_pages: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &str| {
            get(name).ok_or_else(|| JiraError::Configuration(format!("{name} is not set")))
        };

        let credentials = Credentials {
            email: require("JIRA_EMAIL")?,
            api_token: require("JIRA_API_TOKEN")?,
        };

        let base_url = get("JIRA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url).map_err(|e| {
            JiraError::Configuration(format!("JIRA_BASE_URL '{base_url}' is not a valid URL: {e}"))
        })?;

        let team = TeamConfig {
            engineering_team: get("JIRA_ENG_TEAM"),
            board_id: parse_number(&get, "JIRA_KV_BOARD_ID")?,
            project_key: get("JIRA_PROJECT_KEY"),
            issue_types: get("JIRA_ISSUE_TYPES").map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            }),
        };

        let timeout_secs = parse_number(&get, "JIRA_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let max_pages = parse_number(&get, "JIRA_MAX_PAGES")?.unwrap_or(DEFAULT_MAX_PAGES);
        if timeout_secs == 0 || max_pages == 0 {
            return Err(JiraError::Configuration(
                "JIRA_TIMEOUT_SECS and JIRA_MAX_PAGES must be positive".to_string(),
            ));
        }

        Ok(Self {
            credentials,
            team,
            base_url,
            sprint_field: get("JIRA_SPRINT_FIELD").unwrap_or_else(|| DEFAULT_SPRINT_FIELD.to_string()),
            team_field: get("JIRA_ENG_TEAM_FIELD"),
            timeout: Duration::from_secs(timeout_secs),
            max_pages,
        })
    }

    /// Browse URL for an issue key, e.g. `https://site/browse/KV-1`.
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{key}", self.base_url.as_str().trim_end_matches('/'))
    }
}

fn parse_number<T, F>(get: &F, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    get(name)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| {
                JiraError::Configuration(format!("{name} must be a number, got '{raw}'"))
            })
        })
        .transpose()
}

#[cfg(test)]
pub(crate) fn test_config(base_url: &str) -> Config {
    Config {
        credentials: Credentials {
            email: "alice@cockroachlabs.com".to_string(),
            api_token: "secret".to_string(),
        },
        team: TeamConfig {
            engineering_team: Some("KV".to_string()),
            board_id: Some(400),
            project_key: None,
            issue_types: None,
        },
        base_url: Url::parse(base_url).unwrap(),
        sprint_field: DEFAULT_SPRINT_FIELD.to_string(),
        team_field: None,
        timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        max_pages: DEFAULT_MAX_PAGES,
    }
}
