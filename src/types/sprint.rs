use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    Active,
    Future,
    Closed,
}

impl fmt::Display for SprintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Future => write!(f, "future"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    pub state: SprintState,
    #[serde(rename = "originBoardId", skip_serializing_if = "Option::is_none")]
    pub origin_board_id: Option<u64>,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(rename = "completeDate", skip_serializing_if = "Option::is_none")]
    pub complete_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

/// How a user names the sprint a new task should land in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SprintRef {
    Current,
    Next,
    Named(String),
}

impl From<&str> for SprintRef {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("current") {
            SprintRef::Current
        } else if value.eq_ignore_ascii_case("next") {
            SprintRef::Next
        } else {
            SprintRef::Named(value.to_string())
        }
    }
}

impl fmt::Display for SprintRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Next => write!(f, "next"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}
