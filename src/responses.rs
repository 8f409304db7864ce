//! Shared Jira REST response shapes.

use std::collections::BTreeMap;

use serde::Deserialize;

/// One page of a `startAt`/`maxResults` paginated listing.
#[derive(Deserialize, Debug)]
pub struct Page<T> {
    #[serde(rename = "startAt", default)]
    pub start_at: usize,
    #[serde(rename = "maxResults", default)]
    pub max_results: usize,
    pub total: Option<usize>,
    #[serde(rename = "isLast")]
    pub is_last: Option<bool>,
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

impl<T> Page<T> {
    /// Whether another request is needed after this page.
    pub fn has_more(&self) -> bool {
        if self.values.is_empty() {
            return false;
        }
        if let Some(is_last) = self.is_last {
            return !is_last;
        }
        match self.total {
            Some(total) => self.start_at + self.values.len() < total,
            None => false,
        }
    }
}

/// Body of `POST /rest/api/2/issue`.
#[derive(Deserialize, Debug)]
pub struct CreatedIssueResponse {
    #[allow(dead_code)]
    pub id: String,
    pub key: String,
}

/// Jira's error envelope for 4xx responses.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(rename = "errorMessages", default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl ErrorBody {
    /// Render Jira's diagnostics, falling back to the raw body when it is not an error envelope.
    pub fn describe(raw: &str) -> String {
        let parsed = serde_json::from_str::<ErrorBody>(raw)
            .ok()
            .filter(|e| !e.error_messages.is_empty() || !e.errors.is_empty());

        let Some(body) = parsed else {
            let trimmed = raw.trim();
            return if trimmed.is_empty() {
                "<empty response body>".to_string()
            } else {
                trimmed.to_string()
            };
        };

        let mut parts = body.error_messages;
        parts.extend(body.errors.into_iter().map(|(field, msg)| format!("{field}: {msg}")));
        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(start_at: usize, len: usize, total: Option<usize>, is_last: Option<bool>) -> Page<u32> {
        Page {
            start_at,
            max_results: 50,
            total,
            is_last,
            values: vec![0; len],
        }
    }

    #[test]
    fn test_has_more_prefers_is_last() {
        assert!(page(0, 50, Some(10), Some(false)).has_more());
        assert!(!page(0, 50, Some(500), Some(true)).has_more());
    }

    #[test]
    fn test_has_more_from_total() {
        assert!(page(0, 50, Some(120), None).has_more());
        assert!(!page(100, 20, Some(120), None).has_more());
        assert!(!page(0, 20, None, None).has_more());
    }

    #[test]
    fn test_empty_page_ends_listing() {
        assert!(!page(50, 0, Some(500), Some(false)).has_more());
    }

    #[test]
    fn test_describe_field_errors() {
        let raw = r#"{"errorMessages":["Bad request"],"errors":{"summary":"You must specify a summary","customfield_10020":"Sprint is closed"}}"#;
        assert_eq!(
            ErrorBody::describe(raw),
            "Bad request; customfield_10020: Sprint is closed; summary: You must specify a summary"
        );
    }

    #[test]
    fn test_describe_non_json() {
        assert_eq!(ErrorBody::describe("<html>oops</html>"), "<html>oops</html>");
        assert_eq!(ErrorBody::describe("  "), "<empty response body>");
        assert_eq!(ErrorBody::describe("{}"), "{}");
    }
}
