//! Sprint lookups against a Jira Agile board.

use tracing::warn;

use crate::client::JiraClient;
use crate::error::{JiraError, Result};
use crate::types::{Sprint, SprintRef, SprintState};

/// The Agile API caps sprint pages at 50.
const SPRINT_PAGE_SIZE: usize = 50;

/// The active sprint plus how many sprints claimed to be active.
#[derive(Debug, Clone)]
pub struct ActiveSprint {
    pub sprint: Sprint,
    pub candidates: usize,
}

impl ActiveSprint {
    pub fn is_ambiguous(&self) -> bool {
        self.candidates > 1
    }
}

pub struct SprintResolver<'a> {
    client: &'a JiraClient,
}

impl<'a> SprintResolver<'a> {
    pub fn new(client: &'a JiraClient) -> Self {
        Self { client }
    }

    /// Every sprint on the board, in the order Jira returns them.
    pub async fn list_sprints(&self, board_id: u64) -> Result<Vec<Sprint>> {
        self.client
            .list(&format!("/rest/agile/1.0/board/{board_id}/sprint"), SPRINT_PAGE_SIZE)
            .await
    }

    pub async fn find_active_sprint(&self, board_id: u64) -> Result<ActiveSprint> {
        active_sprint(self.list_sprints(board_id).await?)
    }

    pub async fn find_next_sprint(&self, board_id: u64) -> Result<Sprint> {
        next_sprint(self.list_sprints(board_id).await?)
    }

    pub async fn find_sprint_by_name(&self, board_id: u64, name: &str) -> Result<Sprint> {
        sprint_named(self.list_sprints(board_id).await?, name)
    }

    pub async fn resolve(&self, board_id: u64, reference: &SprintRef) -> Result<Sprint> {
        match reference {
            SprintRef::Current => {
                let active = self.find_active_sprint(board_id).await?;
                if active.is_ambiguous() {
                    warn!(
                        board_id,
                        candidates = active.candidates,
                        chosen = %active.sprint.name,
                        "Board has more than one active sprint, using the first"
                    );
                }
                Ok(active.sprint)
            }
            SprintRef::Next => self.find_next_sprint(board_id).await,
            SprintRef::Named(name) => self.find_sprint_by_name(board_id, name).await,
        }
    }
}

fn active_sprint(sprints: Vec<Sprint>) -> Result<ActiveSprint> {
    let mut active = sprints
        .into_iter()
        .filter(|s| s.state == SprintState::Active);

    let sprint = active
        .next()
        .ok_or_else(|| JiraError::SprintNotFound(SprintRef::Current.to_string()))?;

    Ok(ActiveSprint {
        sprint,
        candidates: 1 + active.count(),
    })
}

fn next_sprint(sprints: Vec<Sprint>) -> Result<Sprint> {
    let mut future: Vec<Sprint> = sprints
        .into_iter()
        .filter(|s| s.state == SprintState::Future)
        .collect();

    // Stable sort: undated sprints go last, API order breaks ties.
    future.sort_by_key(|s| (s.start_date.is_none(), s.start_date));

    future
        .into_iter()
        .next()
        .ok_or_else(|| JiraError::SprintNotFound(SprintRef::Next.to_string()))
}

fn sprint_named(sprints: Vec<Sprint>, name: &str) -> Result<Sprint> {
    let wanted = name.trim().to_lowercase();
    sprints
        .into_iter()
        .find(|s| s.name.trim().to_lowercase() == wanted)
        .ok_or_else(|| JiraError::SprintNotFound(name.to_string()))
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::config::test_config;
    use crate::transport::fake::FakeTransport;

    pub(crate) fn sprint_json(id: u64, name: &str, state: &str, start: Option<&str>) -> Value {
        let mut sprint = json!({ "id": id, "name": name, "state": state, "originBoardId": 400 });
        if let Some(start) = start {
            sprint["startDate"] = json!(start);
        }
        sprint
    }

    pub(crate) fn last_page(values: Vec<Value>) -> Value {
        json!({ "startAt": 0, "maxResults": 50, "isLast": true, "values": values })
    }

    fn client(transport: &FakeTransport) -> JiraClient {
        JiraClient::new(
            Box::new(transport.clone()),
            &test_config("https://example.atlassian.net"),
        )
    }

    #[tokio::test]
    async fn test_list_sprints_across_pages() {
        let transport = FakeTransport::new();
        let all: Vec<Value> = (1..=7)
            .map(|i| sprint_json(i, &format!("Sprint {i}"), "closed", None))
            .collect();
        transport
            .respond(
                200,
                json!({ "startAt": 0, "maxResults": 3, "isLast": false, "values": all[0..3].to_vec() }),
            )
            .respond(
                200,
                json!({ "startAt": 3, "maxResults": 3, "isLast": false, "values": all[3..6].to_vec() }),
            )
            .respond(
                200,
                json!({ "startAt": 6, "maxResults": 3, "isLast": true, "values": all[6..].to_vec() }),
            );

        let client = client(&transport);
        let sprints = SprintResolver::new(&client).list_sprints(400).await.unwrap();

        assert_eq!(sprints.len(), 7);
        assert_eq!(sprints[6].name, "Sprint 7");
        assert!(transport.requests()[0]
            .path
            .starts_with("/rest/agile/1.0/board/400/sprint?startAt=0"));
        assert!(transport.requests()[2].path.contains("startAt=6"));
    }

    #[tokio::test]
    async fn test_empty_board() {
        let transport = FakeTransport::new();
        transport.respond(200, last_page(vec![]));

        let client = client(&transport);
        let sprints = SprintResolver::new(&client).list_sprints(400).await.unwrap();
        assert!(sprints.is_empty());
    }

    #[tokio::test]
    async fn test_find_active_sprint() {
        let transport = FakeTransport::new();
        transport.respond(
            200,
            last_page(vec![
                sprint_json(1, "S1", "closed", None),
                sprint_json(2, "S2", "active", None),
                sprint_json(3, "S3", "future", None),
            ]),
        );

        let client = client(&transport);
        let active = SprintResolver::new(&client)
            .find_active_sprint(400)
            .await
            .unwrap();
        assert_eq!(active.sprint.name, "S2");
        assert!(!active.is_ambiguous());
    }

    #[tokio::test]
    async fn test_multiple_active_sprints_pick_first() {
        let transport = FakeTransport::new();
        transport.respond(
            200,
            last_page(vec![
                sprint_json(4, "S4", "active", None),
                sprint_json(5, "S5", "active", None),
            ]),
        );

        let client = client(&transport);
        let resolver = SprintResolver::new(&client);
        let sprint = resolver.resolve(400, &SprintRef::Current).await.unwrap();
        assert_eq!(sprint.name, "S4");
    }

    #[test]
    fn test_no_active_sprint() {
        let sprints = vec![serde_json::from_value(sprint_json(1, "S1", "closed", None)).unwrap()];
        let err = active_sprint(sprints).unwrap_err();
        assert!(matches!(err, JiraError::SprintNotFound(r) if r == "current"));
    }

    #[test]
    fn test_next_sprint_by_start_date() {
        let sprints: Vec<Sprint> = [
            sprint_json(1, "Undated", "future", None),
            sprint_json(2, "Later", "future", Some("2024-07-01T00:00:00.000Z")),
            sprint_json(3, "Sooner", "future", Some("2024-06-17T00:00:00.000Z")),
            sprint_json(4, "Now", "active", Some("2024-06-03T00:00:00.000Z")),
        ]
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect();

        assert_eq!(next_sprint(sprints).unwrap().name, "Sooner");
    }

    #[test]
    fn test_next_sprint_undated_falls_back_to_api_order() {
        let sprints: Vec<Sprint> = [
            sprint_json(1, "First", "future", None),
            sprint_json(2, "Second", "future", None),
        ]
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect();

        assert_eq!(next_sprint(sprints).unwrap().name, "First");
        assert!(matches!(
            next_sprint(Vec::new()),
            Err(JiraError::SprintNotFound(r)) if r == "next"
        ));
    }

    #[tokio::test]
    async fn test_find_sprint_by_name_case_insensitive() {
        let transport = FakeTransport::new();
        transport
            .respond(
                200,
                last_page(vec![
                    sprint_json(11, "Sprint 11", "closed", None),
                    sprint_json(12, "Sprint 12", "active", None),
                ]),
            )
            .respond(200, last_page(vec![sprint_json(11, "Sprint 11", "closed", None)]));

        let client = client(&transport);
        let resolver = SprintResolver::new(&client);

        let sprint = resolver.find_sprint_by_name(400, "sprint 12").await.unwrap();
        assert_eq!(sprint.id, 12);

        let err = resolver.find_sprint_by_name(400, "Sprint 1").await.unwrap_err();
        assert!(matches!(err, JiraError::SprintNotFound(n) if n == "Sprint 1"));
    }

    #[tokio::test]
    async fn test_api_errors_propagate() {
        let transport = FakeTransport::new();
        transport.respond(404, json!({ "errorMessages": ["Board does not exist"] }));

        let client = client(&transport);
        let err = SprintResolver::new(&client)
            .find_active_sprint(999)
            .await
            .unwrap_err();
        assert!(matches!(err, JiraError::NotFound(m) if m.contains("Board does not exist")));
    }
}
