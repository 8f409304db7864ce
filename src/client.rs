use std::time::Duration;

use base64::Engine;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::{Config, Credentials};
use crate::error::{JiraError, Result};
use crate::responses::{ErrorBody, Page};
use crate::transport::{HttpRequest, Transport};

pub struct JiraClient {
    transport: Box<dyn Transport>,
    authorization: String,
    timeout: Duration,
    max_pages: usize,
}

impl JiraClient {
    pub fn new(transport: Box<dyn Transport>, config: &Config) -> Self {
        Self {
            transport,
            authorization: basic_auth(&config.credentials),
            timeout: config.timeout,
            max_pages: config.max_pages,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: serde_json::Value) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Collect every item of a `startAt`-paginated listing.
    pub async fn list<T: DeserializeOwned>(&self, path: &str, page_size: usize) -> Result<Vec<T>> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut start_at = 0;

        for page_number in 0..self.max_pages {
            let page: Page<T> = self
                .get(&format!("{path}{separator}startAt={start_at}&maxResults={page_size}"))
                .await?;

            debug!(
                path,
                page_number,
                received = page.values.len(),
                max_results = page.max_results,
                total = ?page.total,
                "Fetched page"
            );

            let more = page.has_more();
            start_at += page.values.len();
            items.extend(page.values);

            if !more {
                return Ok(items);
            }
        }

        Err(JiraError::TooManyPages {
            path: path.to_string(),
            limit: self.max_pages,
        })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        debug!(%method, path, "Sending Jira request");

        let request = HttpRequest {
            method,
            path: path.to_string(),
            authorization: self.authorization.clone(),
            body,
        };

        let response = tokio::time::timeout(self.timeout, self.transport.send(request))
            .await
            .map_err(|_| JiraError::Timeout {
                path: path.to_string(),
                timeout: self.timeout,
            })??;

        trace!(status = response.status, body = %response.body, "Jira response");

        if response.is_success() {
            return serde_json::from_str(&response.body).map_err(|e| JiraError::Decode {
                path: path.to_string(),
                source: e,
            });
        }

        match response.status {
            status @ (401 | 403) => Err(JiraError::Unauthorized {
                status,
                path: path.to_string(),
            }),
            404 => Err(JiraError::NotFound(format!(
                "{path} ({})",
                ErrorBody::describe(&response.body)
            ))),
            status => Err(JiraError::Api {
                status,
                message: ErrorBody::describe(&response.body),
                body: response.body,
            }),
        }
    }
}

fn basic_auth(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.email, credentials.api_token);
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(raw.as_bytes())
    )
}
