//! Reqwest-backed implementation of [`SolverEngine`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{EngineError, EngineResult};
use super::SolverEngine;
use crate::api::{ConstraintDescriptor, ScoreAnalysis, Timetable};

/// HTTP client for the timetabling engine's REST API.
///
/// The engine mixes structured JSON with plain-text responses (the solve
/// endpoint returns a bare job id, analyze returns raw JSON text), so
/// every response is read as text first and decoded from there.
pub struct HttpEngineClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEngineClient {
    /// Build a client for the given engine base URL.
    pub fn new(base_url: &str, request_timeout: Duration) -> EngineResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // Plain text is required by the solve endpoint returning the job id.
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json,text/plain"),
        );

        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|source| EngineError::Transport {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the response body, mapping transport
    /// failures and non-success statuses to typed errors.
    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> EngineResult<String> {
        let response = request
            .send()
            .await
            .map_err(|source| EngineError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(EngineError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }
        debug!(%url, %status, bytes = body.len(), "engine request succeeded");
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &'static str) -> EngineResult<T> {
        let url = self.url(path);
        let body = self.send(self.client.get(&url), &url).await?;
        decode(&url, what, &body)
    }
}

fn decode<T: DeserializeOwned>(url: &str, what: &'static str, body: &str) -> EngineResult<T> {
    serde_json::from_str(body).map_err(|source| EngineError::Decode {
        url: url.to_string(),
        what,
        source,
    })
}

fn encode(what: &'static str, value: &impl serde::Serialize) -> EngineResult<String> {
    serde_json::to_string(value).map_err(|source| EngineError::Encode { what, source })
}

#[async_trait]
impl SolverEngine for HttpEngineClient {
    async fn fetch_demo_problem(&self) -> EngineResult<Timetable> {
        self.get_json("/api/timetable/prepare/problem", "timetable")
            .await
    }

    async fn fetch_schedule(&self, job_id: &str) -> EngineResult<Timetable> {
        self.get_json(&format!("/api/timetable/{}", job_id), "timetable")
            .await
    }

    async fn start_solving(&self, problem: &Timetable) -> EngineResult<String> {
        let url = self.url("/api/timetable");
        let body = encode("timetable", problem)?;
        let job_id = self.send(self.client.post(&url).body(body), &url).await?;
        Ok(job_id.trim().to_string())
    }

    async fn stop_solving(&self, job_id: &str) -> EngineResult<()> {
        let url = self.url(&format!("/api/timetable/{}", job_id));
        self.send(self.client.delete(&url), &url).await?;
        Ok(())
    }

    async fn analyze(&self, solution: &Timetable) -> EngineResult<ScoreAnalysis> {
        let url = self.url("/api/timetable/analyze");
        let body = encode("timetable", solution)?;
        // The engine answers with raw JSON text rather than a typed
        // content type; parse it from the body.
        let response = self.send(self.client.put(&url).body(body), &url).await?;
        decode(&url, "score analysis", &response)
    }

    async fn list_jobs(&self) -> EngineResult<Vec<String>> {
        self.get_json("/api/timetable", "job list").await
    }

    async fn list_constraints(&self) -> EngineResult<Vec<ConstraintDescriptor>> {
        self.get_json("/api/constraint", "constraint list").await
    }

    async fn toggle_constraint(&self, id: i64, enabled: bool) -> EngineResult<()> {
        let url = self.url(&format!("/api/constraint/{}/toggle", id));
        let body = serde_json::json!({ "enabled": enabled }).to_string();
        self.send(self.client.put(&url).body(body), &url).await?;
        Ok(())
    }

    async fn update_constraint_weight(&self, id: i64, weight: i64) -> EngineResult<()> {
        let url = self.url(&format!("/api/constraint/{}/weight", id));
        self.send(self.client.put(&url).body(weight.to_string()), &url)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client =
            HttpEngineClient::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.url("/api/timetable"),
            "http://localhost:8080/api/timetable"
        );
    }

    #[test]
    fn test_decode_reports_what_and_url() {
        let result: EngineResult<Timetable> = decode("http://engine/api/x", "timetable", "not json");
        let error = result.unwrap_err();
        assert!(matches!(error, EngineError::Decode { what: "timetable", .. }));
        assert!(error.to_string().contains("http://engine/api/x"));
    }
}
