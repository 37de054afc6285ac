use anyhow::{bail, Context};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};

use crate::database::Study;

/// Thin HTTP client for the study endpoints
pub struct StudyClient {
    base_url: String,
    http: reqwest::Client,
}

impl StudyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create(&self, name: &str, description: Option<&str>) -> anyhow::Result<Study> {
        let res = self
            .http
            .post(format!("{}/studies", self.base_url))
            .json(&json!({ "name": name, "description": description }))
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;

        let res = Self::check(res, StatusCode::CREATED).await?;
        Ok(res.json::<Study>().await?)
    }

    pub async fn list(&self) -> anyhow::Result<Vec<Study>> {
        let res = self
            .http
            .get(format!("{}/studies", self.base_url))
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;

        let res = Self::check(res, StatusCode::OK).await?;
        Ok(res.json::<Vec<Study>>().await?)
    }

    pub async fn delete(&self, id: i64) -> anyhow::Result<()> {
        let res = self
            .http
            .delete(format!("{}/studies/{}", self.base_url, id))
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;

        Self::check(res, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    /// Returns the status code alongside the body; a degraded server still answers
    pub async fn health(&self) -> anyhow::Result<(StatusCode, Value)> {
        let res = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;

        let status = res.status();
        Ok((status, res.json::<Value>().await?))
    }

    async fn check(res: Response, expected: StatusCode) -> anyhow::Result<Response> {
        if res.status() == expected {
            return Ok(res);
        }

        let status = res.status();
        let body = res.json::<Value>().await.unwrap_or(Value::Null);
        match body.get("message").and_then(|m| m.as_str()) {
            Some(message) => bail!("{} ({})", message, status),
            None => bail!("unexpected response status {}", status),
        }
    }
}
