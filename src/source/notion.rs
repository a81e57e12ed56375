// src/source/notion.rs

//! Notion API implementation of [`ContentSource`].
//!
//! Requests are made one at a time and never retried here; a throttled or
//! failed call surfaces as an [`AppError`] for the caller to act on.

use async_trait::async_trait;
use reqwest::{Response, StatusCode, header::RETRY_AFTER};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{NotionConfig, RawUnit, UnitId};
use crate::source::{ContentSource, Listing, SearchRecord};
use crate::utils::http::{create_async_client, endpoint};

/// Error body the API returns alongside non-success statuses.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// HTTP client for the Notion API.
#[derive(Debug, Clone)]
pub struct NotionClient {
    client: reqwest::Client,
    base: Url,
    page_size: u32,
}

impl NotionClient {
    /// Create a client authenticated with `token`.
    pub fn new(config: &NotionConfig, token: &str) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config, token)?,
            base: Url::parse(&config.api_base)?,
            page_size: config.page_size.clamp(1, 100),
        })
    }

    /// Create a client using the token from the configured environment variable.
    pub fn from_env(config: &NotionConfig) -> Result<Self> {
        let token = std::env::var(&config.token_env)
            .map_err(|_| AppError::config(format!("{} must be set", config.token_env)))?;
        Self::new(config, &token)
    }

    /// Decode a successful body, or map the failure status to an error.
    async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            return serde_json::from_slice(&bytes).map_err(|e| AppError::malformed(context, e));
        }

        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let body = response.text().await.unwrap_or_default();
        let error: ApiErrorBody = serde_json::from_str(&body).unwrap_or_else(|_| ApiErrorBody {
            code: String::new(),
            message: body.clone(),
        });

        log::debug!("{} failed with {}: {}", context, status, error.message);

        Err(match status {
            StatusCode::TOO_MANY_REQUESTS => AppError::RateLimited { retry_after_secs },
            StatusCode::NOT_FOUND => AppError::NotFound(format!("{context}: {}", error.message)),
            _ => AppError::Api {
                status: status.as_u16(),
                code: error.code,
                message: error.message,
            },
        })
    }
}

#[async_trait]
impl ContentSource for NotionClient {
    async fn list_recent_documents(&self, cursor: Option<&str>) -> Result<Listing<SearchRecord>> {
        let mut body = json!({
            "filter": { "value": "page", "property": "object" },
            "sort": { "timestamp": "last_edited_time", "direction": "descending" },
            "page_size": self.page_size,
        });
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }

        let url = endpoint(&self.base, "v1/search")?;
        log::trace!("POST {} (cursor: {:?})", url, cursor);

        let response = self.client.post(url).json(&body).send().await?;
        Self::decode(response, "search").await
    }

    async fn list_children(
        &self,
        parent: &UnitId,
        cursor: Option<&str>,
    ) -> Result<Listing<RawUnit>> {
        let mut url = endpoint(&self.base, &format!("v1/blocks/{parent}/children"))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page_size", &self.page_size.to_string());
            if let Some(cursor) = cursor {
                query.append_pair("start_cursor", cursor);
            }
        }
        log::trace!("GET {}", url);

        let response = self.client.get(url).send().await?;
        Self::decode(response, &format!("children of {parent}")).await
    }
}
