// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::NotionConfig;

const NOTION_VERSION: HeaderName = HeaderName::from_static("notion-version");

/// Create an HTTP client that authenticates every request against the API.
pub fn create_async_client(config: &NotionConfig, token: &str) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| AppError::config("API token contains invalid header characters"))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    let version = HeaderValue::from_str(&config.api_version).map_err(|_| {
        AppError::config(format!("invalid API version '{}'", config.api_version))
    })?;
    headers.insert(NOTION_VERSION, version);

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Join an endpoint path onto the API base URL.
///
/// The base is treated as a directory even without a trailing slash, so
/// `https://host/proxy` + `v1/search` yields `https://host/proxy/v1/search`.
pub fn endpoint(base: &Url, path: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    Ok(base.join(path.trim_start_matches('/'))?)
}
