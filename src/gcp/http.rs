//! HTTP utilities for GCP REST API calls

use crate::error::ServiceError;
use crate::inventory::ExecContext;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Pull `error.message` out of a Google API error envelope
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        })
}

/// HTTP client wrapper for GCP API calls
#[derive(Clone)]
pub struct GcpHttpClient {
    client: Client,
}

impl GcpHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gcp-inventory/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// GET `url` and decode the JSON body
    ///
    /// The request is bounded by whatever is left of the context deadline.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        ctx: &ExecContext,
        url: Url,
    ) -> Result<T, ServiceError> {
        let remaining = ctx.remaining()?;
        let token = ctx.token().await?;

        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url).bearer_auth(token);
        if let Some(timeout) = remaining {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: api_error_message(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(ServiceError::Decode)
    }
}

fn transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::DeadlineExceeded
    } else {
        ServiceError::Transport(err)
    }
}
