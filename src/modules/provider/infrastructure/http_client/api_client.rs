//! Thin JSON-over-HTTP client shared by provider adapters
//!
//! Every call is exactly one request: there is no retry, rate limiting or
//! response cache at this layer.

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, TimedOperation};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// Longest response excerpt kept in decode errors
const ERROR_EXCERPT_CHARS: usize = 200;

pub struct ApiClient {
    client: Client,
    provider_name: String,
}

impl ApiClient {
    /// Create a client with a request timeout and `User-Agent`
    pub fn new(provider_name: &str, timeout: Duration, user_agent: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            provider_name: provider_name.to_string(),
        })
    }

    /// GET `url` with the given query pairs and decode the JSON body
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        LogContext::api_call(&self.provider_name, url, "started", None);
        let timer = TimedOperation::new(&format!("{} GET {}", self.provider_name, url));

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!("{} API request failed: {}", self.provider_name, e);
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error = AppError::from_status(
                status.as_u16(),
                &format!("{} API returned error: {}", self.provider_name, status),
            );
            warn!("{}", error);
            return Err(error);
        }

        let parsed = self.parse_response(response).await;
        LogContext::api_call(
            &self.provider_name,
            url,
            if parsed.is_ok() { "ok" } else { "undecodable" },
            Some(timer.elapsed_ms()),
        );
        parsed
    }

    /// Decode the body, keeping a short excerpt of it on failure
    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.provider_name, e
            ))
        })?;

        debug!(
            "{} response body: {} bytes",
            self.provider_name,
            response_text.len()
        );

        decode_body(&self.provider_name, &response_text)
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}

/// Decode a JSON body into `T`
pub fn decode_body<T>(provider_name: &str, body: &str) -> AppResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        let excerpt: String = body.chars().take(ERROR_EXCERPT_CHARS).collect();
        AppError::SerializationError(format!(
            "Failed to parse {} response: {}. Response: {}{}",
            provider_name,
            e,
            excerpt,
            if body.chars().count() > ERROR_EXCERPT_CHARS {
                "..."
            } else {
                ""
            }
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client =
            ApiClient::new("Shikimori", Duration::from_secs(5), "anime-scroll/test").unwrap();
        assert_eq!(client.provider_name(), "Shikimori");
    }

    #[test]
    fn test_decode_body_array() {
        let ids: Vec<u32> = decode_body("Shikimori", "[1, 2, 3]").unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_error_keeps_short_excerpt() {
        let body = format!("<html>{}</html>", "x".repeat(500));
        let err = decode_body::<Vec<u32>>("Shikimori", &body).unwrap_err();
        match err {
            AppError::SerializationError(msg) => {
                assert!(msg.contains("Failed to parse Shikimori response"));
                assert!(msg.ends_with("..."));
                assert!(msg.len() < 400);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
