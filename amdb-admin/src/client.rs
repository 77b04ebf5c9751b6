//! Remote mutation client
//!
//! Thin wrapper over `reqwest` that resolves paths the way a browser
//! resolves a relative `fetch` URL against the current page, sends an
//! optional JSON body and turns any non-2xx response into
//! [`ClientError::Http`]. No retries are attempted.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Mutation client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server answered with a non-2xx status; body is surfaced verbatim
    #[error("{status} {status_text}. {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Transport failure (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Request body could not be serialized or response body decoded
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// HTTP client bound to the page currently displayed
#[derive(Debug, Clone)]
pub struct MutationClient {
    http: reqwest::Client,
    page_url: Url,
}

impl MutationClient {
    pub fn new(page_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("amdb-admin/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self { http, page_url })
    }

    /// Build a client from a server origin and a page path
    pub fn for_page(
        server_url: &str,
        page_path: &str,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let origin = Url::parse(server_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        let page_url = origin
            .join(page_path)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        Self::new(page_url, timeout)
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Resolve `path` against the page URL
    ///
    /// `names/` on `/artists/3/` becomes `/artists/3/names/`, while
    /// `/line_ups/4` is origin-absolute.
    pub fn resolve(&self, path: &str) -> Result<Url, ClientError> {
        self.page_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// GET `url` and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self.execute(Method::GET, url, None).await?;
        decode(response).await
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resolve(path)?;
        let response = self.execute(Method::POST, url, Some(encode(body)?)).await?;
        decode(response).await
    }

    /// POST without a body and decode the JSON response
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.resolve(path)?;
        let response = self.execute(Method::POST, url, None).await?;
        decode(response).await
    }

    /// PUT a JSON body, discarding the response body
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve(path)?;
        self.execute(Method::PUT, url, Some(encode(body)?)).await?;
        Ok(())
    }

    /// DELETE, discarding the response body
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let url = self.resolve(path)?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// DELETE and decode the JSON response
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.resolve(path)?;
        let response = self.execute(Method::DELETE, url, None).await?;
        decode(response).await
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::debug!(method = %method, url = %url, "Sending request");

        let request = self
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(method = %method, url = %url, error = %e, "Request failed");
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                "Server rejected request"
            );
            return Err(ClientError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        tracing::debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            "Request succeeded"
        );
        Ok(response)
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Parse(e.to_string()))
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    response
        .json()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}
