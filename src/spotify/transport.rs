use std::future::Future;

use reqwest::{Client, StatusCode, header::RETRY_AFTER};

/// Status, `Retry-After` hint and body of a catalog response.
#[derive(Debug, Clone)]
pub struct CatalogResponse {
    pub status: StatusCode,
    pub retry_after: Option<u64>,
    pub body: String,
}

impl CatalogResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS
    }
}

/// Issues authorized `GET` requests against the catalog.
pub trait CatalogTransport {
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        authorization: &str,
    ) -> impl Future<Output = Result<CatalogResponse, reqwest::Error>>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl CatalogTransport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        authorization: &str,
    ) -> Result<CatalogResponse, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = response.text().await?;

        Ok(CatalogResponse {
            status,
            retry_after,
            body,
        })
    }
}
