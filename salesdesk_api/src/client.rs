//! HTTP client for the SalesDesk REST backend.

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    query::{PaymentRequestQuery, Query},
    types::{ApprovalUpdate, PaginatedResponse, PaymentRequest, Response, SalesOrder},
    Error,
};

/// HTTP client for the SalesDesk REST backend.
///
/// Each request builds a fresh `reqwest::Client` with the configured
/// timeout, so a `Client` is cheap to construct and holds no connections.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
    timeout: Duration,
}

impl Client {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a new client pointing at the given backend.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    fn http_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        tracing::debug!("GET {}", url);
        let request = self
            .http_client()?
            .get(url)
            .header("accept", "application/json");
        read_json(request).await
    }

    async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = self.get_url(path, None::<&PaymentRequestQuery>)?;
        tracing::debug!("PATCH {}", url);
        let request = self
            .http_client()?
            .patch(url)
            .header("accept", "application/json")
            .json(body);
        read_json(request).await
    }

    /// Fetches one page of sales orders with payment requests matching the query.
    pub async fn get_payment_requests(
        &self,
        query: &PaymentRequestQuery,
    ) -> Result<PaginatedResponse<SalesOrder>, Error> {
        self.get::<PaginatedResponse<SalesOrder>, PaymentRequestQuery>(
            "/payment-requests",
            Some(query),
        )
        .await
    }

    /// Sets the approval status of a single payment request.
    pub async fn update_payment_request(
        &self,
        payment_request_id: &str,
        update: &ApprovalUpdate,
    ) -> Result<Response<PaymentRequest>, Error> {
        self.patch::<Response<PaymentRequest>, ApprovalUpdate>(
            format!("/payment-requests/{}", payment_request_id).as_str(),
            update,
        )
        .await
    }
}

async fn read_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, Error> {
    let resp = request.send().await.map_err(|e| {
        tracing::error!("Failed to get resource: {}", e);
        Error::RequestFailed
    })?;

    let status = resp.status();
    let body = resp.text().await.map_err(|e| {
        tracing::error!("Failed to read response body: {}", e);
        Error::RequestFailed
    })?;

    if !status.is_success() {
        tracing::error!("Request failed with status {}: {}", status, truncate_body(&body));
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str::<T>(&body).map_err(|e| {
        tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(&body));
        Error::RequestFailed
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = Client::new("https://erp.example.com/api/");
        assert_eq!(client.base_url(), "https://erp.example.com/api");
    }

    #[test]
    fn get_url_appends_query() {
        let client = Client::new("https://erp.example.com/api");
        let url = client
            .get_url(
                "/payment-requests",
                Some(&PaymentRequestQuery::default().with_page(2).with_page_size(10)),
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://erp.example.com/api/payment-requests?approvalStatus=Pending&page=2&limit=10"
        );
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() <= 2000 + "...[truncated]".len());
    }

    #[test]
    fn short_body_is_untouched() {
        assert_eq!(truncate_body("oops"), "oops");
    }
}
