use crate::api::error::ApiStatusError;
use crate::api::StockApi;
use crate::config::Settings;
use crate::domain::{
    ApiResponse, HealthStatus, MessageResponse, Stock, StockQuery, StockRecommendation,
};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        // No timeout: a slow backend simply answers late.
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build api http client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            headers: HeaderMap::new(),
        })
    }

    /// Extra header sent with every request. Overrides the JSON content type if named so.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let header = HeaderName::from_bytes(name.as_bytes())
            .with_context(|| format!("invalid header name: {name}"))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("invalid value for header {name}"))?;
        self.headers.insert(header, value);
        Ok(self)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.api_base_url.clone())
    }

    fn url(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint);
        let url = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query)
        };
        url.with_context(|| format!("invalid api url: {raw}"))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(endpoint, query)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(self.headers.clone());

        tracing::debug!(%method, %url, "api request");

        let res = self
            .http
            .request(method.clone(), url)
            .headers(headers)
            .send()
            .await
            .with_context(|| format!("{method} {endpoint} request failed"))?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%method, endpoint, %status, "api returned error status");
            return Err(ApiStatusError {
                status,
                endpoint: endpoint.to_string(),
            }
            .into());
        }

        res.json::<T>()
            .await
            .with_context(|| format!("failed to decode {endpoint} response"))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T> {
        self.request(Method::GET, endpoint, query).await
    }

    async fn post<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::POST, endpoint, &[]).await
    }
}

fn limit_pairs(limit: Option<u32>) -> Vec<(&'static str, String)> {
    limit
        .filter(|v| *v > 0)
        .map(|v| vec![("limit", v.to_string())])
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl StockApi for HttpApiClient {
    async fn get_stocks(&self, params: Option<&StockQuery>) -> Result<ApiResponse<Vec<Stock>>> {
        let pairs = params.map(StockQuery::to_pairs).unwrap_or_default();
        self.get("/stocks", &pairs).await
    }

    async fn get_stock_by_ticker(&self, ticker: &str) -> Result<ApiResponse<Stock>> {
        self.get(&format!("/stocks/{ticker}"), &[]).await
    }

    async fn fetch_stocks(&self) -> Result<MessageResponse> {
        self.post("/stocks/fetch").await
    }

    async fn get_recommendations(
        &self,
        limit: Option<u32>,
    ) -> Result<ApiResponse<Vec<StockRecommendation>>> {
        self.get("/recommendations", &limit_pairs(limit)).await
    }

    async fn generate_recommendations(&self) -> Result<MessageResponse> {
        self.post("/recommendations/generate").await
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        self.get("/health", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpApiClient {
        HttpApiClient::new("http://localhost:8000/api/v1/").unwrap()
    }

    #[test]
    fn joins_base_and_endpoint_without_double_slash() {
        let url = client().url("/health", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/health");
    }

    #[test]
    fn stock_listing_query_only_carries_truthy_params() {
        let params = StockQuery {
            limit: Some(20),
            offset: Some(0),
            q: Some("bank of".into()),
        };
        let url = client().url("/stocks", &params.to_pairs()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/stocks?limit=20&q=bank+of"
        );

        let url = client()
            .url("/stocks", &StockQuery::default().to_pairs())
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/stocks");
    }

    #[test]
    fn recommendations_limit_is_optional() {
        assert!(limit_pairs(None).is_empty());
        assert!(limit_pairs(Some(0)).is_empty());

        let url = client()
            .url("/recommendations", &limit_pairs(Some(5)))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/recommendations?limit=5"
        );
    }

    #[test]
    fn caller_headers_are_kept() {
        let client = client().with_header("x-request-source", "cli").unwrap();
        assert_eq!(client.headers["x-request-source"], "cli");
        assert!(client.clone().with_header("x-bad", "line\nbreak").is_err());
    }

    #[test]
    fn invalid_header_name_is_an_error() {
        let err = client().with_header("bad header", "x").unwrap_err();
        assert!(err.to_string().contains("invalid header name"));
        assert!(client().with_header("", "x").is_err());
    }

    #[test]
    fn ticker_is_embedded_in_the_path() {
        let url = client().url(&format!("/stocks/{}", "BRK.B"), &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/stocks/BRK.B");
    }
}
