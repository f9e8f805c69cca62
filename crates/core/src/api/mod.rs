use crate::domain::{
    ApiResponse, HealthStatus, MessageResponse, Stock, StockQuery, StockRecommendation,
};

pub mod error;
pub mod http;

pub use error::ApiStatusError;
pub use http::HttpApiClient;
pub use reqwest::StatusCode;

/// Everything the dashboard asks of the backend.
#[async_trait::async_trait]
pub trait StockApi: Send + Sync {
    async fn get_stocks(&self, params: Option<&StockQuery>)
        -> anyhow::Result<ApiResponse<Vec<Stock>>>;

    async fn get_stock_by_ticker(&self, ticker: &str) -> anyhow::Result<ApiResponse<Stock>>;

    /// Asks the backend to ingest fresh analyst data.
    async fn fetch_stocks(&self) -> anyhow::Result<MessageResponse>;

    async fn get_recommendations(
        &self,
        limit: Option<u32>,
    ) -> anyhow::Result<ApiResponse<Vec<StockRecommendation>>>;

    /// Asks the backend to recompute recommendations.
    async fn generate_recommendations(&self) -> anyhow::Result<MessageResponse>;

    async fn health_check(&self) -> anyhow::Result<HealthStatus>;
}
