pub mod envelope;
pub mod filters;
pub mod recommendation;
pub mod stock;

pub use envelope::{ApiResponse, HealthStatus, MessageResponse, PaginationInfo, StockQuery};
pub use filters::{SearchFilters, SortField, SortOrder};
pub use recommendation::StockRecommendation;
pub use stock::Stock;
