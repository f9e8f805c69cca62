use crate::domain::{PaginationInfo, SearchFilters, Stock, StockRecommendation};

/// Snapshot of everything the dashboard pages render from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub stocks: Vec<Stock>,
    pub recommendations: Vec<StockRecommendation>,
    pub selected_stock: Option<Stock>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_query: String,
    pub filters: SearchFilters,
    pub pagination: PaginationInfo,
}

impl StoreState {
    pub fn filtered_recommendations(&self) -> Vec<StockRecommendation> {
        super::views::filtered_recommendations(&self.recommendations, &self.filters)
    }

    pub fn top_recommendations(&self) -> Vec<StockRecommendation> {
        super::views::top_recommendations(&self.recommendations)
    }
}
