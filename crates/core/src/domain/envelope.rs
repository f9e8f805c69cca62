use serde::{Deserialize, Serialize};

/// Window over a server-side collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub limit: u32,
    pub offset: u32,
    pub total: u64,
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            total: 0,
        }
    }
}

impl PaginationInfo {
    pub fn is_consistent(&self, returned: usize) -> bool {
        u64::from(self.offset) + returned as u64 <= self.total
    }
}

/// Uniform wrapper around every list and detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

/// Parameters for the stock listing. Zero and empty values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub q: Option<String>,
}

impl StockQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit.filter(|v| *v > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|v| *v > 0) {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(q) = self.q.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("q", q.to_string()));
        }
        pairs
    }
}
