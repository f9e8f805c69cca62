use crate::domain::stock::Stock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecommendation {
    pub id: u64,
    pub stock_id: u64,
    #[serde(default)]
    pub stock: Option<Stock>,
    #[serde(default)]
    pub recommendation_score: f64,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub expected_return: f64,
    #[serde(default)]
    pub time_horizon: String,
    /// The backend serializes this as `reason`.
    #[serde(default, alias = "reason")]
    pub reasons: String,
    #[serde(default)]
    pub analyst_sentiment: String,
    #[serde(default)]
    pub upgrade_count: u32,
    #[serde(default)]
    pub downgrade_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_from: Option<String>,
}

impl StockRecommendation {
    pub fn company(&self) -> &str {
        self.stock.as_ref().map(|s| s.company.as_str()).unwrap_or("")
    }

    pub fn ticker(&self) -> &str {
        self.stock.as_ref().map(|s| s.ticker.as_str()).unwrap_or("")
    }

    /// The embedded snapshot must describe the referenced stock.
    pub fn stock_matches(&self) -> bool {
        self.stock.as_ref().map_or(true, |s| s.id == self.stock_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_backend_reason_field_and_defaults_numbers() {
        let v = json!({
            "id": 3,
            "stock_id": 9,
            "stock": {
                "id": 9,
                "ticker": "NVDA",
                "company": "NVIDIA",
                "time": "2025-03-01T00:00:00Z",
                "last_updated": "2025-03-01T00:00:00Z"
            },
            "risk_level": "Medium",
            "reason": "Two upgrades in a week",
            "created_at": "2025-03-01T00:00:00Z",
            "updated_at": "2025-03-01T00:00:00Z"
        });

        let rec: StockRecommendation = serde_json::from_value(v).unwrap();
        assert_eq!(rec.reasons, "Two upgrades in a week");
        assert_eq!(rec.recommendation_score, 0.0);
        assert_eq!(rec.ticker(), "NVDA");
        assert!(rec.stock_matches());
    }

    #[test]
    fn missing_stock_reads_as_empty_strings() {
        let v = json!({
            "id": 1,
            "stock_id": 2,
            "recommendation_score": 55.5,
            "created_at": "2025-03-01T00:00:00Z",
            "updated_at": "2025-03-01T00:00:00Z"
        });

        let rec: StockRecommendation = serde_json::from_value(v).unwrap();
        assert_eq!(rec.company(), "");
        assert_eq!(rec.ticker(), "");
        assert!(rec.stock_matches());
    }
}
