use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An analyst action on a listed company, as last stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub id: u64,
    pub ticker: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_to: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub brokerage: String,
    #[serde(default)]
    pub rating_from: String,
    #[serde(default)]
    pub rating_to: String,
    pub time: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Stock {
    /// `"$4.20 -> $5.00"` style price target range, if the backend sent any.
    pub fn target_range(&self) -> Option<String> {
        let from = self.target_from.as_deref().filter(|s| !s.is_empty());
        let to = self.target_to.as_deref().filter(|s| !s.is_empty());
        match (from, to) {
            (Some(from), Some(to)) => Some(format!("{from} -> {to}")),
            (None, Some(to)) => Some(to.to_string()),
            (Some(from), None) => Some(from.to_string()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_backend_stock_with_empty_targets() {
        let v = json!({
            "id": 7,
            "ticker": "AAPL",
            "company": "Apple Inc.",
            "target_from": "",
            "target_to": "$210.00",
            "action": "target raised by",
            "brokerage": "Goldman Sachs",
            "rating_from": "Neutral",
            "rating_to": "Buy",
            "time": "2025-03-01T00:30:05Z",
            "last_updated": "2025-03-02T10:00:00Z",
            "created_at": "2025-03-01T00:30:05Z",
            "updated_at": "2025-03-02T10:00:00Z"
        });

        let stock: Stock = serde_json::from_value(v).unwrap();
        assert_eq!(stock.id, 7);
        assert_eq!(stock.rating_to, "Buy");
        assert_eq!(stock.target_range().as_deref(), Some("$210.00"));
    }

    #[test]
    fn optional_fields_may_be_missing() {
        let v = json!({
            "id": 1,
            "ticker": "MSFT",
            "company": "Microsoft",
            "time": "2025-03-01T00:00:00Z",
            "last_updated": "2025-03-01T00:00:00Z"
        });

        let stock: Stock = serde_json::from_value(v).unwrap();
        assert!(stock.target_from.is_none());
        assert!(stock.action.is_empty());
        assert!(stock.target_range().is_none());
    }
}
