use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Time,
    Ticker,
    Company,
    Action,
    RatingTo,
    Score,
    Risk,
    Return,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Time => "time",
            SortField::Ticker => "ticker",
            SortField::Company => "company",
            SortField::Action => "action",
            SortField::RatingTo => "rating_to",
            SortField::Score => "score",
            SortField::Risk => "risk",
            SortField::Return => "return",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "time" => SortField::Time,
            "ticker" => SortField::Ticker,
            "company" => SortField::Company,
            "action" => SortField::Action,
            "rating_to" => SortField::RatingTo,
            "score" => SortField::Score,
            "risk" => SortField::Risk,
            "return" => SortField::Return,
            other => anyhow::bail!("unknown sort field: {other}"),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Client-side criteria over the fetched recommendations. Lives only for the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brokerage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(default, rename = "minScore", skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    #[serde(default, rename = "maxScore", skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(default, rename = "sortBy", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(default, rename = "sortOrder", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl SearchFilters {
    /// Shallow merge: every field set on `partial` replaces ours.
    pub fn merge(&mut self, partial: SearchFilters) {
        let SearchFilters {
            search,
            query,
            action,
            rating,
            brokerage,
            risk_level,
            min_score,
            max_score,
            sort_by,
            sort_order,
        } = partial;

        if search.is_some() {
            self.search = search;
        }
        if query.is_some() {
            self.query = query;
        }
        if action.is_some() {
            self.action = action;
        }
        if rating.is_some() {
            self.rating = rating;
        }
        if brokerage.is_some() {
            self.brokerage = brokerage;
        }
        if risk_level.is_some() {
            self.risk_level = risk_level;
        }
        if min_score.is_some() {
            self.min_score = min_score;
        }
        if max_score.is_some() {
            self.max_score = max_score;
        }
        if sort_by.is_some() {
            self.sort_by = sort_by;
        }
        if sort_order.is_some() {
            self.sort_order = sort_order;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SearchFilters::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_names_match_the_dashboard() {
        let v = json!({
            "risk_level": "High",
            "minScore": 70.0,
            "sortBy": "rating_to",
            "sortOrder": "desc"
        });
        let f: SearchFilters = serde_json::from_value(v).unwrap();
        assert_eq!(f.min_score, Some(70.0));
        assert_eq!(f.sort_by, Some(SortField::RatingTo));
        assert_eq!(f.sort_order, Some(SortOrder::Desc));
        assert_eq!(serde_json::to_value(SortField::Return).unwrap(), json!("return"));
    }

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut f = SearchFilters {
            risk_level: Some("Low".into()),
            min_score: Some(10.0),
            ..Default::default()
        };
        f.merge(SearchFilters {
            min_score: Some(50.0),
            sort_by: Some(SortField::Score),
            ..Default::default()
        });

        assert_eq!(f.risk_level.as_deref(), Some("Low"));
        assert_eq!(f.min_score, Some(50.0));
        assert_eq!(f.sort_by, Some(SortField::Score));
        assert!(!f.is_empty());
    }

    #[test]
    fn parses_sort_field_names() {
        assert_eq!("Score".parse::<SortField>().unwrap(), SortField::Score);
        assert_eq!("rating_to".parse::<SortField>().unwrap(), SortField::RatingTo);
        assert!("price".parse::<SortField>().is_err());
    }
}
