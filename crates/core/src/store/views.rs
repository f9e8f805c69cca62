//! Derived views over the fetched recommendations. Pure functions of their inputs,
//! recomputed on every read.

use crate::domain::{SearchFilters, SortField, SortOrder, StockRecommendation};
use std::cmp::Ordering;

pub const TOP_RECOMMENDATIONS: usize = 5;

pub fn filtered_recommendations(
    recommendations: &[StockRecommendation],
    filters: &SearchFilters,
) -> Vec<StockRecommendation> {
    let risk_level = filters.risk_level.as_deref().filter(|s| !s.is_empty());
    let query = filters
        .query
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut filtered: Vec<StockRecommendation> = recommendations
        .iter()
        .filter(|rec| risk_level.map_or(true, |risk| rec.risk_level == risk))
        .filter(|rec| {
            filters
                .min_score
                .map_or(true, |min| rec.recommendation_score >= min)
        })
        .filter(|rec| {
            filters
                .max_score
                .map_or(true, |max| rec.recommendation_score <= max)
        })
        .filter(|rec| {
            query.as_deref().map_or(true, |q| {
                rec.company().to_lowercase().contains(q) || rec.ticker().to_lowercase().contains(q)
            })
        })
        .cloned()
        .collect();

    if let Some(field) = filters.sort_by {
        let descending = filters.sort_order == Some(SortOrder::Desc);
        // Stable: equal keys keep their fetched order.
        filtered.sort_by(|a, b| {
            let ord = compare_by(field, a, b);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }

    filtered
}

fn compare_by(field: SortField, a: &StockRecommendation, b: &StockRecommendation) -> Ordering {
    match field {
        SortField::Score => cmp_f64(a.recommendation_score, b.recommendation_score),
        SortField::Return => cmp_f64(a.expected_return, b.expected_return),
        SortField::Risk => a
            .risk_level
            .to_lowercase()
            .cmp(&b.risk_level.to_lowercase()),
        SortField::Time
        | SortField::Ticker
        | SortField::Company
        | SortField::Action
        | SortField::RatingTo => Ordering::Equal,
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Highest scores first, ignoring filters. Ties keep their fetched order.
pub fn top_recommendations(recommendations: &[StockRecommendation]) -> Vec<StockRecommendation> {
    let mut sorted = recommendations.to_vec();
    sorted.sort_by(|a, b| cmp_f64(b.recommendation_score, a.recommendation_score));
    sorted.truncate(TOP_RECOMMENDATIONS);
    sorted
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::{Stock, StockRecommendation};
    use chrono::{TimeZone, Utc};

    pub fn stock(id: u64, ticker: &str, company: &str) -> Stock {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        Stock {
            id,
            ticker: ticker.to_string(),
            company: company.to_string(),
            target_from: None,
            target_to: None,
            action: "upgraded by".to_string(),
            brokerage: "Example Securities".to_string(),
            rating_from: "Hold".to_string(),
            rating_to: "Buy".to_string(),
            time: at,
            last_updated: at,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn rec(id: u64, score: f64, risk: &str) -> StockRecommendation {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        StockRecommendation {
            id,
            stock_id: id,
            stock: Some(stock(id, &format!("T{id}"), &format!("Company {id}"))),
            recommendation_score: score,
            risk_level: risk.to_string(),
            expected_return: 0.0,
            time_horizon: "short".to_string(),
            reasons: String::new(),
            analyst_sentiment: "positive".to_string(),
            upgrade_count: 1,
            downgrade_count: 0,
            created_at: at,
            updated_at: at,
            target_to: None,
            target_from: None,
        }
    }

    pub fn named(id: u64, ticker: &str, company: &str, score: f64) -> StockRecommendation {
        let mut r = rec(id, score, "Medium");
        r.stock = Some(stock(id, ticker, company));
        r
    }
}
