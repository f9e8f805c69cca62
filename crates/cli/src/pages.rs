use std::fmt::Write;
use std::sync::Arc;

use stockdash_core::domain::{Stock, StockQuery, StockRecommendation};
use stockdash_core::router::{dashboard_router, Page, Router};
use stockdash_core::store::{Store, StoreState};

const DASHBOARD_STOCKS: u32 = 5;

pub fn build_router(stock_query: StockQuery, recommendation_limit: Option<u32>) -> Router {
    dashboard_router(
        Arc::new(DashboardPage),
        move || {
            Arc::new(StocksPage {
                query: stock_query.clone(),
            }) as Arc<dyn Page>
        },
        move || {
            Arc::new(RecommendationsPage {
                limit: recommendation_limit,
            }) as Arc<dyn Page>
        },
    )
}

pub struct DashboardPage;

#[async_trait::async_trait]
impl Page for DashboardPage {
    fn title(&self) -> &'static str {
        "Dashboard"
    }

    async fn load(&self, store: &Store) -> anyhow::Result<()> {
        store.fetch_recommendations(None).await;
        // The stocks fetch clears `error`; keep the recommendations failure visible.
        let recommendations_error = store.state().error;
        store
            .fetch_stocks(Some(StockQuery {
                limit: Some(DASHBOARD_STOCKS),
                ..Default::default()
            }))
            .await;
        if let Some(message) = recommendations_error {
            if store.state().error.is_none() {
                store.report_error(message);
            }
        }
        Ok(())
    }

    fn render(&self, state: &StoreState) -> String {
        let mut out = header(self.title(), state);
        let _ = writeln!(
            out,
            "{} stocks tracked, {} recommendations",
            state.pagination.total,
            state.recommendations.len()
        );
        out.push_str("\nTop recommendations\n");
        write_recommendations(&mut out, &state.top_recommendations());
        out.push_str("\nLatest analyst actions\n");
        write_stocks(&mut out, &state.stocks);
        out
    }
}

pub struct StocksPage {
    query: StockQuery,
}

#[async_trait::async_trait]
impl Page for StocksPage {
    fn title(&self) -> &'static str {
        "Stocks"
    }

    async fn load(&self, store: &Store) -> anyhow::Result<()> {
        store.fetch_stocks(Some(self.query.clone())).await;
        Ok(())
    }

    fn render(&self, state: &StoreState) -> String {
        let mut out = header(self.title(), state);
        write_stocks(&mut out, &state.stocks);
        let page = state.pagination;
        let _ = writeln!(
            out,
            "showing {}-{} of {}",
            if state.stocks.is_empty() { 0 } else { page.offset + 1 },
            page.offset as usize + state.stocks.len(),
            page.total
        );
        out
    }
}

pub struct RecommendationsPage {
    limit: Option<u32>,
}

#[async_trait::async_trait]
impl Page for RecommendationsPage {
    fn title(&self) -> &'static str {
        "Recommendations"
    }

    async fn load(&self, store: &Store) -> anyhow::Result<()> {
        store.fetch_recommendations(self.limit).await;
        Ok(())
    }

    fn render(&self, state: &StoreState) -> String {
        let mut out = header(self.title(), state);
        let filtered = state.filtered_recommendations();
        if !state.filters.is_empty() {
            let _ = writeln!(
                out,
                "{} of {} match the current filters",
                filtered.len(),
                state.recommendations.len()
            );
        }
        write_recommendations(&mut out, &filtered);
        out
    }
}

pub fn render_stock_detail(stock: &Stock) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", stock.company, stock.ticker);
    let _ = writeln!(out, "  brokerage: {}", stock.brokerage);
    let _ = writeln!(out, "  action:    {}", stock.action);
    let _ = writeln!(out, "  rating:    {} -> {}", stock.rating_from, stock.rating_to);
    if let Some(range) = stock.target_range() {
        let _ = writeln!(out, "  target:    {range}");
    }
    let _ = writeln!(out, "  time:      {}", stock.time.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(
        out,
        "  updated:   {}",
        stock.last_updated.format("%Y-%m-%d %H:%M UTC")
    );
    out
}

fn header(title: &str, state: &StoreState) -> String {
    let mut out = format!("== {title} ==\n");
    if let Some(err) = &state.error {
        let _ = writeln!(out, "error: {err}");
    }
    out
}

fn write_stocks(out: &mut String, stocks: &[Stock]) {
    if stocks.is_empty() {
        out.push_str("  (no stocks)\n");
        return;
    }
    for s in stocks {
        let _ = writeln!(
            out,
            "  {:<6} {:<32} {:<24} {} -> {}  {}",
            s.ticker,
            truncate(&s.company, 32),
            truncate(&s.brokerage, 24),
            s.rating_from,
            s.rating_to,
            s.time.format("%Y-%m-%d")
        );
    }
}

fn write_recommendations(out: &mut String, recs: &[StockRecommendation]) {
    if recs.is_empty() {
        out.push_str("  (no recommendations)\n");
        return;
    }
    for r in recs {
        let _ = writeln!(
            out,
            "  {:<6} {:<32} score {:>6.2}  risk {:<8} return {:>6.2}%  {}",
            r.ticker(),
            truncate(r.company(), 32),
            r.recommendation_score,
            r.risk_level,
            r.expected_return,
            r.time_horizon
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}
