use crate::api::StockApi;
use crate::domain::{MessageResponse, SearchFilters, Stock, StockQuery, StockRecommendation};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

pub mod state;
pub mod views;

pub use state::StoreState;

const FETCH_STOCKS_FAILED: &str = "Failed to fetch stocks";
const FETCH_STOCK_FAILED: &str = "Failed to fetch stock";
const FETCH_RECOMMENDATIONS_FAILED: &str = "Failed to fetch recommendations";
const GENERATE_RECOMMENDATIONS_FAILED: &str = "Failed to generate recommendations";
const FETCH_AND_STORE_FAILED: &str = "Failed to fetch and store stocks";

#[derive(Debug, Clone, Copy)]
enum Resource {
    Stocks,
    SelectedStock,
    Recommendations,
}

/// Monotonic request counters, one per fetched resource. A response is applied only
/// if no newer request for the same resource started while it was in flight.
#[derive(Debug, Default)]
struct Generations {
    stocks: AtomicU64,
    selected_stock: AtomicU64,
    recommendations: AtomicU64,
}

impl Generations {
    fn counter(&self, resource: Resource) -> &AtomicU64 {
        match resource {
            Resource::Stocks => &self.stocks,
            Resource::SelectedStock => &self.selected_stock,
            Resource::Recommendations => &self.recommendations,
        }
    }

    fn next(&self, resource: Resource) -> u64 {
        self.counter(resource).fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, resource: Resource, generation: u64) -> bool {
        self.counter(resource).load(Ordering::SeqCst) == generation
    }
}

/// Session-scoped dashboard state and the only write path to it.
///
/// Every mutation is published through a `watch` channel; pages hold a receiver from
/// [`Store::subscribe`] and re-render on change.
pub struct Store {
    api: Arc<dyn StockApi>,
    state: watch::Sender<StoreState>,
    generations: Generations,
}

impl Store {
    pub fn new(api: Arc<dyn StockApi>) -> Self {
        Self {
            api,
            state: watch::Sender::new(StoreState::default()),
            generations: Generations::default(),
        }
    }

    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub fn filtered_recommendations(&self) -> Vec<StockRecommendation> {
        let state = self.state.borrow();
        views::filtered_recommendations(&state.recommendations, &state.filters)
    }

    pub fn top_recommendations(&self) -> Vec<StockRecommendation> {
        views::top_recommendations(&self.state.borrow().recommendations)
    }

    fn start(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    /// Puts `message` back into `error` without touching the collections.
    pub fn report_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.state.send_modify(|s| s.error = Some(message));
    }

    fn finish(&self) {
        self.state.send_modify(|s| s.loading = false);
    }

    fn fail(&self, err: &anyhow::Error, fallback: &str) {
        let message = error_message(err, fallback);
        self.state.send_modify(|s| {
            s.error = Some(message);
            s.loading = false;
        });
    }

    /// Replaces the stock list. Failures land in `error` only.
    pub async fn fetch_stocks(&self, params: Option<StockQuery>) {
        let generation = self.generations.next(Resource::Stocks);
        self.start();

        let result = self.api.get_stocks(params.as_ref()).await;
        if !self.generations.is_current(Resource::Stocks, generation) {
            tracing::debug!(generation, "discarding stale stocks response");
            self.finish();
            return;
        }

        match result {
            Ok(resp) => {
                tracing::debug!(count = resp.data.len(), "stocks fetched");
                if let Some(page) = resp.pagination {
                    if !page.is_consistent(resp.data.len()) {
                        tracing::warn!(
                            offset = page.offset,
                            total = page.total,
                            returned = resp.data.len(),
                            "stocks page overruns the reported total"
                        );
                    }
                }
                self.state.send_modify(|s| {
                    s.stocks = resp.data;
                    if let Some(pagination) = resp.pagination {
                        s.pagination = pagination;
                    }
                    s.loading = false;
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetch stocks failed");
                self.fail(&err, FETCH_STOCKS_FAILED);
            }
        }
    }

    /// Loads one stock into `selected_stock` and hands it back.
    pub async fn fetch_stock_by_ticker(&self, ticker: &str) -> anyhow::Result<Stock> {
        let generation = self.generations.next(Resource::SelectedStock);
        self.start();

        match self.api.get_stock_by_ticker(ticker).await {
            Ok(resp) => {
                let stock = resp.data;
                if self.generations.is_current(Resource::SelectedStock, generation) {
                    let selected = stock.clone();
                    self.state.send_modify(|s| {
                        s.selected_stock = Some(selected);
                        s.loading = false;
                    });
                } else {
                    tracing::debug!(ticker, generation, "discarding stale stock response");
                    self.finish();
                }
                Ok(stock)
            }
            Err(err) => {
                tracing::warn!(ticker, error = %err, "fetch stock failed");
                if self.generations.is_current(Resource::SelectedStock, generation) {
                    self.fail(&err, FETCH_STOCK_FAILED);
                } else {
                    self.finish();
                }
                Err(err)
            }
        }
    }

    /// Replaces the recommendation list. Failures land in `error` only.
    pub async fn fetch_recommendations(&self, limit: Option<u32>) {
        let generation = self.generations.next(Resource::Recommendations);
        self.start();

        let result = self.api.get_recommendations(limit).await;
        if !self.generations.is_current(Resource::Recommendations, generation) {
            tracing::debug!(generation, "discarding stale recommendations response");
            self.finish();
            return;
        }

        match result {
            Ok(resp) => {
                tracing::debug!(count = resp.data.len(), "recommendations fetched");
                for rec in resp.data.iter().filter(|r| !r.stock_matches()) {
                    tracing::warn!(
                        id = rec.id,
                        stock_id = rec.stock_id,
                        "recommendation embeds a different stock"
                    );
                }
                self.state.send_modify(|s| {
                    s.recommendations = resp.data;
                    s.loading = false;
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetch recommendations failed");
                self.fail(&err, FETCH_RECOMMENDATIONS_FAILED);
            }
        }
    }

    /// Asks the backend to recompute, then reloads the list. The refresh is skipped when
    /// the trigger fails.
    pub async fn generate_recommendations(&self) -> anyhow::Result<MessageResponse> {
        self.start();

        let message = match self.api.generate_recommendations().await {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(error = %err, "generate recommendations failed");
                self.fail(&err, GENERATE_RECOMMENDATIONS_FAILED);
                return Err(err);
            }
        };

        tracing::info!(response = %message.message, "recommendations generated");
        self.fetch_recommendations(None).await;
        self.finish();
        Ok(message)
    }

    /// Asks the backend to ingest fresh analyst data, then reloads the stock list. The
    /// refresh is skipped when the trigger fails.
    pub async fn fetch_and_store_stocks(&self) -> anyhow::Result<MessageResponse> {
        self.start();

        let message = match self.api.fetch_stocks().await {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(error = %err, "fetch and store stocks failed");
                self.fail(&err, FETCH_AND_STORE_FAILED);
                return Err(err);
            }
        };

        tracing::info!(response = %message.message, "stocks ingested");
        self.fetch_stocks(None).await;
        self.finish();
        Ok(message)
    }

    pub fn update_filters(&self, partial: SearchFilters) {
        self.state.send_modify(|s| s.filters.merge(partial));
    }

    pub fn clear_filters(&self) {
        self.state.send_modify(|s| {
            s.filters = SearchFilters::default();
            s.search_query.clear();
        });
    }

    pub fn set_search_query(&self, query: &str) {
        self.state.send_modify(|s| {
            s.search_query = query.to_string();
            s.filters.query = Some(query.to_string());
        });
    }
}

fn error_message(err: &anyhow::Error, fallback: &str) -> String {
    let message = format!("{err:#}");
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
