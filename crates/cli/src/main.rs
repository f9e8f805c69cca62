use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use stockdash_core::api::{HttpApiClient, StockApi};
use stockdash_core::domain::{SearchFilters, SortField, SortOrder, StockQuery};
use stockdash_core::store::Store;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod pages;

#[derive(Debug, Parser)]
#[command(name = "stockdash", about = "Terminal view of the stock recommendation dashboard")]
struct Args {
    /// Dashboard path to open: /, /stocks or /recommendations.
    #[arg(default_value = "/")]
    path: String,

    /// Backend base URL. Overrides STOCKDASH_API_URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Page size for /stocks, or number of recommendations for /recommendations.
    #[arg(long)]
    limit: Option<u32>,

    #[arg(long)]
    offset: Option<u32>,

    /// Server-side stock search.
    #[arg(long)]
    q: Option<String>,

    /// Client-side search over recommendation company and ticker.
    #[arg(long)]
    query: Option<String>,

    #[arg(long)]
    risk: Option<String>,

    #[arg(long)]
    min_score: Option<f64>,

    #[arg(long)]
    max_score: Option<f64>,

    /// score, return or risk.
    #[arg(long)]
    sort_by: Option<SortField>,

    #[arg(long)]
    desc: bool,

    /// Ask the backend to ingest fresh analyst data first.
    #[arg(long)]
    refresh: bool,

    /// Ask the backend to regenerate recommendations first.
    #[arg(long)]
    generate: bool,

    /// Show a single stock instead of a page.
    #[arg(long)]
    ticker: Option<String>,

    /// Only check that the backend is up.
    #[arg(long)]
    health: bool,
}

impl Args {
    fn filters(&self) -> SearchFilters {
        SearchFilters {
            risk_level: self.risk.clone(),
            min_score: self.min_score,
            max_score: self.max_score,
            sort_by: self.sort_by,
            sort_order: self
                .sort_by
                .map(|_| if self.desc { SortOrder::Desc } else { SortOrder::Asc }),
            ..Default::default()
        }
    }

    fn stock_query(&self) -> StockQuery {
        StockQuery {
            limit: self.limit,
            offset: self.offset,
            q: self.q.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let settings = stockdash_core::config::Settings::from_env()?
        .with_api_base_url(args.api_url.clone());
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let api: Arc<dyn StockApi> = Arc::new(HttpApiClient::from_settings(&settings)?);
    tracing::debug!(base_url = %settings.api_base_url, "api client ready");

    if let Err(err) = run(args, api).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "stockdash failed");
        return Err(err);
    }
    Ok(())
}

async fn run(args: Args, api: Arc<dyn StockApi>) -> anyhow::Result<()> {
    if args.health {
        let health = api.health_check().await.context("health check failed")?;
        println!("{} ({})", health.status, health.service);
        return Ok(());
    }

    let store = Store::new(api);

    if let Some(ticker) = args.ticker.as_deref() {
        let stock = store.fetch_stock_by_ticker(ticker).await?;
        print!("{}", pages::render_stock_detail(&stock));
        return Ok(());
    }

    if args.refresh {
        let resp = store.fetch_and_store_stocks().await?;
        println!("{}", resp.message);
    }
    if args.generate {
        let resp = store.generate_recommendations().await?;
        println!("{}", resp.message);
    }

    store.update_filters(args.filters());
    if let Some(query) = args.query.as_deref() {
        store.set_search_query(query);
    }

    let router = pages::build_router(args.stock_query(), args.limit);
    let resolved = router
        .resolve(&args.path)
        .with_context(|| format!("no page at {}", args.path))?;

    tracing::info!(page = resolved.name, path = resolved.path, "opening page");
    resolved.page.load(&store).await?;
    print!("{}", resolved.page.render(&store.state()));

    Ok(())
}

fn init_sentry(settings: &stockdash_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
