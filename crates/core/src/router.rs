use crate::store::{Store, StoreState};
use std::sync::{Arc, OnceLock};

pub const DASHBOARD_PATH: &str = "/";
pub const STOCKS_PATH: &str = "/stocks";
pub const RECOMMENDATIONS_PATH: &str = "/recommendations";

/// A screen of the dashboard: pulls what it needs into the store, then renders from it.
#[async_trait::async_trait]
pub trait Page: Send + Sync {
    fn title(&self) -> &'static str;

    async fn load(&self, store: &Store) -> anyhow::Result<()>;

    fn render(&self, state: &StoreState) -> String;
}

type PageLoader = Box<dyn Fn() -> Arc<dyn Page> + Send + Sync>;

enum Component {
    Eager(Arc<dyn Page>),
    /// Built on first resolution, then reused.
    Lazy {
        loader: PageLoader,
        page: OnceLock<Arc<dyn Page>>,
    },
}

impl Component {
    fn page(&self) -> Arc<dyn Page> {
        match self {
            Component::Eager(page) => page.clone(),
            Component::Lazy { loader, page } => page.get_or_init(|| loader()).clone(),
        }
    }

    fn is_loaded(&self) -> bool {
        match self {
            Component::Eager(_) => true,
            Component::Lazy { page, .. } => page.get().is_some(),
        }
    }
}

struct RouteRecord {
    path: &'static str,
    name: &'static str,
    component: Component,
}

pub struct Resolved {
    pub name: &'static str,
    pub path: &'static str,
    pub page: Arc<dyn Page>,
}

/// Static path table. No parameters, guards or redirects.
#[derive(Default)]
pub struct Router {
    routes: Vec<RouteRecord>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &'static str, name: &'static str, page: Arc<dyn Page>) -> Self {
        self.routes.push(RouteRecord {
            path,
            name,
            component: Component::Eager(page),
        });
        self
    }

    pub fn lazy_route<F>(mut self, path: &'static str, name: &'static str, loader: F) -> Self
    where
        F: Fn() -> Arc<dyn Page> + Send + Sync + 'static,
    {
        self.routes.push(RouteRecord {
            path,
            name,
            component: Component::Lazy {
                loader: Box::new(loader),
                page: OnceLock::new(),
            },
        });
        self
    }

    pub fn resolve(&self, path: &str) -> Option<Resolved> {
        let path = normalize(path);
        let record = self.routes.iter().find(|r| r.path == path)?;
        tracing::debug!(path, name = record.name, "route resolved");
        Some(Resolved {
            name: record.name,
            path: record.path,
            page: record.component.page(),
        })
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.routes
            .iter()
            .any(|r| r.name == name && r.component.is_loaded())
    }

    /// `(path, name)` pairs in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.routes.iter().map(|r| (r.path, r.name))
    }
}

/// The dashboard's three screens; listings are built on demand.
pub fn dashboard_router<S, R>(dashboard: Arc<dyn Page>, stocks: S, recommendations: R) -> Router
where
    S: Fn() -> Arc<dyn Page> + Send + Sync + 'static,
    R: Fn() -> Arc<dyn Page> + Send + Sync + 'static,
{
    Router::new()
        .route(DASHBOARD_PATH, "dashboard", dashboard)
        .lazy_route(STOCKS_PATH, "stocks", stocks)
        .lazy_route(RECOMMENDATIONS_PATH, "recommendations", recommendations)
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        DASHBOARD_PATH
    } else {
        trimmed
    }
}
