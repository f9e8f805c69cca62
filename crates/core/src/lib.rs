pub mod api;
pub mod domain;
pub mod router;
pub mod store;

pub mod config {
    pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_base_url: String,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let api_base_url = std::env::var("STOCKDASH_API_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

            Ok(Self {
                api_base_url,
                sentry_dsn: std::env::var("SENTRY_DSN")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            })
        }

        pub fn with_api_base_url(mut self, url: Option<String>) -> Self {
            if let Some(url) = url.filter(|s| !s.trim().is_empty()) {
                self.api_base_url = url;
            }
            self
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn flag_overrides_env_base_url() {
            let settings = Settings {
                api_base_url: DEFAULT_API_BASE_URL.to_string(),
                sentry_dsn: None,
            };
            let settings = settings.with_api_base_url(Some("http://api.internal:9000/v1".into()));
            assert_eq!(settings.api_base_url, "http://api.internal:9000/v1");

            let settings = settings.with_api_base_url(Some("  ".into()));
            assert_eq!(settings.api_base_url, "http://api.internal:9000/v1");
        }
    }
}
