use reqwest::StatusCode;
use std::fmt;

/// The backend answered with a non-2xx status. The body is not inspected.
#[derive(Debug, Clone)]
pub struct ApiStatusError {
    pub status: StatusCode,
    pub endpoint: String,
}

impl fmt::Display for ApiStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API Error: {} {}",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("")
        )
    }
}

impl std::error::Error for ApiStatusError {}
