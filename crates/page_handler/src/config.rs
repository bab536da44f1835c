//! Runtime configuration for browsing sessions.
//!
//! Values can be built explicitly or read from `LUMEN_*` environment
//! variables; unparsable values fall back to their defaults.

use core::time::Duration;
use layouter::Viewport;
use net::HttpClient;
use std::env;

pub const DEFAULT_VIEWPORT_WIDTH: i32 = 1000;
pub const DEFAULT_VIEWPORT_HEIGHT: i32 = 700;
pub const DEFAULT_MAX_REDIRECTS: u8 = 8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 12;
pub const DEFAULT_HOME_URL: &str = "https://example.com";

/// Configuration shared by every tab of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Viewport width in pixels.
    pub viewport_width: i32,
    /// Viewport height in pixels.
    pub viewport_height: i32,
    /// Redirect hops followed before the last response is returned as is.
    pub max_redirects: u8,
    /// Connect/read/write timeout in seconds, at least 1.
    pub timeout_secs: u64,
    /// Page opened when the last tab of a session closes.
    pub home_url: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_VIEWPORT_WIDTH,
            DEFAULT_VIEWPORT_HEIGHT,
            DEFAULT_MAX_REDIRECTS,
            DEFAULT_TIMEOUT_SECS,
            DEFAULT_HOME_URL,
        )
    }
}

impl BrowserConfig {
    /// Construct a configuration with explicit values.
    ///
    /// The viewport is kept at least one pixel in each direction and the
    /// timeout at least one second.
    #[inline]
    #[must_use]
    pub fn new(
        viewport_width: i32,
        viewport_height: i32,
        max_redirects: u8,
        timeout_secs: u64,
        home_url: impl Into<String>,
    ) -> Self {
        Self {
            viewport_width: viewport_width.max(1),
            viewport_height: viewport_height.max(1),
            max_redirects,
            timeout_secs: timeout_secs.max(1),
            home_url: home_url.into(),
        }
    }

    /// Load configuration from the process environment.
    ///
    /// Reads the following environment variables:
    /// - `LUMEN_VIEWPORT_WIDTH`: viewport width (default: 1000)
    /// - `LUMEN_VIEWPORT_HEIGHT`: viewport height (default: 700)
    /// - `LUMEN_MAX_REDIRECTS`: redirect budget (default: 8)
    /// - `LUMEN_TIMEOUT_SECS`: network timeout (default: 12, minimum 1)
    /// - `LUMEN_HOME_URL`: page reopened when the last tab closes
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`BrowserConfig::from_env`] but reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|val| val.trim().parse::<i64>().ok());
        let viewport_width = parsed("LUMEN_VIEWPORT_WIDTH")
            .and_then(|val| i32::try_from(val).ok())
            .unwrap_or(DEFAULT_VIEWPORT_WIDTH);
        let viewport_height = parsed("LUMEN_VIEWPORT_HEIGHT")
            .and_then(|val| i32::try_from(val).ok())
            .unwrap_or(DEFAULT_VIEWPORT_HEIGHT);
        let max_redirects = parsed("LUMEN_MAX_REDIRECTS")
            .and_then(|val| u8::try_from(val).ok())
            .unwrap_or(DEFAULT_MAX_REDIRECTS);
        let timeout_secs = parsed("LUMEN_TIMEOUT_SECS")
            .and_then(|val| u64::try_from(val).ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let home_url = lookup("LUMEN_HOME_URL")
            .map(|val| val.trim().to_owned())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_HOME_URL.to_owned());
        Self::new(
            viewport_width,
            viewport_height,
            max_redirects,
            timeout_secs,
            home_url,
        )
    }

    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    #[inline]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// An HTTP client honouring the timeout and redirect budget.
    #[must_use]
    pub fn http_client(&self) -> HttpClient {
        HttpClient::new()
            .with_timeout(self.timeout())
            .with_max_redirects(self.max_redirects)
    }
}
