use crate::errors::{Result, ScraperError};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Page-load condition a navigation waits for before returning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationWait {
    /// DOM解析完成即可返回
    DomContentLoaded,
    /// 等待网络请求基本停止
    NetworkIdle,
}

impl FromStr for NavigationWait {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "domcontentloaded" => Ok(NavigationWait::DomContentLoaded),
            "networkidle" => Ok(NavigationWait::NetworkIdle),
            other => Err(ScraperError::DataError(format!(
                "Unknown wait condition: {}",
                other
            ))),
        }
    }
}

/// Browsing capability used by the scrapers
///
/// Abstracts one browser tab so the scraping logic can run against a real
/// Chromium page or a fixture in tests.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Override the page's user agent string
    async fn set_user_agent(&self, user_agent: &str) -> Result<()>;

    /// Attach extra HTTP headers to every request from this page
    async fn set_extra_headers(&self, headers: &[(&str, &str)]) -> Result<()>;

    /// Navigate to the given URL, bounded by `timeout`
    async fn navigate(&self, url: &str, wait: NavigationWait, timeout: Duration) -> Result<()>;

    /// Wait until an element matching `selector` exists, bounded by `timeout`
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Run a JS expression in the page, returning its JSON value
    /// (`None` when the expression evaluates to null/undefined)
    async fn evaluate(&self, expression: &str) -> Result<Option<Value>>;

    /// Capture a full-page screenshot to `path`
    async fn screenshot(&self, path: &Path) -> Result<()>;
}
