use crate::scrapers::base::NavigationWait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub homepage_url: String,
    pub quote_url_template: String,
    pub results_table_selector: String,
    pub user_agent: String,
    pub accept_language: String,
    pub wait_until: NavigationWait,
    pub session_settle: Duration,
    pub navigation_timeout: Duration,
    pub selector_timeout: Duration,
    pub capture_screenshots: bool,
    pub screenshot_dir: String,
    pub output_dir: String,
    pub debug_mode: bool,
    pub debug_ticker_limit: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            homepage_url: "https://www.nseindia.com".to_string(),
            quote_url_template: "https://www.nseindia.com/get-quotes/equity?symbol={symbol}"
                .to_string(),
            results_table_selector: "#topFinancialResultsTable".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/114.0.0.0 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            wait_until: NavigationWait::DomContentLoaded,
            // 等待会话Cookie写入的时间，站点没有明确的完成信号
            session_settle: Duration::from_millis(3000),
            navigation_timeout: Duration::from_secs(60),
            selector_timeout: Duration::from_secs(10),
            capture_screenshots: false,
            screenshot_dir: ".".to_string(),
            output_dir: ".".to_string(),
            debug_mode: false,
            debug_ticker_limit: 10,
        }
    }

    pub fn with_wait_until(mut self, wait: NavigationWait) -> Self {
        self.wait_until = wait;
        self
    }

    pub fn with_session_settle(mut self, settle: Duration) -> Self {
        self.session_settle = settle;
        self
    }

    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    pub fn with_selector_timeout(mut self, timeout: Duration) -> Self {
        self.selector_timeout = timeout;
        self
    }

    pub fn with_capture_screenshots(mut self, capture: bool) -> Self {
        self.capture_screenshots = capture;
        self
    }

    pub fn with_screenshot_dir(mut self, dir: &str) -> Self {
        self.screenshot_dir = dir.to_string();
        self
    }

    pub fn with_output_dir(mut self, dir: &str) -> Self {
        self.output_dir = dir.to_string();
        self
    }

    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    pub fn with_debug_ticker_limit(mut self, limit: usize) -> Self {
        self.debug_ticker_limit = limit;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
