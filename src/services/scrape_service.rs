use crate::config::Config;
use crate::errors::{Result, ScraperError};
use crate::models::financials::BatchResult;
use crate::scrapers::chrome::ChromeSession;
use crate::scrapers::nse::NseScraper;
use crate::sink;
use log::info;

/// 抓取服务，负责浏览器生命周期和结果持久化
pub struct ScrapeService {
    config: Config,
}

impl ScrapeService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 运行一个完整的抓取批次
    ///
    /// Launches the browser, bootstraps the session, scrapes every ticker in
    /// order, and closes the browser exactly once on every exit path. Browser
    /// launch and session bootstrap failures are batch-fatal.
    pub async fn run(&self, tickers: &[String]) -> Result<BatchResult> {
        if tickers.is_empty() {
            return Err(ScraperError::DataError("No tickers to scrape".to_string()));
        }

        let mut tickers = tickers.to_vec();
        if self.config.debug_mode && tickers.len() > self.config.debug_ticker_limit {
            let original_count = tickers.len();
            tickers.truncate(self.config.debug_ticker_limit);
            info!(
                "DEBUG MODE: Processing only {} out of {} tickers",
                tickers.len(),
                original_count
            );
        }

        let session = ChromeSession::launch().await?;
        let outcome = self.scrape_with_session(&session, &tickers).await;
        // 无论批次成功还是致命失败，浏览器都只关闭一次
        session.close().await;
        outcome
    }

    async fn scrape_with_session(
        &self,
        session: &ChromeSession,
        tickers: &[String],
    ) -> Result<BatchResult> {
        let page = session.new_page().await?;
        let scraper = NseScraper::new(self.config.clone());

        scraper.bootstrap_session(&page).await?;
        Ok(scraper.scrape_batch(&page, tickers).await)
    }

    /// 运行批次并将结果写入输出目录
    pub async fn run_and_persist(&self, tickers: &[String]) -> Result<BatchResult> {
        let batch = self.run(tickers).await?;
        sink::persist_batch(&batch, &self.config.output_dir)?;
        Ok(batch)
    }
}
