use crate::config::Config;
use crate::errors::{Result, ScraperError};
use crate::models::financials::{BatchResult, QuarterlyRecord};
use crate::scrapers::base::PageDriver;
use crate::util;
use log::{debug, info, warn};
use serde::Deserialize;

/// NSE季度财报抓取器
///
/// Drives a [`PageDriver`] through one batch: establish the session on the
/// homepage, then visit each ticker's quote page and read the latest row of
/// the financial results table.
pub struct NseScraper {
    config: Config,
}

/// 结果表第一行的原始单元格文本，缺列时反序列化失败
#[derive(Debug, Deserialize)]
struct RawRow {
    quarter_ended: String,
    total_income: String,
    net_profit_loss: String,
    earnings_per_share: String,
}

impl NseScraper {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 访问站点首页建立会话
    ///
    /// NSE sets session cookies asynchronously after the homepage loads, so
    /// this waits a configurable settle delay with no completion signal to
    /// key off. Any error here aborts the whole batch.
    pub async fn bootstrap_session(&self, page: &dyn PageDriver) -> Result<()> {
        page.set_user_agent(&self.config.user_agent).await?;
        page.set_extra_headers(&[("accept-language", self.config.accept_language.as_str())])
            .await?;

        info!("Establishing session at {}", self.config.homepage_url);
        page.navigate(
            &self.config.homepage_url,
            self.config.wait_until,
            self.config.navigation_timeout,
        )
        .await?;

        // 等待会话Cookie写入
        tokio::time::sleep(self.config.session_settle).await;
        Ok(())
    }

    /// 抓取单只股票的最新季度数据
    ///
    /// 所有错误都在这里捕获并记录，失败只影响这一只股票
    pub async fn fetch_latest_quarter(
        &self,
        page: &dyn PageDriver,
        ticker: &str,
    ) -> Option<QuarterlyRecord> {
        match self.try_fetch(page, ticker).await {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Failed to scrape {}: {}", ticker, e);
                None
            }
        }
    }

    async fn try_fetch(&self, page: &dyn PageDriver, ticker: &str) -> Result<QuarterlyRecord> {
        let url = self.config.quote_url_template.replace("{symbol}", ticker);
        debug!("Navigating to {}", url);
        page.navigate(&url, self.config.wait_until, self.config.navigation_timeout)
            .await?;

        if self.config.capture_screenshots {
            // 截图仅用于排查页面加载问题，失败不影响抓取结果
            let path = util::screenshot_path(&self.config.screenshot_dir, ticker);
            if let Err(e) = page.screenshot(&path).await {
                warn!("Failed to capture screenshot for {}: {}", ticker, e);
            }
        }

        page.wait_for_selector(
            &self.config.results_table_selector,
            self.config.selector_timeout,
        )
        .await?;

        let value = page
            .evaluate(&self.extractor_js()?)
            .await?
            .ok_or_else(|| {
                ScraperError::DataError(format!("No financial data found for ticker {}", ticker))
            })?;
        let row: RawRow = serde_json::from_value(value)?;

        Ok(QuarterlyRecord {
            ticker: ticker.to_string(),
            quarter_ended: util::clean_cell(&row.quarter_ended),
            total_income: util::clean_cell(&row.total_income),
            net_profit_loss: util::clean_cell(&row.net_profit_loss),
            earnings_per_share: util::clean_cell(&row.earnings_per_share),
        })
    }

    /// 批量抓取：严格按输入顺序逐只处理，单只失败不中断批次
    pub async fn scrape_batch(&self, page: &dyn PageDriver, tickers: &[String]) -> BatchResult {
        let mut batch = BatchResult::default();

        for ticker in tickers {
            info!("Scraping ticker: {}", ticker);
            match self.fetch_latest_quarter(page, ticker).await {
                Some(record) => {
                    info!("Successfully scraped {}", ticker);
                    batch.results.push(record);
                }
                None => batch.failed_tickers.push(ticker.clone()),
            }
        }

        info!(
            "Batch finished: {} scraped, {} failed out of {} tickers",
            batch.results.len(),
            batch.failed_tickers.len(),
            tickers.len()
        );
        batch
    }

    /// 提取结果表第一行的JS表达式
    ///
    /// Returns null when the table or its first body row is missing, or the
    /// row has fewer than four cells; no partial record is produced.
    fn extractor_js(&self) -> Result<String> {
        let selector = serde_json::to_string(&self.config.results_table_selector)?;
        Ok(format!(
            r#"(function() {{
  const table = document.querySelector({selector});
  if (!table) return null;

  const firstRow = table.querySelector('tbody tr');
  if (!firstRow) return null;

  const cells = firstRow.querySelectorAll('td');
  if (cells.length < 4) return null;

  return {{
    quarter_ended: cells[0].innerText,
    total_income: cells[1].innerText,
    net_profit_loss: cells[2].innerText,
    earnings_per_share: cells[3].innerText,
  }};
}})()"#,
            selector = selector
        ))
    }
}
