use crate::errors::{Result, ScraperError};
use crate::scrapers::base::{NavigationWait, PageDriver};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{Headers, SetExtraHttpHeadersParams};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use log::{debug, warn};
use serde_json::Value;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

// 没有原生的networkidle信号，退化为导航完成后的固定静默窗口
const NETWORK_IDLE_WINDOW: Duration = Duration::from_millis(1000);
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chromium会话，持有浏览器进程和CDP事件处理任务
pub struct ChromeSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl ChromeSession {
    /// 启动无头Chromium，失败视为批次级致命错误
    pub async fn launch() -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-notifications");

        if let Some(path) = find_chromium() {
            debug!("Using browser executable at {}", path);
            builder = builder.chrome_executable(path);
        }

        let config = builder.build().map_err(ScraperError::Unknown)?;
        let (browser, mut handler) = Browser::launch(config).await?;

        // CDP事件循环，浏览器关闭后自行结束
        let handler_task = tokio::task::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// 打开一个新的标签页
    pub async fn new_page(&self) -> Result<ChromePage> {
        let page = self.browser.new_page("about:blank").await?;
        Ok(ChromePage { page })
    }

    /// 关闭浏览器，调用方保证在所有退出路径上恰好调用一次
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Browser process did not exit cleanly: {}", e);
        }
        self.handler_task.abort();
    }
}

/// [`PageDriver`] backed by a real Chromium tab
pub struct ChromePage {
    page: Page,
}

#[async_trait]
impl PageDriver for ChromePage {
    async fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        self.page.set_user_agent(user_agent).await?;
        Ok(())
    }

    async fn set_extra_headers(&self, headers: &[(&str, &str)]) -> Result<()> {
        let mut map = serde_json::Map::new();
        for (name, value) in headers {
            map.insert(name.to_string(), Value::String(value.to_string()));
        }
        self.page
            .execute(SetExtraHttpHeadersParams::new(Headers::new(Value::Object(
                map,
            ))))
            .await?;
        Ok(())
    }

    async fn navigate(&self, url: &str, wait: NavigationWait, timeout: Duration) -> Result<()> {
        let navigation = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            if wait == NavigationWait::NetworkIdle {
                tokio::time::sleep(NETWORK_IDLE_WINDOW).await;
            }
            Ok::<(), ScraperError>(())
        };

        tokio::time::timeout(timeout, navigation)
            .await
            .map_err(|_| {
                ScraperError::TimeoutError(format!("Navigation to {} timed out", url))
            })??;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let expression = format!(
            "document.querySelector({}) !== null",
            serde_json::to_string(selector)?
        );
        let deadline = Instant::now() + timeout;

        loop {
            let found: bool = self
                .page
                .evaluate(expression.as_str())
                .await?
                .into_value()?;
            if found {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ScraperError::TimeoutError(format!(
                    "Selector {} did not appear within {:?}",
                    selector, timeout
                )));
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn evaluate(&self, expression: &str) -> Result<Option<Value>> {
        let result = self.page.evaluate(expression).await?;
        Ok(result.value().cloned().filter(|v| !v.is_null()))
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        self.page
            .save_screenshot(ScreenshotParams::builder().full_page(true).build(), path)
            .await?;
        Ok(())
    }
}

/// 在常见安装路径中查找Chromium可执行文件
fn find_chromium() -> Option<String> {
    let candidates = [
        "/usr/bin/chromium-browser",
        "/usr/bin/chromium",
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/snap/bin/chromium",
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
    ];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }
    None
}
