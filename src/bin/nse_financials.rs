use nse_financials::config::Config;
use nse_financials::models::financials::QuarterlyRecord;
use nse_financials::scrapers::base::NavigationWait;
use nse_financials::services::scrape_service::ScrapeService;
use nse_financials::tickers;

use clap::{App, Arg, SubCommand};
use log::{error, info, warn};
use std::error::Error;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // 创建基本的命令行应用
    let app = App::new("NseFinancials")
        .version("0.1.0")
        .about("NSE quarterly financial results scraper");

    // 在开发模式下添加调试参数
    #[cfg(debug_assertions)]
    let app = app
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Enable debug mode")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("debug-limit")
                .long("debug-limit")
                .help("Limit the number of tickers to process in debug mode")
                .takes_value(true)
                .default_value("2"),
        );

    // 添加子命令
    let app = app
        .subcommand(
            SubCommand::with_name("scrape")
                .about("Scrape the latest quarterly results for the given tickers")
                .arg(
                    Arg::with_name("tickers")
                        .value_name("TICKER")
                        .help("Ticker symbols (comma-separated lists accepted)")
                        .multiple(true),
                )
                .arg(
                    Arg::with_name("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .help("Read tickers from a spreadsheet instead of the command line")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("column")
                        .long("column")
                        .value_name("COLUMN")
                        .help("Spreadsheet column holding the ticker symbols")
                        .takes_value(true)
                        .default_value("Symbol"),
                )
                .arg(
                    Arg::with_name("output-dir")
                        .short('o')
                        .long("output-dir")
                        .value_name("DIR")
                        .help("Directory to write output.json, output.csv and failed_tickers.log")
                        .takes_value(true)
                        .default_value("."),
                )
                .arg(
                    Arg::with_name("settle-ms")
                        .long("settle-ms")
                        .value_name("MILLIS")
                        .help("Delay after the homepage loads, to let session cookies settle")
                        .takes_value(true)
                        .default_value("3000"),
                )
                .arg(
                    Arg::with_name("nav-timeout")
                        .long("nav-timeout")
                        .value_name("SECONDS")
                        .help("Per-navigation timeout")
                        .takes_value(true)
                        .default_value("60"),
                )
                .arg(
                    Arg::with_name("selector-timeout")
                        .long("selector-timeout")
                        .value_name("SECONDS")
                        .help("Timeout waiting for the results table to appear")
                        .takes_value(true)
                        .default_value("10"),
                )
                .arg(
                    Arg::with_name("wait-until")
                        .long("wait-until")
                        .value_name("CONDITION")
                        .help("Page-load condition (domcontentloaded, networkidle)")
                        .takes_value(true)
                        .default_value("domcontentloaded"),
                )
                .arg(
                    Arg::with_name("screenshots")
                        .long("screenshots")
                        .help("Capture a diagnostic screenshot after each navigation")
                        .takes_value(false),
                )
                .arg(
                    Arg::with_name("screenshot-dir")
                        .long("screenshot-dir")
                        .value_name("DIR")
                        .help("Directory to write diagnostic screenshots to")
                        .takes_value(true)
                        .default_value("."),
                ),
        )
        .subcommand(
            SubCommand::with_name("explore")
                .about("Explore previously scraped results")
                .arg(
                    Arg::with_name("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .help("Results file to read")
                        .takes_value(true)
                        .default_value("output.json"),
                )
                .arg(
                    Arg::with_name("symbol")
                        .short('s')
                        .long("symbol")
                        .value_name("SYMBOL")
                        .help("Ticker symbol to filter by")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("limit")
                        .short('l')
                        .long("limit")
                        .value_name("LIMIT")
                        .help("Limit the number of records to display")
                        .takes_value(true)
                        .default_value("10"),
                ),
        );

    let matches = app.get_matches();

    // 获取调试模式设置
    #[cfg(debug_assertions)]
    let debug_mode = matches.is_present("debug");
    #[cfg(not(debug_assertions))]
    let debug_mode = false;

    #[cfg(debug_assertions)]
    let debug_ticker_limit = matches
        .value_of("debug-limit")
        .unwrap_or("2")
        .parse::<usize>()
        .unwrap_or(2);
    #[cfg(not(debug_assertions))]
    let debug_ticker_limit = usize::MAX;

    if let Some(matches) = matches.subcommand_matches("scrape") {
        // 读取股票代码：电子表格优先，否则取命令行参数
        let tickers = if let Some(file) = matches.value_of("file") {
            let column = matches.value_of("column").unwrap();
            tickers::read_tickers_from_excel(file, column)?
        } else {
            tickers::tickers_from_args(matches.values_of("tickers").into_iter().flatten())
        };

        if tickers.is_empty() {
            error!("No tickers found. Provide ticker symbols or a spreadsheet with --file.");
            return Err("no tickers found".into());
        }

        let settle_ms = matches
            .value_of("settle-ms")
            .unwrap_or("3000")
            .parse::<u64>()
            .unwrap_or(3000);
        let nav_timeout = matches
            .value_of("nav-timeout")
            .unwrap_or("60")
            .parse::<u64>()
            .unwrap_or(60);
        let selector_timeout = matches
            .value_of("selector-timeout")
            .unwrap_or("10")
            .parse::<u64>()
            .unwrap_or(10);
        let wait_until = matches
            .value_of("wait-until")
            .unwrap_or("domcontentloaded")
            .parse::<NavigationWait>()?;

        // 创建配置
        let config = Config::new()
            .with_wait_until(wait_until)
            .with_session_settle(Duration::from_millis(settle_ms))
            .with_navigation_timeout(Duration::from_secs(nav_timeout))
            .with_selector_timeout(Duration::from_secs(selector_timeout))
            .with_capture_screenshots(matches.is_present("screenshots"))
            .with_screenshot_dir(matches.value_of("screenshot-dir").unwrap())
            .with_output_dir(matches.value_of("output-dir").unwrap())
            .with_debug_mode(debug_mode)
            .with_debug_ticker_limit(debug_ticker_limit);

        info!("Scraping {} tickers", tickers.len());

        let service = ScrapeService::new(config);
        let batch = service.run_and_persist(&tickers).await?;

        if !batch.failed_tickers.is_empty() {
            warn!(
                "Finished with {} failed tickers: {}",
                batch.failed_tickers.len(),
                batch.failed_tickers.join(", ")
            );
        }
    } else if let Some(matches) = matches.subcommand_matches("explore") {
        let file = matches.value_of("file").unwrap();
        let symbol_filter = matches.value_of("symbol");
        let limit = matches
            .value_of("limit")
            .unwrap_or("10")
            .parse::<usize>()
            .unwrap_or(10);

        // 读取数据
        let json = std::fs::read_to_string(file)?;
        let records: Vec<QuarterlyRecord> = serde_json::from_str(&json)?;

        info!("Found {} records in {}", records.len(), file);

        // 过滤数据
        let filtered: Vec<&QuarterlyRecord> = records
            .iter()
            .filter(|r| {
                if let Some(symbol) = symbol_filter {
                    if !r.ticker.contains(symbol) {
                        return false;
                    }
                }
                true
            })
            .collect();

        // 显示结果
        info!(
            "{:<15} {:<15} {:<15} {:<18} {:<10}",
            "Ticker", "Quarter", "Total Income", "Net Profit/Loss", "EPS"
        );
        info!("{:-<75}", "");
        for record in filtered.iter().take(limit) {
            info!(
                "{:<15} {:<15} {:<15} {:<18} {:<10}",
                record.ticker,
                record.quarter_ended,
                record.total_income,
                record.net_profit_loss,
                record.earnings_per_share
            );
        }

        if filtered.len() > limit {
            info!("... and {} more records", filtered.len() - limit);
        }
    } else {
        info!("No command specified. Use --help for usage information.");
    }

    Ok(())
}
