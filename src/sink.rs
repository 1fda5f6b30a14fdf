use crate::errors::Result;
use crate::models::financials::{BatchResult, QuarterlyRecord};
use log::{info, warn};
use std::fs;
use std::path::Path;

/// CSV固定列顺序
const CSV_COLUMNS: [&str; 5] = [
    "ticker",
    "quarter_ended",
    "total_income",
    "net_profit_loss",
    "earnings_per_share",
];

/// 将结果保存为JSON文件
pub fn save_results_json(results: &[QuarterlyRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json)?;
    Ok(())
}

/// 将结果保存为CSV文件，列顺序固定
pub fn save_results_csv(results: &[QuarterlyRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_COLUMNS)?;
    for record in results {
        writer.write_record([
            record.ticker.as_str(),
            record.quarter_ended.as_str(),
            record.total_income.as_str(),
            record.net_profit_loss.as_str(),
            record.earnings_per_share.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// 将失败的股票代码逐行写入日志文件
pub fn save_failed_tickers(failed: &[String], path: &Path) -> Result<()> {
    fs::write(path, failed.join("\n"))?;
    Ok(())
}

/// 持久化一次批量抓取的全部输出
///
/// Writes `output.json` and `output.csv` to the output directory, plus
/// `failed_tickers.log` when any ticker failed.
pub fn persist_batch(batch: &BatchResult, output_dir: &str) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    let dir = Path::new(output_dir);

    let json_path = dir.join("output.json");
    save_results_json(&batch.results, &json_path)?;
    info!(
        "Saved {} records to {}",
        batch.results.len(),
        json_path.display()
    );

    let csv_path = dir.join("output.csv");
    save_results_csv(&batch.results, &csv_path)?;
    info!("Saved output to {}", csv_path.display());

    if !batch.failed_tickers.is_empty() {
        let log_path = dir.join("failed_tickers.log");
        save_failed_tickers(&batch.failed_tickers, &log_path)?;
        warn!(
            "{} tickers failed to scrape, see {}",
            batch.failed_tickers.len(),
            log_path.display()
        );
    }

    Ok(())
}
