use serde::{Deserialize, Serialize};

/// 单只股票最新季度财报数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyRecord {
    pub ticker: String,
    pub quarter_ended: String,
    pub total_income: String,
    pub net_profit_loss: String,
    pub earnings_per_share: String,
}

/// 一次批量抓取的结果：成功的记录加上失败的股票代码
///
/// Every input ticker ends up in exactly one of the two sequences,
/// in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<QuarterlyRecord>,
    pub failed_tickers: Vec<String>,
}
