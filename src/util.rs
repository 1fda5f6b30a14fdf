use std::path::{Path, PathBuf};

/// 去除单元格文本首尾空白
pub fn clean_cell(text: &str) -> String {
    text.trim().to_string()
}

/// 单只股票的调试截图路径
pub fn screenshot_path(dir: &str, ticker: &str) -> PathBuf {
    Path::new(dir).join(format!("screenshot-{}.png", ticker))
}
