use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Browser error: {0}")]
    BrowserError(#[from] chromiumoxide::error::CdpError),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Excel parsing error: {0}")]
    ExcelError(#[from] calamine::Error),

    #[error("Timeout: {0}")]
    TimeoutError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, ScraperError>;

// 用于从字符串创建错误
impl From<String> for ScraperError {
    fn from(s: String) -> Self {
        ScraperError::Unknown(s)
    }
}

// 用于从&str创建错误
impl From<&str> for ScraperError {
    fn from(s: &str) -> Self {
        ScraperError::Unknown(s.to_string())
    }
}
