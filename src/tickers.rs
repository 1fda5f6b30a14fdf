use crate::errors::{Result, ScraperError};
use calamine::{open_workbook_auto, DataType, Range, Reader};
use log::info;

/// 从电子表格指定列读取股票代码
///
/// Reads the first worksheet, locates `column` in the header row, and
/// returns the non-empty cells below it in row order.
pub fn read_tickers_from_excel(path: &str, column: &str) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ScraperError::DataError("Workbook has no worksheets".to_string()))?
        .map_err(|e| ScraperError::ExcelError(e))?;

    let tickers = tickers_from_range(&range, column, path)?;
    info!("Read {} tickers from {}", tickers.len(), path);
    Ok(tickers)
}

fn tickers_from_range(range: &Range<DataType>, column: &str, source: &str) -> Result<Vec<String>> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ScraperError::DataError("Worksheet is empty".to_string()))?;

    // 在表头行中查找代码列
    let col = header
        .iter()
        .position(|cell| cell.to_string().trim() == column)
        .ok_or_else(|| {
            ScraperError::DataError(format!("Column '{}' not found in {}", column, source))
        })?;

    let mut tickers = Vec::new();
    for row in rows {
        if let Some(cell) = row.get(col) {
            let symbol = cell.to_string().trim().to_string();
            if !symbol.is_empty() {
                tickers.push(symbol);
            }
        }
    }

    Ok(tickers)
}

/// 从命令行参数收集股票代码，支持逗号分隔
pub fn tickers_from_args<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(|symbol| symbol.trim().to_string())
        .filter(|symbol| !symbol.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(end: (u32, u32), cells: &[((u32, u32), &str)]) -> Range<DataType> {
        let mut range = Range::new((0, 0), end);
        for ((row, col), value) in cells {
            range.set_value((*row, *col), DataType::String(value.to_string()));
        }
        range
    }

    #[test]
    fn reads_symbol_column_in_row_order() {
        let range = sheet(
            (4, 1),
            &[
                ((0, 0), "Name"),
                ((0, 1), "Symbol"),
                ((1, 0), "Company A"),
                ((1, 1), "TICKERA"),
                ((2, 0), "Company B"),
                ((2, 1), " TICKERB "),
                // Company C的Symbol单元格为空
                ((3, 0), "Company C"),
                ((4, 0), "Company D"),
                ((4, 1), "TICKERD"),
            ],
        );

        let tickers = tickers_from_range(&range, "Symbol", "tickers.xlsx").unwrap();

        assert_eq!(tickers, vec!["TICKERA", "TICKERB", "TICKERD"]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let range = sheet((1, 0), &[((0, 0), "Name"), ((1, 0), "Company A")]);

        let err = tickers_from_range(&range, "Symbol", "tickers.xlsx").unwrap_err();

        assert!(matches!(err, ScraperError::DataError(_)));
        assert!(err.to_string().contains("Symbol"));
    }

    #[test]
    fn nonexistent_file_is_an_error() {
        assert!(read_tickers_from_excel("/nonexistent/tickers.xlsx", "Symbol").is_err());
    }

    #[test]
    fn collects_tickers_in_argument_order() {
        let tickers = tickers_from_args(["TICKERA", "TICKERB", "TICKERC"]);
        assert_eq!(tickers, vec!["TICKERA", "TICKERB", "TICKERC"]);
    }

    #[test]
    fn splits_comma_separated_values() {
        let tickers = tickers_from_args(["TICKERA,TICKERB", "TICKERC"]);
        assert_eq!(tickers, vec!["TICKERA", "TICKERB", "TICKERC"]);
    }

    #[test]
    fn drops_empty_values_and_trims() {
        let tickers = tickers_from_args([" TICKERA ", "", ",,", " "]);
        assert_eq!(tickers, vec!["TICKERA"]);
    }
}
