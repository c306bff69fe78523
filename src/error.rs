use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceExtractError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない入力形式です: {0}（xlsx/xlsm/xlsb/xls/ods/csv）")]
    UnsupportedInput(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    SheetRead(String),

    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] price_extract_common::Error),
}

pub type Result<T> = std::result::Result<T, PriceExtractError>;
