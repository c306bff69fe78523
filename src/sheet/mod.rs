//! 入力テーブルの読み込み
//!
//! スプレッドシート（calamine）またはCSVを読み込み、先頭行をヘッダーとした
//! 文字列テーブルにする。

mod delimited;
mod workbook;

use crate::error::{PriceExtractError, Result};
use std::path::Path;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// ヘッダーつき文字列テーブル
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// ヘッダー行と行データから作成（空のヘッダーは "Unnamed: N" にする）
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| {
                let h = h.trim();
                if h.is_empty() {
                    format!("Unnamed: {}", i)
                } else {
                    h.to_string()
                }
            })
            .collect();
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// セルの値（範囲外は空文字列）
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// 列の全セル（上から順）
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        (0..self.rows.len()).map(move |row| self.cell(row, column))
    }

    /// 列名から列番号を取得
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// 入力ファイルの拡張子が対応形式か
pub fn is_supported(path: &Path) -> bool {
    match extension_of(path) {
        Some(ext) => ext == "csv" || WORKBOOK_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

/// 拡張子に応じてテーブルを読み込む
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(PriceExtractError::FileNotFound(path.display().to_string()));
    }

    match extension_of(path).as_deref() {
        Some("csv") => delimited::read_csv(path),
        Some(ext) if WORKBOOK_EXTENSIONS.contains(&ext) => workbook::read_first_sheet(path),
        _ => Err(PriceExtractError::UnsupportedInput(path.display().to_string())),
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}
