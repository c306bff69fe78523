//! セル単位の価格データ抽出
//!
//! 列ごと・行ごとに元の並び順でセルを走査し、分類器を通したレコードを集める。

use crate::config::Config;
use crate::error::Result;
use crate::sheet::Table;
use indicatif::{ProgressBar, ProgressStyle};
use price_extract_common::{default_rules, ExtractedRecord, RuleBook};
use std::borrow::Cow;
use std::path::Path;

pub use price_extract_common::{Classifier, FilterPolicy};

/// ルールブックを用意（指定がなければ組み込みルール）
pub fn load_rules(rules_path: Option<&Path>) -> Result<Cow<'static, RuleBook>> {
    match rules_path {
        Some(path) => {
            if !path.exists() {
                return Err(crate::error::PriceExtractError::FileNotFound(
                    path.display().to_string(),
                ));
            }
            let book = RuleBook::from_file(path).map_err(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ルールテーブルを読み込めません");
                e
            })?;
            tracing::info!(path = %path.display(), version = book.version, "カスタムルールを読み込み");
            Ok(Cow::Owned(book))
        }
        None => Ok(Cow::Borrowed(default_rules())),
    }
}

/// CLI引数と設定からルールファイルを決定
pub fn resolve_rules_path<'a>(cli_rules: Option<&'a Path>, config: &'a Config) -> Option<&'a Path> {
    cli_rules.or(config.rules_path.as_deref())
}

/// テーブル全体を分類する
pub fn extract_records(table: &Table, classifier: &Classifier) -> Vec<ExtractedRecord> {
    extract_with_progress(table, classifier, None)
}

/// 列単位の進捗バーつきで分類する
pub fn extract_with_progress(
    table: &Table,
    classifier: &Classifier,
    progress: Option<&ProgressBar>,
) -> Vec<ExtractedRecord> {
    let mut records = Vec::new();

    for (column_idx, column) in table.headers.iter().enumerate() {
        if let Some(pb) = progress {
            pb.set_message(column.clone());
        }
        tracing::debug!(column = %column, "列を処理中");

        for (row_idx, text) in table.column_values(column_idx).enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            if let Some(record) = classifier.classify(text, row_idx + 1, column) {
                records.push(record);
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    records
}

/// 列数ぶんの進捗バーを作成
pub fn column_progress(columns: usize) -> ProgressBar {
    let pb = ProgressBar::new(columns as u64);
    let style = ProgressStyle::with_template("  {bar:30} {pos}/{len}列 {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}
