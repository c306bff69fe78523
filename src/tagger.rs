//! リストCSVへの型番列追加
//!
//! タイトル列から型番を判定し、`Model` 列を追加したCSVを書き出す。

use crate::error::{PriceExtractError, Result};
use crate::sheet;
use price_extract_common::RuleBook;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const MODEL_COLUMN: &str = "Model";
pub const UNKNOWN_MODEL: &str = "Unknown";

/// 出力先が未指定の場合のパス
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "listings".to_string());
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}_with_models.csv", stem))
}

/// 判定結果の件数（型番 → 件数）
#[derive(Debug, Clone, Default)]
pub struct TagResult {
    pub rows: usize,
    pub model_counts: HashMap<String, usize>,
}

impl TagResult {
    /// 件数の多い順
    pub fn distribution(&self) -> Vec<(&str, usize)> {
        let mut v: Vec<(&str, usize)> = self
            .model_counts
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        v
    }
}

/// CSVに型番列を追加して書き出す
///
/// 既に `Model` 列がある場合は上書きする。
pub fn tag_csv(input: &Path, output: &Path, title_column: &str, rules: &RuleBook) -> Result<TagResult> {
    let table = sheet::load_table(input)?;
    let title_idx = table
        .column_index(title_column)
        .ok_or_else(|| PriceExtractError::ColumnNotFound(title_column.to_string()))?;

    let mut headers = table.headers.clone();
    let model_idx = match table.column_index(MODEL_COLUMN) {
        Some(idx) => idx,
        None => {
            headers.push(MODEL_COLUMN.to_string());
            headers.len() - 1
        }
    };

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(&headers)?;

    let mut result = TagResult::default();
    for (row_idx, row) in table.rows.iter().enumerate() {
        let title = table.cell(row_idx, title_idx);
        let mut model = rules.match_model(title);
        if model.is_empty() {
            model = UNKNOWN_MODEL.to_string();
        }
        tracing::debug!(row = row_idx + 1, title, model = %model, "型番を判定");

        let mut cells: Vec<String> = row.clone();
        cells.resize(headers.len(), String::new());
        cells[model_idx] = model.clone();
        writer.write_record(&cells)?;

        *result.model_counts.entry(model).or_insert(0) += 1;
        result.rows += 1;
    }
    writer.flush()?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use price_extract_common::default_rules;

    #[test]
    fn test_tag_csv_adds_model_column() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("listings.csv");
        let output = dir.path().join("tagged.csv");
        std::fs::write(
            &input,
            "Title,Price\niPhone 14 Pro 256GB,$700\nMystery gadget,$20\nGalaxy Z Flip 5,$500\n",
        )
        .unwrap();

        let result = tag_csv(&input, &output, "Title", default_rules()).unwrap();
        assert_eq!(result.rows, 3);
        assert_eq!(result.model_counts.get(UNKNOWN_MODEL), Some(&1));

        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Title,Price,Model");
        assert_eq!(lines[1], "iPhone 14 Pro 256GB,$700,iPhone 14 Pro");
        assert_eq!(lines[2], "Mystery gadget,$20,Unknown");
        assert_eq!(lines[3], "Galaxy Z Flip 5,$500,Galaxy Z Flip 5");
    }

    #[test]
    fn test_tag_csv_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("listings.csv");
        std::fs::write(&input, "Name\nfoo\n").unwrap();

        let result = tag_csv(&input, &dir.path().join("out.csv"), "Title", default_rules());
        assert!(matches!(result, Err(PriceExtractError::ColumnNotFound(_))));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("public/191_listings.csv")),
            PathBuf::from("public/191_listings_with_models.csv")
        );
    }
}
