//! スプレッドシートの概要表示
//!
//! 行数・列数・列ごとの型と欠損・サンプル行・数値列の統計・
//! 列名から推測される内容（価格・日付・所在地・商品）を表示する。

use crate::error::Result;
use crate::sheet::{self, Table};
use std::path::Path;

const PRICE_HINTS: &[&str] = &["price", "cost", "amount", "$", "fee"];
const DATE_HINTS: &[&str] = &["date", "time", "created", "updated"];
const LOCATION_HINTS: &[&str] = &["city", "state", "address", "location", "zip"];
const PRODUCT_HINTS: &[&str] = &["product", "item", "name", "title", "description"];

/// 一意値を列挙する上限
const MAX_LISTED_UNIQUE: usize = 10;
/// 一意値集計の対象とする文字列列の数
const MAX_TEXT_COLUMNS: usize = 5;
/// サンプル表示の最大列数
const MAX_SAMPLE_COLUMNS: usize = 8;

/// 列の推定型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
    Empty,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "数値"),
            ColumnKind::Text => write!(f, "文字列"),
            ColumnKind::Empty => write!(f, "空"),
        }
    }
}

/// 数値列の統計
#[derive(Debug, Clone, PartialEq)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// 列ごとの情報
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub non_empty: usize,
    pub missing: usize,
    pub numeric: Option<NumericStats>,
    /// (値, 件数)。出現順
    pub value_counts: Vec<(String, usize)>,
}

/// 概要
#[derive(Debug, Clone)]
pub struct InspectReport {
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
    pub price_columns: Vec<String>,
    pub date_columns: Vec<String>,
    pub location_columns: Vec<String>,
    pub product_columns: Vec<String>,
}

impl InspectReport {
    pub fn from_table(table: &Table) -> Self {
        let columns: Vec<ColumnProfile> = table
            .headers
            .iter()
            .enumerate()
            .map(|(i, name)| profile_column(table, i, name))
            .collect();

        Self {
            rows: table.row_count(),
            price_columns: hinted(&table.headers, PRICE_HINTS),
            date_columns: hinted(&table.headers, DATE_HINTS),
            location_columns: hinted(&table.headers, LOCATION_HINTS),
            product_columns: hinted(&table.headers, PRODUCT_HINTS),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }
}

fn profile_column(table: &Table, index: usize, name: &str) -> ColumnProfile {
    let values: Vec<&str> = table
        .column_values(index)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();

    let numbers: Vec<f64> = values.iter().filter_map(|v| v.parse::<f64>().ok()).collect();
    let kind = if values.is_empty() {
        ColumnKind::Empty
    } else if numbers.len() == values.len() {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    };

    let numeric = (kind == ColumnKind::Numeric).then(|| NumericStats {
        min: numbers.iter().copied().fold(f64::INFINITY, f64::min),
        max: numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        mean: numbers.iter().sum::<f64>() / numbers.len() as f64,
    });

    let mut value_counts: Vec<(String, usize)> = Vec::new();
    for value in &values {
        match value_counts.iter_mut().find(|(v, _)| v == value) {
            Some((_, count)) => *count += 1,
            None => value_counts.push((value.to_string(), 1)),
        }
    }

    ColumnProfile {
        name: name.to_string(),
        kind,
        non_empty: values.len(),
        missing: table.row_count() - values.len(),
        numeric,
        value_counts,
    }
}

fn hinted(headers: &[String], hints: &[&str]) -> Vec<String> {
    headers
        .iter()
        .filter(|h| {
            let lower = h.to_lowercase();
            hints.iter().any(|k| lower.contains(k))
        })
        .cloned()
        .collect()
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut s: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        s.push('…');
        s
    } else {
        text.to_string()
    }
}

/// ファイルを読み込んで概要を表示
pub fn run_inspect(path: &Path, sample_rows: usize) -> Result<InspectReport> {
    let table = sheet::load_table(path)?;
    let file_size = std::fs::metadata(path)?.len();
    let report = InspectReport::from_table(&table);

    println!("📋 ファイル情報:");
    println!("  行数: {}", report.rows);
    println!("  列数: {}", report.columns.len());
    println!("  ファイルサイズ: {} bytes", file_size);

    println!("\n📝 列情報:");
    for (i, col) in report.columns.iter().enumerate() {
        println!(
            "  {:2}. {:<30} | 型: {:<6} | 値あり: {:3}/{}",
            i + 1,
            clip(&col.name, 30),
            col.kind,
            col.non_empty,
            report.rows
        );
    }

    println!("\n🔍 サンプル（先頭{}行）:", sample_rows);
    let shown = table.column_count().min(MAX_SAMPLE_COLUMNS);
    let header: Vec<String> = table.headers.iter().take(shown).map(|h| clip(h, 20)).collect();
    println!("  {}", header.join(" | "));
    for row in 0..table.row_count().min(sample_rows) {
        let cells: Vec<String> = (0..shown).map(|c| clip(table.cell(row, c), 20)).collect();
        println!("  {}", cells.join(" | "));
    }

    println!("\n📈 欠損値:");
    let missing: Vec<&ColumnProfile> = report.columns.iter().filter(|c| c.missing > 0).collect();
    if missing.is_empty() {
        println!("  ✔ 欠損値はありません");
    } else {
        for col in missing {
            let pct = col.missing as f64 / report.rows.max(1) as f64 * 100.0;
            println!("  {:<30}: {:3} ({:5.1}%)", clip(&col.name, 30), col.missing, pct);
        }
    }

    let numeric: Vec<&ColumnProfile> = report.columns.iter().filter(|c| c.numeric.is_some()).collect();
    if !numeric.is_empty() {
        println!("\n🔢 数値列:");
        for col in numeric {
            if let Some(stats) = &col.numeric {
                println!(
                    "  {:<30}: 最小={} 最大={} 平均={:.2}",
                    clip(&col.name, 30),
                    stats.min,
                    stats.max,
                    stats.mean
                );
            }
        }
    }

    let text_columns: Vec<&ColumnProfile> = report
        .columns
        .iter()
        .filter(|c| c.kind == ColumnKind::Text)
        .take(MAX_TEXT_COLUMNS)
        .collect();
    if !text_columns.is_empty() {
        println!("\n📝 文字列列:");
        for col in text_columns {
            println!("  {:<30}: {}種類", clip(&col.name, 30), col.value_counts.len());
            if col.value_counts.len() <= MAX_LISTED_UNIQUE {
                for (value, count) in &col.value_counts {
                    println!("    - {:<40}: {}件", clip(value, 40), count);
                }
            }
        }
    }

    println!("\n💡 列名からの推測:");
    for (label, cols) in [
        ("💰 価格", &report.price_columns),
        ("📅 日付", &report.date_columns),
        ("📍 所在地", &report.location_columns),
        ("📦 商品", &report.product_columns),
    ] {
        if !cols.is_empty() {
            println!("  {}: {}", label, cols.join(", "));
        }
    }

    Ok(report)
}
