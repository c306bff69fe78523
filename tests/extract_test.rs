//! 抽出パイプラインの統合テスト
//!
//! 実際の xlsx / csv を作成し、読み込みから出力までを検証

use price_extract::cli::ExportFormat;
use price_extract::{export, extract, sheet};
use price_extract_common::{sort_for_report, Summary};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;

fn write_xlsx(path: &Path, headers: &[&str], rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32 + 1, col as u16, *value).unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

fn run_pipeline(input: &Path, strict: bool) -> Vec<price_extract_common::ExtractedRecord> {
    let table = sheet::load_table(input).unwrap();
    let rules = extract::load_rules(None).unwrap();
    let policy = if strict {
        extract::FilterPolicy::Strict
    } else {
        extract::FilterPolicy::Lenient
    };
    let classifier = extract::Classifier::new(&rules, policy);
    let mut records = extract::extract_records(&table, &classifier);
    sort_for_report(&mut records);
    records
}

/// xlsx を読み込んでCSVを出力
#[test]
fn test_xlsx_to_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("buylist.xlsx");
    write_xlsx(
        &input,
        &["Austin", "Dallas"],
        &[
            &["iPhone 15 Pro 256GB A grade $650", "iPhone 13 128GB open box 450 USD"],
            &["Please contact us for receipt", ""],
            &["Galaxy S24 Ultra 512GB cracked screen $1,200", ""],
        ],
    );

    let records = run_pipeline(&input, false);
    assert_eq!(records.len(), 3);

    let written = export::export_records(&records, &ExportFormat::Csv, &input, None).unwrap();
    assert_eq!(written, vec![dir.path().join("buylist_pricing.csv")]);

    let content = std::fs::read_to_string(&written[0]).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "model,storage,grade,price,row,column");
    assert_eq!(lines[1], "Galaxy S24 Ultra,512GB,Cracked Screen,1200.0,3,Austin");
    assert_eq!(lines[2], "iPhone 13,128GB,Open Box,450.0,1,Dallas");
    assert_eq!(lines[3], "iPhone 15 Pro,256GB,A Grade,650.0,1,Austin");
}

/// csv 入力と厳格モード
#[test]
fn test_csv_input_strict_policy() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("listings.csv");
    std::fs::write(
        &input,
        "Houston\nMystery gadget $20\nAirPods Pro $120\n\"Pixel 8, mint, $300\"\n",
    )
    .unwrap();

    let lenient = run_pipeline(&input, false);
    assert_eq!(lenient.len(), 3);

    let strict = run_pipeline(&input, true);
    assert_eq!(strict.len(), 2);
    assert!(strict.iter().all(|r| r.model != "Mystery gadget $20"));
}

/// Excel と CSV の同時出力
#[test]
fn test_export_both_formats() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("austin.csv");
    std::fs::write(&input, "Austin\niPhone 14 128GB $400\n").unwrap();

    let records = run_pipeline(&input, false);
    let out_dir = dir.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();

    let written = export::export_records(&records, &ExportFormat::Both, &input, Some(&out_dir)).unwrap();
    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|p| p.exists()));

    // 書き出した xlsx を読み戻せる
    let table = sheet::load_table(&written[1]).unwrap();
    assert_eq!(table.headers[0], "model");
    assert_eq!(table.cell(0, 0), "iPhone 14");
}

/// カスタムルールテーブル
#[test]
fn test_custom_rule_table() {
    let dir = tempdir().unwrap();
    let rules_path = dir.path().join("rules.toml");
    std::fs::write(
        &rules_path,
        r#"
version = 1

[filter]
noise_keywords = ["wanted"]

[[model]]
label = "Switch OLED"
pattern = '\bswitch\s*oled\b'

[[price]]
pattern = '\$(\d+)'
"#,
    )
    .unwrap();

    let rules = extract::load_rules(Some(&rules_path)).unwrap();
    let classifier = extract::Classifier::new(&rules, extract::FilterPolicy::Lenient);

    let record = classifier.classify("Switch OLED white $280", 1, "Austin").unwrap();
    assert_eq!(record.model, "Switch OLED");
    assert_eq!(record.price, Some(280.0));
    assert!(classifier.classify("Switch OLED wanted", 2, "Austin").is_none());
}

/// サマリー集計
#[test]
fn test_summary_from_pipeline() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("listings.csv");
    std::fs::write(
        &input,
        "Austin,Dallas\niPhone 15 128GB $500,iPhone 15 128GB $700\niPhone 15 256GB mint,\n",
    )
    .unwrap();

    let records = run_pipeline(&input, false);
    let summary = Summary::from_records(&records);
    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.top_models(1), vec![("iPhone 15", 3)]);

    let price = summary.price.unwrap();
    assert_eq!(price.count, 2);
    assert_eq!(price.average, 600.0);
}
