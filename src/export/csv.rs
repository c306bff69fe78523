//! CSV出力
//!
//! 列: model, storage, grade, price, row, column（UTF-8・ヘッダーあり）

use crate::error::Result;
use price_extract_common::ExtractedRecord;
use std::path::Path;

pub const HEADER: [&str; 6] = ["model", "storage", "grade", "price", "row", "column"];

pub fn write_records(records: &[ExtractedRecord], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)?;

    // レコードが0件でもヘッダーは出力する
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record.to_csv_row())?;
    }
    writer.flush()?;

    Ok(())
}
