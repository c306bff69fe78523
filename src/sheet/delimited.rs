use super::Table;
use crate::error::Result;
use std::path::Path;

/// CSVを読み込む（列数の揃っていない行も許容）
pub fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(Table::new(headers, rows))
}
