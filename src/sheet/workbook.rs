use super::Table;
use crate::error::{PriceExtractError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 先頭のワークシートを読み込む
pub fn read_first_sheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| PriceExtractError::SheetRead(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PriceExtractError::SheetRead(format!("{}: ワークシートがありません", path.display())))?
        .map_err(|e| PriceExtractError::SheetRead(e.to_string()))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| header.iter().map(cell_text).collect())
        .unwrap_or_default();
    let data = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(Table::new(headers, data))
}

/// セルを文字列化
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("iPhone 15".into())), "iPhone 15");
        assert_eq!(cell_text(&Data::Float(199.0)), "199");
        assert_eq!(cell_text(&Data::Float(199.5)), "199.5");
        assert_eq!(cell_text(&Data::Int(3)), "3");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
    }
}
