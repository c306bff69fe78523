//! 抽出レコードの型定義

use serde::{Deserialize, Serialize};

/// セル1つ分の抽出結果
///
/// 生成後は変更しない。集計時に参照されるのみ。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// 型番（マッチなしの場合は元テキストの先頭部分）
    pub model: String,
    /// 容量（"256GB" / "1TB"、なしは空）
    pub storage: String,
    /// 状態グレード
    pub grade: String,
    /// 価格
    pub price: Option<f64>,
    /// 元データの行番号（ヘッダーを除く1始まり）
    pub source_row: usize,
    /// 元データの列名
    pub source_column: String,
    /// 元テキスト
    pub raw_text: String,
}

/// 出力CSVの1行
#[derive(Debug, Clone, Serialize)]
pub struct CsvRow<'a> {
    pub model: &'a str,
    pub storage: &'a str,
    pub grade: &'a str,
    pub price: Option<f64>,
    pub row: usize,
    pub column: &'a str,
}

impl ExtractedRecord {
    /// 出力CSV用の行に変換
    pub fn to_csv_row(&self) -> CsvRow<'_> {
        CsvRow {
            model: &self.model,
            storage: &self.storage,
            grade: &self.grade,
            price: self.price,
            row: self.source_row,
            column: &self.source_column,
        }
    }
}

/// 型番・容量の順に並べ替え
pub fn sort_for_report(records: &mut [ExtractedRecord]) {
    records.sort_by(|a, b| {
        a.model
            .cmp(&b.model)
            .then_with(|| a.storage.cmp(&b.storage))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_for_report() {
        let mut records = vec![
            ExtractedRecord { model: "iPhone 15".into(), storage: "256GB".into(), ..Default::default() },
            ExtractedRecord { model: "Galaxy S24".into(), ..Default::default() },
            ExtractedRecord { model: "iPhone 15".into(), storage: "128GB".into(), ..Default::default() },
        ];
        sort_for_report(&mut records);
        assert_eq!(records[0].model, "Galaxy S24");
        assert_eq!(records[1].storage, "128GB");
        assert_eq!(records[2].storage, "256GB");
    }

    #[test]
    fn test_to_csv_row() {
        let record = ExtractedRecord {
            model: "iPad Air".into(),
            price: Some(300.0),
            source_row: 4,
            source_column: "Sheet Col".into(),
            ..Default::default()
        };
        let row = record.to_csv_row();
        assert_eq!(row.model, "iPad Air");
        assert_eq!(row.price, Some(300.0));
        assert_eq!(row.row, 4);
        assert_eq!(row.column, "Sheet Col");
    }
}
