//! 抽出レコードの集計

use crate::record::ExtractedRecord;
use serde::Serialize;
use std::collections::HashMap;

/// 価格の統計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub count: usize,
    pub total: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// 集計結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub total_records: usize,
    pub grade_counts: HashMap<String, usize>,
    pub storage_counts: HashMap<String, usize>,
    pub model_counts: HashMap<String, usize>,
    /// 価格つきレコードがなければ `None`
    pub price: Option<PriceSummary>,
}

impl Summary {
    pub fn from_records(records: &[ExtractedRecord]) -> Self {
        let mut summary = Self {
            total_records: records.len(),
            ..Default::default()
        };

        for record in records {
            tally(&mut summary.grade_counts, &record.grade);
            tally(&mut summary.storage_counts, &record.storage);
            tally(&mut summary.model_counts, &record.model);

            if let Some(price) = record.price {
                let stats = summary.price.get_or_insert(PriceSummary {
                    count: 0,
                    total: 0.0,
                    average: 0.0,
                    min: price,
                    max: price,
                });
                stats.count += 1;
                stats.total += price;
                stats.min = stats.min.min(price);
                stats.max = stats.max.max(price);
            }
        }

        if let Some(stats) = summary.price.as_mut() {
            stats.average = stats.total / stats.count as f64;
        }

        summary
    }

    /// グレード別件数（件数の多い順）
    pub fn grades_by_count(&self) -> Vec<(&str, usize)> {
        let mut v = as_pairs(&self.grade_counts);
        v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        v
    }

    /// 容量別件数（ラベル長→件数の降順。"1TB" より "256GB" が先）
    pub fn storage_by_size(&self) -> Vec<(&str, usize)> {
        let mut v = as_pairs(&self.storage_counts);
        v.sort_by(|a, b| {
            b.0.len()
                .cmp(&a.0.len())
                .then_with(|| b.1.cmp(&a.1))
                .then_with(|| a.0.cmp(b.0))
        });
        v
    }

    /// 件数上位の型番
    pub fn top_models(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut v = as_pairs(&self.model_counts);
        v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        v.truncate(limit);
        v
    }
}

fn tally(counts: &mut HashMap<String, usize>, key: &str) {
    if !key.is_empty() {
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
}

fn as_pairs(counts: &HashMap<String, usize>) -> Vec<(&str, usize)> {
    counts.iter().map(|(k, v)| (k.as_str(), *v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(model: &str, storage: &str, grade: &str, price: Option<f64>) -> ExtractedRecord {
        ExtractedRecord {
            model: model.into(),
            storage: storage.into(),
            grade: grade.into(),
            price,
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_counts_and_prices() {
        let records = vec![
            record("iPhone 15", "128GB", "A Grade", Some(500.0)),
            record("iPhone 15", "256GB", "A Grade", Some(600.0)),
            record("Galaxy S24", "256GB", "", Some(400.0)),
            record("iPad", "", "DOA", None),
        ];
        let summary = Summary::from_records(&records);

        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.grade_counts.get("A Grade"), Some(&2));
        assert_eq!(summary.grade_counts.get(""), None);
        assert_eq!(summary.storage_counts.get("256GB"), Some(&2));

        let price = summary.price.unwrap();
        assert_eq!(price.count, 3);
        assert!((price.total - 1500.0).abs() < 1e-9);
        assert!((price.average - 500.0).abs() < 1e-9);
        assert_eq!(price.min, 400.0);
        assert_eq!(price.max, 600.0);
    }

    #[test]
    fn test_summary_without_prices() {
        let records = vec![record("iPad", "", "", None)];
        let summary = Summary::from_records(&records);
        assert!(summary.price.is_none());
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::from_records(&[]);
        assert_eq!(summary.total_records, 0);
        assert!(summary.price.is_none());
        assert!(summary.top_models(10).is_empty());
    }

    #[test]
    fn test_ordered_views() {
        let records = vec![
            record("A", "1TB", "B Grade", None),
            record("B", "64GB", "A Grade", None),
            record("B", "256GB", "A Grade", None),
            record("C", "256GB", "", None),
        ];
        let summary = Summary::from_records(&records);

        assert_eq!(summary.grades_by_count()[0], ("A Grade", 2));
        assert_eq!(summary.storage_by_size()[0], ("256GB", 2));
        assert_eq!(summary.storage_by_size().last(), Some(&("1TB", 1)));
        assert_eq!(summary.top_models(1), vec![("B", 2)]);
    }
}
