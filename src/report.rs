//! 抽出結果のサマリー表示

use price_extract_common::Summary;

/// 金額を `$1,234.56` 形式に整形
pub fn format_dollars(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let whole = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// サマリーを表示用の行に整形
pub fn render_summary(summary: &Summary, top_models: usize) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("📊 抽出サマリー".to_string());
    lines.push(format!("  抽出レコード数: {}", summary.total_records));

    if summary.total_records == 0 {
        return lines;
    }

    let grades = summary.grades_by_count();
    if !grades.is_empty() {
        lines.push(String::new());
        lines.push("📈 グレード分布:".to_string());
        for (grade, count) in grades {
            lines.push(format!("  {:<25}: {:3}件", grade, count));
        }
    }

    let storage = summary.storage_by_size();
    if !storage.is_empty() {
        lines.push(String::new());
        lines.push("💾 容量分布:".to_string());
        for (label, count) in storage {
            lines.push(format!("  {:<10}: {:3}件", label, count));
        }
    }

    let models = summary.top_models(top_models);
    if !models.is_empty() {
        lines.push(String::new());
        lines.push(format!("📱 型番 上位{}件:", top_models));
        for (model, count) in models {
            let short: String = model.chars().take(30).collect();
            lines.push(format!("  {:<30}: {:3}件", short, count));
        }
    }

    if let Some(price) = &summary.price {
        lines.push(String::new());
        lines.push("💰 価格サマリー:".to_string());
        lines.push(format!("  価格あり: {}件", price.count));
        lines.push(format!("  平均価格: {}", format_dollars(price.average)));
        lines.push(format!("  合計金額: {}", format_dollars(price.total)));
        lines.push(format!(
            "  価格帯: {} - {}",
            format_dollars(price.min),
            format_dollars(price.max)
        ));
    }

    lines
}

pub fn print_summary(summary: &Summary, top_models: usize) {
    for line in render_summary(summary, top_models) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use price_extract_common::ExtractedRecord;

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(0.0), "$0.00");
        assert_eq!(format_dollars(199.99), "$199.99");
        assert_eq!(format_dollars(1234.5), "$1,234.50");
        assert_eq!(format_dollars(1234567.891), "$1,234,567.89");
    }

    #[test]
    fn test_render_summary_sections() {
        let records = vec![
            ExtractedRecord {
                model: "iPhone 15".into(),
                storage: "128GB".into(),
                grade: "A Grade".into(),
                price: Some(500.0),
                ..Default::default()
            },
            ExtractedRecord {
                model: "iPhone 15".into(),
                price: Some(700.0),
                ..Default::default()
            },
        ];
        let lines = render_summary(&Summary::from_records(&records), 10);

        assert!(lines.iter().any(|l| l.contains("抽出レコード数: 2")));
        assert!(lines.iter().any(|l| l.contains("A Grade")));
        assert!(lines.iter().any(|l| l.contains("128GB")));
        assert!(lines.iter().any(|l| l.contains("平均価格: $600.00")));
        assert!(lines.iter().any(|l| l.contains("価格帯: $500.00 - $700.00")));
    }

    #[test]
    fn test_render_summary_without_prices() {
        let records = vec![ExtractedRecord { model: "iPad".into(), ..Default::default() }];
        let lines = render_summary(&Summary::from_records(&records), 10);
        assert!(!lines.iter().any(|l| l.contains("価格サマリー")));
    }
}
