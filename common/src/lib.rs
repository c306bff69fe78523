//! Price Extract Common Library
//!
//! 商品リストの自由記述セルから型番・容量・状態・価格を抽出するルールエンジン

pub mod error;
pub mod rules;
pub mod matcher;
pub mod record;
pub mod filter;
pub mod summary;

pub use error::{Error, Result};
pub use rules::{default_rules, RuleBook, RuleTable};
pub use record::{ExtractedRecord, sort_for_report};
pub use filter::{classify, Classifier, FilterPolicy};
pub use summary::{PriceSummary, Summary};

/// 組み込みルールで型番を抽出
pub fn match_model(text: &str) -> String {
    default_rules().match_model(text)
}

/// 組み込みルールで容量を抽出
pub fn match_storage(text: &str) -> String {
    default_rules().match_storage(text)
}

/// 組み込みルールで状態グレードを抽出
pub fn match_grade(text: &str) -> String {
    default_rules().match_grade(text)
}

/// 組み込みルールで価格を抽出
pub fn match_price(text: &str) -> Option<f64> {
    default_rules().match_price(text)
}
