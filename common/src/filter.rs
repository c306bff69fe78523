//! レコード判定モジュール
//!
//! セルのテキストが商品リストの行か、ポリシー文・住所などのノイズかを判定し、
//! 商品行であれば [`ExtractedRecord`] を生成する。
//!
//! ## 処理フロー
//! 1. 空セルは除外
//! 2. ノイズキーワードを含むものは除外
//! 3. 厳格モードのみ: 厳格用ノイズキーワードを含むもの、
//!    機器キーワードを1つも含まないものは除外
//! 4. 型番・容量・状態・価格を抽出
//! 5. 型番が取れなければ元テキストの先頭部分で代用
//! 6. 型番も価格も空なら除外

use crate::matcher::truncate_chars;
use crate::record::ExtractedRecord;
use crate::rules::{default_rules, RuleBook};
use serde::{Deserialize, Serialize};

/// 判定ポリシー
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPolicy {
    /// 共通のノイズキーワードのみで除外
    #[default]
    Lenient,
    /// 厳格用ノイズキーワードでも除外し、機器キーワードを必須にする
    Strict,
}

/// 除外理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    Noise,
    NoDeviceKeyword,
    NothingExtracted,
}

/// セル分類器
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    rules: &'a RuleBook,
    policy: FilterPolicy,
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::new(default_rules(), FilterPolicy::default())
    }
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a RuleBook, policy: FilterPolicy) -> Self {
        Self { rules, policy }
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// セルを分類する（除外時は `None`）
    pub fn classify(&self, raw_text: &str, row: usize, column: &str) -> Option<ExtractedRecord> {
        match self.evaluate(raw_text, row, column) {
            Ok(record) => Some(record),
            Err(reason) => {
                tracing::debug!(row, column, ?reason, "セルを除外");
                None
            }
        }
    }

    /// 除外理由つきで分類する
    pub fn evaluate(
        &self,
        raw_text: &str,
        row: usize,
        column: &str,
    ) -> std::result::Result<ExtractedRecord, Rejection> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(Rejection::Empty);
        }

        let lower = text.to_lowercase();
        if contains_any(&lower, &self.rules.noise_keywords) {
            return Err(Rejection::Noise);
        }
        if self.policy == FilterPolicy::Strict {
            if contains_any(&lower, &self.rules.strict_noise_keywords) {
                return Err(Rejection::Noise);
            }
            if !contains_any(&lower, &self.rules.device_keywords) {
                return Err(Rejection::NoDeviceKeyword);
            }
        }

        let mut model = self.rules.match_model(text);
        let storage = self.rules.match_storage(text);
        let grade = self.rules.match_grade(text);
        let price = self.rules.match_price(text);

        if model.is_empty() {
            model = truncate_chars(text, self.rules.fallback_len);
        }
        if model.is_empty() && price.is_none() {
            return Err(Rejection::NothingExtracted);
        }

        Ok(ExtractedRecord {
            model,
            storage,
            grade,
            price,
            source_row: row,
            source_column: column.to_string(),
            raw_text: text.to_string(),
        })
    }
}

/// 組み込みルール・緩和モードでセルを分類する
pub fn classify(raw_text: &str, row: usize, column: &str) -> Option<ExtractedRecord> {
    Classifier::default().classify(raw_text, row, column)
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}
