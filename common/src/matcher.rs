//! フィールド抽出（型番・容量・状態・価格）
//!
//! いずれも副作用のない純粋関数。マッチしない場合は空文字列／`None`を返し、
//! エラーにはしない。
//!
//! ## 採用ルール
//! - 型番・容量・状態: ルールセット内で最初にマッチしたルール
//! - 価格: パターンごとに最後のマッチを評価し、範囲外なら次のパターンへ
//!
//! 型番は記載順ではなくルール順で決まる。1つのセルに iPhone と Samsung の
//! 両方が書かれていれば、本文中の位置に関係なく iPhone が採用される。

use crate::rules::RuleBook;

/// 容量の単位判定で参照する、数値直後の文字数
const UNIT_WINDOW_CHARS: usize = 4;

/// 妥当な価格の上限（この値は含まない）
pub const PRICE_UPPER_BOUND: f64 = 10_000.0;

impl RuleBook {
    /// 型番を抽出
    pub fn match_model(&self, text: &str) -> String {
        for rule in &self.model {
            if let Some(m) = rule.regex.find(text) {
                return match &rule.label {
                    Some(label) => label.clone(),
                    None => collapse_whitespace(m.as_str()),
                };
            }
        }
        String::new()
    }

    /// 容量を抽出（"256GB" / "1TB"）
    pub fn match_storage(&self, text: &str) -> String {
        for rule in &self.storage {
            for caps in rule.regex.captures_iter(text) {
                let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if !rule.guard.allows(text[whole.end()..].chars().next()) {
                    continue;
                }
                if rule.skip_numbers.iter().any(|n| n == number.as_str()) {
                    continue;
                }

                let window: String = text[number.end()..]
                    .chars()
                    .take(UNIT_WINDOW_CHARS)
                    .collect();
                let unit = if window.trim_start().to_lowercase().starts_with('t') {
                    "TB"
                } else {
                    "GB"
                };
                return format!("{}{}", number.as_str(), unit);
            }
        }
        String::new()
    }

    /// 状態グレードを抽出
    pub fn match_grade(&self, text: &str) -> String {
        self.grade
            .iter()
            .find(|rule| rule.regex.is_match(text))
            .and_then(|rule| rule.label.clone())
            .unwrap_or_default()
    }

    /// 価格を抽出
    ///
    /// 同一パターンに複数の候補がある場合は最後のものを採用する。
    /// 先頭側の数値は数量や型番であることが多いため。
    pub fn match_price(&self, text: &str) -> Option<f64> {
        for rule in &self.price {
            let last = rule
                .regex
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .filter(|m| is_whole_number_token(text, m.start(), m.end()))
                .last();

            let Some(token) = last else {
                continue;
            };

            let cleaned = token.as_str().replace(',', "");
            match cleaned.parse::<f64>() {
                Ok(price) if price > 0.0 && price < PRICE_UPPER_BOUND => return Some(price),
                Ok(price) => {
                    tracing::debug!(price, rule = ?rule.label, "価格が範囲外のため次のパターンへ");
                }
                Err(e) => {
                    tracing::debug!(token = %token.as_str(), error = %e, "価格のパースに失敗");
                }
            }
        }
        None
    }
}

/// 数値トークンが前後で途切れていないか
///
/// `$12,500` の `12` のように、数値の途中で切れたマッチを除外する。
fn is_whole_number_token(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    if matches!(before, Some(c) if c.is_ascii_digit() || c == ',' || c == '.') {
        return false;
    }

    let mut after = text[end..].chars();
    match after.next() {
        Some(c) if c.is_ascii_digit() => false,
        Some(',') | Some('.') => !matches!(after.next(), Some(c) if c.is_ascii_digit()),
        _ => true,
    }
}

/// 連続する空白を1つにまとめる
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 先頭から最大 `max_chars` 文字を取り出す
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
