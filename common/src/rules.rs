//! ルールテーブルモジュール
//!
//! 型番・容量・状態・価格の抽出ルールをTOMLのデータとして定義し、
//! 起動時に一度だけコンパイルして読み取り専用の [`RuleBook`] にする。
//!
//! ## 評価順序
//! - 各ルールセットは上から順に評価し、最初にマッチしたルールを採用する
//! - 価格のみ、同一パターン内では最後のマッチを採用する

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 組み込みのルールテーブル
pub const DEFAULT_RULES_TOML: &str = include_str!("../rules/default.toml");

/// 対応しているルールテーブルのバージョン
pub const RULE_TABLE_VERSION: u32 = 1;

lazy_static::lazy_static! {
    static ref DEFAULT_BOOK: RuleBook = RuleBook::from_toml(DEFAULT_RULES_TOML)
        .expect("組み込みルールテーブルが不正");
}

/// 組み込みルールブックを取得
pub fn default_rules() -> &'static RuleBook {
    &DEFAULT_BOOK
}

/// ルール定義（パターン, ラベル）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDef {
    pub pattern: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// 容量ルールの後続文字チェック
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowGuard {
    /// 制限なし
    #[default]
    None,
    /// 英字が続く場合は不採用
    Letter,
    /// 英数字・アンダースコアが続く場合は不採用
    Word,
}

impl FollowGuard {
    /// 後続文字が許容されるか
    pub fn allows(&self, next: Option<char>) -> bool {
        match (self, next) {
            (_, None) | (FollowGuard::None, _) => true,
            (FollowGuard::Letter, Some(c)) => !c.is_alphabetic(),
            (FollowGuard::Word, Some(c)) => !(c.is_alphanumeric() || c == '_'),
        }
    }
}

/// 容量ルール定義
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageRuleDef {
    pub pattern: String,
    #[serde(default)]
    pub not_followed_by: FollowGuard,
    /// 容量として扱わない数値（"5G" など）
    #[serde(default)]
    pub skip_numbers: Vec<String>,
}

/// ノイズ判定の設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDef {
    /// 含まれていたら除外するキーワード
    #[serde(default)]
    pub noise_keywords: Vec<String>,
    /// 厳格モードでのみ除外するキーワード
    #[serde(default)]
    pub strict_noise_keywords: Vec<String>,
    /// 厳格モードで必須となる機器キーワード
    #[serde(default)]
    pub device_keywords: Vec<String>,
    /// 型番フォールバック時の最大文字数
    #[serde(default = "default_fallback_len")]
    pub fallback_len: usize,
}

fn default_fallback_len() -> usize {
    50
}

impl Default for FilterDef {
    fn default() -> Self {
        Self {
            noise_keywords: Vec::new(),
            strict_noise_keywords: Vec::new(),
            device_keywords: Vec::new(),
            fallback_len: default_fallback_len(),
        }
    }
}

/// ルールテーブル（TOMLの構造そのまま）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTable {
    pub version: u32,
    #[serde(default)]
    pub filter: FilterDef,
    #[serde(default)]
    pub model: Vec<RuleDef>,
    #[serde(default)]
    pub storage: Vec<StorageRuleDef>,
    #[serde(default)]
    pub grade: Vec<RuleDef>,
    #[serde(default)]
    pub price: Vec<RuleDef>,
}

/// コンパイル済みルール
#[derive(Debug, Clone)]
pub struct Rule {
    pub label: Option<String>,
    pub regex: Regex,
}

/// コンパイル済み容量ルール
#[derive(Debug, Clone)]
pub struct StorageRule {
    pub regex: Regex,
    pub guard: FollowGuard,
    pub skip_numbers: Vec<String>,
}

/// コンパイル済みルールブック
///
/// プロセス全体で読み取り専用として扱う。
#[derive(Debug, Clone)]
pub struct RuleBook {
    pub version: u32,
    pub model: Vec<Rule>,
    pub storage: Vec<StorageRule>,
    pub grade: Vec<Rule>,
    pub price: Vec<Rule>,
    /// 小文字化済み
    pub noise_keywords: Vec<String>,
    /// 小文字化済み
    pub strict_noise_keywords: Vec<String>,
    /// 小文字化済み
    pub device_keywords: Vec<String>,
    pub fallback_len: usize,
}

impl RuleBook {
    /// TOML文字列から読み込み
    pub fn from_toml(content: &str) -> Result<Self> {
        let table: RuleTable = toml::from_str(content)?;
        Self::compile(table)
    }

    /// TOMLファイルから読み込み
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// ルールテーブルをコンパイル
    pub fn compile(table: RuleTable) -> Result<Self> {
        if table.version != RULE_TABLE_VERSION {
            return Err(Error::UnsupportedVersion {
                found: table.version,
                supported: RULE_TABLE_VERSION,
            });
        }

        let model = compile_rules("model", &table.model)?;
        let grade = compile_rules("grade", &table.grade)?;
        let price = compile_rules("price", &table.price)?;
        let storage = table
            .storage
            .iter()
            .map(|def| {
                Ok(StorageRule {
                    regex: build_regex("storage", &def.pattern)?,
                    guard: def.not_followed_by,
                    skip_numbers: def.skip_numbers.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            version: table.version,
            model,
            storage,
            grade,
            price,
            noise_keywords: lowercase_all(&table.filter.noise_keywords),
            strict_noise_keywords: lowercase_all(&table.filter.strict_noise_keywords),
            device_keywords: lowercase_all(&table.filter.device_keywords),
            fallback_len: table.filter.fallback_len,
        })
    }
}

fn compile_rules(set: &'static str, defs: &[RuleDef]) -> Result<Vec<Rule>> {
    defs.iter()
        .map(|def| {
            Ok(Rule {
                label: def.label.clone(),
                regex: build_regex(set, &def.pattern)?,
            })
        })
        .collect()
}

fn build_regex(set: &'static str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::InvalidPattern {
            set,
            pattern: pattern.to_string(),
            source,
        })
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}
