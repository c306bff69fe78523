//! price-extract: 商品リストからの価格データ抽出

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod inspect;
pub mod monitor;
pub mod report;
pub mod sheet;
pub mod tagger;
