use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "price-extract")]
#[command(about = "商品リスト（スプレッドシート）から型番・容量・状態・価格を抽出するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// スプレッドシートから価格データを抽出してCSVを出力
    Extract {
        /// 入力ファイル（xlsx/xlsm/xlsb/xls/ods/csv）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（デフォルト: 入力ファイル名_pricing.csv）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 厳格モード（機器キーワードを含まないセルを除外）
        #[arg(long)]
        strict: bool,

        /// カスタムルールテーブル（TOML）
        #[arg(long)]
        rules: Option<PathBuf>,

        /// レポートに表示する型番の件数
        #[arg(long)]
        top: Option<usize>,
    },

    /// スプレッドシートの概要を表示
    Inspect {
        /// 入力ファイル
        #[arg(required = true)]
        input: PathBuf,

        /// サンプル表示する行数
        #[arg(long, default_value = "5")]
        sample_rows: usize,
    },

    /// リストCSVに型番列を追加
    Tag {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力CSVファイル（デフォルト: 入力ファイル名_with_models.csv）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 型番判定に使う列名
        #[arg(long, default_value = "Title")]
        column: String,

        /// カスタムルールテーブル（TOML）
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// フォルダを監視して新規ファイルをCSVに記録
    Watch {
        /// 監視フォルダ（デフォルト: ダウンロードフォルダ）
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// 監視間隔（秒）
        #[arg(short, long)]
        interval: Option<u64>,

        /// 記録先CSV
        #[arg(short, long)]
        log: Option<PathBuf>,

        /// 一度だけチェックして終了
        #[arg(long)]
        once: bool,
    },

    /// 設定を表示/編集
    Config {
        /// カスタムルールテーブルを設定
        #[arg(long)]
        set_rules: Option<PathBuf>,

        /// 監視フォルダを設定
        #[arg(long)]
        set_watch_path: Option<PathBuf>,

        /// 監視間隔（秒）を設定
        #[arg(long)]
        set_interval: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
