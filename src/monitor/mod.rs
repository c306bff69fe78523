//! フォルダ監視モジュール
//!
//! 監視フォルダ直下のエントリを一定間隔で取得し、前回から増えたものを
//! CSVログに追記する。設定は [`MonitorConfig`] として生成時に渡す。

mod log;

pub use log::{categorize, append_entries, FileCategory, LOG_HEADER};

use crate::config::MonitorConfig;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

pub struct FolderMonitor {
    config: MonitorConfig,
    known: BTreeSet<PathBuf>,
}

impl FolderMonitor {
    /// 初期スナップショットを取得して作成
    pub fn new(config: MonitorConfig) -> Self {
        let known = snapshot(&config.watch_path);
        Self { config, known }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// 既知のエントリ数
    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    /// 現在の状態と比較して新規エントリを返し、既知として記録する
    pub fn poll(&mut self) -> Vec<PathBuf> {
        let current = snapshot(&self.config.watch_path);
        let new_entries: Vec<PathBuf> = current.difference(&self.known).cloned().collect();
        self.known.extend(new_entries.iter().cloned());
        new_entries
    }

    /// 新規エントリを取得してログに追記（件数を返す）
    pub fn check(&mut self) -> crate::error::Result<usize> {
        let new_entries = self.poll();
        if new_entries.is_empty() {
            return Ok(0);
        }
        append_entries(&self.config.log_path, &new_entries)?;
        println!("📝 新規{}件を記録: {}", new_entries.len(), self.config.log_path.display());
        Ok(new_entries.len())
    }

    /// 一定間隔で監視を続ける（プロセス終了まで戻らない）
    pub fn run(&mut self) -> crate::error::Result<()> {
        let interval = Duration::from_secs(self.config.interval_seconds.max(1));
        loop {
            std::thread::sleep(interval);
            if let Err(e) = self.check() {
                // 記録失敗は監視を止めない
                tracing::error!(error = %e, "ログの書き込みに失敗");
                println!("❌ ログ書き込みエラー: {}", e);
            }
        }
    }

    /// 一定時間待ってから一度だけチェックする
    pub fn run_once(&mut self) -> crate::error::Result<usize> {
        std::thread::sleep(Duration::from_secs(self.config.once_window_seconds));
        self.check()
    }
}

/// 監視フォルダ直下のエントリ一覧（フォルダがなければ空）
pub fn snapshot(folder: &Path) -> BTreeSet<PathBuf> {
    if !folder.is_dir() {
        tracing::warn!(path = %folder.display(), "監視フォルダが見つかりません");
        return BTreeSet::new();
    }

    WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .collect()
}
