use crate::error::{PriceExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// フォルダ監視の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// ポーリング間隔（秒）
    pub interval_seconds: u64,
    /// 監視対象フォルダ
    pub watch_path: PathBuf,
    /// 新規ファイルの記録先CSV
    pub log_path: PathBuf,
    /// `--once` 時の待機時間（秒）
    pub once_window_seconds: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 2,
            watch_path: default_watch_path(),
            log_path: PathBuf::from("data.csv"),
            once_window_seconds: 10,
        }
    }
}

/// ダウンロードフォルダ（取得できなければ ~/Downloads）
fn default_watch_path() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// カスタムルールテーブル（TOML）
    pub rules_path: Option<PathBuf>,
    /// 厳格モード（機器キーワード必須）
    pub strict: bool,
    /// レポートに表示する型番の件数
    pub top_models: usize,
    pub monitor: MonitorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_path: None,
            strict: false,
            top_models: 10,
            monitor: MonitorConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PriceExtractError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("price-extract").join("config.json"))
    }

    pub fn set_rules_path(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(PriceExtractError::FileNotFound(path.display().to_string()));
        }
        self.rules_path = Some(path);
        self.save()
    }

    pub fn set_watch_path(&mut self, path: PathBuf) -> Result<()> {
        self.monitor.watch_path = path;
        self.save()
    }

    pub fn set_interval(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(PriceExtractError::Config("監視間隔は1秒以上にしてください".into()));
        }
        self.monitor.interval_seconds = seconds;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.top_models, 10);
        assert!(!config.strict);
        assert!(config.rules_path.is_none());
        assert_eq!(config.monitor.interval_seconds, 2);
        assert_eq!(config.monitor.log_path, PathBuf::from("data.csv"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"strict": true, "monitor": {"interval_seconds": 5}}"#).unwrap();
        assert!(config.strict);
        assert_eq!(config.top_models, 10);
        assert_eq!(config.monitor.interval_seconds, 5);
        assert_eq!(config.monitor.once_window_seconds, 10);
    }

    #[test]
    fn test_roundtrip_json() {
        let config = Config {
            rules_path: Some(PathBuf::from("rules.toml")),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let loaded: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }
}
