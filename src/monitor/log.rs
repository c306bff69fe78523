//! 新規エントリのCSVログ

use crate::error::Result;
use chrono::Local;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

pub const LOG_HEADER: [&str; 8] = [
    "timestamp",
    "filename",
    "filepath",
    "size_bytes",
    "size_mb",
    "type",
    "extension",
    "file_category",
];

/// 拡張子によるファイル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileCategory {
    #[serde(rename = "Installer/Archive")]
    InstallerArchive,
    Image,
    Video,
    Document,
    Audio,
    Other,
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FileCategory::InstallerArchive => "Installer/Archive",
            FileCategory::Image => "Image",
            FileCategory::Video => "Video",
            FileCategory::Document => "Document",
            FileCategory::Audio => "Audio",
            FileCategory::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

/// 拡張子（".zip" 形式、小文字）から分類
pub fn categorize(extension: &str) -> FileCategory {
    match extension {
        ".dmg" | ".pkg" | ".zip" | ".gz" | ".rar" | ".7z" => FileCategory::InstallerArchive,
        ".jpg" | ".jpeg" | ".png" | ".gif" | ".heic" | ".bmp" | ".svg" => FileCategory::Image,
        ".mp4" | ".mov" | ".avi" | ".mkv" | ".wmv" | ".flv" => FileCategory::Video,
        ".csv" | ".xlsx" | ".xls" | ".pdf" | ".txt" | ".doc" | ".docx" => FileCategory::Document,
        ".mp3" | ".wav" | ".flac" | ".m4a" | ".aac" => FileCategory::Audio,
        _ => FileCategory::Other,
    }
}

#[derive(Debug, Serialize)]
struct LogRow {
    timestamp: String,
    filename: String,
    filepath: String,
    size_bytes: u64,
    size_mb: f64,
    #[serde(rename = "type")]
    kind: &'static str,
    extension: String,
    file_category: FileCategory,
}

fn log_row(path: &Path, timestamp: &str) -> LogRow {
    let metadata = std::fs::metadata(path).ok();
    let size_bytes = metadata.as_ref().map(|m| m.len()).unwrap_or(0);
    let is_dir = metadata.as_ref().map(|m| m.is_dir()).unwrap_or(false);
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    LogRow {
        timestamp: timestamp.to_string(),
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        filepath: path.display().to_string(),
        size_bytes,
        size_mb: (size_bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0,
        kind: if is_dir { "Directory" } else { "File" },
        file_category: categorize(&extension),
        extension,
    }
}

/// エントリをCSVに追記（ファイルがなければヘッダーから書く）
pub fn append_entries(log_path: &Path, entries: &[PathBuf]) -> Result<()> {
    let write_header = !log_path.exists();
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if write_header {
        writer.write_record(LOG_HEADER)?;
    }

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    for entry in entries {
        writer.serialize(log_row(entry, &timestamp))?;
    }
    writer.flush()?;

    Ok(())
}
