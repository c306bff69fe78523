pub mod csv;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use price_extract_common::ExtractedRecord;
use std::path::{Path, PathBuf};

/// 出力先が未指定の場合のパス（入力と同じフォルダに `<stem>_pricing.<ext>`）
pub fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("{}_pricing.{}", stem, extension))
}

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.with_extension(extension)
    }
}

/// 形式に応じて出力し、書き出したパスを返す
pub fn export_records(
    records: &[ExtractedRecord],
    format: &ExportFormat,
    input: &Path,
    output: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let path_for = |extension: &str| match output {
        Some(out) => {
            let stem = input
                .file_stem()
                .map(|s| format!("{}_pricing", s.to_string_lossy()))
                .unwrap_or_else(|| "pricing".to_string());
            output_path_for_format(out, &stem, extension)
        }
        None => default_output_path(input, extension),
    };

    let mut written = Vec::new();

    if matches!(format, ExportFormat::Csv | ExportFormat::Both) {
        let path = path_for("csv");
        csv::write_records(records, &path)?;
        written.push(path);
    }

    if matches!(format, ExportFormat::Excel | ExportFormat::Both) {
        let path = path_for("xlsx");
        excel::write_records(records, &path)?;
        written.push(path);
    }

    Ok(written)
}
