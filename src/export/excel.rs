//! Excel出力（rust_xlsxwriter）

use super::csv::HEADER;
use crate::error::{PriceExtractError, Result};
use price_extract_common::ExtractedRecord;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "Pricing";
const COLUMN_WIDTHS: [f64; 6] = [30.0, 10.0, 22.0, 10.0, 6.0, 20.0];

pub fn write_records(records: &[ExtractedRecord], output_path: &Path) -> Result<()> {
    build_workbook(records, output_path)
        .map_err(|e| PriceExtractError::ExcelGeneration(e.to_string()))
}

fn build_workbook(records: &[ExtractedRecord], output_path: &Path) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let price_format = Format::new().set_num_format("$#,##0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (title, width)) in HEADER.iter().zip(COLUMN_WIDTHS).enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        worksheet.set_column_width(col as u16, width)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &record.model)?;
        worksheet.write_string(row, 1, &record.storage)?;
        worksheet.write_string(row, 2, &record.grade)?;
        if let Some(price) = record.price {
            worksheet.write_number_with_format(row, 3, price, &price_format)?;
        }
        worksheet.write_number(row, 4, record.source_row as f64)?;
        worksheet.write_string(row, 5, &record.source_column)?;
    }

    workbook.save(output_path)?;
    Ok(())
}
