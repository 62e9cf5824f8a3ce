//! Spreadsheet exports.
//!
//! Each export builds an in-memory `.xlsx` workbook with a bold header row and fixed column
//! widths. Callers check for an empty result before building one.

pub mod staff;
pub mod transaction;
pub mod work_log;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use rust_xlsxwriter::{Format, Worksheet, XlsxError};

pub static XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A finished workbook sent as an attachment
pub struct XlsxDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl IntoResponse for XlsxDownload {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.filename),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Creates a named sheet with a bold header row and one width per column
fn sheet_with_header(name: &str, columns: &[(&str, f64)]) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(name)?;

    let bold = Format::new().set_bold();
    for (col, (title, width)) in columns.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, &bold)?;
        sheet.set_column_width(col, *width)?;
    }

    Ok(sheet)
}

fn decimal_cell(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
