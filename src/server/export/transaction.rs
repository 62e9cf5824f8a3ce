use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::{
    model::transaction::TransactionDto,
    server::export::{decimal_cell, sheet_with_header},
};

const COLUMNS: [(&str, f64); 6] = [
    ("Branch", 20.0),
    ("Type", 20.0),
    ("Category", 20.0),
    ("Amount", 20.0),
    ("Date", 20.0),
    ("Description", 20.0),
];

/// `transactions_YYYY-MM-DD.xlsx`, dated with the day of the export
pub fn transactions_filename(today: NaiveDate) -> String {
    format!("transactions_{}.xlsx", today.format("%Y-%m-%d"))
}

/// Single "Transactions" sheet, amounts written as numbers
pub fn transactions_workbook(transactions: &[TransactionDto]) -> Result<Vec<u8>, XlsxError> {
    let mut sheet = sheet_with_header("Transactions", &COLUMNS)?;

    for (i, transaction) in transactions.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &transaction.branch_name)?;
        sheet.write_string(row, 1, transaction.kind.label())?;
        sheet.write_string(row, 2, transaction.category.label())?;
        sheet.write_number(row, 3, decimal_cell(transaction.amount))?;
        sheet.write_string(row, 4, transaction.date.to_string())?;
        sheet.write_string(row, 5, &transaction.description)?;
    }

    let mut workbook = Workbook::new();
    workbook.push_worksheet(sheet);

    workbook.save_to_buffer()
}
