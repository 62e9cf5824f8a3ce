use rust_xlsxwriter::{Workbook, XlsxError};

use crate::{model::staff::StaffSummaryDto, server::export::sheet_with_header};

pub static STAFF_EXPORT_FILENAME: &str = "staff_list.xlsx";

const COLUMNS: [(&str, f64); 7] = [
    ("First Name", 20.0),
    ("Last Name", 20.0),
    ("Position", 20.0),
    ("Branch", 20.0),
    ("Hire Date", 15.0),
    ("Phone", 15.0),
    ("Email", 30.0),
];

/// Single "Staff List" sheet, one row per staff member in the given order
pub fn staff_workbook(staff: &[StaffSummaryDto]) -> Result<Vec<u8>, XlsxError> {
    let mut sheet = sheet_with_header("Staff List", &COLUMNS)?;

    for (i, StaffSummaryDto { staff: member, .. }) in staff.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &member.first_name)?;
        sheet.write_string(row, 1, &member.last_name)?;
        sheet.write_string(row, 2, &member.position)?;
        sheet.write_string(row, 3, &member.branch_name)?;
        sheet.write_string(row, 4, member.hire_date.to_string())?;
        sheet.write_string(row, 5, &member.phone)?;
        sheet.write_string(row, 6, member.email.as_deref().unwrap_or_default())?;
    }

    let mut workbook = Workbook::new();
    workbook.push_worksheet(sheet);

    workbook.save_to_buffer()
}
