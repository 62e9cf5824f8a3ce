use rust_xlsxwriter::{Workbook, XlsxError};

use crate::{
    model::work_log::WorkLogDto,
    server::{
        export::{decimal_cell, sheet_with_header},
        service::work_log::StaffHoursRow,
        util::period::MonthPeriod,
    },
};

const SUMMARY_COLUMNS: [(&str, f64); 2] = [("Staff", 30.0), ("Total Hours", 25.0)];

const DETAIL_COLUMNS: [(&str, f64); 5] = [
    ("Staff", 30.0),
    ("Branch", 20.0),
    ("Date", 15.0),
    ("Hours", 10.0),
    ("Description", 40.0),
];

/// `work_log_report_YYYY-M.xlsx`, the month without zero padding
pub fn work_log_filename(period: &MonthPeriod) -> String {
    format!("work_log_report_{}-{}.xlsx", period.year(), period.month())
}

/// "Staff Hours Summary" followed by "All Work Logs"
///
/// `summary` is written in the order given, which the service returns largest total first.
pub fn work_log_workbook(
    summary: &[StaffHoursRow],
    work_logs: &[WorkLogDto],
) -> Result<Vec<u8>, XlsxError> {
    let mut summary_sheet = sheet_with_header("Staff Hours Summary", &SUMMARY_COLUMNS)?;
    for (i, total) in summary.iter().enumerate() {
        let row = i as u32 + 1;
        summary_sheet.write_string(row, 0, &total.staff_name)?;
        summary_sheet.write_number(row, 1, decimal_cell(total.total_hours))?;
    }

    let mut detail_sheet = sheet_with_header("All Work Logs", &DETAIL_COLUMNS)?;
    for (i, work_log) in work_logs.iter().enumerate() {
        let row = i as u32 + 1;
        detail_sheet.write_string(row, 0, &work_log.staff_name)?;
        detail_sheet.write_string(row, 1, &work_log.branch_name)?;
        detail_sheet.write_string(row, 2, work_log.date.to_string())?;
        detail_sheet.write_number(row, 3, decimal_cell(work_log.hours))?;
        detail_sheet.write_string(row, 4, &work_log.description)?;
    }

    let mut workbook = Workbook::new();
    workbook.push_worksheet(summary_sheet);
    workbook.push_worksheet(detail_sheet);

    workbook.save_to_buffer()
}
