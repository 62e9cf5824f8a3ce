//! HTML pages rendered with Tera: the login page and the printable listings.
//!
//! Templates are compiled into the binary and parsed once on first use.

use std::sync::OnceLock;

use axum::response::Html;
use chrono::NaiveDate;
use serde::Serialize;
use tera::{Context, Tera};

use crate::{
    model::{staff::StaffSummaryDto, transaction::TransactionDto, work_log::WorkLogDto},
    server::{error::Error, util::period::MonthPeriod},
};

const TEMPLATES: [(&str, &str); 5] = [
    (
        "base.html",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/base.html")),
    ),
    (
        "login.html",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/login.html")),
    ),
    (
        "staff_print.html",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/staff_print.html")),
    ),
    (
        "work_log_print.html",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/work_log_print.html")),
    ),
    (
        "transaction_print.html",
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/templates/transaction_print.html"
        )),
    ),
];

static TERA: OnceLock<Tera> = OnceLock::new();

fn tera() -> Result<&'static Tera, tera::Error> {
    if let Some(tera) = TERA.get() {
        return Ok(tera);
    }

    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;

    Ok(TERA.get_or_init(|| tera))
}

fn render(template: &str, context: &Context) -> Result<Html<String>, Error> {
    Ok(Html(tera()?.render(template, context)?))
}

#[derive(Serialize)]
struct TransactionRow<'a> {
    #[serde(flatten)]
    transaction: &'a TransactionDto,
    kind_label: &'static str,
    category_label: &'static str,
}

pub fn login_page(username: &str, error: Option<&str>) -> Result<Html<String>, Error> {
    let mut context = Context::new();
    context.insert("username", username);
    context.insert("error", &error);

    render("login.html", &context)
}

pub fn staff_print(staff: &[StaffSummaryDto]) -> Result<Html<String>, Error> {
    let mut context = Context::new();
    context.insert("staff", staff);

    render("staff_print.html", &context)
}

pub fn work_log_print(work_logs: &[WorkLogDto], period: &MonthPeriod) -> Result<Html<String>, Error> {
    let mut context = Context::new();
    context.insert("work_logs", work_logs);
    context.insert("period", &period.to_dto());

    render("work_log_print.html", &context)
}

pub fn transaction_print(
    transactions: &[TransactionDto],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Html<String>, Error> {
    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|transaction| TransactionRow {
            transaction,
            kind_label: transaction.kind.label(),
            category_label: transaction.category.label(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("transactions", &rows);
    context.insert("start", &start);
    context.insert("end", &end);

    render("transaction_print.html", &context)
}
