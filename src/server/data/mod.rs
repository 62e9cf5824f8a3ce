//! Data access layer repositories.
//!
//! Each repository wraps a borrowed connection (`DatabaseConnection` or a transaction) and owns
//! the filtering, ordering and aggregate queries of one table.

pub mod branch;
pub mod staff;
pub mod transaction;
pub mod user;
pub mod work_log;

use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    Condition, ConnectionTrait, DbErr, ExprTrait, Paginator, SelectorTrait,
};

use crate::server::util::pagination::{clamp_page, total_pages};

/// One page of a listing after the requested page number was clamped
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
}

/// Fetches `page` from `paginator`, clamping it into `1..=last page`
pub async fn fetch_page<'db, C, S>(
    paginator: Paginator<'db, C, S>,
    page: u64,
    per_page: u64,
) -> Result<Page<S::Item>, DbErr>
where
    C: ConnectionTrait,
    S: SelectorTrait + 'db,
{
    let total_items = paginator.num_items().await?;
    let page = clamp_page(page, total_pages(total_items, per_page));
    let items = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        items,
        page,
        per_page,
        total_items,
    })
}

/// Case-insensitive substring match of `term` against any of `exprs`
pub fn icontains(exprs: Vec<SimpleExpr>, term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));

    exprs.into_iter().fold(Condition::any(), |condition, expr| {
        condition.add(
            Expr::expr(Func::lower(expr)).like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
    })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Trimmed search term, `None` when blank
pub fn search_term(q: Option<&str>) -> Option<&str> {
    q.map(str::trim).filter(|q| !q.is_empty())
}
