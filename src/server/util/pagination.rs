//! Page number handling for listings.

use crate::model::api::PaginationDto;

pub const DEFAULT_PER_PAGE: u64 = 15;
pub const MAX_PER_PAGE: u64 = 100;

/// Parses a requested page number.
///
/// Non-numeric input resolves to page 1 and numbers below 1 clamp to 1. Numbers too large to
/// represent resolve to `u64::MAX` and are later clamped to the last page by [`clamp_page`].
pub fn parse_page(raw: Option<&str>) -> u64 {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return 1;
    };

    match raw.parse::<i64>() {
        Ok(page) if page < 1 => 1,
        Ok(page) => page as u64,
        Err(_) if raw.bytes().all(|b| b.is_ascii_digit()) => u64::MAX,
        Err(_) => 1,
    }
}

/// Parses a page size, falling back to [`DEFAULT_PER_PAGE`] and clamping to `1..=MAX_PER_PAGE`
pub fn parse_per_page(raw: Option<&str>) -> u64 {
    raw.map(str::trim)
        .and_then(|r| r.parse::<i64>().ok())
        .map(|per_page| per_page.clamp(1, MAX_PER_PAGE as i64) as u64)
        .unwrap_or(DEFAULT_PER_PAGE)
}

/// Number of pages for `total_items`, at least 1 so an empty listing still has a page
pub fn total_pages(total_items: u64, per_page: u64) -> u64 {
    total_items.div_ceil(per_page.max(1)).max(1)
}

pub fn clamp_page(requested: u64, total_pages: u64) -> u64 {
    requested.clamp(1, total_pages.max(1))
}

pub fn pagination_dto(page: u64, per_page: u64, total_items: u64) -> PaginationDto {
    let total_pages = total_pages(total_items, per_page);
    let page = clamp_page(page, total_pages);

    PaginationDto {
        page,
        per_page,
        total_items,
        total_pages,
        has_previous: page > 1,
        has_next: page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect non-numeric and non-positive page numbers to resolve to page 1
    #[test]
    fn test_parse_page_fallbacks() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-4")), 1);
        assert_eq!(parse_page(Some("3")), 3);
    }

    /// Expect oversized page numbers to clamp to the last page
    #[test]
    fn test_oversized_page_clamps_to_last() {
        let page = parse_page(Some("99999999999999999999999"));

        assert_eq!(clamp_page(page, 4), 4);
        assert_eq!(clamp_page(9, 4), 4);
    }

    /// Expect page size to fall back to 15 and stay within 1..=100
    #[test]
    fn test_parse_per_page() {
        assert_eq!(parse_per_page(None), 15);
        assert_eq!(parse_per_page(Some("many")), 15);
        assert_eq!(parse_per_page(Some("0")), 1);
        assert_eq!(parse_per_page(Some("500")), 100);
        assert_eq!(parse_per_page(Some("25")), 25);
    }

    /// Expect an empty result to still report one page
    #[test]
    fn test_empty_result_has_one_page() {
        let dto = pagination_dto(5, 10, 0);

        assert_eq!(dto.total_pages, 1);
        assert_eq!(dto.page, 1);
        assert!(!dto.has_previous);
        assert!(!dto.has_next);
    }

    /// Expect navigation flags for a middle page
    #[test]
    fn test_middle_page_flags() {
        let dto = pagination_dto(2, 10, 25);

        assert_eq!(dto.total_pages, 3);
        assert!(dto.has_previous);
        assert!(dto.has_next);
    }
}
