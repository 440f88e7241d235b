//! Page window over a sorted result set.

use std::ops::Range;

/// Zero-based page index and page length.
///
/// Pagination is active only when both are set and `size` is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSpec {
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl PageSpec {
    pub fn new(page: usize, size: usize) -> Self {
        PageSpec {
            page: Some(page),
            size: Some(size),
        }
    }

    /// Row range of the current page within `total` rows.
    ///
    /// Returns `None` when pagination is inactive. Pages past the end yield
    /// an empty range.
    ///
    /// ```
    /// use repodeck_table::PageSpec;
    ///
    /// assert_eq!(PageSpec::new(1, 10).window(25), Some(10..20));
    /// assert_eq!(PageSpec::new(2, 10).window(25), Some(20..25));
    /// assert_eq!(PageSpec::new(9, 10).window(25), Some(25..25));
    /// assert_eq!(PageSpec { page: None, size: Some(10) }.window(25), None);
    /// ```
    pub fn window(&self, total: usize) -> Option<Range<usize>> {
        match (self.page, self.size) {
            (Some(page), Some(size)) if size > 0 => {
                let start = page.saturating_mul(size).min(total);
                let end = start.saturating_add(size).min(total);
                Some(start..end)
            }
            _ => None,
        }
    }
}

/// Number of pages needed for `total` rows, at least one.
pub fn page_count(total: usize, size: usize) -> usize {
    if size == 0 {
        return 1;
    }
    total.div_ceil(size).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_without_size_or_page() {
        assert_eq!(PageSpec::default().window(10), None);
        assert_eq!(
            PageSpec {
                page: Some(0),
                size: None
            }
            .window(10),
            None
        );
        assert_eq!(PageSpec::new(0, 0).window(10), None);
    }

    #[test]
    fn first_page_and_partial_last_page() {
        assert_eq!(PageSpec::new(0, 2).window(3), Some(0..2));
        assert_eq!(PageSpec::new(1, 2).window(3), Some(2..3));
    }

    #[test]
    fn huge_page_index_does_not_overflow() {
        assert_eq!(PageSpec::new(usize::MAX, 10).window(5), Some(5..5));
    }

    #[test]
    fn page_counts() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 1);
    }
}
