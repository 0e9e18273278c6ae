//! Page navigation bookkeeping
//!
//! [`PaginationState`] is a plain value: every operation returns a new state
//! and nothing here performs I/O.

/// Current page, page size and known page count of a collection view.
///
/// Invariant: `page_index < total_pages` once `total_pages > 0`; before the
/// first successful load both are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_index: u32,
    page_size: u32,
    total_pages: u32,
}

impl PaginationState {
    /// Fresh state with no known pages. A zero `page_size` is raised to 1.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            total_pages: 0,
        }
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// One-based number for page labels
    pub fn display_number(&self) -> u32 {
        self.page_index + 1
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }

    /// Move to `target`, clamped into `[0, total_pages - 1]`.
    ///
    /// With no known pages the index is always 0.
    pub fn advance_to(self, target: i64) -> Self {
        let page_index = if self.total_pages == 0 {
            0
        } else {
            target.clamp(0, i64::from(self.total_pages) - 1) as u32
        };
        Self { page_index, ..self }
    }

    /// Record the page count learned from the last successful response.
    pub fn with_totals(self, total_pages: u32) -> Self {
        Self {
            total_pages,
            ..self
        }
        .advance_to(i64::from(self.page_index))
    }

    /// Page numbers to render as navigation controls.
    ///
    /// Centred on the current page and clipped to the known pages; near an
    /// edge the window shifts toward the open side instead of shrinking, so it
    /// only holds fewer than `size` pages when fewer exist.
    pub fn window(&self, size: usize) -> Vec<u32> {
        let total = self.total_pages as usize;
        let len = size.min(total);
        if len == 0 {
            return Vec::new();
        }

        let current = self.page_index as usize;
        let start = current.saturating_sub(len / 2).min(total - len);
        (start..start + len).map(|page| page as u32).collect()
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(total_pages: u32, page_index: i64) -> PaginationState {
        PaginationState::new(5)
            .with_totals(total_pages)
            .advance_to(page_index)
    }

    #[test]
    fn test_window_edges_and_centre() {
        assert_eq!(state(10, 0).window(5), vec![0, 1, 2, 3, 4]);
        assert_eq!(state(10, 9).window(5), vec![5, 6, 7, 8, 9]);
        assert_eq!(state(10, 5).window(5), vec![3, 4, 5, 6, 7]);
        assert_eq!(state(10, 1).window(5), vec![0, 1, 2, 3, 4]);
        assert_eq!(state(10, 8).window(5), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_window_fewer_pages_than_size() {
        assert_eq!(state(3, 2).window(5), vec![0, 1, 2]);
        assert_eq!(state(1, 0).window(5), vec![0]);
        assert!(state(0, 0).window(5).is_empty());
        assert!(state(10, 4).window(0).is_empty());
    }

    #[test]
    fn test_window_even_size() {
        assert_eq!(state(10, 5).window(4), vec![3, 4, 5, 6]);
        assert_eq!(state(10, 9).window(4), vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_advance_to_clamps() {
        assert_eq!(state(4, 10).page_index(), 3);
        assert_eq!(state(4, -3).page_index(), 0);
        assert_eq!(state(4, 2).page_index(), 2);
        assert_eq!(state(0, 7).page_index(), 0);
    }

    #[test]
    fn test_with_totals_reclamps() {
        let shrunk = state(10, 8).with_totals(3);
        assert_eq!(shrunk.page_index(), 2);
        assert_eq!(shrunk.total_pages(), 3);

        let emptied = state(10, 8).with_totals(0);
        assert_eq!(emptied.page_index(), 0);
    }

    #[test]
    fn test_index_always_in_bounds() {
        for total in 0..12u32 {
            for target in -3..15i64 {
                let s = state(total, target);
                if total > 0 {
                    assert!(s.page_index() < total);
                } else {
                    assert_eq!(s.page_index(), 0);
                }
                for page in s.window(5) {
                    assert!(page < total.max(1));
                }
            }
        }
    }

    #[test]
    fn test_navigation_flags() {
        let first = state(3, 0);
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert_eq!(first.display_number(), 1);

        let last = state(3, 2);
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(PaginationState::new(0).page_size(), 1);
    }
}
