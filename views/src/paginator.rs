//! Page arithmetic for the coin table.

use std::ops::Range;

/// Fixed page size of the list view.
pub const ITEMS_PER_PAGE: usize = 20;

/// Number of pages needed for `total_items`, never less than one.
///
/// # Panics
///
/// Panics if `items_per_page` is zero.
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    assert!(items_per_page > 0, "items_per_page must be greater than zero");
    total_items.div_ceil(items_per_page).max(1)
}

pub fn can_go_previous(current_page: usize) -> bool {
    current_page > 1
}

pub fn can_go_next(current_page: usize, total_pages: usize) -> bool {
    current_page < total_pages
}

/// Moves `delta` pages from `current_page`, clamped to `[1, total_pages]`.
pub fn request_page(current_page: usize, delta: isize, total_pages: usize) -> usize {
    let last = total_pages.max(1);
    let target = isize::try_from(current_page)
        .unwrap_or(isize::MAX)
        .saturating_add(delta);
    if target < 1 {
        1
    } else {
        (target as usize).min(last)
    }
}

/// Current page of one list view plus the inputs it is derived from.
///
/// `current_page` stays within `[1, total_pages]` across every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
    total_items: usize,
}

impl PageState {
    /// # Panics
    ///
    /// Panics if `items_per_page` is zero.
    pub fn new(items_per_page: usize) -> Self {
        Self::with_total(items_per_page, 0)
    }

    pub fn with_total(items_per_page: usize, total_items: usize) -> Self {
        assert!(items_per_page > 0, "items_per_page must be greater than zero");
        Self {
            current_page: 1,
            items_per_page,
            total_items,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.items_per_page)
    }

    /// Replaces the item count after a refetch and re-clamps the current page.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.current_page.clamp(1, self.total_pages());
    }

    pub fn can_go_previous(&self) -> bool {
        can_go_previous(self.current_page)
    }

    pub fn can_go_next(&self) -> bool {
        can_go_next(self.current_page, self.total_pages())
    }

    pub fn next(&mut self) -> usize {
        self.step(1)
    }

    pub fn previous(&mut self) -> usize {
        self.step(-1)
    }

    pub fn step(&mut self, delta: isize) -> usize {
        self.current_page = request_page(self.current_page, delta, self.total_pages());
        self.current_page
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages());
        self.current_page
    }

    /// `"current / total"`
    pub fn indicator(&self) -> String {
        format!("{} / {}", self.current_page, self.total_pages())
    }

    /// Index bounds of the current page, clipped to `total_items`.
    pub fn window(&self) -> Range<usize> {
        let start = (self.current_page - 1)
            .saturating_mul(self.items_per_page)
            .min(self.total_items);
        let end = start
            .saturating_add(self.items_per_page)
            .min(self.total_items);
        start..end
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(ITEMS_PER_PAGE)
    }
}
