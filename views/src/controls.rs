use common::models::TimeRange;
use serde::Serialize;

use crate::paginator::PageState;

/// Previous/Next controls and the page indicator under the table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pager {
    pub current_page: usize,
    pub total_pages: usize,
    pub indicator: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl From<&PageState> for Pager {
    fn from(page: &PageState) -> Self {
        Self {
            current_page: page.current_page(),
            total_pages: page.total_pages(),
            indicator: page.indicator(),
            previous_enabled: page.can_go_previous(),
            next_enabled: page.can_go_next(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RangeButton {
    pub range: TimeRange,
    pub label: &'static str,
    pub active: bool,
}

/// One button per time range, with `selected` marked active.
pub fn range_buttons(selected: TimeRange) -> Vec<RangeButton> {
    TimeRange::ALL
        .into_iter()
        .map(|range| RangeButton {
            range,
            label: range.label(),
            active: range == selected,
        })
        .collect()
}
