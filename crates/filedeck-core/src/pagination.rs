//! Page position and the derived state of the Previous/Next controls.

use filedeck_api_models::PaginationBlock;

/// Page position reported by the server, normalised so
/// `1 <= current_page <= last_page`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    /// Page currently shown, 1-based.
    pub current_page: u32,
    /// Records per page.
    pub per_page: u32,
    /// Highest valid page.
    pub last_page: u32,
    /// Records across all pages.
    pub total: u64,
}

impl From<PaginationBlock> for PaginationState {
    fn from(block: PaginationBlock) -> Self {
        let last_page = block.last_page.max(1);
        Self {
            current_page: block.current_page.clamp(1, last_page),
            per_page: block.per_page,
            last_page,
            total: block.total,
        }
    }
}

impl PaginationState {
    /// Whether a page before this one exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a page after this one exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Target of the Previous control.
    #[must_use]
    pub const fn previous_page(&self) -> Option<u32> {
        if self.has_previous() {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    /// Target of the Next control.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        if self.has_next() {
            Some(self.current_page + 1)
        } else {
            None
        }
    }

    /// Controls are hidden while everything fits on one page.
    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.total > u64::from(self.per_page)
    }

    /// 1-based row number that continues across pages.
    #[must_use]
    pub fn serial_number(&self, index: usize) -> u64 {
        let offset = u64::from(self.current_page - 1) * u64::from(self.per_page);
        offset + index as u64 + 1
    }

    /// Text between the two controls.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.last_page)
    }
}

/// Everything a renderer needs to draw the pagination bar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationView {
    /// Whether the bar is drawn at all.
    pub visible: bool,
    /// Previous control disabled.
    pub previous_disabled: bool,
    /// Next control disabled.
    pub next_disabled: bool,
    /// "Page X of Y".
    pub label: String,
    /// Page requested by Previous.
    pub previous_page: Option<u32>,
    /// Page requested by Next.
    pub next_page: Option<u32>,
}

/// Single derivation used by both the list and the search path. A response
/// without a pagination block hides the bar.
#[must_use]
pub fn derive_view(state: Option<&PaginationState>) -> PaginationView {
    let Some(state) = state else {
        return PaginationView::default();
    };
    PaginationView {
        visible: state.controls_visible(),
        previous_disabled: !state.has_previous(),
        next_disabled: !state.has_next(),
        label: state.label(),
        previous_page: state.previous_page(),
        next_page: state.next_page(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(current_page: u32, last_page: u32, per_page: u32, total: u64) -> PaginationState {
        PaginationState::from(PaginationBlock {
            current_page,
            per_page,
            last_page,
            total,
        })
    }

    #[test]
    fn boundaries_disable_controls() {
        let last = 4;
        for page in 1..=last {
            let view = derive_view(Some(&state(page, last, 10, 35)));
            assert_eq!(view.label, format!("Page {page} of {last}"));
            assert_eq!(view.previous_disabled, page == 1);
            assert_eq!(view.next_disabled, page == last);
        }
    }

    #[test]
    fn visibility_follows_total() {
        assert!(!derive_view(Some(&state(1, 1, 10, 10))).visible);
        assert!(!derive_view(Some(&state(1, 1, 10, 0))).visible);
        assert!(derive_view(Some(&state(1, 2, 10, 11))).visible);
        assert!(!derive_view(None).visible);
    }

    #[test]
    fn out_of_range_block_is_clamped() {
        let clamped = state(9, 3, 10, 25);
        assert_eq!(clamped.current_page, 3);
        let zeroed = state(0, 0, 10, 0);
        assert_eq!((zeroed.current_page, zeroed.last_page), (1, 1));
    }

    #[test]
    fn neighbours_and_serials() {
        let middle = state(2, 3, 10, 25);
        assert_eq!(middle.previous_page(), Some(1));
        assert_eq!(middle.next_page(), Some(3));
        assert_eq!(middle.serial_number(0), 11);
        assert_eq!(state(3, 3, 10, 25).next_page(), None);
    }
}
