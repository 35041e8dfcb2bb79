//! Horizontally scrolling strip of fixed-width columns.
//!
//! Only the columns that fit the viewport are rendered; the selected column is
//! always kept in view.

use std::ops::Range;

#[derive(Debug, Clone, Default)]
pub struct ColumnStrip {
    len: usize,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl ColumnStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the column count, clamping selection and scroll.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        if self.scroll_offset > self.selected {
            self.scroll_offset = self.selected;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn select_left(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_right(&mut self, n: usize) {
        if self.len == 0 {
            return;
        }
        self.selected = (self.selected + n).min(self.len - 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }

    /// Number of whole columns of `column_width` that fit in `width` cells.
    pub fn fit(width: u16, column_width: u16) -> usize {
        if column_width == 0 {
            return 0;
        }
        (width / column_width) as usize
    }

    pub fn ensure_visible(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible {
            self.scroll_offset = self.selected + 1 - visible;
        }
    }

    /// Column indices to render. Call `ensure_visible` first.
    pub fn visible_range(&self, visible: usize) -> Range<usize> {
        let start = self.scroll_offset.min(self.len);
        start..(start + visible).min(self.len)
    }

    /// Select the column at `slot` within the viewport. Returns true on a hit.
    pub fn handle_click(&mut self, slot: usize) -> bool {
        let target = self.scroll_offset + slot;
        if target < self.len {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn has_more_left(&self) -> bool {
        self.scroll_offset > 0
    }

    pub fn has_more_right(&self, visible: usize) -> bool {
        self.scroll_offset + visible < self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stays_visible() {
        let mut strip = ColumnStrip::new();
        strip.set_len(10);
        strip.select_right(6);
        strip.ensure_visible(3);
        assert_eq!(strip.visible_range(3), 4..7);
        assert!(strip.has_more_left());
        assert!(strip.has_more_right(3));

        strip.select_left(5);
        strip.ensure_visible(3);
        assert_eq!(strip.visible_range(3), 1..4);
    }

    #[test]
    fn shrinking_clamps_selection() {
        let mut strip = ColumnStrip::new();
        strip.set_len(8);
        strip.select_last();
        strip.ensure_visible(2);
        strip.set_len(3);
        assert_eq!(strip.selected, 2);
        strip.ensure_visible(2);
        assert_eq!(strip.visible_range(2), 2..3);

        strip.set_len(0);
        assert!(strip.is_empty());
        assert_eq!(strip.visible_range(2), 0..0);
        strip.select_right(1);
        assert_eq!(strip.selected, 0);
    }

    #[test]
    fn click_selects_within_viewport() {
        let mut strip = ColumnStrip::new();
        strip.set_len(5);
        strip.scroll_offset = 2;
        assert!(strip.handle_click(1));
        assert_eq!(strip.selected, 3);
        assert!(!strip.handle_click(4));
    }

    #[test]
    fn fit_counts_whole_columns() {
        assert_eq!(ColumnStrip::fit(95, 30), 3);
        assert_eq!(ColumnStrip::fit(29, 30), 0);
        assert_eq!(ColumnStrip::fit(10, 0), 0);
    }
}
