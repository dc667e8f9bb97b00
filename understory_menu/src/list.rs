// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless single-level list implementing [`MenuWidget`].
//!
//! [`ListMenu`] keeps everything a renderer needs (rows, frame, highlight,
//! scroll offset) and nothing it doesn't: no text shaping, no painting. Row
//! geometry comes from [`ListMetrics`]: fixed row and separator extents laid
//! out top to bottom with prefix sums, and a width estimated from the longest
//! label.
//!
//! When the tree caps its height (a submenu taller than the viewport), the list
//! scrolls vertically and keeps the highlighted row in view.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_menu::{KeyIntent, ListMenu, MenuWidget, WidgetResponse};
//!
//! let mut list = ListMenu::new();
//! list.add_row("Cut", false, false);
//! list.add_separator();
//! list.add_row("Paste", false, true);
//! list.add_row("Select All", false, false);
//! list.show(Rect::new(0.0, 0.0, 0.0, 0.0), None, false);
//!
//! // Arrow keys skip the separator and the disabled row.
//! list.on_key(KeyIntent::MoveDown);
//! list.on_key(KeyIntent::MoveDown);
//! assert_eq!(list.highlighted_row(), Some(3));
//! assert_eq!(list.on_key(KeyIntent::Submit), WidgetResponse::Activated(3));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::types::{KeyIntent, RowFlags, WidgetResponse};
use crate::widget::MenuWidget;

/// Fixed geometry used to lay out a [`ListMenu`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListMetrics {
    /// Height of a regular row.
    pub row_height: f64,
    /// Height of a separator row.
    pub separator_height: f64,
    /// Padding between the outer frame and the rows, on every side.
    pub padding: f64,
    /// Estimated advance of one label character.
    pub char_width: f64,
    /// Horizontal space reserved for the check mark and submenu arrow.
    pub gutter: f64,
    /// Minimum frame width.
    pub min_width: f64,
}

impl Default for ListMetrics {
    fn default() -> Self {
        Self {
            row_height: 22.0,
            separator_height: 9.0,
            padding: 4.0,
            char_width: 7.0,
            gutter: 24.0,
            min_width: 120.0,
        }
    }
}

/// Highlight traversal at the ends of the list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Stop at the first and last selectable rows.
    Never,
    /// Wrap from the last selectable row to the first and back.
    #[default]
    Wrap,
}

/// A row as stored by [`ListMenu`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRow {
    /// Display text; empty for separators.
    pub label: String,
    /// Presentation flags.
    pub flags: RowFlags,
}

/// Headless dropdown list.
#[derive(Clone, Debug)]
pub struct ListMenu {
    metrics: ListMetrics,
    wrap: WrapMode,
    rows: Vec<ListRow>,
    /// start offset of each row, relative to the first row
    starts: Vec<f64>,
    content_height: f64,
    label_width: f64,
    origin: Point,
    target_width: f64,
    max_height: Option<f64>,
    scroll: f64,
    highlighted: Option<usize>,
    shown: bool,
    restored_focus: bool,
}

impl Default for ListMenu {
    fn default() -> Self {
        Self::with_metrics(ListMetrics::default())
    }
}

impl ListMenu {
    /// Create an empty list with default metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list with the given metrics.
    pub fn with_metrics(metrics: ListMetrics) -> Self {
        Self {
            metrics,
            wrap: WrapMode::Wrap,
            rows: Vec::new(),
            starts: Vec::new(),
            content_height: 0.0,
            label_width: 0.0,
            origin: Point::ZERO,
            target_width: 0.0,
            max_height: None,
            scroll: 0.0,
            highlighted: None,
            shown: false,
            restored_focus: false,
        }
    }

    /// Set the wrap behavior of keyboard traversal.
    pub fn set_wrap(&mut self, wrap: WrapMode) {
        self.wrap = wrap;
    }

    /// Layout metrics.
    pub const fn metrics(&self) -> &ListMetrics {
        &self.metrics
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    /// Whether the list is attached.
    pub const fn is_shown(&self) -> bool {
        self.shown
    }

    /// Whether the last [`MenuWidget::hide`] asked to restore focus.
    pub const fn restored_focus(&self) -> bool {
        self.restored_focus
    }

    /// Current height cap, if any.
    pub const fn max_height(&self) -> Option<f64> {
        self.max_height
    }

    /// Current vertical scroll offset.
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    /// Total height of all rows.
    pub const fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Height available to rows inside the frame.
    pub fn viewport_height(&self) -> f64 {
        (self.frame_size().height - 2.0 * self.metrics.padding).max(0.0)
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.viewport_height()).max(0.0)
    }

    /// Set the scroll offset, clamped to the scrollable range.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll = offset.clamp(0.0, self.max_scroll());
    }

    /// Adjust the scroll offset by `delta`.
    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll_offset(self.scroll + delta);
    }

    /// Scroll just enough to make `row` fully visible.
    pub fn scroll_to_row(&mut self, row: usize) {
        let (Some(&start), Some(extent)) = (self.starts.get(row), self.extent_of(row)) else {
            return;
        };
        let end = start + extent;
        let viewport = self.viewport_height();
        if start < self.scroll {
            self.set_scroll_offset(start);
        } else if end > self.scroll + viewport {
            self.set_scroll_offset(end - viewport);
        }
    }

    fn extent_of(&self, row: usize) -> Option<f64> {
        let row = self.rows.get(row)?;
        Some(if row.flags.contains(RowFlags::SEPARATOR) {
            self.metrics.separator_height
        } else {
            self.metrics.row_height
        })
    }

    fn push(&mut self, label: &str, flags: RowFlags) -> usize {
        let index = self.rows.len();
        self.rows.push(ListRow {
            label: String::from(label),
            flags,
        });
        self.starts.push(self.content_height);
        self.content_height += self.extent_of(index).unwrap_or(0.0);
        let width = label.chars().count() as f64 * self.metrics.char_width;
        self.label_width = self.label_width.max(width);
        index
    }

    fn uncapped_size(&self) -> Size {
        let width = (self.label_width + self.metrics.gutter)
            .max(self.metrics.min_width)
            .max(self.target_width);
        Size::new(width, self.content_height + 2.0 * self.metrics.padding)
    }

    fn frame_size(&self) -> Size {
        let natural = self.uncapped_size();
        match self.max_height {
            Some(cap) => Size::new(natural.width, natural.height.min(cap)),
            None => natural,
        }
    }

    fn is_selectable(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.flags.is_selectable())
    }

    fn first_selectable(&self) -> Option<usize> {
        (0..self.rows.len()).find(|&i| self.is_selectable(i))
    }

    fn last_selectable(&self) -> Option<usize> {
        (0..self.rows.len()).rev().find(|&i| self.is_selectable(i))
    }

    /// Row index whose extent covers `offset`, measured from the first row.
    fn index_at_offset(&self, offset: f64) -> Option<usize> {
        if offset < 0.0 || offset >= self.content_height {
            return None;
        }
        let idx = self.starts.partition_point(|&start| start <= offset);
        idx.checked_sub(1)
    }

    fn step(&self, forward: bool) -> Option<usize> {
        let Some(current) = self.highlighted else {
            return if forward {
                self.first_selectable()
            } else {
                self.last_selectable()
            };
        };
        let next = if forward {
            (current + 1..self.rows.len()).find(|&i| self.is_selectable(i))
        } else {
            (0..current).rev().find(|&i| self.is_selectable(i))
        };
        match (next, self.wrap) {
            (Some(i), _) => Some(i),
            (None, WrapMode::Wrap) if forward => self.first_selectable(),
            (None, WrapMode::Wrap) => self.last_selectable(),
            (None, WrapMode::Never) => Some(current),
        }
    }

    fn page(&self, forward: bool) -> Option<usize> {
        let Some(current) = self.highlighted else {
            return self.step(forward);
        };
        let page = self.viewport_height().max(self.metrics.row_height);
        let from = self.starts[current];
        let within = |i: usize| {
            let distance = if forward {
                self.starts[i] - from
            } else {
                from - self.starts[i]
            };
            distance <= page
        };
        let mut below = current + 1..self.rows.len();
        let mut above = (0..current).rev();
        let rows: &mut dyn Iterator<Item = usize> = if forward { &mut below } else { &mut above };
        let mut target = None;
        for i in rows.filter(|&i| self.is_selectable(i)) {
            if target.is_some() && !within(i) {
                break;
            }
            target = Some(i);
        }
        target.or(Some(current))
    }

    fn highlight(&mut self, row: Option<usize>) -> WidgetResponse {
        let row = row.filter(|&r| self.is_selectable(r));
        if let Some(r) = row {
            self.scroll_to_row(r);
        }
        self.highlighted = row;
        WidgetResponse::Handled
    }

    fn track_pointer(&mut self, point: Point) -> WidgetResponse {
        self.highlighted = self.row_at(point).filter(|&r| self.is_selectable(r));
        if self.frame().contains(point) {
            WidgetResponse::Handled
        } else {
            WidgetResponse::Ignored
        }
    }
}

impl MenuWidget for ListMenu {
    fn add_row(&mut self, label: &str, checked: bool, disabled: bool) -> usize {
        let mut flags = RowFlags::empty();
        flags.set(RowFlags::CHECKED, checked);
        flags.set(RowFlags::DISABLED, disabled);
        self.push(label, flags)
    }

    fn add_separator(&mut self) -> usize {
        self.push("", RowFlags::SEPARATOR)
    }

    fn show(&mut self, anchor: Rect, target: Option<Rect>, anchored: bool) {
        match target.filter(|_| anchored) {
            Some(target) => {
                self.origin = Point::new(target.x0, target.y1);
                self.target_width = target.width();
            }
            None => {
                self.origin = Point::new(anchor.x0, anchor.y1);
                self.target_width = 0.0;
            }
        }
        self.max_height = None;
        self.scroll = 0.0;
        self.highlighted = None;
        self.shown = true;
    }

    fn hide(&mut self, restore_focus: bool) {
        self.shown = false;
        self.highlighted = None;
        self.restored_focus = restore_focus;
    }

    fn place(&mut self, origin: Point, max_height: Option<f64>) {
        self.origin = origin;
        self.max_height = max_height;
        self.set_scroll_offset(self.scroll);
        if let Some(row) = self.highlighted {
            self.scroll_to_row(row);
        }
    }

    fn frame(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.frame_size())
    }

    fn natural_size(&self) -> Size {
        self.uncapped_size()
    }

    fn row_rect(&self, row: usize) -> Option<Rect> {
        let start = *self.starts.get(row)?;
        let extent = self.extent_of(row)?;
        let size = self.frame_size();
        let y = self.origin.y + self.metrics.padding + start - self.scroll;
        Some(Rect::new(
            self.origin.x,
            y,
            self.origin.x + size.width,
            y + extent,
        ))
    }

    fn first_row_offset(&self) -> f64 {
        self.metrics.padding
    }

    fn row_at(&self, point: Point) -> Option<usize> {
        let frame = self.frame();
        if !self.shown || !frame.contains(point) {
            return None;
        }
        let top = frame.y0 + self.metrics.padding;
        if point.y < top || point.y >= top + self.viewport_height() {
            return None;
        }
        self.index_at_offset(point.y - top + self.scroll)
    }

    fn highlighted_row(&self) -> Option<usize> {
        self.highlighted
    }

    fn set_highlighted_row(&mut self, row: Option<usize>) {
        self.highlight(row);
    }

    fn select_first(&mut self) -> Option<usize> {
        self.highlight(self.first_selectable());
        self.highlighted
    }

    fn on_pointer_down(&mut self, point: Point) -> WidgetResponse {
        self.track_pointer(point)
    }

    fn on_pointer_move(&mut self, point: Point) -> WidgetResponse {
        self.track_pointer(point)
    }

    fn on_pointer_up(&mut self, point: Point) -> WidgetResponse {
        match self.highlighted {
            Some(row) if self.row_at(point) == Some(row) => WidgetResponse::Activated(row),
            _ => WidgetResponse::Ignored,
        }
    }

    fn on_key(&mut self, intent: KeyIntent) -> WidgetResponse {
        match intent {
            KeyIntent::MoveUp => self.highlight(self.step(false)),
            KeyIntent::MoveDown => self.highlight(self.step(true)),
            KeyIntent::Begin => self.highlight(self.first_selectable()),
            KeyIntent::End => self.highlight(self.last_selectable()),
            KeyIntent::PageUp => self.highlight(self.page(false)),
            KeyIntent::PageDown => self.highlight(self.page(true)),
            KeyIntent::Submit => match self.highlighted {
                Some(row) => WidgetResponse::Activated(row),
                None => WidgetResponse::Handled,
            },
            KeyIntent::Cancel => WidgetResponse::Handled,
            KeyIntent::MoveLeft | KeyIntent::MoveRight => WidgetResponse::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(labels: &[&str]) -> ListMenu {
        let mut list = ListMenu::new();
        for label in labels {
            match *label {
                "-" => list.add_separator(),
                l if l.starts_with('~') => list.add_row(&l[1..], false, true),
                l => list.add_row(l, false, false),
            };
        }
        list.show(Rect::new(10.0, 10.0, 10.0, 10.0), None, false);
        list
    }

    #[test]
    fn rows_are_laid_out_with_prefix_sums() {
        let l = list(&["A", "-", "B"]);
        assert_eq!(l.frame(), Rect::new(10.0, 10.0, 130.0, 10.0 + 4.0 + 22.0 + 9.0 + 22.0 + 4.0));
        assert_eq!(l.row_rect(0), Some(Rect::new(10.0, 14.0, 130.0, 36.0)));
        assert_eq!(l.row_rect(1), Some(Rect::new(10.0, 36.0, 130.0, 45.0)));
        assert_eq!(l.row_rect(2), Some(Rect::new(10.0, 45.0, 130.0, 67.0)));
        assert_eq!(l.row_rect(3), None);
    }

    #[test]
    fn width_grows_with_longest_label_and_anchored_target() {
        let mut l = list(&["A very long label indeed"]);
        assert_eq!(l.frame().width(), 24.0 * 7.0 + 24.0);

        l.show(Rect::ZERO, Some(Rect::new(0.0, 0.0, 400.0, 30.0)), true);
        assert_eq!(l.frame().width(), 400.0);
        assert_eq!(l.frame().origin(), Point::new(0.0, 30.0));
    }

    #[test]
    fn hit_testing_maps_points_to_rows() {
        let l = list(&["A", "-", "B"]);
        assert_eq!(l.row_at(Point::new(50.0, 20.0)), Some(0));
        assert_eq!(l.row_at(Point::new(50.0, 40.0)), Some(1));
        assert_eq!(l.row_at(Point::new(50.0, 60.0)), Some(2));
        // Padding and outside.
        assert_eq!(l.row_at(Point::new(50.0, 11.0)), None);
        assert_eq!(l.row_at(Point::new(500.0, 20.0)), None);
    }

    #[test]
    fn pointer_highlight_skips_unselectable_rows() {
        let mut l = list(&["A", "-", "~B", "C"]);
        assert_eq!(l.on_pointer_move(Point::new(50.0, 20.0)), WidgetResponse::Handled);
        assert_eq!(l.highlighted_row(), Some(0));
        l.on_pointer_move(Point::new(50.0, 40.0));
        assert_eq!(l.highlighted_row(), None, "separator is not selectable");
        l.on_pointer_move(Point::new(50.0, 55.0));
        assert_eq!(l.highlighted_row(), None, "disabled row is not selectable");
        assert_eq!(l.on_pointer_move(Point::new(900.0, 900.0)), WidgetResponse::Ignored);
        assert_eq!(l.highlighted_row(), None);
    }

    #[test]
    fn pointer_up_activates_highlight_under_pointer() {
        let mut l = list(&["A", "B"]);
        let b = l.row_rect(1).unwrap().center();
        l.on_pointer_down(b);
        assert_eq!(l.on_pointer_up(b), WidgetResponse::Activated(1));
        let a = l.row_rect(0).unwrap().center();
        assert_eq!(l.on_pointer_up(a), WidgetResponse::Ignored);
    }

    #[test]
    fn keyboard_cycles_with_wrap() {
        let mut l = list(&["A", "-", "B", "~C"]);
        l.on_key(KeyIntent::MoveDown);
        assert_eq!(l.highlighted_row(), Some(0));
        l.on_key(KeyIntent::MoveDown);
        assert_eq!(l.highlighted_row(), Some(2));
        l.on_key(KeyIntent::MoveDown);
        assert_eq!(l.highlighted_row(), Some(0));
        l.on_key(KeyIntent::MoveUp);
        assert_eq!(l.highlighted_row(), Some(2));
        l.on_key(KeyIntent::Begin);
        assert_eq!(l.highlighted_row(), Some(0));
        l.on_key(KeyIntent::End);
        assert_eq!(l.highlighted_row(), Some(2));
    }

    #[test]
    fn keyboard_without_wrap_stops_at_ends() {
        let mut l = list(&["A", "B"]);
        l.set_wrap(WrapMode::Never);
        l.on_key(KeyIntent::End);
        l.on_key(KeyIntent::MoveDown);
        assert_eq!(l.highlighted_row(), Some(1));
        l.on_key(KeyIntent::Begin);
        l.on_key(KeyIntent::MoveUp);
        assert_eq!(l.highlighted_row(), Some(0));
    }

    #[test]
    fn horizontal_intents_are_ignored() {
        let mut l = list(&["A"]);
        assert_eq!(l.on_key(KeyIntent::MoveRight), WidgetResponse::Ignored);
        assert_eq!(l.on_key(KeyIntent::MoveLeft), WidgetResponse::Ignored);
        assert_eq!(l.on_key(KeyIntent::Cancel), WidgetResponse::Handled);
        assert_eq!(l.on_key(KeyIntent::Submit), WidgetResponse::Handled);
    }

    #[test]
    fn capped_height_scrolls_highlight_into_view() {
        let labels = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        let mut l = list(&labels);
        // Room for exactly three rows.
        l.place(Point::new(10.0, 0.0), Some(3.0 * 22.0 + 8.0));
        assert_eq!(l.viewport_height(), 66.0);
        assert_eq!(l.max_scroll(), 220.0 - 66.0);

        l.on_key(KeyIntent::End);
        assert_eq!(l.highlighted_row(), Some(9));
        assert_eq!(l.scroll_offset(), 154.0);
        let last = l.row_rect(9).unwrap();
        assert_eq!(last.y1, l.frame().y1 - 4.0);

        l.on_key(KeyIntent::Begin);
        assert_eq!(l.scroll_offset(), 0.0);
    }

    #[test]
    fn scrolled_hit_testing_accounts_for_offset() {
        let labels = ["0", "1", "2", "3", "4", "5"];
        let mut l = list(&labels);
        l.place(Point::new(0.0, 0.0), Some(2.0 * 22.0 + 8.0));
        l.set_scroll_offset(44.0);
        assert_eq!(l.row_at(Point::new(5.0, 4.0 + 1.0)), Some(2));
        // Below the visible viewport, inside bottom padding.
        assert_eq!(l.row_at(Point::new(5.0, 49.0)), None);
    }

    #[test]
    fn paging_moves_about_one_viewport() {
        let labels = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        let mut l = list(&labels);
        l.place(Point::new(0.0, 0.0), Some(3.0 * 22.0 + 8.0));
        l.on_key(KeyIntent::Begin);
        l.on_key(KeyIntent::PageDown);
        assert_eq!(l.highlighted_row(), Some(3));
        l.on_key(KeyIntent::PageUp);
        assert_eq!(l.highlighted_row(), Some(0));
    }

    #[test]
    fn show_resets_transient_state() {
        let mut l = list(&["A", "B"]);
        l.on_key(KeyIntent::MoveDown);
        l.place(Point::ZERO, Some(10.0));
        l.show(Rect::new(5.0, 5.0, 5.0, 5.0), None, false);
        assert_eq!(l.highlighted_row(), None);
        assert_eq!(l.max_height(), None);
        assert_eq!(l.scroll_offset(), 0.0);
    }

    #[test]
    fn natural_size_ignores_the_cap() {
        let mut l = list(&["0", "1", "2", "3"]);
        l.place(Point::ZERO, Some(30.0));
        assert_eq!(l.frame().height(), 30.0);
        assert_eq!(l.natural_size(), Size::new(120.0, 4.0 * 22.0 + 8.0));
    }

    #[test]
    fn hide_records_focus_restoration() {
        let mut l = list(&["A"]);
        l.hide(true);
        assert!(!l.is_shown());
        assert!(l.restored_focus());
        assert_eq!(l.row_at(Point::new(20.0, 20.0)), None);
    }
}
