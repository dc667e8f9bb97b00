// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single-level menu widget contract.
//!
//! [`MenuTree`](crate::MenuTree) does not draw rows, lay out text, or scroll.
//! Every level of the tree is one instance of a host-provided widget that
//! implements [`MenuWidget`]. The tree drives it through this trait: it adds
//! rows while the menu is built, attaches and positions it while the menu is
//! open, and forwards pointer and keyboard input to it so the widget keeps
//! owning its own highlight and hit-testing.
//!
//! ## Coordinates
//!
//! All points and rectangles are in world coordinates, the same space as
//! [`MenuConfig::viewport`](crate::MenuConfig::viewport).
//!
//! ## Activation
//!
//! Widgets never run actions. When an input activates a row, the widget
//! returns [`WidgetResponse::Activated`] and the tree runs the row's action and
//! decides what to close.
//!
//! See [`ListMenu`](crate::ListMenu) for a headless implementation.

use kurbo::{Point, Rect, Size};

use crate::types::{KeyIntent, WidgetResponse};

/// A single-level dropdown list, one per menu node.
pub trait MenuWidget {
    /// Append a row and return its index.
    fn add_row(&mut self, label: &str, checked: bool, disabled: bool) -> usize;

    /// Append a separator row and return its index.
    fn add_separator(&mut self) -> usize;

    /// Attach the widget's region to the screen.
    ///
    /// The root is shown at `anchor` (optionally sized against `target` when
    /// `anchored`). Submenus are shown at a zero-sized anchor at their
    /// provisional origin and positioned later with [`MenuWidget::place`].
    /// Showing resets any previous highlight, height cap, and scroll.
    fn show(&mut self, anchor: Rect, target: Option<Rect>, anchored: bool);

    /// Detach the widget's region.
    ///
    /// `restore_focus` asks the widget to give focus back to whatever held it
    /// before the menu opened. Only the root is ever hidden with `true`.
    fn hide(&mut self, restore_focus: bool);

    /// Move the outer frame's top-left corner to `origin` and cap its height.
    fn place(&mut self, origin: Point, max_height: Option<f64>);

    /// The outer frame as laid out.
    fn frame(&self) -> Rect;

    /// Size of the outer frame with no height cap applied.
    ///
    /// Placement measures this rather than [`MenuWidget::frame`] so repeated
    /// placement is not skewed by a cap from an earlier one.
    fn natural_size(&self) -> Size;

    /// Bounds of a row, or `None` if the row does not exist.
    fn row_rect(&self, row: usize) -> Option<Rect>;

    /// Vertical offset of the first row inside the outer frame.
    fn first_row_offset(&self) -> f64;

    /// Row under a point, if any.
    fn row_at(&self, point: Point) -> Option<usize>;

    /// The highlighted row, if any.
    fn highlighted_row(&self) -> Option<usize>;

    /// Set the highlighted row. Rows that cannot be selected clear the highlight.
    fn set_highlighted_row(&mut self, row: Option<usize>);

    /// Highlight the first selectable row and return it.
    fn select_first(&mut self) -> Option<usize>;

    /// Pointer pressed; updates the highlight from the widget's own hit-testing.
    fn on_pointer_down(&mut self, point: Point) -> WidgetResponse;

    /// Pointer moved; updates the highlight from the widget's own hit-testing.
    fn on_pointer_move(&mut self, point: Point) -> WidgetResponse;

    /// Pointer released; may activate the highlighted row.
    fn on_pointer_up(&mut self, point: Point) -> WidgetResponse;

    /// Keyboard intent; may move the highlight or activate a row.
    fn on_key(&mut self, intent: KeyIntent) -> WidgetResponse;
}
