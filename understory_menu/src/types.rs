// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: menu identifiers, row flags, key intents, and widget responses.

/// Identifier for a menu node.
///
/// Identifiers carry the epoch of the [`MenuTree`](crate::MenuTree) that
/// issued them; they go stale when the tree is cleared.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MenuId(pub(crate) u32, pub(crate) u32);

impl MenuId {
    pub(crate) const fn new(idx: u32, epoch: u32) -> Self {
        Self(idx, epoch)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn epoch(self) -> u32 {
        self.1
    }
}

/// A row of a specific menu node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RowRef {
    /// Menu owning the row.
    pub menu: MenuId,
    /// Row index in display order.
    pub row: usize,
}

impl RowRef {
    /// Create a row reference.
    pub const fn new(menu: MenuId, row: usize) -> Self {
        Self { menu, row }
    }
}

bitflags::bitflags! {
    /// Row flags controlling presentation and selectability.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RowFlags: u8 {
        /// Row shows a check mark.
        const CHECKED   = 0b0000_0001;
        /// Row is visible but cannot be highlighted or activated.
        const DISABLED  = 0b0000_0010;
        /// Row is a non-interactive divider.
        const SEPARATOR = 0b0000_0100;
    }
}

impl RowFlags {
    /// Whether a row with these flags may be highlighted and activated.
    pub const fn is_selectable(self) -> bool {
        !self.intersects(Self::DISABLED.union(Self::SEPARATOR))
    }
}

/// Keyboard navigation intent delivered to the focused menu.
///
/// These are the toolkit-neutral operations a host derives from its key
/// bindings (arrow keys, Home/End, Enter, Escape, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyIntent {
    /// Highlight the previous selectable row.
    MoveUp,
    /// Highlight the next selectable row.
    MoveDown,
    /// Leave the current submenu for its parent.
    MoveLeft,
    /// Enter the submenu disclosed by the highlighted row.
    MoveRight,
    /// Highlight the first selectable row.
    Begin,
    /// Highlight the last selectable row.
    End,
    /// Move the highlight up by roughly one visible page.
    PageUp,
    /// Move the highlight down by roughly one visible page.
    PageDown,
    /// Activate the highlighted row and dismiss the menu.
    Submit,
    /// Dismiss the menu without activating anything.
    Cancel,
}

/// What a single-level widget did with an input it was handed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WidgetResponse {
    /// The input was not relevant to the widget.
    Ignored,
    /// The widget consumed the input (for example by moving its highlight).
    Handled,
    /// The widget activated the given row; the caller runs the row's action.
    Activated(usize),
}

impl WidgetResponse {
    /// Whether the widget consumed the input.
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Kind of pointer event being routed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
}
