// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised for misconfigured or misused menu trees.
//!
//! Only contract violations are errors. Closing a closed menu, re-disclosing
//! an open submenu, or activating a row without an action are silent no-ops.

use crate::types::MenuId;

/// A menu tree contract violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// No root-covering region was configured.
    #[error("no viewport is configured for the root-covering region")]
    MissingViewport,
    /// The identifier belongs to a cleared tree.
    #[error("menu {0:?} is stale")]
    StaleMenu(MenuId),
    /// The menu (or the parent a submenu is anchored to) is not attached.
    #[error("menu {0:?} is not visible")]
    NotVisible(MenuId),
    /// The widget could not report geometry for a row.
    #[error("menu {menu:?} has no row {row}")]
    NoSuchRow {
        /// Menu that was queried.
        menu: MenuId,
        /// Row index that was requested.
        row: usize,
    },
    /// The row has no submenu to disclose.
    #[error("row {row} of menu {menu:?} does not disclose a submenu")]
    NotDisclosing {
        /// Menu owning the row.
        menu: MenuId,
        /// Row index.
        row: usize,
    },
    /// Rows can only be added while the menu is closed.
    #[error("rows cannot be added while the menu is open")]
    MenuOpen,
}
