// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard traversal between menu levels.
//!
//! Intents go to the focused menu's widget first, which owns vertical
//! movement and activation. [`transition`] then decides what the intent means
//! for the tree:
//!
//! | Intent               | Effect                                             |
//! |----------------------|----------------------------------------------------|
//! | `MoveRight`          | enter the submenu of the highlighted row, if any   |
//! | `MoveLeft`           | leave a submenu for its parent (not at the root)   |
//! | `Submit` / `Cancel`  | close the whole tree                               |
//! | anything else        | nothing beyond what the widget did                 |
//!
//! ```
//! use understory_menu::KeyIntent;
//! use understory_menu::keyboard::{Transition, transition};
//!
//! assert_eq!(
//!     transition(KeyIntent::MoveRight, true, Some(2), |row| row == 2),
//!     Transition::Descend(2)
//! );
//! assert_eq!(transition(KeyIntent::MoveLeft, true, None, |_| false), Transition::None);
//! ```

use crate::tree::MenuTree;
use crate::types::{KeyIntent, RowRef, WidgetResponse};
use crate::widget::MenuWidget;

/// Effect of a key intent on the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The tree is unaffected.
    None,
    /// Open and focus the submenu disclosed by the given row.
    Descend(usize),
    /// Close the focused submenu and focus its parent.
    Ascend,
    /// Close the whole tree.
    Dismiss,
}

/// Decide the tree transition for `intent` at the focused menu.
///
/// `highlighted` is the menu's highlighted row after the widget handled the
/// intent; `discloses` reports whether a row has a submenu.
pub fn transition(
    intent: KeyIntent,
    is_root: bool,
    highlighted: Option<usize>,
    discloses: impl Fn(usize) -> bool,
) -> Transition {
    match intent {
        KeyIntent::Submit | KeyIntent::Cancel => Transition::Dismiss,
        KeyIntent::MoveRight => match highlighted {
            Some(row) if discloses(row) => Transition::Descend(row),
            _ => Transition::None,
        },
        KeyIntent::MoveLeft if !is_root => Transition::Ascend,
        _ => Transition::None,
    }
}

impl<W: MenuWidget> MenuTree<W> {
    /// Deliver a key intent to the focused menu.
    ///
    /// Returns `false` when the intent was not used, so the host can handle
    /// it (for example `MoveLeft` at the root).
    pub fn key(&mut self, intent: KeyIntent) -> bool {
        let Some(menu) = self.focused.filter(|&m| self.is_visible(m)) else {
            return false;
        };
        let response = self.nodes[menu.idx()].widget.on_key(intent);
        if let WidgetResponse::Activated(row) = response {
            self.run_action(RowRef::new(menu, row));
        }
        let mut handled = response.is_handled();

        let node = &self.nodes[menu.idx()];
        let step = transition(
            intent,
            node.is_root(),
            node.widget.highlighted_row(),
            |row| node.submenus.contains_key(&row),
        );
        log::trace!("{intent:?} at {menu:?}: {step:?}");
        match step {
            Transition::None => {}
            Transition::Dismiss => {
                self.dismiss();
                handled = true;
            }
            Transition::Descend(row) => match self.open_submenu(RowRef::new(menu, row)) {
                Ok(child) => {
                    if self.config.select_first_on_keyboard_open {
                        self.nodes[child.idx()].widget.select_first();
                    }
                    self.focused = Some(child);
                    handled = true;
                }
                Err(err) => log::warn!("could not enter submenu of {menu:?}: {err}"),
            },
            Transition::Ascend => {
                let parent = self.nodes[menu.idx()].owner;
                self.close_node(menu, false);
                self.focused = parent;
                handled = true;
            }
        }
        handled
    }
}
