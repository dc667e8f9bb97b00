// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for unit tests.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect};

use crate::config::{DEFAULT_HOVER_DELAY_MS, MenuConfig};
use crate::list::ListMenu;
use crate::tree::MenuTree;
use crate::types::MenuId;
use crate::widget::MenuWidget;

pub(crate) const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);
pub(crate) const DELAY: u64 = DEFAULT_HOVER_DELAY_MS;

/// Activation log shared with item actions.
pub(crate) type Log = Rc<RefCell<Vec<String>>>;

/// Build a tree with one item per path and open it at (10, 10).
pub(crate) fn open_tree(paths: &[&str]) -> MenuTree<ListMenu> {
    open_tree_logging(paths).0
}

/// Like [`open_tree`], with actions that record their own path.
pub(crate) fn open_tree_logging(paths: &[&str]) -> (MenuTree<ListMenu>, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut tree = MenuTree::new(MenuConfig::default().with_viewport(VIEWPORT));
    for path in paths {
        let log = Rc::clone(&log);
        let name = String::from(*path);
        tree.add_item(path, false, move || log.borrow_mut().push(name.clone()))
            .unwrap();
    }
    tree.open(Rect::new(10.0, 10.0, 10.0, 10.0), None, false)
        .unwrap();
    (tree, log)
}

/// Center of a row in world coordinates.
pub(crate) fn center(tree: &MenuTree<ListMenu>, menu: MenuId, row: usize) -> Point {
    tree.widget(menu)
        .and_then(|w| w.row_rect(row))
        .map(|r| r.center())
        .unwrap()
}

/// Rest the pointer on a disclosing row until its submenu opens and settles.
///
/// Returns the submenu and the time after settling.
pub(crate) fn hover_open(
    tree: &mut MenuTree<ListMenu>,
    menu: MenuId,
    row: usize,
    now: u64,
) -> (MenuId, u64) {
    tree.pointer_move(center(tree, menu, row), now);
    let due = now + DELAY;
    tree.tick(due);
    tree.tick(due);
    let child = tree.submenu_of(menu, row).unwrap();
    assert!(tree.is_visible(child), "hovering must disclose the submenu");
    (child, due)
}
