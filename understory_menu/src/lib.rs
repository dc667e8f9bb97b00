// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Menu: headless nested dropdown menus.
//!
//! ## Overview
//!
//! This crate coordinates a stack of single-level dropdown lists so they
//! behave as one hierarchical menu. It does not draw anything. Each level is a
//! host-provided [`MenuWidget`]; the crate decides when levels open and close,
//! where submenus go, and which level an input belongs to.
//!
//! - **Building**: items are addressed by `/`-delimited paths. Intermediate
//!   levels are created on first use together with the row that discloses
//!   them. See [`MenuTree::add_item`].
//! - **Hover disclosure**: resting the pointer on a disclosing row for
//!   [`MenuConfig::hover_delay_ms`] opens its submenu. Leaving early pauses the
//!   timer; coming back restarts it. See [`hover`].
//! - **Pointer routing**: open levels overlap each other and a shared
//!   root-covering region. Events go to the innermost level under the pointer,
//!   and a press outside every level dismisses the menu. See [`router`].
//! - **Placement**: submenus open beside their row and are kept inside the
//!   viewport, flipping left or capping their height when needed. See
//!   [`anchor`].
//! - **Keyboard**: arrow keys move between rows and levels; Submit and Cancel
//!   close the menu. See [`keyboard`].
//!
//! ## Time
//!
//! The crate never reads a clock. Pointer events carry a millisecond
//! timestamp, and [`MenuTree::tick`] runs due work. Call it once per event
//! loop turn, or schedule a wake-up at [`MenuTree::next_deadline`].
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_menu::{KeyIntent, ListMenu, MenuConfig, MenuTree, MenuWidget};
//!
//! let config = MenuConfig::default().with_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let mut menu: MenuTree<ListMenu> = MenuTree::new(config);
//! menu.add_item("New", false, || {}).unwrap();
//! menu.add_separator("").unwrap();
//! menu.add_item("Export/PNG", false, || {}).unwrap();
//! menu.add_item("Export/SVG", false, || {}).unwrap();
//!
//! menu.open(Rect::new(20.0, 20.0, 20.0, 20.0), None, false).unwrap();
//! let root = menu.root();
//!
//! // Rest on "Export" until the hover delay elapses.
//! let export = menu.widget(root).unwrap().row_rect(2).unwrap().center();
//! menu.pointer_move(export, 0);
//! menu.tick(500);
//! menu.tick(500);
//! assert_eq!(menu.depth(), 2);
//!
//! // Keyboard focus follows the opened submenu.
//! menu.key(KeyIntent::MoveDown);
//! menu.key(KeyIntent::MoveLeft);
//! assert_eq!(menu.focused(), Some(root));
//!
//! // A press outside every level closes the whole menu.
//! menu.pointer_down(Point::new(700.0, 500.0), 600);
//! assert!(!menu.is_open());
//! ```
//!
//! ## Widgets
//!
//! [`ListMenu`] is a headless [`MenuWidget`] with fixed-height rows, keyboard
//! highlight cycling, and vertical scrolling. Hosts with their own list
//! widget implement [`MenuWidget`] and build the tree with
//! [`MenuTree::with_factory`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod anchor;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod hover;
pub mod keyboard;
pub mod list;
pub mod path;
pub mod router;
pub mod schedule;
pub mod tree;
pub mod types;
pub mod widget;

#[cfg(test)]
mod testing;

pub use config::MenuConfig;
pub use error::MenuError;
pub use list::{ListMenu, ListMetrics};
pub use tree::{MenuNode, MenuTree, Row};
pub use types::{KeyIntent, MenuId, PointerKind, RowFlags, RowRef, WidgetResponse};
pub use widget::MenuWidget;
