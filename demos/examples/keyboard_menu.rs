// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard traversal of a menu anchored near the right edge of the viewport.
//!
//! The menu drops down below a toolbar button close to the right edge, so the
//! submenu entered with `MoveRight` flips to the left of its parent. The long
//! `Recent` submenu is taller than the viewport and gets its height capped.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_menu_demos --example keyboard_menu`

use env_logger::Env;
use kurbo::Rect;
use understory_menu::{KeyIntent, ListMenu, MenuConfig, MenuTree, MenuWidget};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let viewport = Rect::new(0.0, 0.0, 480.0, 320.0);
    let mut menu: MenuTree<ListMenu> = MenuTree::new(MenuConfig::default().with_viewport(viewport));
    for path in ["New", "Open", "Save"] {
        menu.add_item(path, false, move || log::info!("{path}"))
            .expect("menu is closed");
    }
    menu.add_separator("").expect("menu is closed");
    for i in 0..24 {
        menu.add_item_with_data(
            "Recent/file",
            false,
            |i: &u32| log::info!("open recent file #{i}"),
            i,
        )
        .expect("menu is closed");
    }

    let button = Rect::new(330.0, 0.0, 420.0, 28.0);
    menu.open(button, Some(button), true)
        .expect("viewport is configured");
    let root = menu.root();
    println!("root frame: {:?}", menu.widget(root).map(MenuWidget::frame));

    for intent in [KeyIntent::End, KeyIntent::MoveRight] {
        let handled = menu.key(intent);
        println!("{intent:?} handled={handled}");
    }
    menu.tick(0);

    let recent = menu.node_for_path("Recent").expect("Recent exists");
    if let Some(widget) = menu.widget(recent) {
        println!(
            "recent frame: {:?} (capped at {:?})",
            widget.frame(),
            widget.max_height()
        );
    }

    for intent in [KeyIntent::End, KeyIntent::PageUp, KeyIntent::Submit] {
        let handled = menu.key(intent);
        let scroll = menu.widget(recent).map(ListMenu::scroll_offset);
        println!("{intent:?} handled={handled} scroll={scroll:?}");
    }
    println!("open after submit: {}", menu.is_open());

    // Unhandled intents are left to the host.
    println!("MoveLeft on a closed menu handled={}", menu.key(KeyIntent::MoveLeft));
}
