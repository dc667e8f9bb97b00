// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A four-level menu driven by a scripted pointer session.
//!
//! The pointer rests on `Sub` until it opens, walks down two more levels the
//! same way, and releases on a leaf. Every step prints the open chain and the
//! frame of each visible level.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_menu_demos --example sample_menu`

use std::cell::RefCell;
use std::rc::Rc;

use env_logger::Env;
use kurbo::{Point, Rect};
use understory_menu::{ListMenu, MenuConfig, MenuId, MenuTree, MenuWidget};

type Clicks = Rc<RefCell<Vec<String>>>;

fn build(clicks: &Clicks) -> Result<MenuTree<ListMenu>, understory_menu::MenuError> {
    let config = MenuConfig::default().with_viewport(Rect::new(0.0, 0.0, 640.0, 360.0));
    let mut menu = MenuTree::new(config);

    let item = |name: &'static str| {
        let clicks = Rc::clone(clicks);
        move || clicks.borrow_mut().push(name.to_owned())
    };

    menu.add_item("Item 1", false, item("Item 1"))?;
    menu.add_item("Item 2(Checked)", true, item("Item 2"))?;
    menu.add_separator("")?;
    menu.add_disabled_item("Item3 (Disabled)", false)?;
    menu.add_separator("")?;
    menu.add_item("Sub/Item 1", false, item("Sub/Item 1"))?;
    menu.add_item("Sub/Item 2(Checked)", true, item("Sub/Item 2"))?;
    menu.add_separator("Sub/")?;
    menu.add_disabled_item("Sub/Item3 (Disabled)", false)?;
    menu.add_separator("Sub/")?;
    menu.add_item("Sub/Sub/Item 1", false, item("Sub/Sub/Item 1"))?;
    menu.add_item("Sub/Sub/Item 2", false, item("Sub/Sub/Item 2"))?;
    menu.add_separator("Sub/Sub/")?;
    menu.add_item("Sub/Sub/Sub/Item 1", false, item("Sub/Sub/Sub/Item 1"))?;
    menu.add_item_with_data(
        "Sub/Sub/Sub/Item 2",
        false,
        {
            let clicks = Rc::clone(clicks);
            move |n: &u32| clicks.borrow_mut().push(format!("Sub/Sub/Sub/Item 2 ({n})"))
        },
        42,
    )?;
    Ok(menu)
}

fn row_center(menu: &MenuTree<ListMenu>, id: MenuId, label: &str) -> Option<Point> {
    let row = menu.rows(id)?.iter().position(|r| r.label() == label)?;
    Some(menu.widget(id)?.row_rect(row)?.center())
}

fn report(menu: &MenuTree<ListMenu>, step: &str) {
    println!("\n== {step} ==");
    for id in menu.visible_chain() {
        let widget = menu.widget(id).expect("visible menus exist");
        let highlighted = widget
            .highlighted_row()
            .and_then(|row| menu.rows(id).and_then(|rows| rows.get(row)))
            .map(|row| row.label());
        println!(
            "  {id:?} frame={:?} highlighted={highlighted:?}",
            widget.frame()
        );
    }
}

/// Rest on `label` in `menu` until its submenu opens. Returns the new time.
fn hover(menu: &mut MenuTree<ListMenu>, id: MenuId, label: &str, now: u64) -> u64 {
    let point = row_center(menu, id, label).expect("row exists");
    menu.pointer_move(point, now);
    let due = menu.next_deadline().unwrap_or(now);
    menu.tick(due);
    menu.tick(due);
    due
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let clicks: Clicks = Rc::default();
    let mut menu = build(&clicks).expect("menu builds while closed");
    menu.open(Rect::new(24.0, 24.0, 24.0, 24.0), None, false)
        .expect("viewport is configured");
    report(&menu, "opened");

    let root = menu.root();
    let mut now = hover(&mut menu, root, "Sub", 0);
    report(&menu, "hovered Sub");

    let sub = menu.node_for_path("Sub").expect("Sub exists");
    now = hover(&mut menu, sub, "Sub", now + 16);
    report(&menu, "hovered Sub/Sub");

    let sub_sub = menu.node_for_path("Sub/Sub").expect("Sub/Sub exists");
    now = hover(&mut menu, sub_sub, "Sub", now + 16);
    report(&menu, "hovered Sub/Sub/Sub");

    let deepest = menu.node_for_path("Sub/Sub/Sub").expect("Sub/Sub/Sub exists");
    let leaf = row_center(&menu, deepest, "Item 2").expect("leaf exists");
    menu.pointer_move(leaf, now + 16);
    menu.pointer_up(leaf, now + 32);
    report(&menu, "released on Sub/Sub/Sub/Item 2");

    log::info!("activated: {:?}", clicks.borrow());
}
