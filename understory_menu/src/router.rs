// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer routing across stacked menu regions.
//!
//! Every visible menu owns two regions: its own frame and a registration on
//! the shared root-covering region (the viewport). Open submenus overlap their
//! parents and the root region overlaps everything, so routing is made
//! explicit: [`PointerRouter::sequence`] lists
//!
//! 1. every menu whose frame contains the point, most recently opened first,
//! 2. then, for presses and moves inside the viewport, every menu's root-region
//!    registration, most recently opened first.
//!
//! Handlers always stop after acting, so the innermost frame wins and the root
//! region only reacts when the pointer is outside every open menu.
//!
//! The router also tracks which row the pointer rests on and reports
//! leave/enter transitions for hover disclosure.

use kurbo::Point;
use smallvec::SmallVec;

use crate::dispatcher::{self, Dispatch, Outcome, Region};
use crate::tree::{MenuTask, MenuTree};
use crate::types::{MenuId, PointerKind, RowRef, WidgetResponse};
use crate::widget::MenuWidget;

/// Registered menus and the hovered row.
#[derive(Clone, Debug, Default)]
pub struct PointerRouter {
    /// open order, root first
    registrations: SmallVec<[MenuId; 4]>,
    hovered: Option<RowRef>,
}

/// Change of hovered row produced by [`PointerRouter::update_hover`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverTransition {
    /// Row the pointer left.
    pub leave: Option<RowRef>,
    /// Row the pointer entered.
    pub enter: Option<RowRef>,
}

impl PointerRouter {
    /// Create a router with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shown menu. Registering twice keeps the first position.
    pub fn register(&mut self, menu: MenuId) {
        if !self.registrations.contains(&menu) {
            self.registrations.push(menu);
        }
    }

    /// Remove a hidden menu. Returns `false` if it was not registered.
    pub fn unregister(&mut self, menu: MenuId) -> bool {
        if self.hovered.is_some_and(|row| row.menu == menu) {
            self.hovered = None;
        }
        let before = self.registrations.len();
        self.registrations.retain(|m| *m != menu);
        self.registrations.len() != before
    }

    /// Registered menus in open order.
    pub fn registrations(&self) -> &[MenuId] {
        &self.registrations
    }

    /// The row the pointer was last seen over.
    pub const fn hovered(&self) -> Option<RowRef> {
        self.hovered
    }

    /// Forget every registration and the hovered row.
    pub fn clear(&mut self) {
        self.registrations.clear();
        self.hovered = None;
    }

    /// Build the dispatch sequence for a pointer event.
    ///
    /// `contains` reports whether a menu's own frame contains the point;
    /// `in_viewport` whether the root-covering region does. Releases are only
    /// delivered to own regions.
    pub fn sequence(
        &self,
        kind: PointerKind,
        in_viewport: bool,
        mut contains: impl FnMut(MenuId) -> bool,
    ) -> SmallVec<[Dispatch; 8]> {
        let mut seq: SmallVec<[Dispatch; 8]> = self
            .registrations
            .iter()
            .rev()
            .copied()
            .filter(|&menu| contains(menu))
            .map(Dispatch::own)
            .collect();
        if kind != PointerKind::Up && in_viewport {
            seq.extend(self.registrations.iter().rev().copied().map(Dispatch::root));
        }
        seq
    }

    /// Record the row now under the pointer and report what changed.
    pub fn update_hover(&mut self, next: Option<RowRef>) -> HoverTransition {
        let prev = core::mem::replace(&mut self.hovered, next);
        if prev == next {
            HoverTransition::default()
        } else {
            HoverTransition {
                leave: prev,
                enter: next,
            }
        }
    }
}

impl<W: MenuWidget> MenuTree<W> {
    /// Pointer pressed at `point` (world coordinates) at time `now`.
    ///
    /// Returns `true` if a menu region consumed the event.
    pub fn pointer_down(&mut self, point: Point, now: u64) -> bool {
        self.route(PointerKind::Down, point, now)
    }

    /// Pointer moved to `point` at time `now`.
    pub fn pointer_move(&mut self, point: Point, now: u64) -> bool {
        self.route(PointerKind::Move, point, now)
    }

    /// Pointer released at `point` at time `now`.
    pub fn pointer_up(&mut self, point: Point, now: u64) -> bool {
        self.route(PointerKind::Up, point, now)
    }

    fn route(&mut self, kind: PointerKind, point: Point, now: u64) -> bool {
        self.scheduler.advance(now);
        if !self.is_open() {
            return false;
        }
        let in_viewport = self.config.viewport.is_some_and(|v| v.contains(point));
        let seq = self
            .router
            .sequence(kind, in_viewport, |menu| self.frame_contains(menu, point));
        log::trace!("{kind:?} at {point:?}: {} candidates", seq.len());

        let stopped = dispatcher::run(&seq, self, |d, tree| tree.handle(kind, *d, point));
        if kind != PointerKind::Up && self.is_open() {
            self.track_hover(point);
        }
        stopped.is_some()
    }

    fn frame_contains(&self, menu: MenuId, point: Point) -> bool {
        self.node(menu)
            .is_some_and(|n| n.visible && n.widget.frame().contains(point))
    }

    fn handle(&mut self, kind: PointerKind, d: Dispatch, point: Point) -> Outcome {
        if !self.is_visible(d.menu) {
            return Outcome::Continue;
        }
        let widget = &mut self.nodes[d.menu.idx()].widget;
        match (d.region, kind) {
            (Region::Own, PointerKind::Down) => {
                widget.on_pointer_down(point);
                self.close_unselected_submenus(d.menu);
            }
            (Region::Own | Region::Root, PointerKind::Move) => {
                widget.on_pointer_move(point);
                self.close_unselected_submenus(d.menu);
            }
            (Region::Root, PointerKind::Down) => {
                log::trace!("press outside every menu");
                self.dismiss();
            }
            (Region::Own, PointerKind::Up) => self.release(d.menu, point),
            (Region::Root, PointerKind::Up) => return Outcome::Continue,
        }
        Outcome::Stop
    }

    fn release(&mut self, menu: MenuId, point: Point) {
        let node = &mut self.nodes[menu.idx()];
        if node
            .widget
            .highlighted_row()
            .is_some_and(|row| node.submenus.contains_key(&row))
        {
            log::trace!("release over a disclosing row of {menu:?}");
            return;
        }
        let activated = match node.widget.on_pointer_up(point) {
            WidgetResponse::Activated(row) => {
                self.run_action(RowRef::new(menu, row));
                true
            }
            WidgetResponse::Handled | WidgetResponse::Ignored => false,
        };
        if activated || menu != self.root() {
            self.dismiss();
        }
    }

    fn track_hover(&mut self, point: Point) {
        let over = self
            .router
            .registrations()
            .iter()
            .rev()
            .copied()
            .find(|&menu| self.frame_contains(menu, point));
        let next = over.and_then(|menu| {
            let row = self.nodes[menu.idx()].widget.row_at(point)?;
            Some(RowRef::new(menu, row))
        });
        let transition = self.router.update_hover(next);
        if let Some(row) = transition.leave {
            self.hover.leave(row, &mut self.scheduler);
        }
        if let Some(row) = transition.enter
            && self.submenu_of(row.menu, row.row).is_some()
        {
            self.hover
                .enter(row, &mut self.scheduler, || MenuTask::Disclose(row));
            log::trace!("hover armed for {row:?}");
        }
    }
}
