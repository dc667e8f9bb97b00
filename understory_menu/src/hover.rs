// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover-delayed submenu disclosure.
//!
//! A pointer that merely crosses a disclosing row should not flash its
//! submenu open. [`HoverDiscloser`] keeps at most one task per disclosing row:
//!
//! - entering the row arms the task for the full delay, allocating it on first
//!   use and restarting it on every later entry,
//! - leaving the row pauses the task but keeps its handle for the next entry,
//! - the task fires from the scheduler on a later turn, never inside `enter`.
//!
//! ```
//! use understory_menu::hover::HoverDiscloser;
//! use understory_menu::schedule::Scheduler;
//! # use understory_menu::{ListMenu, MenuConfig, MenuTree};
//! # let tree: MenuTree<ListMenu> = MenuTree::new(MenuConfig::default());
//! # let row = understory_menu::RowRef::new(tree.root(), 0);
//!
//! let mut scheduler = Scheduler::new();
//! let mut hover = HoverDiscloser::new(500);
//!
//! hover.enter(row, &mut scheduler, || "open");
//! scheduler.advance(200);
//! hover.leave(row, &mut scheduler);
//! assert!(scheduler.take_due(1_000).is_empty());
//!
//! // Re-entry restarts from the full delay, reusing the same task.
//! hover.enter(row, &mut scheduler, || "open");
//! assert_eq!(scheduler.next_deadline(), Some(1_500));
//! assert_eq!(scheduler.len(), 1);
//! ```

use hashbrown::HashMap;

use crate::schedule::{Scheduler, TaskId};
use crate::types::{MenuId, RowRef};

/// Per-row disclosure timers.
#[derive(Clone, Debug)]
pub struct HoverDiscloser {
    delay_ms: u64,
    tasks: HashMap<RowRef, TaskId>,
}

impl HoverDiscloser {
    /// Create a discloser with the given dwell time.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            tasks: HashMap::new(),
        }
    }

    /// The dwell time in milliseconds.
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Change the dwell time. Armed tasks keep their current deadline.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// Pointer entered `row`: arm its task for the full delay.
    ///
    /// `payload` is only called when the row has no live task yet.
    pub fn enter<T: Clone>(
        &mut self,
        row: RowRef,
        scheduler: &mut Scheduler<T>,
        payload: impl FnOnce() -> T,
    ) -> TaskId {
        if let Some(&id) = self.tasks.get(&row)
            && scheduler.restart(id, self.delay_ms)
        {
            return id;
        }
        let id = scheduler.schedule(payload(), self.delay_ms);
        self.tasks.insert(row, id);
        id
    }

    /// Pointer left `row`: pause its task. Returns `false` if it had none.
    pub fn leave<T: Clone>(&mut self, row: RowRef, scheduler: &mut Scheduler<T>) -> bool {
        self.tasks
            .get(&row)
            .is_some_and(|&id| scheduler.pause(id))
    }

    /// Pause every task belonging to rows of `menu`.
    pub fn pause_menu<T: Clone>(&mut self, menu: MenuId, scheduler: &mut Scheduler<T>) {
        for (row, &id) in &self.tasks {
            if row.menu == menu {
                scheduler.pause(id);
            }
        }
    }

    /// Whether `row` has an armed task.
    pub fn is_pending<T: Clone>(&self, row: RowRef, scheduler: &Scheduler<T>) -> bool {
        self.tasks
            .get(&row)
            .is_some_and(|&id| scheduler.is_pending(id))
    }

    /// The task handle owned by `row`, if one was ever allocated.
    pub fn task_of(&self, row: RowRef) -> Option<TaskId> {
        self.tasks.get(&row).copied()
    }

    /// Release every task.
    pub fn clear<T: Clone>(&mut self, scheduler: &mut Scheduler<T>) {
        for (_, id) in self.tasks.drain() {
            scheduler.cancel(id);
        }
    }

    /// Number of rows holding a task handle.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no row holds a task handle.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
