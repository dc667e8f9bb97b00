// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-threaded delayed-task queue driven by caller timestamps.
//!
//! The menu never reads a clock. Hosts pass millisecond timestamps with their
//! events and call [`Scheduler::take_due`] (through
//! [`MenuTree::tick`](crate::MenuTree::tick)) once per event-loop turn.
//!
//! Task slots are reusable: [`Scheduler::pause`] keeps a slot and its payload
//! alive, [`Scheduler::restart`] re-arms it from the current time, and a slot
//! that fires goes back to [`TaskState::Paused`] rather than being freed. Only
//! [`Scheduler::cancel`] releases a slot, after which its [`TaskId`] is stale.
//!
//! ```
//! use understory_menu::schedule::{Scheduler, TaskState};
//!
//! let mut scheduler: Scheduler<&str> = Scheduler::new();
//! let id = scheduler.schedule("open", 500);
//!
//! assert!(scheduler.take_due(499).is_empty());
//! assert_eq!(scheduler.take_due(500), vec![(id, "open")]);
//!
//! // Fired tasks stay alive so they can be re-armed.
//! assert_eq!(scheduler.state(id), Some(TaskState::Paused));
//! assert!(scheduler.restart(id, 500));
//! assert_eq!(scheduler.next_deadline(), Some(1000));
//! ```

use alloc::vec::Vec;

/// Handle to a task slot (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskId(u32, u32);

impl TaskId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Lifecycle state of a live task.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskState {
    /// Alive but not armed.
    Paused,
    /// Armed to fire at the given timestamp.
    Due(u64),
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    state: TaskState,
    payload: T,
}

/// Reusable delayed tasks keyed by [`TaskId`].
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    slots: Vec<Option<Slot<T>>>,
    /// last generation per slot (persists across cancels)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    now: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            now: 0,
        }
    }
}

impl<T: Clone> Scheduler<T> {
    /// Create an empty scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest timestamp the scheduler has seen.
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Advance the clock. Timestamps older than the current time are ignored.
    pub fn advance(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    /// Allocate a paused task holding `payload`.
    pub fn insert(&mut self, payload: T) -> TaskId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.slots.push(None);
            self.generations.push(1);
            (self.slots.len() - 1, 1)
        };
        self.slots[idx] = Some(Slot {
            generation,
            state: TaskState::Paused,
            payload,
        });
        #[allow(
            clippy::cast_possible_truncation,
            reason = "TaskId uses 32-bit indices by design."
        )]
        TaskId(idx as u32, generation)
    }

    /// Allocate a task that fires `delay_ms` after the current time.
    pub fn schedule(&mut self, payload: T, delay_ms: u64) -> TaskId {
        let id = self.insert(payload);
        self.restart(id, delay_ms);
        id
    }

    /// Re-arm a live task to fire `delay_ms` after the current time.
    ///
    /// Any previous deadline is discarded. Returns `false` for stale ids.
    pub fn restart(&mut self, id: TaskId, delay_ms: u64) -> bool {
        let due = self.now.saturating_add(delay_ms);
        match self.slot_mut(id) {
            Some(slot) => {
                slot.state = TaskState::Due(due);
                true
            }
            None => false,
        }
    }

    /// Disarm a live task without releasing it. Returns `false` for stale ids.
    pub fn pause(&mut self, id: TaskId) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                slot.state = TaskState::Paused;
                true
            }
            None => false,
        }
    }

    /// Release a task, returning its payload if it was live.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        self.slot(id)?;
        let slot = self.slots[id.idx()].take()?;
        self.free_list.push(id.idx());
        Some(slot.payload)
    }

    /// State of a live task, or `None` for stale ids.
    pub fn state(&self, id: TaskId) -> Option<TaskState> {
        self.slot(id).map(|slot| slot.state)
    }

    /// Whether the task is live and armed.
    pub fn is_pending(&self, id: TaskId) -> bool {
        matches!(self.state(id), Some(TaskState::Due(_)))
    }

    /// The earliest deadline among armed tasks.
    ///
    /// Hosts can use this to schedule their next wake-up.
    pub fn next_deadline(&self) -> Option<u64> {
        self.slots
            .iter()
            .flatten()
            .filter_map(|slot| match slot.state {
                TaskState::Due(due) => Some(due),
                TaskState::Paused => None,
            })
            .min()
    }

    /// Number of live tasks, armed or paused.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Whether no tasks are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advance the clock to `now` and fire every task whose deadline passed.
    ///
    /// Fired tasks are returned in deadline order (ties by slot order) and are
    /// left paused. Tasks armed by the caller while handling the result fire
    /// on a later call, never within this one.
    pub fn take_due(&mut self, now: u64) -> Vec<(TaskId, T)> {
        self.advance(now);
        let mut due: Vec<(u64, TaskId)> = Vec::new();
        for (idx, slot) in self.slots.iter().enumerate() {
            if let Some(slot) = slot
                && let TaskState::Due(at) = slot.state
                && at <= self.now
            {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "TaskId uses 32-bit indices by design."
                )]
                due.push((at, TaskId(idx as u32, slot.generation)));
            }
        }
        due.sort_by_key(|&(at, id)| (at, id.0));
        due.into_iter()
            .filter_map(|(_, id)| {
                let slot = self.slot_mut(id)?;
                slot.state = TaskState::Paused;
                Some((id, slot.payload.clone()))
            })
            .collect()
    }

    fn slot(&self, id: TaskId) -> Option<&Slot<T>> {
        self.slots
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|slot| slot.generation == id.1)
    }

    fn slot_mut(&mut self, id: TaskId) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(id.idx())
            .and_then(|slot| slot.as_mut())
            .filter(|slot| slot.generation == id.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn fires_at_deadline_and_stays_alive() {
        let mut s: Scheduler<u8> = Scheduler::new();
        let id = s.schedule(7, 100);
        assert!(s.is_pending(id));
        assert!(s.take_due(99).is_empty());
        assert_eq!(s.take_due(100), vec![(id, 7)]);
        assert_eq!(s.state(id), Some(TaskState::Paused));
        assert!(s.take_due(1_000).is_empty(), "fired task must not refire");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn pause_keeps_handle_and_restart_resets_delay() {
        let mut s: Scheduler<u8> = Scheduler::new();
        s.advance(1_000);
        let id = s.schedule(1, 500);
        s.advance(1_300);
        assert!(s.pause(id));
        assert!(s.take_due(2_000).is_empty());

        // Restart counts the full delay from the current time.
        assert!(s.restart(id, 500));
        assert_eq!(s.state(id), Some(TaskState::Due(2_500)));
        assert!(s.take_due(2_499).is_empty());
        assert_eq!(s.take_due(2_500).len(), 1);
    }

    #[test]
    fn restart_while_armed_pushes_deadline() {
        let mut s: Scheduler<u8> = Scheduler::new();
        let id = s.schedule(1, 100);
        s.advance(80);
        assert!(s.restart(id, 100));
        assert!(s.take_due(150).is_empty());
        assert_eq!(s.take_due(180).len(), 1);
    }

    #[test]
    fn cancel_makes_id_stale_and_slot_is_reused() {
        let mut s: Scheduler<u8> = Scheduler::new();
        let a = s.schedule(1, 10);
        assert_eq!(s.cancel(a), Some(1));
        assert_eq!(s.cancel(a), None);
        assert!(!s.restart(a, 10));
        assert!(!s.pause(a));
        assert_eq!(s.state(a), None);

        let b = s.schedule(2, 10);
        assert_ne!(a, b, "reused slot must get a new generation");
        assert_eq!(s.take_due(10), vec![(b, 2)]);
    }

    #[test]
    fn due_order_is_deadline_then_slot() {
        let mut s: Scheduler<char> = Scheduler::new();
        let late = s.schedule('l', 20);
        let early = s.schedule('e', 10);
        let tie = s.schedule('t', 20);
        let fired: vec::Vec<_> = s.take_due(50).into_iter().map(|(id, _)| id).collect();
        assert_eq!(fired, vec![early, late, tie]);
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut s: Scheduler<u8> = Scheduler::new();
        s.advance(100);
        s.advance(40);
        assert_eq!(s.now(), 100);
        let id = s.schedule(0, 0);
        assert_eq!(s.next_deadline(), Some(100));
        assert_eq!(s.take_due(0), vec![(id, 0)]);
    }
}
