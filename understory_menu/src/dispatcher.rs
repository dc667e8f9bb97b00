// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a region dispatch sequence and honor stop outcomes.
//!
//! A pointer event over a stack of menus is offered to a sequence of
//! handlers, most specific first. The dispatcher is deliberately minimal:
//!
//! - [`Outcome`] only controls propagation (`Continue` vs `Stop`).
//! - The return value from [`run`] reports where propagation stopped (if at all).
//! - What a handler did (highlight changes, dismissals) lives on the state you
//!   pass to [`run`], not in [`Outcome`].
//!
//! Menu handlers always stop after acting, which is what makes the innermost
//! region the only one to react. Sequences are produced by
//! [`PointerRouter::sequence`](crate::router::PointerRouter::sequence).
//!
//! ## Minimal example
//!
//! ```
//! use understory_menu::dispatcher::{self, Dispatch, Outcome, Region};
//! # use understory_menu::{ListMenu, MenuConfig, MenuTree};
//! # let tree: MenuTree<ListMenu> = MenuTree::new(MenuConfig::default());
//! # let menu = tree.root();
//!
//! let seq = [Dispatch::own(menu), Dispatch::root(menu)];
//! let mut seen = Vec::new();
//! let stopped = dispatcher::run(&seq, &mut seen, |d, seen| {
//!     seen.push(d.region);
//!     Outcome::Stop
//! });
//!
//! assert_eq!(stopped, Some(&Dispatch::own(menu)));
//! assert_eq!(seen, vec![Region::Own]);
//! ```

use crate::types::MenuId;

/// Which region a handler was registered on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// The menu's own outer frame.
    Own,
    /// The shared root-covering region.
    Root,
}

/// One step of a pointer dispatch sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dispatch {
    /// Region the handler was registered on.
    pub region: Region,
    /// Menu whose handler runs.
    pub menu: MenuId,
}

impl Dispatch {
    /// Handler on the menu's own region.
    pub const fn own(menu: MenuId) -> Self {
        Self {
            region: Region::Own,
            menu,
        }
    }

    /// Handler the menu registered on the root-covering region.
    pub const fn root(menu: MenuId) -> Self {
        Self {
            region: Region::Root,
            menu,
        }
    }
}

/// Propagation control returned by handlers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Offer the event to the next handler.
    Continue,
    /// Stop propagation.
    Stop,
}

/// Run a handler over a dispatch sequence and honor stop outcomes.
///
/// - Returns `None` if the full sequence was visited.
/// - Returns `Some(d)` with the entry whose handler returned [`Outcome::Stop`].
pub fn run<'a, E>(
    seq: &'a [Dispatch],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch, &mut E) -> Outcome,
) -> Option<&'a Dispatch> {
    for d in seq {
        match handler(d, event) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(d),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn mk_seq() -> Vec<Dispatch> {
        let (a, b) = (MenuId::new(1, 0), MenuId::new(0, 0));
        vec![
            Dispatch::own(a),
            Dispatch::own(b),
            Dispatch::root(a),
            Dispatch::root(b),
        ]
    }

    #[test]
    fn continue_through_all() {
        let seq = mk_seq();
        let mut seen: Vec<Dispatch> = Vec::new();
        let stopped = run(&seq, &mut seen, |d, seen| {
            seen.push(*d);
            Outcome::Continue
        });
        assert!(stopped.is_none());
        assert_eq!(seen, seq);
    }

    #[test]
    fn stop_at_first_own_region_skips_the_rest() {
        let seq = mk_seq();
        let mut count = 0;
        let stopped = run(&seq, &mut count, |_, count| {
            *count += 1;
            Outcome::Stop
        });
        assert_eq!(count, 1);
        assert_eq!(stopped, Some(&seq[0]));
    }

    #[test]
    fn fallthrough_to_root_region() {
        let seq = mk_seq();
        let mut seen: Vec<Region> = Vec::new();
        let stopped = run(&seq, &mut seen, |d, seen| {
            seen.push(d.region);
            if d.region == Region::Root {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        let stopped = stopped.unwrap();
        assert_eq!(stopped.region, Region::Root);
        assert_eq!(stopped.menu, MenuId::new(1, 0));
        assert_eq!(seen, vec![Region::Own, Region::Own, Region::Root]);
    }

    #[test]
    fn empty_sequence() {
        let stopped = run(&[], &mut (), |_, _| Outcome::Stop);
        assert!(stopped.is_none());
    }
}
