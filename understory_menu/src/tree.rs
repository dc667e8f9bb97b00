// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu node storage and the caller-facing [`MenuTree`].
//!
//! ## Building
//!
//! Items are addressed by slash-delimited paths. The text after the last `/`
//! is the row label and everything before it names the menu node the row is
//! appended to. Nodes are created on first reference; creating one also
//! appends a disclosing row for it to its parent, so `"A/B/Item"` yields
//! `A` in the root, `B` in `A`, and `Item` in `B`.
//!
//! ## Lifecycle
//!
//! Nodes live for as long as the tree and are addressed by [`MenuId`]. While
//! the menu is open, visible nodes always form a single chain from the root:
//! a node is only shown after its parent, at most one child of a node is shown
//! at a time, and closing a node first closes every open descendant.
//!
//! ```
//! use kurbo::Rect;
//! use understory_menu::{ListMenu, MenuConfig, MenuTree};
//!
//! let config = MenuConfig::default().with_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let mut tree: MenuTree<ListMenu> = MenuTree::new(config);
//! tree.add_item("Open", false, || {}).unwrap();
//! tree.add_item("Recent/a.txt", false, || {}).unwrap();
//! tree.add_item("Recent/b.txt", false, || {}).unwrap();
//!
//! let recent = tree.node_for_path("Recent").unwrap();
//! assert_eq!(tree.submenu_of(tree.root(), 1), Some(recent));
//! assert_eq!(tree.rows(recent).unwrap().len(), 2);
//!
//! tree.open(Rect::new(10.0, 10.0, 10.0, 10.0), None, false).unwrap();
//! let opened = tree.open_submenu(understory_menu::RowRef::new(tree.root(), 1)).unwrap();
//! assert_eq!(opened, recent);
//! assert_eq!(tree.depth(), 2);
//!
//! tree.dismiss();
//! assert!(!tree.is_open());
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::anchor::{self, AnchorRequest};
use crate::config::MenuConfig;
use crate::error::MenuError;
use crate::hover::HoverDiscloser;
use crate::path::split_path;
use crate::router::PointerRouter;
use crate::schedule::{Scheduler, TaskId};
use crate::types::{MenuId, RowFlags, RowRef};
use crate::widget::MenuWidget;

/// A row of a menu node.
pub struct Row {
    label: String,
    flags: RowFlags,
    action: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("label", &self.label)
            .field("flags", &self.flags)
            .field("has_action", &self.action.is_some())
            .finish_non_exhaustive()
    }
}

impl Row {
    /// Display text. Empty for separators.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Presentation flags.
    pub const fn flags(&self) -> RowFlags {
        self.flags
    }

    /// Whether the row shows a check mark.
    pub const fn is_checked(&self) -> bool {
        self.flags.contains(RowFlags::CHECKED)
    }

    /// Whether the row is disabled.
    pub const fn is_disabled(&self) -> bool {
        self.flags.contains(RowFlags::DISABLED)
    }

    /// Whether the row is a separator.
    pub const fn is_separator(&self) -> bool {
        self.flags.contains(RowFlags::SEPARATOR)
    }

    /// Whether activating the row runs an action.
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }
}

/// One level of the menu: a widget plus its rows and links.
#[derive(Debug)]
pub struct MenuNode<W> {
    pub(crate) widget: W,
    pub(crate) rows: Vec<Row>,
    pub(crate) owner: Option<MenuId>,
    pub(crate) opened_from: Option<RowRef>,
    pub(crate) submenus: HashMap<usize, MenuId>,
    pub(crate) visible: bool,
    pub(crate) settle: Option<TaskId>,
}

impl<W> MenuNode<W> {
    fn new(widget: W, owner: Option<MenuId>) -> Self {
        Self {
            widget,
            rows: Vec::new(),
            owner,
            opened_from: None,
            submenus: HashMap::new(),
            visible: false,
            settle: None,
        }
    }

    /// The node's single-level widget.
    pub const fn widget(&self) -> &W {
        &self.widget
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Structural parent; `None` for the root.
    pub const fn owner(&self) -> Option<MenuId> {
        self.owner
    }

    /// Whether this node is the root.
    pub const fn is_root(&self) -> bool {
        self.owner.is_none()
    }

    /// The parent row this node is currently open from.
    pub const fn opened_from(&self) -> Option<RowRef> {
        self.opened_from
    }

    /// The child disclosed by `row`, if any.
    pub fn submenu_of(&self, row: usize) -> Option<MenuId> {
        self.submenus.get(&row).copied()
    }

    /// Whether the node's region is attached.
    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Deferred work run from [`MenuTree::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MenuTask {
    /// Open the submenu disclosed by a hovered row.
    Disclose(RowRef),
    /// Position a freshly shown submenu once it has been laid out.
    Settle(MenuId),
}

/// A nested dropdown menu made of one [`MenuWidget`] per level.
pub struct MenuTree<W> {
    pub(crate) nodes: Vec<MenuNode<W>>,
    epoch: u32,
    root: MenuId,
    /// full path prefix -> node, "" is the root
    paths: HashMap<String, MenuId>,
    factory: Box<dyn FnMut() -> W>,
    pub(crate) config: MenuConfig,
    pub(crate) scheduler: Scheduler<MenuTask>,
    pub(crate) hover: HoverDiscloser,
    pub(crate) router: PointerRouter,
    pub(crate) focused: Option<MenuId>,
}

impl<W> fmt::Debug for MenuTree<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuTree")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("focused", &self.focused)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<W: MenuWidget> MenuTree<W> {
    /// Create an empty tree whose nodes use `W::default()` widgets.
    pub fn new(config: MenuConfig) -> Self
    where
        W: Default + 'static,
    {
        Self::with_factory(config, W::default)
    }

    /// Create an empty tree whose nodes use widgets produced by `factory`.
    pub fn with_factory(config: MenuConfig, factory: impl FnMut() -> W + 'static) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            epoch: 0,
            root: MenuId::new(0, 0),
            paths: HashMap::new(),
            factory: Box::new(factory),
            config,
            scheduler: Scheduler::new(),
            hover: HoverDiscloser::new(config.hover_delay_ms),
            router: PointerRouter::new(),
            focused: None,
        };
        tree.reset_nodes();
        tree
    }

    fn reset_nodes(&mut self) {
        self.nodes.clear();
        self.paths.clear();
        let widget = (self.factory)();
        self.nodes.push(MenuNode::new(widget, None));
        self.root = MenuId::new(0, self.epoch);
        self.paths.insert(String::new(), self.root);
    }

    /// Drop every node and row. The menu is dismissed first if open.
    ///
    /// Identifiers issued before the call become stale.
    pub fn clear(&mut self) {
        self.dismiss();
        self.epoch = self.epoch.wrapping_add(1);
        let now = self.scheduler.now();
        self.scheduler = Scheduler::new();
        self.scheduler.advance(now);
        self.hover = HoverDiscloser::new(self.config.hover_delay_ms);
        self.router.clear();
        self.focused = None;
        self.reset_nodes();
    }

    // --- building ---

    /// Append an item that runs `action` when activated.
    pub fn add_item(
        &mut self,
        path: &str,
        checked: bool,
        action: impl FnMut() + 'static,
    ) -> Result<RowRef, MenuError> {
        let mut flags = RowFlags::empty();
        flags.set(RowFlags::CHECKED, checked);
        self.push_row(path, flags, Some(Box::new(action)))
    }

    /// Append an item whose action receives `data` when activated.
    pub fn add_item_with_data<D: 'static>(
        &mut self,
        path: &str,
        checked: bool,
        mut action: impl FnMut(&D) + 'static,
        data: D,
    ) -> Result<RowRef, MenuError> {
        self.add_item(path, checked, move || action(&data))
    }

    /// Append a row that is shown but can never be highlighted or activated.
    pub fn add_disabled_item(&mut self, path: &str, checked: bool) -> Result<RowRef, MenuError> {
        let mut flags = RowFlags::DISABLED;
        flags.set(RowFlags::CHECKED, checked);
        self.push_row(path, flags, None)
    }

    /// Append a separator to the node named by `path`.
    ///
    /// The label part is ignored: `""` targets the root and `"Sub/"` targets
    /// `Sub`.
    pub fn add_separator(&mut self, path: &str) -> Result<RowRef, MenuError> {
        self.push_row(path, RowFlags::SEPARATOR, None)
    }

    fn push_row(
        &mut self,
        path: &str,
        flags: RowFlags,
        action: Option<Box<dyn FnMut()>>,
    ) -> Result<RowRef, MenuError> {
        if self.is_open() {
            return Err(MenuError::MenuOpen);
        }
        let (prefix, label) = split_path(path);
        let menu = self.node_at(prefix);
        let row = self.append(menu, label, flags, action);
        Ok(RowRef::new(menu, row))
    }

    /// Resolve a path prefix to its node, creating it and its ancestors.
    fn node_at(&mut self, prefix: &str) -> MenuId {
        if let Some(&id) = self.paths.get(prefix) {
            return id;
        }
        let (parent_prefix, label) = split_path(prefix);
        let parent = self.node_at(parent_prefix);

        #[allow(
            clippy::cast_possible_truncation,
            reason = "MenuId uses 32-bit indices by design."
        )]
        let id = MenuId::new(self.nodes.len() as u32, self.epoch);
        let widget = (self.factory)();
        self.nodes.push(MenuNode::new(widget, Some(parent)));
        self.paths.insert(String::from(prefix), id);

        let row = self.append(parent, label, RowFlags::empty(), None);
        self.nodes[parent.idx()].submenus.insert(row, id);
        log::trace!("created menu {id:?} for {prefix:?} under {parent:?} row {row}");
        id
    }

    fn append(
        &mut self,
        menu: MenuId,
        label: &str,
        flags: RowFlags,
        action: Option<Box<dyn FnMut()>>,
    ) -> usize {
        let node = &mut self.nodes[menu.idx()];
        let index = if flags.contains(RowFlags::SEPARATOR) {
            node.widget.add_separator()
        } else {
            node.widget.add_row(
                label,
                flags.contains(RowFlags::CHECKED),
                flags.contains(RowFlags::DISABLED),
            )
        };
        debug_assert_eq!(
            index,
            node.rows.len(),
            "widget row indices must follow insertion order"
        );
        let label = if flags.contains(RowFlags::SEPARATOR) {
            String::new()
        } else {
            String::from(label)
        };
        node.rows.push(Row {
            label,
            flags,
            action,
        });
        node.rows.len() - 1
    }

    // --- lifecycle ---

    /// Show the root menu.
    ///
    /// The root is attached at `anchor`; when `anchored` is set and a `target`
    /// is given, the widget aligns to and sizes against the target instead.
    /// Opening an open menu does nothing.
    pub fn open(
        &mut self,
        anchor: Rect,
        target: Option<Rect>,
        anchored: bool,
    ) -> Result<(), MenuError> {
        if self.config.viewport.is_none() {
            return Err(MenuError::MissingViewport);
        }
        if self.is_open() {
            return Ok(());
        }
        let root = self.root;
        let node = &mut self.nodes[root.idx()];
        node.widget.show(anchor, target, anchored);
        node.visible = true;
        self.router.register(root);
        self.focused = Some(root);
        log::debug!("opened menu at {anchor:?}");
        Ok(())
    }

    /// Close `menu` and everything open beneath it.
    ///
    /// Closing a closed menu does nothing. `restore_focus` is only honored for
    /// the root.
    pub fn close(&mut self, menu: MenuId, restore_focus: bool) -> Result<(), MenuError> {
        if self.node(menu).is_none() {
            return Err(MenuError::StaleMenu(menu));
        }
        self.close_node(menu, restore_focus);
        Ok(())
    }

    pub(crate) fn close_node(&mut self, menu: MenuId, restore_focus: bool) {
        let Some(node) = self.node(menu) else {
            return;
        };
        if !node.visible {
            return;
        }
        let children: SmallVec<[MenuId; 4]> = node.submenus.values().copied().collect();
        for child in children {
            self.close_node(child, false);
        }

        self.hover.pause_menu(menu, &mut self.scheduler);
        self.router.unregister(menu);
        let is_root = menu == self.root;
        let node = &mut self.nodes[menu.idx()];
        if let Some(task) = node.settle.take() {
            self.scheduler.cancel(task);
        }
        node.widget.hide(restore_focus && is_root);
        node.visible = false;
        node.opened_from = None;
        if self.focused == Some(menu) {
            self.focused = node.owner;
        }
        log::debug!("closed menu {menu:?}");
    }

    /// Close the whole tree and give focus back to the host.
    pub fn dismiss(&mut self) {
        if !self.is_open() {
            return;
        }
        self.close_node(self.root, true);
        self.hover.clear(&mut self.scheduler);
        self.router.clear();
        self.focused = None;
        log::debug!("dismissed menu");
    }

    /// Show the submenu disclosed by `row`.
    ///
    /// Any other open child of the same parent is closed first. The submenu is
    /// attached at the row's top-right corner and takes focus; it is positioned
    /// inside the viewport on the next [`MenuTree::tick`]. Disclosing an open
    /// submenu returns it unchanged.
    pub fn open_submenu(&mut self, row: RowRef) -> Result<MenuId, MenuError> {
        let parent = self.node(row.menu).ok_or(MenuError::StaleMenu(row.menu))?;
        if !parent.visible {
            return Err(MenuError::NotVisible(row.menu));
        }
        let child = parent.submenu_of(row.row).ok_or(MenuError::NotDisclosing {
            menu: row.menu,
            row: row.row,
        })?;
        let row_rect = parent.widget.row_rect(row.row).ok_or(MenuError::NoSuchRow {
            menu: row.menu,
            row: row.row,
        })?;
        if self.nodes[child.idx()].visible {
            return Ok(child);
        }

        let siblings: SmallVec<[MenuId; 4]> = parent
            .submenus
            .values()
            .copied()
            .filter(|&c| c != child)
            .collect();
        for sibling in siblings {
            self.close_node(sibling, false);
        }
        self.nodes[row.menu.idx()]
            .widget
            .set_highlighted_row(Some(row.row));

        let corner = Point::new(row_rect.x1, row_rect.y0);
        let settle = self.scheduler.schedule(MenuTask::Settle(child), 0);
        let node = &mut self.nodes[child.idx()];
        node.widget.show(Rect::from_points(corner, corner), None, false);
        node.visible = true;
        node.opened_from = Some(row);
        node.settle = Some(settle);
        self.router.register(child);
        self.focused = Some(child);
        log::debug!("disclosed menu {child:?} from {row:?}");
        Ok(child)
    }

    /// Position an open submenu inside the viewport now.
    ///
    /// [`MenuTree::tick`] does this once per disclosure; hosts call it again
    /// when the viewport or the parent moves.
    pub fn settle(&mut self, menu: MenuId) -> Result<(), MenuError> {
        let viewport = self.config.viewport.ok_or(MenuError::MissingViewport)?;
        let node = self.node(menu).ok_or(MenuError::StaleMenu(menu))?;
        let from = node
            .opened_from
            .filter(|_| node.visible)
            .ok_or(MenuError::NotVisible(menu))?;
        let parent = self.node(from.menu).ok_or(MenuError::StaleMenu(from.menu))?;
        let row = parent.widget.row_rect(from.row).ok_or(MenuError::NoSuchRow {
            menu: from.menu,
            row: from.row,
        })?;

        let placement = anchor::solve(&AnchorRequest {
            row,
            root: viewport,
            parent_frame: parent.widget.frame(),
            size: node.widget.natural_size(),
            first_row_offset: node.widget.first_row_offset(),
        });
        let origin = placement.world_origin(viewport);
        self.nodes[menu.idx()]
            .widget
            .place(origin, placement.max_height);
        log::trace!(
            "placed menu {menu:?} at {origin:?} (max height {:?})",
            placement.max_height
        );
        Ok(())
    }

    /// Advance the clock to `now` and run due hover and placement tasks.
    ///
    /// Work scheduled by a task (a submenu opened by hover schedules its
    /// placement) runs on a later call. Returns the number of tasks run.
    pub fn tick(&mut self, now: u64) -> usize {
        let due = self.scheduler.take_due(now);
        let count = due.len();
        for (id, task) in due {
            match task {
                MenuTask::Settle(menu) => {
                    self.scheduler.cancel(id);
                    if let Some(node) = self.nodes.get_mut(menu.idx())
                        && node.settle == Some(id)
                    {
                        node.settle = None;
                    }
                    if let Err(err) = self.settle(menu) {
                        log::warn!("could not place menu {menu:?}: {err}");
                    }
                }
                MenuTask::Disclose(row) => self.disclose(row),
            }
        }
        count
    }

    fn disclose(&mut self, row: RowRef) {
        if self
            .submenu_of(row.menu, row.row)
            .is_some_and(|child| self.is_visible(child))
        {
            return;
        }
        if let Err(err) = self.open_submenu(row) {
            log::warn!("hover disclosure of {row:?} failed: {err}");
        }
    }

    /// Run the action of a selectable row. Returns `false` if nothing ran.
    pub(crate) fn run_action(&mut self, row: RowRef) -> bool {
        if self.node(row.menu).is_none() {
            return false;
        }
        let Some(entry) = self.nodes[row.menu.idx()].rows.get_mut(row.row) else {
            return false;
        };
        if !entry.flags.is_selectable() {
            return false;
        }
        match entry.action.as_mut() {
            Some(action) => {
                log::debug!("activated {:?} ({row:?})", entry.label);
                action();
                true
            }
            None => false,
        }
    }

    /// Close every open child of `menu` whose disclosing row is not highlighted.
    ///
    /// Nothing closes while no row is highlighted, so crossing a separator,
    /// a disabled row, or the frame padding keeps the open child.
    pub(crate) fn close_unselected_submenus(&mut self, menu: MenuId) {
        let Some(node) = self.node(menu) else {
            return;
        };
        let Some(highlighted) = node.widget.highlighted_row() else {
            return;
        };
        let stale: SmallVec<[MenuId; 4]> = node
            .submenus
            .iter()
            .filter(|&(&row, &child)| row != highlighted && self.nodes[child.idx()].visible)
            .map(|(_, &child)| child)
            .collect();
        for child in stale {
            self.close_node(child, false);
        }
    }

    // --- queries ---

    /// The root node.
    pub const fn root(&self) -> MenuId {
        self.root
    }

    /// Whether the root is shown.
    pub fn is_open(&self) -> bool {
        self.nodes[self.root.idx()].visible
    }

    /// Whether `menu` is shown. Stale ids are never visible.
    pub fn is_visible(&self, menu: MenuId) -> bool {
        self.node(menu).is_some_and(|n| n.visible)
    }

    /// Visible nodes from the root to the deepest open submenu.
    pub fn visible_chain(&self) -> SmallVec<[MenuId; 4]> {
        let mut chain = SmallVec::new();
        let mut current = Some(self.root).filter(|&r| self.is_visible(r));
        while let Some(menu) = current {
            chain.push(menu);
            current = self.nodes[menu.idx()]
                .submenus
                .values()
                .copied()
                .find(|&child| self.is_visible(child));
        }
        chain
    }

    /// Number of visible nodes.
    pub fn depth(&self) -> usize {
        self.visible_chain().len()
    }

    /// The node receiving keyboard intents.
    pub const fn focused(&self) -> Option<MenuId> {
        self.focused
    }

    /// Look up a node.
    pub fn node(&self, menu: MenuId) -> Option<&MenuNode<W>> {
        if menu.epoch() != self.epoch {
            return None;
        }
        self.nodes.get(menu.idx())
    }

    /// The node created for a full path prefix; `""` is the root.
    pub fn node_for_path(&self, path: &str) -> Option<MenuId> {
        self.paths.get(path).copied()
    }

    /// Rows of `menu` in display order.
    pub fn rows(&self, menu: MenuId) -> Option<&[Row]> {
        self.node(menu).map(MenuNode::rows)
    }

    /// The child disclosed by a row of `menu`.
    pub fn submenu_of(&self, menu: MenuId, row: usize) -> Option<MenuId> {
        self.node(menu)?.submenu_of(row)
    }

    /// The widget of `menu`.
    pub fn widget(&self, menu: MenuId) -> Option<&W> {
        self.node(menu).map(MenuNode::widget)
    }

    /// Mutable access to the widget of `menu`, for host-driven scrolling.
    ///
    /// Rows must only be added through [`MenuTree::add_item`] and friends:
    /// calling [`MenuWidget::add_row`] or [`MenuWidget::add_separator`] here
    /// leaves the widget with rows the tree does not know about.
    pub fn widget_mut(&mut self, menu: MenuId) -> Option<&mut W> {
        self.node(menu)?;
        Some(&mut self.nodes[menu.idx()].widget)
    }

    /// Current configuration.
    pub const fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Replace the root-covering region, for example after a window resize.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.config.viewport = Some(viewport);
    }

    /// Change the hover delay. Armed disclosures keep their deadline.
    pub fn set_hover_delay_ms(&mut self, delay_ms: u64) {
        self.config.hover_delay_ms = delay_ms;
        self.hover.set_delay_ms(delay_ms);
    }

    /// The earliest pending task deadline, for scheduling the next
    /// [`MenuTree::tick`].
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;
    use crate::list::ListMenu;
    use crate::testing::{VIEWPORT, open_tree};

    fn tree() -> MenuTree<ListMenu> {
        MenuTree::new(MenuConfig::default().with_viewport(VIEWPORT))
    }

    #[test]
    fn shared_prefixes_resolve_to_the_same_node() {
        let mut t = tree();
        t.add_item("A/B/x", false, || {}).unwrap();
        t.add_item("A/B/y", false, || {}).unwrap();
        t.add_item("A/z", false, || {}).unwrap();

        let a = t.node_for_path("A").unwrap();
        let b = t.node_for_path("A/B").unwrap();
        assert_eq!(t.rows(t.root()).unwrap().len(), 1, "root holds only A");
        assert_eq!(t.submenu_of(t.root(), 0), Some(a));
        assert_eq!(t.submenu_of(a, 0), Some(b));
        let labels: Vec<&str> = t.rows(b).unwrap().iter().map(Row::label).collect();
        assert_eq!(labels, vec!["x", "y"]);
        assert_eq!(t.rows(a).unwrap()[1].label(), "z");
        assert_eq!(t.node(b).unwrap().owner(), Some(a));
    }

    #[test]
    fn separators_and_disabled_rows() {
        let mut t = tree();
        t.add_item("Item", true, || {}).unwrap();
        t.add_separator("").unwrap();
        t.add_disabled_item("Off", true).unwrap();
        t.add_separator("Sub/").unwrap();

        let rows = t.rows(t.root()).unwrap();
        assert!(rows[0].is_checked());
        assert!(rows[1].is_separator());
        assert!(rows[2].is_disabled() && !rows[2].has_action());
        assert_eq!(rows[3].label(), "Sub");

        let sub = t.node_for_path("Sub").unwrap();
        assert!(t.rows(sub).unwrap()[0].is_separator());
        assert_eq!(t.widget(sub).unwrap().rows().len(), 1);
    }

    #[test]
    fn data_actions_receive_their_data() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut t = tree();
        for n in [3_u32, 7] {
            let seen = Rc::clone(&seen);
            t.add_item_with_data("N", false, move |d: &u32| seen.borrow_mut().push(*d), n)
                .unwrap();
        }
        assert!(t.run_action(RowRef::new(t.root(), 1)));
        assert!(t.run_action(RowRef::new(t.root(), 0)));
        assert_eq!(*seen.borrow(), vec![7, 3]);
    }

    #[test]
    fn disabled_rows_never_run() {
        let mut t = tree();
        let row = t.add_disabled_item("Off", false).unwrap();
        assert!(!t.run_action(row));
    }

    #[test]
    fn open_requires_viewport() {
        let mut t: MenuTree<ListMenu> = MenuTree::new(MenuConfig::default());
        t.add_item("A", false, || {}).unwrap();
        assert_eq!(
            t.open(Rect::ZERO, None, false),
            Err(MenuError::MissingViewport)
        );
        assert!(!t.is_open());
    }

    #[test]
    fn rows_cannot_be_added_while_open() {
        let mut t = open_tree(&["A"]);
        assert_eq!(t.add_item("B", false, || {}).unwrap_err(), MenuError::MenuOpen);
        t.dismiss();
        assert!(t.add_item("B", false, || {}).is_ok());
    }

    #[test]
    fn open_focuses_root_and_is_idempotent() {
        let mut t = open_tree(&["A"]);
        assert_eq!(t.focused(), Some(t.root()));
        t.open(Rect::new(300.0, 300.0, 300.0, 300.0), None, false).unwrap();
        assert_eq!(t.widget(t.root()).unwrap().frame().origin(), Point::new(10.0, 10.0));
    }

    #[test]
    fn disclosing_a_sibling_closes_the_other() {
        let mut t = open_tree(&["A/x", "B/y"]);
        let root = t.root();
        let a = t.open_submenu(RowRef::new(root, 0)).unwrap();
        let b = t.open_submenu(RowRef::new(root, 1)).unwrap();
        assert!(!t.is_visible(a));
        assert!(t.is_visible(b));
        assert_eq!(t.visible_chain().as_slice(), &[root, b]);
        assert_eq!(t.focused(), Some(b));
    }

    #[test]
    fn disclosing_twice_is_a_noop() {
        let mut t = open_tree(&["A/x"]);
        let row = RowRef::new(t.root(), 0);
        let a = t.open_submenu(row).unwrap();
        assert_eq!(t.open_submenu(row), Ok(a));
        assert_eq!(t.depth(), 2);
    }

    #[test]
    fn disclosure_errors() {
        let mut t = open_tree(&["A/x", "leaf"]);
        let root = t.root();
        assert_eq!(
            t.open_submenu(RowRef::new(root, 1)),
            Err(MenuError::NotDisclosing { menu: root, row: 1 })
        );
        let a = t.node_for_path("A").unwrap();
        let x = t.add_item("A/x2", false, || {});
        assert_eq!(x.unwrap_err(), MenuError::MenuOpen);
        assert_eq!(
            t.open_submenu(RowRef::new(a, 0)),
            Err(MenuError::NotVisible(a))
        );
    }

    #[test]
    fn close_is_post_order_and_moves_focus_up() {
        let mut t = open_tree(&["A/B/C/x"]);
        let root = t.root();
        let a = t.open_submenu(RowRef::new(root, 0)).unwrap();
        let b = t.open_submenu(RowRef::new(a, 0)).unwrap();
        let c = t.open_submenu(RowRef::new(b, 0)).unwrap();
        assert_eq!(t.depth(), 4);
        assert_eq!(t.focused(), Some(c));

        t.close(a, true).unwrap();
        assert_eq!(t.visible_chain().as_slice(), &[root]);
        assert_eq!(t.focused(), Some(root));
        assert!(t.node(c).unwrap().opened_from().is_none());
        assert!(
            !t.widget(a).unwrap().restored_focus(),
            "only the root restores focus"
        );
        // Idempotent.
        t.close(a, false).unwrap();
        assert_eq!(t.depth(), 1);
    }

    #[test]
    fn dismiss_restores_focus_through_the_root() {
        let mut t = open_tree(&["A/x"]);
        t.open_submenu(RowRef::new(t.root(), 0)).unwrap();
        t.dismiss();
        assert_eq!(t.depth(), 0);
        assert_eq!(t.focused(), None);
        assert!(t.widget(t.root()).unwrap().restored_focus());
    }

    #[test]
    fn settle_runs_on_the_next_tick() {
        let mut t = open_tree(&["A/x"]);
        let root = t.root();
        let a = t.open_submenu(RowRef::new(root, 0)).unwrap();
        let row = t.widget(root).unwrap().row_rect(0).unwrap();

        assert_eq!(t.next_deadline(), Some(0));
        assert_eq!(t.tick(0), 1);
        let frame = t.widget(a).unwrap().frame();
        assert_eq!(frame.x0, row.x1);
        assert_eq!(frame.y0, row.y0 - 4.0, "first row lines up with the disclosing row");
        assert_eq!(t.next_deadline(), None);
    }

    #[test]
    fn closing_before_settle_cancels_it() {
        let mut t = open_tree(&["A/x"]);
        let a = t.open_submenu(RowRef::new(t.root(), 0)).unwrap();
        t.close(a, false).unwrap();
        assert_eq!(t.tick(100), 0);
    }

    #[test]
    fn tall_submenus_are_capped_to_the_viewport() {
        let labels: Vec<String> = (0..40).map(|i| alloc::format!("Long/{i}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut t = open_tree(&refs);
        let long = t.open_submenu(RowRef::new(t.root(), 0)).unwrap();
        t.tick(0);
        let w = t.widget(long).unwrap();
        assert_eq!(w.max_height(), Some(VIEWPORT.height()));
        assert_eq!(w.frame().y0, 0.0);
        assert_eq!(w.frame().height(), VIEWPORT.height());
    }

    #[test]
    fn settling_again_keeps_the_cap() {
        let labels: Vec<String> = (0..40).map(|i| alloc::format!("Long/{i}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut t = open_tree(&refs);
        let long = t.open_submenu(RowRef::new(t.root(), 0)).unwrap();
        t.tick(0);
        t.settle(long).unwrap();
        t.settle(long).unwrap();
        let w = t.widget(long).unwrap();
        assert_eq!(w.max_height(), Some(VIEWPORT.height()));
        assert!(
            w.frame().y1 <= VIEWPORT.y1,
            "submenu must stay inside the viewport, got {:?}",
            w.frame()
        );
    }

    #[test]
    fn widget_mut_scrolls_an_open_submenu() {
        let labels: Vec<String> = (0..40).map(|i| alloc::format!("Long/{i}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut t = open_tree(&refs);
        let long = t.open_submenu(RowRef::new(t.root(), 0)).unwrap();
        t.tick(0);
        t.widget_mut(long).unwrap().scroll_by(100.0);
        assert_eq!(t.widget(long).unwrap().scroll_offset(), 100.0);
        assert_eq!(t.rows(long).unwrap().len(), t.widget(long).unwrap().rows().len());
    }

    #[test]
    fn clear_invalidates_ids() {
        let mut t = open_tree(&["A/x"]);
        let a = t.node_for_path("A").unwrap();
        t.clear();
        assert!(!t.is_open());
        assert!(t.node(a).is_none());
        assert_eq!(t.close(a, false), Err(MenuError::StaleMenu(a)));
        assert_ne!(t.root(), MenuId::new(0, 0));
        assert_eq!(t.node_for_path("A"), None);
        assert!(t.rows(t.root()).unwrap().is_empty());
    }
}
