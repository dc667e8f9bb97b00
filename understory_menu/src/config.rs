// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu tree configuration.

use kurbo::Rect;

/// Default dwell time before a hovered row discloses its submenu.
pub const DEFAULT_HOVER_DELAY_MS: u64 = 500;

/// Configuration for a [`MenuTree`](crate::MenuTree).
///
/// ```
/// use kurbo::Rect;
/// use understory_menu::MenuConfig;
///
/// let config = MenuConfig::default()
///     .with_hover_delay_ms(250)
///     .with_viewport(Rect::new(0.0, 0.0, 1280.0, 720.0));
/// assert_eq!(config.hover_delay_ms, 250);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuConfig {
    /// Milliseconds the pointer must rest on a disclosing row before its
    /// submenu opens.
    pub hover_delay_ms: u64,
    /// The root-covering region in world coordinates.
    ///
    /// Pointer-down events inside it but outside every open menu dismiss the
    /// tree, and submenus are kept inside it. Opening requires a viewport.
    pub viewport: Option<Rect>,
    /// Highlight the first selectable row of a submenu entered with
    /// [`KeyIntent::MoveRight`](crate::KeyIntent::MoveRight).
    pub select_first_on_keyboard_open: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            hover_delay_ms: DEFAULT_HOVER_DELAY_MS,
            viewport: None,
            select_first_on_keyboard_open: true,
        }
    }
}

impl MenuConfig {
    /// Set the hover disclosure delay.
    pub fn with_hover_delay_ms(mut self, delay_ms: u64) -> Self {
        self.hover_delay_ms = delay_ms;
        self
    }

    /// Set the root-covering region.
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Choose whether keyboard-opened submenus highlight their first row.
    pub fn with_select_first_on_keyboard_open(mut self, select: bool) -> Self {
        self.select_first_on_keyboard_open = select;
        self
    }
}
