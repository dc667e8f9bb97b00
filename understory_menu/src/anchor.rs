// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Submenu placement inside the root-covering region.
//!
//! ## Algorithm
//!
//! Given the disclosing row and the submenu's laid-out size, in the local
//! frame of the root-covering region:
//!
//! 1. The submenu's top-left corner touches the row's top-right corner.
//! 2. It moves up by the offset of its own first row inside its frame, so the
//!    first row lines up with the disclosing row instead of the frame padding.
//! 3. If it overflows on the right, it flips to the left of the parent menu,
//!    clamped to the left edge.
//! 4. If it overflows at the bottom, it moves up to end at the bottom edge,
//!    clamped to the top edge.
//! 5. If it is still taller than the region, its height is capped and the
//!    widget scrolls.
//!
//! Placement needs the submenu's laid-out size, so the tree runs the solver
//! once per disclosure from a settle task rather than at attach time.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_menu::anchor::{AnchorRequest, solve};
//!
//! let placement = solve(&AnchorRequest {
//!     row: Rect::new(10.0, 40.0, 130.0, 62.0),
//!     root: Rect::new(0.0, 0.0, 800.0, 600.0),
//!     parent_frame: Rect::new(10.0, 10.0, 130.0, 100.0),
//!     size: Size::new(120.0, 80.0),
//!     first_row_offset: 4.0,
//! });
//! assert_eq!(placement.origin, Point::new(130.0, 36.0));
//! assert_eq!(placement.max_height, None);
//! ```

use kurbo::{Point, Rect, Size};

/// Inputs to [`solve`]. All rectangles are in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorRequest {
    /// Bounds of the disclosing row.
    pub row: Rect,
    /// The root-covering region.
    pub root: Rect,
    /// Outer frame of the menu that owns the disclosing row.
    pub parent_frame: Rect,
    /// Natural (uncapped) size of the submenu's outer frame.
    pub size: Size,
    /// Vertical offset of the submenu's first row inside its outer frame.
    pub first_row_offset: f64,
}

/// Result of [`solve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Top-left corner of the submenu in the root region's local frame.
    pub origin: Point,
    /// Height cap when the submenu is taller than the root region.
    pub max_height: Option<f64>,
}

impl Placement {
    /// Convert the local origin back to world coordinates.
    pub fn world_origin(&self, root: Rect) -> Point {
        root.origin() + self.origin.to_vec2()
    }
}

/// Compute a submenu placement that stays inside the root region.
pub fn solve(request: &AnchorRequest) -> Placement {
    let root_origin = request.root.origin().to_vec2();
    let root_size = request.root.size();
    let width = request.size.width;
    let height = request.size.height;

    let mut origin = Point::new(request.row.x1, request.row.y0) - root_origin;
    origin.y -= request.first_row_offset;

    if origin.x + width > root_size.width {
        let parent_left = request.parent_frame.x0 - root_origin.x;
        origin.x = (parent_left - width).max(0.0);
    }

    if origin.y + height > root_size.height {
        origin.y = (root_size.height - height).max(0.0);
    }

    let max_height = (height > root_size.height).then_some(root_size.height);

    Placement { origin, max_height }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(row: Rect, size: Size) -> AnchorRequest {
        AnchorRequest {
            row,
            root: Rect::new(0.0, 0.0, 400.0, 300.0),
            parent_frame: Rect::new(row.x0, 0.0, row.x1, 300.0),
            size,
            first_row_offset: 0.0,
        }
    }

    #[test]
    fn touches_row_top_right_corner() {
        let p = solve(&request(
            Rect::new(20.0, 50.0, 140.0, 72.0),
            Size::new(100.0, 60.0),
        ));
        assert_eq!(p.origin, Point::new(140.0, 50.0));
        assert_eq!(p.max_height, None);
    }

    #[test]
    fn first_row_lines_up_with_disclosing_row() {
        let mut r = request(Rect::new(20.0, 50.0, 140.0, 72.0), Size::new(100.0, 60.0));
        r.first_row_offset = 6.0;
        assert_eq!(solve(&r).origin.y, 44.0);
    }

    #[test]
    fn flips_left_of_parent_on_right_overflow() {
        let mut r = request(Rect::new(250.0, 10.0, 350.0, 30.0), Size::new(120.0, 60.0));
        r.parent_frame = Rect::new(240.0, 0.0, 360.0, 200.0);
        // 350 + 120 > 400, so flip: 240 - 120.
        assert_eq!(solve(&r).origin.x, 120.0);
    }

    #[test]
    fn flip_clamps_at_left_edge() {
        let mut r = request(Rect::new(60.0, 10.0, 300.0, 30.0), Size::new(150.0, 60.0));
        r.parent_frame = Rect::new(50.0, 0.0, 300.0, 200.0);
        let p = solve(&r);
        assert_eq!(p.origin.x, (50.0_f64 - 150.0).max(0.0));
        assert_eq!(p.origin.x, 0.0);
    }

    #[test]
    fn bottom_overflow_moves_up() {
        let p = solve(&request(
            Rect::new(0.0, 260.0, 100.0, 282.0),
            Size::new(100.0, 90.0),
        ));
        assert_eq!(p.origin.y, 210.0);
        assert_eq!(p.max_height, None);
    }

    #[test]
    fn taller_than_root_pins_top_and_caps_height() {
        let p = solve(&request(
            Rect::new(0.0, 120.0, 100.0, 142.0),
            Size::new(100.0, 500.0),
        ));
        assert_eq!(p.origin.y, 0.0);
        assert_eq!(p.max_height, Some(300.0));
    }

    #[test]
    fn works_in_offset_root_frame() {
        let mut r = request(Rect::new(120.0, 150.0, 220.0, 172.0), Size::new(80.0, 40.0));
        r.root = Rect::new(100.0, 100.0, 500.0, 400.0);
        let p = solve(&r);
        assert_eq!(p.origin, Point::new(120.0, 50.0));
        assert_eq!(p.world_origin(r.root), Point::new(220.0, 150.0));
    }

    #[test]
    fn offset_root_flip_uses_local_parent_edge() {
        let mut r = request(Rect::new(400.0, 150.0, 480.0, 172.0), Size::new(80.0, 40.0));
        r.root = Rect::new(100.0, 100.0, 500.0, 400.0);
        r.parent_frame = Rect::new(390.0, 100.0, 490.0, 300.0);
        // Local: row right edge 380 + 80 > 400, flip to (290 - 80).
        assert_eq!(solve(&r).origin.x, 210.0);
    }
}
