// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slash-delimited item paths.
//!
//! Callers address rows with strings such as `"Edit/Find/Next"`: every segment
//! but the last names a submenu, the last segment is the row label. The empty
//! path addresses the root menu, and a trailing `/` (as in `"Edit/"`) addresses
//! the submenu itself with an empty label, which is how separators are placed.

/// Hierarchy delimiter.
pub const DELIMITER: char = '/';

/// Split an item path into its menu path and leaf label.
///
/// ```
/// use understory_menu::path::split_path;
///
/// assert_eq!(split_path("Edit/Find/Next"), ("Edit/Find", "Next"));
/// assert_eq!(split_path("Quit"), ("", "Quit"));
/// assert_eq!(split_path("Edit/"), ("Edit", ""));
/// assert_eq!(split_path(""), ("", ""));
/// ```
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind(DELIMITER) {
        Some(i) => (&path[..i], &path[i + DELIMITER.len_utf8()..]),
        None => ("", path),
    }
}
