//! Name-keyed constructor tables.
//!
//! Every runtime-selectable model family (root solvers, equations of state,
//! interpolation schemes, ...) registers its members in a static slice of
//! `(name, constructor)` pairs; `select` resolves a configured name once at
//! construction time.

use crate::error::{BfError, BfResult};

/// Find `name` in a selection table.
///
/// Unknown names produce `BfError::UnknownSelection` carrying the full list of
/// valid options.
pub fn select<'a, T>(
    category: &'static str,
    name: &str,
    table: &'a [(&'static str, T)],
) -> BfResult<&'a T> {
    table
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, item)| item)
        .ok_or_else(|| BfError::UnknownSelection {
            category,
            name: name.to_string(),
            options: table.iter().map(|(key, _)| *key).collect(),
        })
}
