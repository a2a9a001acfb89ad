//! Role-based navigation: which dashboard sections a role may open.

use serde::{Deserialize, Serialize};

use crate::{Role, RoleRegistry};

/// First segment of `path` below `root`.
///
/// Returns `None` when the path is outside the root, `Some(None)` for the
/// root itself, and `Some(Some(segment))` otherwise.
fn section_under_root<'p>(root: &str, path: &'p str) -> Option<Option<&'p str>> {
    let path = path
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    let rest = if root == "/" {
        path.strip_prefix('/')?
    } else {
        let rest = path.strip_prefix(root)?;
        if !(rest.is_empty() || rest.starts_with('/')) {
            // "/dashboardx" is not under "/dashboard".
            return None;
        }
        rest.trim_start_matches('/')
    };

    Some(rest.split('/').find(|s| !s.is_empty()))
}

/// Can `role` open `path`?
///
/// Paths outside the dashboard root are not governed by role routes and are
/// always accessible, as is the root itself. Absent or unknown roles use the
/// lowest tier's route set.
pub fn can_access_route(registry: &RoleRegistry, role: Option<&Role>, path: &str) -> bool {
    match section_under_root(registry.dashboard_root(), path) {
        None | Some(None) => true,
        Some(Some(section)) => registry.routes(role).contains(section),
    }
}

/// A sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    pub path: String,
}

impl NavSection {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}

/// Filter a navigation list down to what `role` can open, preserving order.
pub fn visible_sections<'a>(
    registry: &RoleRegistry,
    role: Option<&Role>,
    sections: &'a [NavSection],
) -> Vec<&'a NavSection> {
    sections
        .iter()
        .filter(|s| can_access_route(registry, role, &s.path))
        .collect()
}
