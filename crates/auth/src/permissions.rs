use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "blog.write"). They have
/// no lifecycle of their own: a permission exists only as a member of a role's
/// permission set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Leading `module` part of a `module.action` tag.
    pub fn category(&self) -> Option<&str> {
        self.0.split('.').next().filter(|c| !c.is_empty())
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// User management.
pub mod users {
    use super::Permission;

    pub const LIST: Permission = Permission::from_static("users.list");
    pub const READ: Permission = Permission::from_static("users.read");
    pub const CREATE: Permission = Permission::from_static("users.create");
    pub const UPDATE: Permission = Permission::from_static("users.update");
    pub const DELETE: Permission = Permission::from_static("users.delete");
    pub const MANAGE_ROLES: Permission = Permission::from_static("users.manage_roles");
}

/// Blog posts.
pub mod blog {
    use super::Permission;

    pub const READ: Permission = Permission::from_static("blog.read");
    pub const WRITE: Permission = Permission::from_static("blog.write");
    pub const PUBLISH: Permission = Permission::from_static("blog.publish");
    pub const DELETE: Permission = Permission::from_static("blog.delete");
}

/// Auto-school directory.
pub mod auto_schools {
    use super::Permission;

    pub const READ: Permission = Permission::from_static("auto_schools.read");
    pub const WRITE: Permission = Permission::from_static("auto_schools.write");
    pub const DELETE: Permission = Permission::from_static("auto_schools.delete");
}

/// Events calendar.
pub mod events {
    use super::Permission;

    pub const READ: Permission = Permission::from_static("events.read");
    pub const WRITE: Permission = Permission::from_static("events.write");
    pub const DELETE: Permission = Permission::from_static("events.delete");
}

/// Marketing content (banners, campaigns).
pub mod marketing {
    use super::Permission;

    pub const READ: Permission = Permission::from_static("marketing.read");
    pub const WRITE: Permission = Permission::from_static("marketing.write");
}

/// Dashboard-wide settings.
pub mod settings {
    use super::Permission;

    pub const READ: Permission = Permission::from_static("settings.read");
    pub const WRITE: Permission = Permission::from_static("settings.write");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_is_module_prefix() {
        assert_eq!(blog::WRITE.category(), Some("blog"));
        assert_eq!(users::MANAGE_ROLES.category(), Some("users"));
        assert_eq!(Permission::new("").category(), None);
    }

    #[test]
    fn static_and_owned_compare_equal() {
        assert_eq!(events::READ, Permission::new("events.read".to_string()));
    }
}
