//! Per-user read-only view over the registry.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::authorize::{can_manage_role, has_permission};
use crate::routes::can_access_route;
use crate::{Permission, Role, RoleRegistry, Session};

/// Convenience facade bundling the checks for one role.
///
/// Holds no logic of its own; every method delegates to the free functions
/// with the captured role.
#[derive(Debug, Clone)]
pub struct RoleAccess {
    registry: Arc<RoleRegistry>,
    role: Option<Role>,
}

impl RoleAccess {
    pub fn new(registry: Arc<RoleRegistry>, role: Option<Role>) -> Self {
        Self { registry, role }
    }

    /// View for the signed-in user of `session` (no role when signed out).
    pub fn for_session(registry: Arc<RoleRegistry>, session: &Session) -> Self {
        Self::new(registry, session.role().cloned())
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        has_permission(&self.registry, self.role.as_ref(), Some(permission))
    }

    pub fn can_manage_role(&self, target: &Role) -> bool {
        can_manage_role(&self.registry, self.role.as_ref(), Some(target))
    }

    /// Accessible route segments (lowest tier's set for absent/unknown roles).
    pub fn routes(&self) -> &BTreeSet<String> {
        self.registry.routes(self.role.as_ref())
    }

    pub fn can_access_route(&self, path: &str) -> bool {
        can_access_route(&self.registry, self.role.as_ref(), path)
    }

    /// Roles this user may assign to others, highest first.
    pub fn manageable_roles(&self) -> Vec<&Role> {
        self.registry
            .hierarchy()
            .filter(|target| self.can_manage_role(target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{blog, users};
    use crate::UserProfile;
    use adminboard_core::UserId;

    fn registry() -> Arc<RoleRegistry> {
        Arc::new(RoleRegistry::builtin())
    }

    #[test]
    fn facade_matches_free_functions() {
        let registry = registry();
        let access = RoleAccess::new(registry.clone(), Some(Role::MANAGER));
        assert_eq!(
            access.has_permission(&blog::PUBLISH),
            has_permission(&registry, Some(&Role::MANAGER), Some(&blog::PUBLISH))
        );
        assert!(!access.has_permission(&users::DELETE));
        assert!(access.can_manage_role(&Role::USER));
        assert!(!access.can_manage_role(&Role::MANAGER));
        assert_eq!(access.role(), Some(&Role::MANAGER));
    }

    #[test]
    fn manageable_roles_are_strictly_below() {
        let access = RoleAccess::new(registry(), Some(Role::ADMIN));
        let roles: Vec<&str> = access.manageable_roles().iter().map(|r| r.as_str()).collect();
        assert_eq!(roles, vec!["manager", "user"]);

        let lowest = RoleAccess::new(registry(), Some(Role::USER));
        assert!(lowest.manageable_roles().is_empty());
    }

    #[test]
    fn signed_out_view_denies_and_uses_lowest_routes() {
        let registry = registry();
        let access = RoleAccess::for_session(registry.clone(), &Session::signed_out());
        assert_eq!(access.role(), None);
        assert!(!access.has_permission(&blog::READ));
        assert!(access.manageable_roles().is_empty());
        assert_eq!(access.routes(), &registry.lowest().routes);
    }

    #[test]
    fn session_view_uses_user_role() {
        let user = UserProfile::new(UserId::new(), "x@example.com", "X").with_role(Role::SUPER_ADMIN);
        let access = RoleAccess::for_session(registry(), &Session::signed_in(user));
        assert!(access.can_access_route("/dashboard/settings"));
        assert_eq!(access.manageable_roles().len(), 3);
    }
}
