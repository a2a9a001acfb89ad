//! RBAC catalog for audit/display ("what does each role get?").

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Permission, RoleRegistry};

/// Role summary (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleSummary {
    pub name: String,
    pub label: String,
    pub level: u32,
    pub permissions: Vec<String>,
    pub routes: Vec<String>,
}

/// Permission definition (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDefinition {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Roles holding this permission, highest first.
    pub granted_to: Vec<String>,
}

/// Complete view of the role table.
#[derive(Debug, Clone, Serialize)]
pub struct RbacCatalog {
    /// Highest privilege first.
    pub roles: Vec<RoleSummary>,
    /// Sorted by name.
    pub permissions: Vec<PermissionDefinition>,
}

impl RoleRegistry {
    pub fn catalog(&self) -> RbacCatalog {
        let roles = self
            .definitions()
            .iter()
            .map(|def| RoleSummary {
                name: def.role.as_str().to_string(),
                label: def.label.clone(),
                level: self.level(&def.role).unwrap_or_default(),
                permissions: def.permissions.iter().map(|p| p.as_str().to_string()).collect(),
                routes: def.routes.iter().cloned().collect(),
            })
            .collect();

        let mut permissions: BTreeMap<&Permission, PermissionDefinition> = BTreeMap::new();
        for def in self.definitions() {
            for perm in &def.permissions {
                permissions
                    .entry(perm)
                    .or_insert_with(|| PermissionDefinition {
                        name: perm.as_str().to_string(),
                        description: permission_description(perm),
                        category: perm.category().map(str::to_string),
                        granted_to: Vec::new(),
                    })
                    .granted_to
                    .push(def.role.as_str().to_string());
            }
        }

        RbacCatalog {
            roles,
            permissions: permissions.into_values().collect(),
        }
    }
}

fn permission_description(perm: &Permission) -> Option<String> {
    // Format: "module.action"
    let (module, action) = perm.as_str().split_once('.')?;
    if module.is_empty() || action.is_empty() {
        return None;
    }

    let resource = module.replace('_', "-");
    let action_desc = match action {
        "read" => "View",
        "list" => "List",
        "write" => "Create/update",
        "create" => "Create",
        "update" => "Update",
        "delete" => "Delete",
        "publish" => "Publish",
        "manage_roles" => "Change roles of",
        other => other,
    };

    Some(format!("{} {} records", action_desc, resource))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{auto_schools, users};

    #[test]
    fn catalog_lists_roles_in_hierarchy_order() {
        let catalog = RoleRegistry::builtin().catalog();
        let names: Vec<&str> = catalog.roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["super_admin", "admin", "manager", "user"]);
        assert_eq!(catalog.roles[0].level, 4);
        assert_eq!(catalog.roles[3].label, "User");
    }

    #[test]
    fn permission_entries_know_their_holders() {
        let catalog = RoleRegistry::builtin().catalog();
        let manage = catalog
            .permissions
            .iter()
            .find(|p| p.name == users::MANAGE_ROLES.as_str())
            .unwrap();
        assert_eq!(manage.granted_to, vec!["super_admin", "admin"]);
        assert_eq!(manage.category.as_deref(), Some("users"));
        assert_eq!(manage.description.as_deref(), Some("Change roles of users records"));
    }

    #[test]
    fn descriptions_for_underscored_modules() {
        assert_eq!(
            permission_description(&auto_schools::DELETE).as_deref(),
            Some("Delete auto-schools records")
        );
        assert_eq!(permission_description(&Permission::new("opaque")), None);
    }

    #[test]
    fn catalog_serializes() {
        let json = serde_json::to_value(RoleRegistry::builtin().catalog()).unwrap();
        assert!(json["permissions"].as_array().unwrap().len() > 10);
    }
}
