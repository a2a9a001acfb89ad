//! Role registry: the fixed role hierarchy and its permission/route tables.
//!
//! A registry is built once at process start (from [`RoleRegistry::builtin`]
//! or a JSON table) and shared read-only, typically behind an `Arc`. There is
//! no mutation API.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use adminboard_core::{DomainError, DomainResult};

use crate::permissions::{auto_schools, blog, events, marketing, settings, users};
use crate::{Permission, Role};

/// Default path prefix under which role route sets apply.
pub const DEFAULT_DASHBOARD_ROOT: &str = "/dashboard";

/// One tier of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinition {
    pub role: Role,
    pub label: String,
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
    /// First path segments under the dashboard root this role may open.
    #[serde(default)]
    pub routes: BTreeSet<String>,
}

impl RoleDefinition {
    pub fn new(role: Role, label: impl Into<String>) -> Self {
        Self {
            role,
            label: label.into(),
            permissions: BTreeSet::new(),
            routes: BTreeSet::new(),
        }
    }

    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    pub fn with_routes<S: Into<String>>(mut self, routes: impl IntoIterator<Item = S>) -> Self {
        self.routes.extend(routes.into_iter().map(Into::into));
        self
    }
}

/// Serialized shape of a registry table.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryTable {
    #[serde(default = "default_dashboard_root")]
    dashboard_root: String,
    /// Highest privilege first.
    roles: Vec<RoleDefinition>,
}

fn default_dashboard_root() -> String {
    DEFAULT_DASHBOARD_ROOT.to_string()
}

/// Immutable role hierarchy with per-role permission and route sets.
///
/// # Invariants
/// - The hierarchy is non-empty and ordered highest privilege first.
/// - Role identifiers are unique and non-blank.
/// - The dashboard root is an absolute path without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRegistry {
    dashboard_root: String,
    definitions: Vec<RoleDefinition>,
    positions: HashMap<Role, usize>,
}

impl RoleRegistry {
    /// Build a registry from definitions ordered highest privilege first.
    pub fn from_definitions(definitions: Vec<RoleDefinition>) -> DomainResult<Self> {
        Self::build(DEFAULT_DASHBOARD_ROOT, definitions)
    }

    /// Load a registry from its JSON table.
    ///
    /// ```json
    /// { "dashboardRoot": "/dashboard",
    ///   "roles": [ { "role": "admin", "label": "Admin",
    ///                "permissions": ["blog.read"], "routes": ["blog"] } ] }
    /// ```
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let table: RegistryTable = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("role registry json: {}", e)))?;
        Self::build(&table.dashboard_root, table.roles)
    }

    /// Serialize the registry back into its JSON table.
    pub fn to_json(&self) -> DomainResult<String> {
        let table = RegistryTable {
            dashboard_root: self.dashboard_root.clone(),
            roles: self.definitions.clone(),
        };
        serde_json::to_string_pretty(&table)
            .map_err(|e| DomainError::validation(format!("role registry json: {}", e)))
    }

    /// Replace the dashboard root (e.g. when the app is mounted under `/admin`).
    pub fn with_dashboard_root(self, root: &str) -> DomainResult<Self> {
        Self::build(root, self.definitions)
    }

    fn build(root: &str, definitions: Vec<RoleDefinition>) -> DomainResult<Self> {
        if definitions.is_empty() {
            return Err(DomainError::invariant("role hierarchy cannot be empty"));
        }

        let root = root.trim();
        if !root.starts_with('/') {
            return Err(DomainError::validation(format!(
                "dashboard root must be an absolute path, got '{}'",
                root
            )));
        }
        let root = match root.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        let mut positions = HashMap::with_capacity(definitions.len());
        for (idx, def) in definitions.iter().enumerate() {
            if def.role.is_blank() {
                return Err(DomainError::validation(format!(
                    "role at position {} has an empty identifier",
                    idx
                )));
            }
            if positions.insert(def.role.clone(), idx).is_some() {
                return Err(DomainError::invariant(format!(
                    "duplicate role '{}' in hierarchy",
                    def.role
                )));
            }
        }

        tracing::debug!(
            roles = definitions.len(),
            dashboard_root = root,
            "role registry initialized"
        );

        Ok(Self {
            dashboard_root: root.to_string(),
            definitions,
            positions,
        })
    }

    fn assemble(root: &str, definitions: Vec<RoleDefinition>) -> Self {
        let positions = definitions
            .iter()
            .enumerate()
            .map(|(idx, def)| (def.role.clone(), idx))
            .collect();
        Self {
            dashboard_root: root.to_string(),
            definitions,
            positions,
        }
    }

    /// The dashboard's default table: `[super_admin, admin, manager, user]`.
    pub fn builtin() -> Self {
        let definitions = vec![
            RoleDefinition::new(Role::SUPER_ADMIN, "Super Admin")
                .with_permissions([
                    users::LIST,
                    users::READ,
                    users::CREATE,
                    users::UPDATE,
                    users::DELETE,
                    users::MANAGE_ROLES,
                    blog::READ,
                    blog::WRITE,
                    blog::PUBLISH,
                    blog::DELETE,
                    auto_schools::READ,
                    auto_schools::WRITE,
                    auto_schools::DELETE,
                    events::READ,
                    events::WRITE,
                    events::DELETE,
                    marketing::READ,
                    marketing::WRITE,
                    settings::READ,
                    settings::WRITE,
                ])
                .with_routes([
                    "user",
                    "blog",
                    "auto-school",
                    "event",
                    "marketing",
                    "settings",
                    "account",
                ]),
            RoleDefinition::new(Role::ADMIN, "Admin")
                .with_permissions([
                    users::LIST,
                    users::READ,
                    users::CREATE,
                    users::UPDATE,
                    users::DELETE,
                    users::MANAGE_ROLES,
                    blog::READ,
                    blog::WRITE,
                    blog::PUBLISH,
                    blog::DELETE,
                    auto_schools::READ,
                    auto_schools::WRITE,
                    auto_schools::DELETE,
                    events::READ,
                    events::WRITE,
                    events::DELETE,
                    marketing::READ,
                    marketing::WRITE,
                    settings::READ,
                ])
                .with_routes(["user", "blog", "auto-school", "event", "marketing", "account"]),
            RoleDefinition::new(Role::MANAGER, "Manager")
                .with_permissions([
                    users::LIST,
                    users::READ,
                    blog::READ,
                    blog::WRITE,
                    blog::PUBLISH,
                    auto_schools::READ,
                    auto_schools::WRITE,
                    events::READ,
                    events::WRITE,
                    marketing::READ,
                ])
                .with_routes(["blog", "auto-school", "event", "marketing", "account"]),
            RoleDefinition::new(Role::USER, "User")
                .with_permissions([blog::READ, auto_schools::READ, events::READ])
                .with_routes(["blog", "event", "account"]),
        ];

        // Static table: unique, non-blank roles (covered by `builtin_table_is_valid`).
        Self::assemble(DEFAULT_DASHBOARD_ROOT, definitions)
    }

    pub fn dashboard_root(&self) -> &str {
        &self.dashboard_root
    }

    /// Number of roles in the hierarchy.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Roles from highest to lowest privilege.
    pub fn hierarchy(&self) -> impl Iterator<Item = &Role> {
        self.definitions.iter().map(|d| &d.role)
    }

    pub fn definitions(&self) -> &[RoleDefinition] {
        &self.definitions
    }

    /// Position in the hierarchy (0 = highest). `None` for unknown roles.
    pub fn position(&self, role: &Role) -> Option<usize> {
        self.positions.get(role).copied()
    }

    pub fn definition(&self, role: &Role) -> Option<&RoleDefinition> {
        self.position(role).map(|idx| &self.definitions[idx])
    }

    pub fn contains(&self, role: &Role) -> bool {
        self.positions.contains_key(role)
    }

    /// Numeric level: the lowest role is 1, the highest is `len()`.
    pub fn level(&self, role: &Role) -> Option<u32> {
        self.position(role)
            .map(|idx| (self.definitions.len() - idx) as u32)
    }

    pub fn label(&self, role: &Role) -> Option<&str> {
        self.definition(role).map(|d| d.label.as_str())
    }

    pub fn permissions(&self, role: &Role) -> Option<&BTreeSet<Permission>> {
        self.definition(role).map(|d| &d.permissions)
    }

    /// The lowest-privilege tier.
    pub fn lowest(&self) -> &RoleDefinition {
        // Non-empty by construction.
        &self.definitions[self.definitions.len() - 1]
    }

    /// Route set for a role; absent or unknown roles get the lowest tier's set.
    pub fn routes(&self, role: Option<&Role>) -> &BTreeSet<String> {
        match role.and_then(|r| self.definition(r)) {
            Some(def) => &def.routes,
            None => &self.lowest().routes,
        }
    }

    /// Roles that currently hold `permission`, highest first.
    pub fn roles_granting(&self, permission: &Permission) -> Vec<&Role> {
        self.definitions
            .iter()
            .filter(|d| d.permissions.contains(permission))
            .map(|d| &d.role)
            .collect()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
