use serde::Serialize;
use thiserror::Error;

use crate::{Permission, Role, RoleRegistry};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("no role assigned")]
    MissingRole,

    #[error("unknown role '{0}'")]
    UnknownRole(String),

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Does `role` hold `permission`?
///
/// Total function: absent or blank arguments and unknown roles deny.
///
/// - No IO
/// - No panics
pub fn has_permission(
    registry: &RoleRegistry,
    role: Option<&Role>,
    permission: Option<&Permission>,
) -> bool {
    let (Some(role), Some(permission)) = (role, permission) else {
        return false;
    };
    if role.is_blank() || permission.is_blank() {
        return false;
    }

    registry
        .permissions(role)
        .is_some_and(|perms| perms.contains(permission))
}

/// Can a user holding `current` manage (create, edit, re-role) a user holding `target`?
///
/// True iff both roles are in the hierarchy and `current` strictly precedes
/// `target`. Roles outside the hierarchy can manage nobody and cannot be
/// managed by anybody; equal roles never manage each other.
pub fn can_manage_role(registry: &RoleRegistry, current: Option<&Role>, target: Option<&Role>) -> bool {
    let current = current.and_then(|r| registry.position(r));
    let target = target.and_then(|r| registry.position(r));

    match (current, target) {
        (Some(i), Some(j)) => i < j,
        _ => false,
    }
}

/// Same check as [`has_permission`], as a typed result for `?` call sites.
pub fn authorize(
    registry: &RoleRegistry,
    role: Option<&Role>,
    required: &Permission,
) -> Result<(), AuthzError> {
    let role = role.filter(|r| !r.is_blank()).ok_or(AuthzError::MissingRole)?;

    if !registry.contains(role) {
        tracing::debug!(role = %role, permission = %required, "authorization denied: unknown role");
        return Err(AuthzError::UnknownRole(role.as_str().to_string()));
    }

    if has_permission(registry, Some(role), Some(required)) {
        Ok(())
    } else {
        tracing::debug!(role = %role, permission = %required, "authorization denied");
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of a permission decision.
///
/// Answers "why can't this user see the Delete button?" without reproducing
/// the check by hand.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    /// The permission that was being checked (empty when absent).
    pub required_permission: String,

    /// Whether the permission was granted.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// The role that was checked, if any.
    pub role: Option<String>,

    /// Permissions held by the role (sorted), empty for unknown roles.
    pub effective_permissions: Vec<String>,

    /// If denied, this explains what was missing.
    pub denial_reason: Option<DenialReason>,
}

/// Detailed reason why a permission was denied.
#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    MissingRole,
    UnknownRole,
    MissingPermissionArgument,
    MissingPermission,
}

/// Explain why [`has_permission`] returns what it returns.
///
/// `granted` always agrees with [`has_permission`] for the same arguments.
pub fn explain_permission(
    registry: &RoleRegistry,
    role: Option<&Role>,
    permission: Option<&Permission>,
) -> AuthorizationExplanation {
    let required = permission.map(|p| p.as_str().to_string()).unwrap_or_default();
    let role_name = role.map(|r| r.as_str().to_string());

    let denied = |kind: DenialKind, message: String, suggestions: Vec<String>, effective: Vec<String>| {
        AuthorizationExplanation {
            required_permission: required.clone(),
            granted: false,
            reason: message.clone(),
            role: role_name.clone(),
            effective_permissions: effective,
            denial_reason: Some(DenialReason {
                kind,
                message,
                suggestions,
            }),
        }
    };

    let Some(role) = role.filter(|r| !r.is_blank()) else {
        return denied(
            DenialKind::MissingRole,
            "No role is assigned to the current user".to_string(),
            vec!["Assign one of the hierarchy roles to the user".to_string()],
            Vec::new(),
        );
    };

    let Some(perms) = registry.permissions(role) else {
        let known: Vec<&str> = registry.hierarchy().map(|r| r.as_str()).collect();
        return denied(
            DenialKind::UnknownRole,
            format!("Role '{}' is not part of the role hierarchy", role),
            vec![format!("Use one of the configured roles: {:?}", known)],
            Vec::new(),
        );
    };

    let effective: Vec<String> = perms.iter().map(|p| p.as_str().to_string()).collect();

    let Some(permission) = permission.filter(|p| !p.is_blank()) else {
        return denied(
            DenialKind::MissingPermissionArgument,
            "No permission was named in the check".to_string(),
            Vec::new(),
            effective,
        );
    };

    if perms.contains(permission) {
        return AuthorizationExplanation {
            required_permission: required.clone(),
            granted: true,
            reason: format!("Role '{}' holds permission '{}'", role, permission),
            role: role_name.clone(),
            effective_permissions: effective,
            denial_reason: None,
        };
    }

    let granting: Vec<String> = registry
        .roles_granting(permission)
        .into_iter()
        .map(|r| r.as_str().to_string())
        .collect();

    let mut suggestions = Vec::new();
    if granting.is_empty() {
        suggestions.push(format!(
            "No configured role grants '{}'; add it to the role table",
            permission
        ));
    } else {
        suggestions.push(format!(
            "Roles that grant '{}': {:?}",
            permission, granting
        ));
    }

    denied(
        DenialKind::MissingPermission,
        format!(
            "Role '{}' does not hold permission '{}'. Current permissions: {:?}",
            role, permission, effective
        ),
        suggestions,
        effective,
    )
}
