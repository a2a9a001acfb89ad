//! `adminboard-auth` — role/permission model for the admin dashboard.
//!
//! Pure decisions only: no IO, no UI framework types. The role table is an
//! injected [`RoleRegistry`]; every check is a total function that denies on
//! absent or unknown input instead of failing.

pub mod access;
pub mod authorize;
pub mod catalog;
pub mod permissions;
pub mod profile;
pub mod registry;
pub mod roles;
pub mod routes;
pub mod session;

pub use access::RoleAccess;
pub use authorize::{
    AuthorizationExplanation, AuthzError, DenialKind, authorize, can_manage_role,
    explain_permission, has_permission,
};
pub use catalog::RbacCatalog;
pub use permissions::Permission;
pub use profile::{ProfileField, UserProfile};
pub use registry::{RoleDefinition, RoleRegistry};
pub use roles::Role;
pub use routes::{NavSection, can_access_route, visible_sections};
pub use session::Session;
