//! Authentication session snapshot as published by the external auth provider.

use serde::{Deserialize, Serialize};

use crate::{Role, UserProfile};

/// Read-only view of the auth context.
///
/// Created on app start, mutated by the provider, dropped on sign-out. The
/// gates only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub authenticated: bool,
    pub loading: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl Session {
    /// Initial state while the provider resolves the stored credentials.
    pub fn loading() -> Self {
        Self {
            authenticated: false,
            loading: true,
            user: None,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            authenticated: true,
            loading: false,
            user: Some(user),
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().and_then(|u| u.role.as_ref())
    }
}
