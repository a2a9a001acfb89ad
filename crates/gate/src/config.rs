//! Gate configuration: auth method, sign-in routes, profile completion route.
//!
//! Built once at startup (defaults, JSON, or environment) and shared by `Arc`.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SIGN_IN_PATH: &str = "/auth/jwt/sign-in";
pub const DEFAULT_PROFILE_COMPLETION_PATH: &str = "/dashboard/account/complete-profile";

pub const ENV_AUTH_METHOD: &str = "AUTH_METHOD";
pub const ENV_DEFAULT_SIGN_IN_PATH: &str = "DEFAULT_SIGN_IN_PATH";
pub const ENV_PROFILE_COMPLETION_PATH: &str = "PROFILE_COMPLETION_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid gate config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown auth method '{0}'")]
    UnknownAuthMethod(String),

    #[error("invalid path for {field}: '{value}' (must start with '/')")]
    InvalidPath { field: String, value: String },
}

/// Authentication provider the dashboard is deployed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Jwt,
    Firebase,
    Amplify,
    Auth0,
    Supabase,
}

impl AuthMethod {
    pub const ALL: [AuthMethod; 5] = [
        AuthMethod::Jwt,
        AuthMethod::Firebase,
        AuthMethod::Amplify,
        AuthMethod::Auth0,
        AuthMethod::Supabase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Jwt => "jwt",
            AuthMethod::Firebase => "firebase",
            AuthMethod::Amplify => "amplify",
            AuthMethod::Auth0 => "auth0",
            AuthMethod::Supabase => "supabase",
        }
    }
}

impl core::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AuthMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownAuthMethod(wanted.to_string()))
    }
}

fn default_sign_in_paths() -> BTreeMap<AuthMethod, String> {
    AuthMethod::ALL
        .into_iter()
        .map(|m| (m, format!("/auth/{}/sign-in", m)))
        .collect()
}

fn default_sign_in_path() -> String {
    DEFAULT_SIGN_IN_PATH.to_string()
}

fn default_profile_completion_path() -> String {
    DEFAULT_PROFILE_COMPLETION_PATH.to_string()
}

/// Static routing configuration consumed by the gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateConfig {
    pub auth_method: AuthMethod,
    #[serde(default = "default_sign_in_paths")]
    pub sign_in_paths: BTreeMap<AuthMethod, String>,
    #[serde(default = "default_sign_in_path")]
    pub default_sign_in_path: String,
    #[serde(default = "default_profile_completion_path")]
    pub profile_completion_path: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::new(AuthMethod::Jwt)
    }
}

impl GateConfig {
    /// Default routes for `auth_method`.
    pub fn new(auth_method: AuthMethod) -> Self {
        Self {
            auth_method,
            sign_in_paths: default_sign_in_paths(),
            default_sign_in_path: default_sign_in_path(),
            profile_completion_path: default_profile_completion_path(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup` (missing keys keep their defaults).
    ///
    /// Unparsable values are logged and replaced by their defaults, so a typo in
    /// the deployment environment never keeps the dashboard from starting.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_method = match lookup(ENV_AUTH_METHOD).map(|raw| raw.parse::<AuthMethod>()) {
            Some(Ok(method)) => method,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "{} unparsable; using {}", ENV_AUTH_METHOD, AuthMethod::Jwt);
                AuthMethod::Jwt
            }
            None => {
                tracing::warn!("{} not set; using {}", ENV_AUTH_METHOD, AuthMethod::Jwt);
                AuthMethod::Jwt
            }
        };

        let mut config = Self::new(auth_method);
        if let Some(path) = env_path(&lookup, ENV_DEFAULT_SIGN_IN_PATH) {
            config.default_sign_in_path = path;
        }
        if let Some(path) = env_path(&lookup, ENV_PROFILE_COMPLETION_PATH) {
            config.profile_completion_path = path;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_path("defaultSignInPath", &self.default_sign_in_path)?;
        check_path("profileCompletionPath", &self.profile_completion_path)?;
        for (method, path) in &self.sign_in_paths {
            check_path(&format!("signInPaths.{}", method), path)?;
        }
        Ok(())
    }

    /// Sign-in route for the configured method.
    ///
    /// A method without a table entry falls back to the default sign-in path;
    /// [`GateConfig::warn_sign_in_fallback`] reports that once, never as an error.
    pub fn sign_in_path(&self) -> &str {
        self.sign_in_paths
            .get(&self.auth_method)
            .map(String::as_str)
            .unwrap_or(self.default_sign_in_path.as_str())
    }

    /// Log the sign-in fallback, if any. Returns whether the fallback applies.
    pub fn warn_sign_in_fallback(&self) -> bool {
        let missing = !self.sign_in_paths.contains_key(&self.auth_method);
        if missing {
            tracing::warn!(
                auth_method = %self.auth_method,
                fallback = %self.default_sign_in_path,
                "no sign-in path configured for auth method; using default"
            );
        }
        missing
    }
}

/// An environment path override, or `None` (with a warning) when it is not absolute.
fn env_path<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let path = lookup(key)?;
    if path.starts_with('/') {
        Some(path)
    } else {
        tracing::warn!(key, value = %path, "path override must start with '/'; using default");
        None
    }
}

fn check_path(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigError::InvalidPath {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}
