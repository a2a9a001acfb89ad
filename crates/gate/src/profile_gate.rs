//! Profile-completeness gate.
//!
//! Sends signed-in users with missing contact details to the completion page
//! once per stretch of incompleteness. Children keep rendering: the redirect is
//! a side effect, not a render decision.

use std::sync::Arc;

use serde::Serialize;

use adminboard_auth::{ProfileField, UserProfile};
use adminboard_core::{Entity, UserId};

use crate::config::GateConfig;
use crate::navigation::{Navigator, Redirect, Render};

/// Profile availability as reported by the fetching collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileState<'a> {
    /// Fetch in flight.
    Loading,
    /// Fetch finished; no profile document exists.
    Empty,
    Loaded(&'a UserProfile),
}

impl<'a> From<Option<&'a UserProfile>> for ProfileState<'a> {
    /// Hosts that only know "some/none" map `None` to [`ProfileState::Empty`].
    fn from(value: Option<&'a UserProfile>) -> Self {
        match value {
            Some(profile) => ProfileState::Loaded(profile),
            None => ProfileState::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "missing")]
pub enum ProfileStatus {
    Loading,
    Empty,
    Incomplete(Vec<ProfileField>),
    Complete,
}

/// Outcome of one profile gate evaluation.
///
/// From [`evaluate_profile`], `redirect` is the navigation the inputs call for.
/// From [`ProfileGate::evaluate`], it is the navigation issued by that call,
/// so a suppressed repeat carries `None` while `status` and `render` match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileDecision {
    pub status: ProfileStatus,
    pub render: Render,
    pub redirect: Option<Redirect>,
}

fn on_completion_page(config: &GateConfig, path: &str) -> bool {
    let path = path
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    path.trim_end_matches('/') == config.profile_completion_path.trim_end_matches('/')
}

/// Pure decision for one set of inputs.
pub fn evaluate_profile(config: &GateConfig, profile: ProfileState<'_>, path: &str) -> ProfileDecision {
    let profile = match profile {
        ProfileState::Loading => {
            return ProfileDecision {
                status: ProfileStatus::Loading,
                render: Render::Nothing,
                redirect: None,
            };
        }
        ProfileState::Empty => {
            return ProfileDecision {
                status: ProfileStatus::Empty,
                render: Render::Nothing,
                redirect: None,
            };
        }
        ProfileState::Loaded(profile) => profile,
    };

    let missing = profile.missing_fields();
    if missing.is_empty() {
        return ProfileDecision {
            status: ProfileStatus::Complete,
            render: Render::Children,
            redirect: None,
        };
    }

    let redirect = (!on_completion_page(config, path))
        .then(|| Redirect::new(config.profile_completion_path.clone()));

    ProfileDecision {
        status: ProfileStatus::Incomplete(missing),
        render: Render::Children,
        redirect,
    }
}

/// Stateful wrapper the host calls whenever the profile or path changes.
#[derive(Debug)]
pub struct ProfileGate {
    config: Arc<GateConfig>,
    /// A completion redirect was issued during the current incomplete stretch.
    redirected: bool,
    /// Owner of the last loaded profile; a different user starts a new stretch.
    subject: Option<UserId>,
}

impl ProfileGate {
    pub fn new(config: Arc<GateConfig>) -> Self {
        Self {
            config,
            redirected: false,
            subject: None,
        }
    }

    /// Evaluate and perform the navigation side effect.
    ///
    /// The returned decision's `redirect` is the navigation actually issued by
    /// this call.
    pub fn evaluate<N: Navigator + ?Sized>(
        &mut self,
        profile: ProfileState<'_>,
        path: &str,
        navigator: &N,
    ) -> ProfileDecision {
        match profile {
            // Refetch in flight: keep the current stretch.
            ProfileState::Loading => {}
            // Signed out or no document: whatever loads next starts fresh.
            ProfileState::Empty => self.reset(None),
            ProfileState::Loaded(profile) => {
                let id = *profile.id();
                if self.subject != Some(id) {
                    self.reset(Some(id));
                }
            }
        }

        let mut decision = evaluate_profile(&self.config, profile, path);

        let ProfileStatus::Incomplete(missing) = &decision.status else {
            if decision.status == ProfileStatus::Complete {
                self.redirected = false;
            }
            return decision;
        };

        match decision.redirect.take() {
            Some(redirect) if !self.redirected => {
                tracing::info!(
                    to = %redirect.href,
                    missing = ?missing,
                    "profile gate: redirecting to profile completion"
                );
                navigator.replace(&redirect.href);
                self.redirected = true;
                decision.redirect = Some(redirect);
            }
            _ => {}
        }

        decision
    }

    fn reset(&mut self, subject: Option<UserId>) {
        if self.redirected {
            tracing::debug!(?subject, "profile gate: new incomplete stretch");
        }
        self.redirected = false;
        self.subject = subject;
    }
}
