//! Session gate (route guard).
//!
//! Decides, from the auth provider's `loading`/`authenticated` flags and the
//! current path, whether a protected subtree renders, shows a placeholder, or
//! sends the user to the sign-in page with a `returnTo` target.

use std::sync::Arc;

use serde::Serialize;

use adminboard_auth::Session;

use crate::config::GateConfig;
use crate::navigation::{Navigator, Redirect, Render};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// Auth state not resolved yet (or not evaluated yet).
    Checking,
    /// Sign-in navigation issued; the router takes over.
    Redirecting,
    Authorized,
}

/// Outcome of one session gate evaluation.
///
/// From [`evaluate_session`], `redirect` is the navigation the inputs call for.
/// From [`SessionGate::evaluate`], it is the navigation issued by that call,
/// so a suppressed repeat carries `None` while `state` and `render` match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionDecision {
    pub state: GateState,
    pub render: Render,
    pub redirect: Option<Redirect>,
}

/// Pure decision for one set of inputs.
///
/// Children are rendered only in [`GateState::Authorized`]; while checking or
/// redirecting the host shows the loading placeholder.
pub fn evaluate_session(config: &GateConfig, session: &Session, path: &str) -> SessionDecision {
    if session.loading {
        return SessionDecision {
            state: GateState::Checking,
            render: Render::LoadingPlaceholder,
            redirect: None,
        };
    }

    if !session.authenticated {
        return SessionDecision {
            state: GateState::Redirecting,
            render: Render::LoadingPlaceholder,
            redirect: Some(Redirect::with_return_to(config.sign_in_path(), path)),
        };
    }

    SessionDecision {
        state: GateState::Authorized,
        render: Render::Children,
        redirect: None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SessionInputs {
    authenticated: bool,
    loading: bool,
    path: String,
}

/// Stateful wrapper the host calls on every change of auth state or path.
///
/// Re-evaluating with unchanged inputs returns the same decision and issues no
/// further navigation.
#[derive(Debug)]
pub struct SessionGate {
    config: Arc<GateConfig>,
    state: GateState,
    last_inputs: Option<SessionInputs>,
}

impl SessionGate {
    pub fn new(config: Arc<GateConfig>) -> Self {
        config.warn_sign_in_fallback();
        Self {
            config,
            state: GateState::Checking,
            last_inputs: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Evaluate and perform the navigation side effect.
    ///
    /// The returned decision's `redirect` is the navigation actually issued by
    /// this call (`None` when suppressed as a repeat).
    pub fn evaluate<N: Navigator + ?Sized>(
        &mut self,
        session: &Session,
        path: &str,
        navigator: &N,
    ) -> SessionDecision {
        let inputs = SessionInputs {
            authenticated: session.authenticated,
            loading: session.loading,
            path: path.to_string(),
        };
        let mut decision = evaluate_session(&self.config, session, path);

        if self.last_inputs.as_ref() == Some(&inputs) {
            decision.redirect = None;
        } else if let Some(redirect) = &decision.redirect {
            tracing::info!(from = path, to = %redirect.href, "session gate: redirecting to sign-in");
            navigator.replace(&redirect.href);
        }

        if decision.state != self.state {
            tracing::debug!(from = ?self.state, to = ?decision.state, path, "session gate transition");
        }

        self.state = decision.state;
        self.last_inputs = Some(inputs);
        decision
    }
}
