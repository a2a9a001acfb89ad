//! `adminboard-gate` — render/redirect decisions for protected dashboard views.
//!
//! The host UI calls `evaluate` whenever a watched input changes (auth state,
//! path, profile). The gates hold no lifecycle and schedule nothing; the only
//! side effect is a `replace` on the host's [`Navigator`].

pub mod config;
pub mod navigation;
pub mod profile_gate;
pub mod session_gate;

pub use config::{AuthMethod, ConfigError, GateConfig};
pub use navigation::{Navigator, RecordingNavigator, Redirect, Render, RETURN_TO_PARAM};
pub use profile_gate::{ProfileDecision, ProfileGate, ProfileState, ProfileStatus, evaluate_profile};
pub use session_gate::{GateState, SessionDecision, SessionGate, evaluate_session};
