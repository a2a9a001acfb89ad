//! Drives both gates the way a dashboard layout does: session gate around the
//! whole dashboard, profile gate inside it, role routes for the sidebar.

use std::sync::Arc;

use adminboard_auth::{
    NavSection, ProfileField, Role, RoleAccess, RoleRegistry, Session, UserProfile,
    permissions::users,
};
use adminboard_core::UserId;
use adminboard_gate::{
    AuthMethod, GateConfig, GateState, ProfileGate, ProfileState, RecordingNavigator, Render,
    SessionGate,
};

struct Layout {
    registry: Arc<RoleRegistry>,
    session_gate: SessionGate,
    profile_gate: ProfileGate,
    navigator: RecordingNavigator,
}

impl Layout {
    fn new(method: AuthMethod) -> Self {
        adminboard_observability::init_test();

        let config = Arc::new(GateConfig::new(method));
        Self {
            registry: Arc::new(RoleRegistry::builtin()),
            session_gate: SessionGate::new(config.clone()),
            profile_gate: ProfileGate::new(config),
            navigator: RecordingNavigator::new(),
        }
    }

    /// One reactive pass: session gate first, profile gate only when authorized.
    fn render(&mut self, session: &Session, path: &str) -> Render {
        let outer = self.session_gate.evaluate(session, path, &self.navigator);
        if outer.render != Render::Children {
            return outer.render;
        }
        let profile = ProfileState::from(session.user());
        self.profile_gate
            .evaluate(profile, path, &self.navigator)
            .render
    }
}

fn profile(role: Role) -> UserProfile {
    ProfileField::ALL
        .into_iter()
        .fold(
            UserProfile::new(UserId::new(), "ops@example.com", "Ops").with_role(role),
            |p, f| p.with_field(f, "filled"),
        )
}

#[test]
fn sign_in_round_trip() {
    let mut layout = Layout::new(AuthMethod::Firebase);

    assert_eq!(
        layout.render(&Session::loading(), "/dashboard/event/42"),
        Render::LoadingPlaceholder
    );
    assert_eq!(layout.navigator.count(), 0);

    assert_eq!(
        layout.render(&Session::signed_out(), "/dashboard/event/42"),
        Render::LoadingPlaceholder
    );
    // Same inputs again: no second navigation.
    layout.render(&Session::signed_out(), "/dashboard/event/42");
    assert_eq!(
        layout.navigator.calls(),
        vec!["/auth/firebase/sign-in?returnTo=%2Fdashboard%2Fevent%2F42"]
    );
    assert_eq!(layout.session_gate.state(), GateState::Redirecting);

    let session = Session::signed_in(profile(Role::MANAGER));
    assert_eq!(layout.render(&session, "/dashboard/event/42"), Render::Children);
    assert_eq!(layout.session_gate.state(), GateState::Authorized);
    assert_eq!(layout.navigator.count(), 1);
}

#[test]
fn incomplete_profile_is_sent_to_completion_once() {
    let mut layout = Layout::new(AuthMethod::Jwt);
    let mut user = profile(Role::USER);
    user.zip_code = Some(String::new());
    let session = Session::signed_in(user);

    assert_eq!(layout.render(&session, "/dashboard/blog"), Render::Children);
    assert_eq!(layout.render(&session, "/dashboard/blog"), Render::Children);
    assert_eq!(
        layout.navigator.calls(),
        vec![adminboard_gate::config::DEFAULT_PROFILE_COMPLETION_PATH]
    );
}

#[test]
fn signed_in_without_profile_document_renders_nothing() {
    let mut layout = Layout::new(AuthMethod::Jwt);
    let session = Session {
        authenticated: true,
        loading: false,
        user: None,
    };
    assert_eq!(layout.render(&session, "/dashboard"), Render::Nothing);
    assert_eq!(layout.navigator.count(), 0);
}

#[test]
fn missing_sign_in_entry_uses_default_path() {
    adminboard_observability::init_test();

    let mut config = GateConfig::new(AuthMethod::Auth0);
    config.sign_in_paths.remove(&AuthMethod::Auth0);
    config.default_sign_in_path = "/login".to_string();

    let navigator = RecordingNavigator::new();
    let mut gate = SessionGate::new(Arc::new(config));
    gate.evaluate(&Session::signed_out(), "/dashboard/user", &navigator);

    assert_eq!(navigator.calls(), vec!["/login?returnTo=%2Fdashboard%2Fuser"]);
}

#[test]
fn sidebar_and_actions_follow_role() {
    let layout = Layout::new(AuthMethod::Jwt);
    let session = Session::signed_in(profile(Role::ADMIN));
    let access = RoleAccess::for_session(layout.registry.clone(), &session);

    let sections = vec![
        NavSection::new("Users", "/dashboard/user"),
        NavSection::new("Marketing", "/dashboard/marketing"),
        NavSection::new("Settings", "/dashboard/settings"),
    ];
    let visible: Vec<&str> =
        adminboard_auth::visible_sections(access.registry(), access.role(), &sections)
            .into_iter()
            .map(|s| s.title.as_str())
            .collect();
    assert_eq!(visible, vec!["Users", "Marketing"]);

    assert!(access.has_permission(&users::MANAGE_ROLES));
    assert!(access.can_manage_role(&Role::MANAGER));
    assert!(!access.can_manage_role(&Role::SUPER_ADMIN));
}
