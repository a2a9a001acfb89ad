//! Host router seam: render decisions and `replace` navigation.

use std::cell::RefCell;

use serde::Serialize;

/// Query parameter carrying the originally requested path across sign-in.
pub const RETURN_TO_PARAM: &str = "returnTo";

/// What the host should render for the guarded subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Render {
    LoadingPlaceholder,
    Children,
    Nothing,
}

/// A navigation the gate wants the host router to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub href: String,
}

impl Redirect {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    /// `base` with `returnTo=<encoded return_to>` appended.
    pub fn with_return_to(base: &str, return_to: &str) -> Self {
        let separator = if base.contains('?') { '&' } else { '?' };
        Self {
            href: format!(
                "{}{}{}={}",
                base,
                separator,
                RETURN_TO_PARAM,
                urlencoding::encode(return_to)
            ),
        }
    }
}

/// The router primitive the gates drive.
///
/// `replace` must not push a history entry: the guarded page must not be
/// reachable with "back" after the redirect. Fire-and-forget; completion is
/// observed as a later path change.
pub trait Navigator {
    fn replace(&self, href: &str);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn replace(&self, href: &str) {
        (**self).replace(href)
    }
}

/// Navigator that records every `replace` call (tests, dry runs).
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    calls: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, href: &str) {
        self.calls.borrow_mut().push(href.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_to_is_percent_encoded() {
        let redirect = Redirect::with_return_to("/auth/firebase/sign-in", "/dashboard/blog/new?tab=seo");
        assert_eq!(
            redirect.href,
            "/auth/firebase/sign-in?returnTo=%2Fdashboard%2Fblog%2Fnew%3Ftab%3Dseo"
        );
    }

    #[test]
    fn return_to_joins_existing_query() {
        let redirect = Redirect::with_return_to("/sign-in?tenant=acme", "/dashboard");
        assert_eq!(redirect.href, "/sign-in?tenant=acme&returnTo=%2Fdashboard");
    }

    #[test]
    fn recording_navigator_keeps_order() {
        let nav = RecordingNavigator::new();
        nav.replace("/a");
        (&nav).replace("/b");
        assert_eq!(nav.calls(), vec!["/a", "/b"]);
        assert_eq!(nav.count(), 2);
    }
}
