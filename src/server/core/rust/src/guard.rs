/* src/server/core/rust/src/guard.rs */

use crate::session::SessionState;

/// Which session state a page is visible under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardMode {
  /// Only signed-out visitors; signed-in users are sent home.
  GuestOnly,
  /// Everyone, no session requirement.
  NoGuard,
  /// Only signed-in users; visitors are sent to the sign-in flow.
  AuthOnly,
}

/// What the shell does with a page after the guard has looked at the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
  /// Session check still pending: render the placeholder, not the page.
  Fallback,
  Render,
  Redirect(String),
}

impl GuardMode {
  /// Total over both flags. `guest_guard` takes precedence, so a page
  /// flagged with both is guest-only.
  pub fn select(auth_guard: bool, guest_guard: bool) -> Self {
    if guest_guard {
      Self::GuestOnly
    } else if !auth_guard {
      Self::NoGuard
    } else {
      Self::AuthOnly
    }
  }

  pub fn decide(self, session: &SessionState, return_path: &str) -> GuardDecision {
    match (self, session) {
      (_, SessionState::Pending) => GuardDecision::Fallback,
      (Self::NoGuard, _) => GuardDecision::Render,
      (Self::GuestOnly, SessionState::Authenticated(_)) => GuardDecision::Redirect("/".to_string()),
      (Self::GuestOnly, SessionState::Anonymous) => GuardDecision::Render,
      (Self::AuthOnly, SessionState::Authenticated(_)) => GuardDecision::Render,
      (Self::AuthOnly, SessionState::Anonymous) => {
        GuardDecision::Redirect(login_redirect(return_path))
      }
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::GuestOnly => "guest_only",
      Self::NoGuard => "no_guard",
      Self::AuthOnly => "auth_only",
    }
  }
}

/// Sign-in location that brings the user back to `return_path` afterwards.
pub fn login_redirect(return_path: &str) -> String {
  if return_path.is_empty() || return_path == "/" {
    return "/login".to_string();
  }
  let encoded: String = url::form_urlencoded::byte_serialize(return_path.as_bytes()).collect();
  format!("/login?returnUrl={encoded}")
}
