/* src/server/core/rust/src/session.rs */

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::BoxFuture;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
  pub name: String,
  #[serde(default)]
  pub permission: Vec<String>,
}

/// Signed-in user as returned by the auth backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  #[serde(rename = "_id")]
  pub id: String,
  pub email: String,
  #[serde(default, rename = "firstName", skip_serializing_if = "Option::is_none")]
  pub first_name: Option<String>,
  #[serde(default, rename = "lastName", skip_serializing_if = "Option::is_none")]
  pub last_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role: Option<Role>,
}

impl User {
  pub fn permissions(&self) -> &[String] {
    match &self.role {
      Some(role) => &role.permission,
      None => &[],
    }
  }
}

/// Outcome of the session check for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
  /// The check has not resolved (yet).
  Pending,
  Anonymous,
  Authenticated(User),
}

impl SessionState {
  pub fn user(&self) -> Option<&User> {
    match self {
      Self::Authenticated(user) => Some(user),
      _ => None,
    }
  }
}

/// Looks up the user behind an access token.
/// `Ok(None)` means the token is not (or no longer) valid.
pub trait SessionResolver: Send + Sync {
  fn resolve(&self, token: String) -> BoxFuture<Result<Option<User>, StoreError>>;
}

/// Resolver for deployments without an auth backend: every visitor is anonymous.
pub struct NoSessions;

impl SessionResolver for NoSessions {
  fn resolve(&self, _token: String) -> BoxFuture<Result<Option<User>, StoreError>> {
    Box::pin(async { Ok(None) })
  }
}

/// Resolve the session for a request token, bounded by `timeout`.
///
/// No token short-circuits to `Anonymous`. A failed lookup is treated as a
/// signed-out visitor; a lookup that does not finish in time stays `Pending`.
pub async fn resolve_session(
  resolver: &dyn SessionResolver,
  token: Option<String>,
  timeout: Duration,
) -> SessionState {
  let Some(token) = token.filter(|t| !t.is_empty()) else {
    return SessionState::Anonymous;
  };

  match tokio::time::timeout(timeout, resolver.resolve(token)).await {
    Ok(Ok(Some(user))) => SessionState::Authenticated(user),
    Ok(Ok(None)) => SessionState::Anonymous,
    Ok(Err(e)) => {
      tracing::warn!(error = %e, "session lookup failed, continuing as anonymous");
      SessionState::Anonymous
    }
    Err(_) => {
      tracing::warn!(timeout_ms = timeout.as_millis() as u64, "session lookup timed out");
      SessionState::Pending
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Fixed(Result<Option<User>, StoreError>);

  impl SessionResolver for Fixed {
    fn resolve(&self, _token: String) -> BoxFuture<Result<Option<User>, StoreError>> {
      let result = self.0.clone();
      Box::pin(async move { result })
    }
  }

  struct Slow;

  impl SessionResolver for Slow {
    fn resolve(&self, _token: String) -> BoxFuture<Result<Option<User>, StoreError>> {
      Box::pin(async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(None)
      })
    }
  }

  fn alice() -> User {
    User { id: "u1".into(), email: "alice@example.com".into(), ..Default::default() }
  }

  #[tokio::test]
  async fn missing_token_is_anonymous() {
    let state = resolve_session(&Fixed(Ok(Some(alice()))), None, Duration::from_secs(1)).await;
    assert_eq!(state, SessionState::Anonymous);
  }

  #[tokio::test]
  async fn empty_token_is_anonymous() {
    let state =
      resolve_session(&Fixed(Ok(Some(alice()))), Some(String::new()), Duration::from_secs(1))
        .await;
    assert_eq!(state, SessionState::Anonymous);
  }

  #[tokio::test]
  async fn valid_token_authenticates() {
    let state =
      resolve_session(&Fixed(Ok(Some(alice()))), Some("t".into()), Duration::from_secs(1)).await;
    assert_eq!(state.user().map(|u| u.id.as_str()), Some("u1"));
  }

  #[tokio::test]
  async fn lookup_error_is_anonymous() {
    let state = resolve_session(
      &Fixed(Err(StoreError::upstream("boom"))),
      Some("t".into()),
      Duration::from_secs(1),
    )
    .await;
    assert_eq!(state, SessionState::Anonymous);
  }

  #[tokio::test]
  async fn timeout_stays_pending() {
    let state = resolve_session(&Slow, Some("t".into()), Duration::from_millis(10)).await;
    assert_eq!(state, SessionState::Pending);
  }

  #[test]
  fn user_permissions_default_empty() {
    assert!(alice().permissions().is_empty());
  }

  #[test]
  fn user_deserializes_backend_shape() {
    let user: User = serde_json::from_str(
      r#"{"_id":"u2","email":"bob@example.com","role":{"name":"Admin","permission":["ADMIN.GRANTED"]}}"#,
    )
    .unwrap_or_default();
    assert_eq!(user.id, "u2");
    assert_eq!(user.permissions(), ["ADMIN.GRANTED".to_string()]);
  }
}
