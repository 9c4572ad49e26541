/* src/server/adapter/axum/src/handler/session.rs */

use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};

/// Cookie holding the access token issued at sign-in.
pub(super) const TOKEN_COOKIE: &str = "accessToken";

/// Access token of the request: `accessToken` cookie first, then a bearer header.
pub(super) fn access_token(headers: &HeaderMap) -> Option<String> {
  let from_cookie = headers
    .get_all(COOKIE)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .find_map(|header| parse_cookie(header, TOKEN_COOKIE));
  if from_cookie.is_some() {
    return from_cookie;
  }

  headers
    .get(AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(|t| t.trim().to_string())
    .filter(|t| !t.is_empty())
}

fn parse_cookie(header: &str, name: &str) -> Option<String> {
  for pair in header.split(';') {
    if let Some((k, v)) = pair.trim().split_once('=') {
      let v = v.trim();
      if k.trim() == name && !v.is_empty() {
        return Some(v.to_string());
      }
    }
  }
  None
}
