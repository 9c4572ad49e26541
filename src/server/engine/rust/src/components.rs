/* src/server/engine/rust/src/components.rs */

use crate::escape::escape_html;

/// Placeholder rendered while the session check is still pending.
pub fn fallback_spinner() -> String {
  concat!(
    r#"<div class="fallback-spinner" role="status" aria-busy="true">"#,
    r#"<div class="loading"><div class="effect-1 effects"></div><div class="effect-2 effects"></div>"#,
    r#"<div class="effect-3 effects"></div></div></div>"#,
  )
  .to_string()
}

/// Denial presentation for a failed ability check.
pub fn not_authorized() -> String {
  concat!(
    r#"<section class="not-authorized"><h1>401</h1>"#,
    r#"<h2>You are not authorized!</h2>"#,
    r#"<p>You don't have permission to access this page. Go home!</p>"#,
    r#"<a href="/">Back to home</a></section>"#,
  )
  .to_string()
}

pub fn not_found() -> String {
  concat!(
    r#"<section class="not-found"><h1>404</h1>"#,
    r#"<h2>Page not found</h2>"#,
    r#"<p>We couldn't find the page you are looking for.</p>"#,
    r#"<a href="/">Back to home</a></section>"#,
  )
  .to_string()
}

pub fn error_page(status: u16, message: &str) -> String {
  format!(
    r#"<section class="error-page"><h1>{status}</h1><p>{}</p><a href="/">Back to home</a></section>"#,
    escape_html(message)
  )
}

/// Toast container. `options_json` is handed to the client toast library as-is.
pub fn toaster(position: &str, options_json: &str) -> String {
  format!(
    r#"<div class="react-hot-toast" data-position="{}" data-toast-options="{}"></div>"#,
    escape_html(position),
    escape_html(options_json)
  )
}

/// Route-change progress bar mount point.
pub fn route_progress() -> String {
  r#"<div id="nprogress" class="route-progress" aria-hidden="true"></div>"#.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toaster_escapes_options() {
    let html = toaster("top-right", r##"{"success":{"style":{"background":"#DDF6E8"}}}"##);
    assert!(html.contains(r#"data-position="top-right""#));
    assert!(html.contains("&quot;background&quot;:&quot;#DDF6E8&quot;"));
  }

  #[test]
  fn error_page_escapes_message() {
    assert!(error_page(500, "<oops>").contains("&lt;oops&gt;"));
  }

  #[test]
  fn spinner_is_marked_busy() {
    assert!(fallback_spinner().contains(r#"aria-busy="true""#));
  }
}
