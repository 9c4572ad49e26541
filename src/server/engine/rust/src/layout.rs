/* src/server/engine/rust/src/layout.rs */

//! Layout functions wrap rendered page content in page chrome.
//! Every layout has the shape `(content) -> content`.

/// Default layout for application pages: top bar, navigation and footer.
pub fn user_layout(content: &str) -> String {
  format!(
    r#"<div class="layout-wrapper layout-user">{}<main class="layout-content">{content}</main>{}</div>"#,
    app_bar(),
    footer()
  )
}

/// Storefront layout without the application chrome (product pages).
pub fn not_app_layout(content: &str) -> String {
  format!(
    r#"<div class="layout-wrapper layout-not-app">{}<main class="layout-content">{content}</main>{}</div>"#,
    store_bar(),
    footer()
  )
}

/// Bare layout for sign-in flows and error pages.
pub fn blank_layout(content: &str) -> String {
  format!(r#"<div class="layout-wrapper layout-blank">{content}</div>"#)
}

fn app_bar() -> &'static str {
  concat!(
    r#"<header class="app-bar"><nav>"#,
    r#"<a href="/">Home</a>"#,
    r#"<a href="/my-cart">Cart</a>"#,
    r#"<a href="/my-profile">Profile</a>"#,
    r#"<a href="/manage-system">Dashboard</a>"#,
    r#"</nav></header>"#,
  )
}

fn store_bar() -> &'static str {
  r#"<header class="app-bar app-bar-store"><nav><a href="/">Home</a><a href="/my-cart">Cart</a></nav></header>"#
}

fn footer() -> &'static str {
  r#"<footer class="layout-footer"></footer>"#
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn user_layout_wraps_content_in_main() {
    let html = user_layout("<p>page</p>");
    assert!(html.contains(r#"<main class="layout-content"><p>page</p></main>"#));
    assert!(html.contains("layout-user"));
    assert!(html.contains(r#"href="/my-profile""#));
  }

  #[test]
  fn not_app_layout_has_no_dashboard_link() {
    let html = not_app_layout("<p>product</p>");
    assert!(html.contains("<p>product</p>"));
    assert!(!html.contains("/manage-system"));
  }

  #[test]
  fn blank_layout_is_minimal() {
    assert_eq!(blank_layout("x"), r#"<div class="layout-wrapper layout-blank">x</div>"#);
  }
}
