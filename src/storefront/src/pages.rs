/* src/storefront/src/pages.rs */

use storefront_core::acl::PERMISSION_ADMIN;
use storefront_core::metadata::text_from_html;
use storefront_core::settings::{ContentWidth, SettingsOverride};
use storefront_core::{PageDef, PageProps, Product, StorefrontServer};
use storefront_engine::components::not_authorized;
use storefront_engine::{blank_layout, escape_html, not_app_layout};
use url::Url;

pub const PERMISSION_DASHBOARD_VIEW: &str = "SYSTEM.DASHBOARD.VIEW";

/// Register every storefront page on the server builder.
pub fn register(server: StorefrontServer) -> StorefrontServer {
  server
    .page(PageDef::new("/", home).auth_guard(false))
    .page(
      PageDef::new("/login", login)
        .guest_guard(true)
        .layout(blank_layout)
        .title("Login - E-commerce"),
    )
    .page(
      PageDef::new("/register", register_page)
        .guest_guard(true)
        .layout(blank_layout)
        .title("Register - E-commerce"),
    )
    .page(
      PageDef::new("/product/{productId}", product_detail)
        .auth_guard(false)
        .layout(not_app_layout)
        .product_detail(),
    )
    .page(PageDef::new("/my-profile", my_profile).title("My profile"))
    .page(
      PageDef::new("/manage-system", dashboard)
        .permission([PERMISSION_ADMIN, PERMISSION_DASHBOARD_VIEW])
        .settings(|| SettingsOverride {
          content_width: Some(ContentWidth::Full),
          ..Default::default()
        })
        .title("Dashboard"),
    )
    .page(
      PageDef::new("/401", |_: &PageProps| not_authorized())
        .auth_guard(false)
        .layout(blank_layout)
        .title("Not authorized"),
    )
}

fn display_name(props: &PageProps) -> Option<String> {
  let user = props.user.as_ref()?;
  let name = [user.first_name.as_deref(), user.last_name.as_deref()]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" ");
  Some(if name.is_empty() { user.email.clone() } else { name })
}

fn home(props: &PageProps) -> String {
  let greeting = match display_name(props) {
    Some(name) => format!("Welcome back, {}", escape_html(&name)),
    None => "Welcome".to_string(),
  };
  format!(
    r#"<section class="home"><h1>{greeting}</h1><p>Browse our latest products.</p></section>"#
  )
}

fn login(_: &PageProps) -> String {
  concat!(
    r#"<section class="auth-page login"><h1>Login</h1>"#,
    r#"<form class="auth-form" data-action="login">"#,
    r#"<label>Email<input type="email" name="email" required></label>"#,
    r#"<label>Password<input type="password" name="password" required></label>"#,
    r#"<button type="submit">Login</button></form>"#,
    r#"<p>Don't have an account? <a href="/register">Register</a></p></section>"#,
  )
  .to_string()
}

fn register_page(_: &PageProps) -> String {
  concat!(
    r#"<section class="auth-page register"><h1>Register</h1>"#,
    r#"<form class="auth-form" data-action="register">"#,
    r#"<label>Email<input type="email" name="email" required></label>"#,
    r#"<label>Password<input type="password" name="password" required></label>"#,
    r#"<label>Confirm password<input type="password" name="confirmPassword" required></label>"#,
    r#"<button type="submit">Register</button></form>"#,
    r#"<p>Already have an account? <a href="/login">Login</a></p></section>"#,
  )
  .to_string()
}

/// Link target for a product: its slug when the backend sent one, else its id.
fn product_href(product: &Product) -> String {
  let slug = product.extra.get("slug").and_then(|v| v.as_str()).unwrap_or(product.id.as_str());
  let Ok(mut url) = Url::parse("http://storefront.invalid/product") else {
    return "/".to_string();
  };
  if let Ok(mut path) = url.path_segments_mut() {
    path.push(slug);
  }
  url.path().to_string()
}

fn product_detail(props: &PageProps) -> String {
  let product: Product =
    serde_json::from_value(props.data["productData"].clone()).unwrap_or_default();
  let related: Vec<Product> =
    serde_json::from_value(props.data["listRelatedProduct"].clone()).unwrap_or_default();

  if props.data.get("degraded").is_some() {
    return concat!(
      r#"<section class="product-detail degraded">"#,
      r#"<p>Product information is temporarily unavailable. Please try again later.</p>"#,
      r#"</section>"#,
    )
    .to_string();
  }

  let mut html = String::from(r#"<section class="product-detail">"#);
  if !product.image.is_empty() {
    html.push_str(&format!(
      r#"<img class="product-image" src="{}" alt="{}">"#,
      escape_html(&product.image),
      escape_html(&product.name)
    ));
  }
  html.push_str(&format!("<h1>{}</h1>", escape_html(&product.name)));
  if let Some(price) = product.extra.get("price") {
    html.push_str(&format!(r#"<p class="product-price">{}</p>"#, escape_html(&price.to_string())));
  }
  html.push_str(&format!(
    r#"<div class="product-description">{}</div>"#,
    escape_html(&text_from_html(&product.description))
  ));
  html.push_str("</section>");

  if !related.is_empty() {
    html.push_str(r#"<section class="related-products"><h2>Related products</h2><ul>"#);
    for item in &related {
      html.push_str(&format!(
        r#"<li><a href="{}">{}</a></li>"#,
        escape_html(&product_href(item)),
        escape_html(&item.name)
      ));
    }
    html.push_str("</ul></section>");
  }
  html
}

fn my_profile(props: &PageProps) -> String {
  let Some(user) = props.user.as_ref() else {
    return String::new();
  };
  let name = display_name(props).unwrap_or_default();
  let role = user.role.as_ref().map_or("", |r| r.name.as_str());
  format!(
    r#"<section class="my-profile"><h1>{}</h1><dl><dt>Email</dt><dd>{}</dd><dt>Role</dt><dd>{}</dd></dl></section>"#,
    escape_html(&name),
    escape_html(&user.email),
    escape_html(role)
  )
}

fn dashboard(props: &PageProps) -> String {
  let name = display_name(props).unwrap_or_default();
  format!(
    r#"<section class="dashboard"><h1>Dashboard</h1><p>Signed in as {}</p></section>"#,
    escape_html(&name)
  )
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use storefront_core::session::Role;
  use storefront_core::{GuardMode, User};

  use super::*;

  fn signed_in(first: Option<&str>) -> PageProps {
    PageProps {
      user: Some(User {
        id: "u1".into(),
        email: "lam@example.com".into(),
        first_name: first.map(String::from),
        role: Some(Role { name: "Admin".into(), permission: vec![] }),
        ..Default::default()
      }),
      ..Default::default()
    }
  }

  #[test]
  fn product_page_requires_a_product_source() {
    assert!(register(StorefrontServer::new()).into_parts().is_err());
  }

  #[test]
  fn home_greets_user() {
    assert!(home(&PageProps::default()).contains("<h1>Welcome</h1>"));
    assert!(home(&signed_in(Some("Lam"))).contains("Welcome back, Lam"));
    assert!(home(&signed_in(None)).contains("Welcome back, lam@example.com"));
  }

  #[test]
  fn product_detail_escapes_backend_text() {
    let props = PageProps {
      data: json!({
        "productData": {
          "_id": "p1",
          "name": "Mouse <X1>",
          "description": "<p>Quiet &amp; <b>fast</b></p>",
          "price": 25
        },
        "listRelatedProduct": [{ "_id": "p2", "name": "Pad", "slug": "mouse pad" }]
      }),
      ..Default::default()
    };
    let html = product_detail(&props);
    assert!(html.contains("<h1>Mouse &lt;X1&gt;</h1>"));
    assert!(html.contains(r#"<div class="product-description">Quiet &amp; fast</div>"#));
    assert!(html.contains(r#"<p class="product-price">25</p>"#));
    assert!(html.contains(r#"<a href="/product/mouse%20pad">Pad</a>"#));
  }

  #[test]
  fn degraded_product_shows_notice() {
    let props = PageProps {
      data: json!({ "productData": {}, "listRelatedProduct": [], "degraded": "TIMEOUT" }),
      ..Default::default()
    };
    assert!(product_detail(&props).contains("temporarily unavailable"));
  }

  #[test]
  fn related_link_falls_back_to_id() {
    let product = Product { id: "p9".into(), ..Default::default() };
    assert_eq!(product_href(&product), "/product/p9");
  }

  #[test]
  fn profile_lists_account_fields() {
    let html = my_profile(&signed_in(Some("Lam")));
    assert!(html.contains("<h1>Lam</h1>"));
    assert!(html.contains("<dd>lam@example.com</dd>"));
    assert!(html.contains("<dd>Admin</dd>"));
    assert_eq!(my_profile(&PageProps::default()), "");
  }

  #[test]
  fn guard_modes_of_registered_pages() {
    struct NoProducts;
    impl storefront_core::ProductSource for NoProducts {
      fn product_by_slug(
        &self,
        _: String,
        _: bool,
      ) -> storefront_core::BoxFuture<Result<Product, storefront_core::StoreError>> {
        Box::pin(async { Ok(Product::default()) })
      }

      fn related_by_slug(
        &self,
        _: String,
      ) -> storefront_core::BoxFuture<Result<Vec<Product>, storefront_core::StoreError>> {
        Box::pin(async { Ok(Vec::new()) })
      }
    }

    let parts = register(StorefrontServer::new())
      .product_source(std::sync::Arc::new(NoProducts))
      .into_parts()
      .unwrap();
    let mode = |route: &str| parts.pages.iter().find(|p| p.route == route).map(|p| p.guard);
    assert_eq!(mode("/"), Some(GuardMode::NoGuard));
    assert_eq!(mode("/login"), Some(GuardMode::GuestOnly));
    assert_eq!(mode("/register"), Some(GuardMode::GuestOnly));
    assert_eq!(mode("/product/{productId}"), Some(GuardMode::NoGuard));
    assert_eq!(mode("/my-profile"), Some(GuardMode::AuthOnly));
    assert_eq!(mode("/manage-system"), Some(GuardMode::AuthOnly));
    assert_eq!(mode("/401"), Some(GuardMode::NoGuard));

    let dashboard = parts.pages.iter().find(|p| p.route == "/manage-system").unwrap();
    assert_eq!(dashboard.permission, [PERMISSION_ADMIN, PERMISSION_DASHBOARD_VIEW]);
    assert_eq!(dashboard.settings.and_then(|s| s.content_width), Some(ContentWidth::Full));
  }
}
