/* src/server/core/rust/src/page.rs */

use std::collections::HashMap;
use std::sync::Arc;

use crate::acl::AclSpec;
use crate::guard::GuardMode;
use crate::metadata::PageMeta;
use crate::session::User;
use crate::settings::SettingsOverride;

/// Wraps rendered page content in page chrome.
pub type LayoutFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Per-page settings, merged over the site settings.
pub type SettingsFn = Arc<dyn Fn() -> SettingsOverride + Send + Sync>;

pub type RenderFn = Arc<dyn Fn(&PageProps) -> String + Send + Sync>;

/// Where a page gets its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageData {
  Static,
  /// Product detail resolved from the `productId` route parameter.
  ProductDetail,
}

/// Everything a page render function receives.
#[derive(Debug, Clone, Default)]
pub struct PageProps {
  pub params: HashMap<String, String>,
  pub user: Option<User>,
  pub data: serde_json::Value,
}

/// Page registration. Every unset field falls back to a default in [`resolve_page`].
pub struct PageDef {
  /// Axum route syntax, e.g. "/product/{productId}"
  pub route: String,
  pub render: RenderFn,
  pub data: PageData,
  pub auth_guard: Option<bool>,
  pub guest_guard: Option<bool>,
  pub permission: Option<Vec<String>>,
  pub acl: Option<AclSpec>,
  pub layout: Option<LayoutFn>,
  pub settings: Option<SettingsFn>,
  pub meta: PageMeta,
}

impl PageDef {
  pub fn new(
    route: impl Into<String>,
    render: impl Fn(&PageProps) -> String + Send + Sync + 'static,
  ) -> Self {
    Self {
      route: route.into(),
      render: Arc::new(render),
      data: PageData::Static,
      auth_guard: None,
      guest_guard: None,
      permission: None,
      acl: None,
      layout: None,
      settings: None,
      meta: PageMeta::default(),
    }
  }

  pub fn auth_guard(mut self, on: bool) -> Self {
    self.auth_guard = Some(on);
    self
  }

  pub fn guest_guard(mut self, on: bool) -> Self {
    self.guest_guard = Some(on);
    self
  }

  pub fn permission<I, S>(mut self, permission: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.permission = Some(permission.into_iter().map(Into::into).collect());
    self
  }

  pub fn acl(mut self, acl: AclSpec) -> Self {
    self.acl = Some(acl);
    self
  }

  pub fn layout(mut self, layout: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
    self.layout = Some(Arc::new(layout));
    self
  }

  pub fn settings(
    mut self,
    settings: impl Fn() -> SettingsOverride + Send + Sync + 'static,
  ) -> Self {
    self.settings = Some(Arc::new(settings));
    self
  }

  pub fn title(mut self, title: impl Into<String>) -> Self {
    self.meta.title = Some(title.into());
    self
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.meta.description = Some(description.into());
    self
  }

  pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
    self.meta.keywords = Some(keywords.into());
    self
  }

  pub fn url_image(mut self, url_image: impl Into<String>) -> Self {
    self.meta.url_image = Some(url_image.into());
    self
  }

  pub fn product_detail(mut self) -> Self {
    self.data = PageData::ProductDetail;
    self
  }
}

/// Site-wide fallbacks for page fields.
pub struct PageDefaults {
  pub acl: AclSpec,
  pub layout: LayoutFn,
}

impl Default for PageDefaults {
  fn default() -> Self {
    Self { acl: AclSpec::default(), layout: Arc::new(storefront_engine::user_layout) }
  }
}

/// A page with every default applied. Immutable once registered.
pub struct ResolvedPage {
  pub route: String,
  pub render: RenderFn,
  pub data: PageData,
  pub guard: GuardMode,
  pub permission: Vec<String>,
  pub acl: AclSpec,
  pub layout: LayoutFn,
  pub settings: Option<SettingsOverride>,
  pub meta: PageMeta,
}

pub fn resolve_page(def: PageDef, defaults: &PageDefaults) -> ResolvedPage {
  let auth_guard = def.auth_guard.unwrap_or(true);
  let guest_guard = def.guest_guard.unwrap_or(false);
  ResolvedPage {
    route: def.route,
    render: def.render,
    data: def.data,
    guard: GuardMode::select(auth_guard, guest_guard),
    permission: def.permission.unwrap_or_default(),
    acl: def.acl.unwrap_or_else(|| defaults.acl.clone()),
    layout: def.layout.unwrap_or_else(|| defaults.layout.clone()),
    settings: def.settings.map(|f| f()),
    meta: def.meta,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::settings::ContentWidth;

  fn blank(_: &PageProps) -> String {
    "<p>page</p>".to_string()
  }

  #[test]
  fn bare_page_gets_defaults() {
    let page = resolve_page(PageDef::new("/my-profile", blank), &PageDefaults::default());
    assert_eq!(page.guard, GuardMode::AuthOnly);
    assert!(page.permission.is_empty());
    assert_eq!(page.acl, AclSpec::default());
    assert_eq!(page.data, PageData::Static);
    assert!(page.settings.is_none());
    assert!((page.layout)("<p>x</p>").contains("layout-user"));
  }

  #[test]
  fn guard_flags_map_to_modes() {
    let defaults = PageDefaults::default();
    let login = resolve_page(PageDef::new("/login", blank).guest_guard(true), &defaults);
    let home = resolve_page(PageDef::new("/", blank).auth_guard(false), &defaults);
    let both =
      resolve_page(PageDef::new("/x", blank).auth_guard(true).guest_guard(true), &defaults);
    assert_eq!(login.guard, GuardMode::GuestOnly);
    assert_eq!(home.guard, GuardMode::NoGuard);
    assert_eq!(both.guard, GuardMode::GuestOnly);
  }

  #[test]
  fn declared_fields_are_kept() {
    let def = PageDef::new("/manage-system", blank)
      .permission(["SYSTEM.DASHBOARD.VIEW"])
      .acl(AclSpec { action: "read".into(), subject: "Dashboard".into() })
      .layout(|c| format!("<section>{c}</section>"))
      .settings(|| SettingsOverride {
        content_width: Some(ContentWidth::Full),
        ..Default::default()
      })
      .title("Dashboard");
    let page = resolve_page(def, &PageDefaults::default());
    assert_eq!(page.permission, vec!["SYSTEM.DASHBOARD.VIEW".to_string()]);
    assert_eq!(page.acl.subject, "Dashboard");
    assert_eq!((page.layout)("x"), "<section>x</section>");
    assert_eq!(page.settings.and_then(|s| s.content_width), Some(ContentWidth::Full));
    assert_eq!(page.meta.title.as_deref(), Some("Dashboard"));
  }

  #[test]
  fn product_detail_marks_data_source() {
    let def = PageDef::new("/product/{productId}", blank).product_detail();
    assert_eq!(resolve_page(def, &PageDefaults::default()).data, PageData::ProductDetail);
  }
}
