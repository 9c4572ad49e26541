/* src/server/core/rust/src/server.rs */

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::acl::{AbilityCheck, PermissionAbility};
use crate::config::SiteConfig;
use crate::errors::StoreError;
use crate::metadata::PRODUCT_ID_PARAM;
use crate::page::{PageData, PageDef, PageDefaults, ResolvedPage, resolve_page};
use crate::product::ProductSource;
use crate::session::{NoSessions, SessionResolver};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(2);

/// Framework-agnostic parts extracted from `StorefrontServer`.
/// Adapter crates consume this to build framework-specific routers.
pub struct StorefrontParts {
  pub pages: Vec<ResolvedPage>,
  pub site: SiteConfig,
  pub products: Option<Arc<dyn ProductSource>>,
  pub sessions: Arc<dyn SessionResolver>,
  pub ability: Arc<dyn AbilityCheck>,
  pub fetch_timeout: Duration,
  pub session_timeout: Duration,
  /// Script ID for the injected page props JSON.
  pub data_id: String,
}

pub struct StorefrontServer {
  pages: Vec<PageDef>,
  defaults: PageDefaults,
  site: SiteConfig,
  products: Option<Arc<dyn ProductSource>>,
  sessions: Arc<dyn SessionResolver>,
  ability: Arc<dyn AbilityCheck>,
  fetch_timeout: Duration,
  session_timeout: Duration,
}

impl StorefrontServer {
  pub fn new() -> Self {
    Self {
      pages: Vec::new(),
      defaults: PageDefaults::default(),
      site: SiteConfig::default(),
      products: None,
      sessions: Arc::new(NoSessions),
      ability: Arc::new(PermissionAbility),
      fetch_timeout: DEFAULT_FETCH_TIMEOUT,
      session_timeout: DEFAULT_SESSION_TIMEOUT,
    }
  }

  pub fn page(mut self, page: PageDef) -> Self {
    self.pages.push(page);
    self
  }

  pub fn page_defaults(mut self, defaults: PageDefaults) -> Self {
    self.defaults = defaults;
    self
  }

  pub fn site(mut self, site: SiteConfig) -> Self {
    self.site = site;
    self
  }

  pub fn product_source(mut self, source: Arc<dyn ProductSource>) -> Self {
    self.products = Some(source);
    self
  }

  pub fn session_resolver(mut self, resolver: Arc<dyn SessionResolver>) -> Self {
    self.sessions = resolver;
    self
  }

  pub fn ability_check(mut self, ability: Arc<dyn AbilityCheck>) -> Self {
    self.ability = ability;
    self
  }

  pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
    self.fetch_timeout = timeout;
    self
  }

  pub fn session_timeout(mut self, timeout: Duration) -> Self {
    self.session_timeout = timeout;
    self
  }

  /// Consume the builder, resolving every page against the defaults.
  pub fn into_parts(self) -> Result<StorefrontParts, StoreError> {
    let mut seen = HashSet::new();
    for page in &self.pages {
      if !page.route.starts_with('/') {
        return Err(StoreError::validation(format!("route '{}' must start with '/'", page.route)));
      }
      if !seen.insert(page.route.as_str()) {
        return Err(StoreError::validation(format!("duplicate route '{}'", page.route)));
      }
      if page.data == PageData::ProductDetail {
        if !page.route.contains(&format!("{{{PRODUCT_ID_PARAM}}}")) {
          return Err(StoreError::validation(format!(
            "product page '{}' must capture {{{PRODUCT_ID_PARAM}}}",
            page.route
          )));
        }
        if self.products.is_none() {
          return Err(StoreError::validation(format!(
            "product page '{}' registered without a product source",
            page.route
          )));
        }
      }
    }

    let defaults = self.defaults;
    let pages = self.pages.into_iter().map(|p| resolve_page(p, &defaults)).collect();

    Ok(StorefrontParts {
      pages,
      site: self.site,
      products: self.products,
      sessions: self.sessions,
      ability: self.ability,
      fetch_timeout: self.fetch_timeout,
      session_timeout: self.session_timeout,
      data_id: "__STOREFRONT_DATA__".to_string(),
    })
  }
}

impl Default for StorefrontServer {
  fn default() -> Self {
    Self::new()
  }
}
