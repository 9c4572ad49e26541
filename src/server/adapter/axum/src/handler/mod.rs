/* src/server/adapter/axum/src/handler/mod.rs */

mod page;
mod session;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use storefront_core::{
  AbilityCheck, ProductSource, ResolvedPage, SessionResolver, SiteConfig, StorefrontParts,
};

use crate::error::handle_not_found;

pub(crate) struct AppState {
  pub pages: HashMap<String, Arc<ResolvedPage>>,
  pub site: SiteConfig,
  pub products: Option<Arc<dyn ProductSource>>,
  pub sessions: Arc<dyn SessionResolver>,
  pub ability: Arc<dyn AbilityCheck>,
  pub fetch_timeout: Duration,
  pub session_timeout: Duration,
  pub data_id: String,
}

pub(crate) fn build_router(parts: StorefrontParts) -> Router {
  let mut page_map = HashMap::new();
  let mut router = Router::new();

  for page in parts.pages {
    let route = page.route.clone();
    tracing::debug!(route = %route, guard = page.guard.as_str(), "registering page");
    page_map.insert(route.clone(), Arc::new(page));
    router = router.route(&route, get(page::handle_page));
  }

  let state = Arc::new(AppState {
    pages: page_map,
    site: parts.site,
    products: parts.products,
    sessions: parts.sessions,
    ability: parts.ability,
    fetch_timeout: parts.fetch_timeout,
    session_timeout: parts.session_timeout,
    data_id: parts.data_id,
  });

  router.fallback(handle_not_found).with_state(state)
}
