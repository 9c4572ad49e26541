/* src/server/adapter/axum/src/handler/page.rs */

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{MatchedPath, Path, State};
use axum::http::{HeaderMap, HeaderName, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use storefront_core::{
  AclDecision, GuardDecision, MetadataBundle, PageData, PageMeta, PageProps, ProductResolution,
  ResolvedPage, RouteContext, Settings, StoreError, check_access, resolve_metadata,
  resolve_product_detail, resolve_session,
};
use storefront_engine::components::{fallback_spinner, not_authorized, route_progress, toaster};
use storefront_engine::{Document, blank_layout};

use super::AppState;
use super::session::access_token;
use crate::error::AxumError;

/// Seconds between reloads of the pending-session fallback page.
const FALLBACK_REFRESH_SECS: &str = "1";

/// Page data plus the metadata the page declares for this render.
struct Loaded {
  data: serde_json::Value,
  meta: PageMeta,
}

/// Resolve the product behind the route. `NotFound` becomes the 404 page.
async fn load_product(
  state: &AppState,
  page: &ResolvedPage,
  route: &RouteContext,
) -> Result<Loaded, StoreError> {
  let source = state
    .products
    .as_ref()
    .ok_or_else(|| StoreError::internal(format!("no product source for '{}'", page.route)))?;
  let slug = route.product_id().unwrap_or_default();

  let resolution = resolve_product_detail(source.as_ref(), slug, state.fetch_timeout).await;
  tracing::debug!(slug, outcome = resolution.outcome(), "product detail resolved");

  let degraded = match resolution {
    ProductResolution::Degraded(ref e) => Some(e.code().to_string()),
    _ => None,
  };
  let Some((product, related)) = resolution.into_page_data() else {
    return Err(StoreError::not_found(format!("Product '{slug}' not found")));
  };

  // Product-derived declarations win over the page's static ones.
  let derived = product.page_meta();
  let meta = PageMeta {
    title: page.meta.title.clone(),
    description: derived.description.or_else(|| page.meta.description.clone()),
    keywords: page.meta.keywords.clone(),
    url_image: derived.url_image.or_else(|| page.meta.url_image.clone()),
  };

  let mut data = serde_json::json!({
    "productData": product,
    "listRelatedProduct": related,
  });
  if let Some(code) = degraded {
    data["degraded"] = serde_json::Value::String(code);
  }
  Ok(Loaded { data, meta })
}

/// Wrap a rendered body in the document shell: head metadata, theme
/// attributes, toaster overlay and route progress bar.
fn render_shell(
  state: &AppState,
  metadata: &MetadataBundle,
  settings: Settings,
  body: &str,
  props: Option<&PageProps>,
) -> String {
  let options = serde_json::to_string(&settings.toast_options()).unwrap_or_default();
  let mut html = String::from(body);
  html.push_str(&toaster(settings.toast_position.as_str(), &options));
  if state.site.theme.routing_loader {
    html.push_str(&route_progress());
  }

  let data_script = props.map(|p| {
    let payload = serde_json::json!({
      "params": p.params,
      "user": p.user,
      "data": p.data,
    });
    (state.data_id.clone(), payload)
  });

  Document {
    lang: "en".to_string(),
    title: metadata.title.clone(),
    meta: metadata.meta_tags(&state.site.meta),
    body_attrs: settings.body_attrs(),
    body: html,
    data_script,
  }
  .render()
}

pub(super) async fn handle_page(
  State(state): State<Arc<AppState>>,
  matched: MatchedPath,
  uri: Uri,
  headers: HeaderMap,
  Path(params): Path<HashMap<String, String>>,
) -> Result<Response, AxumError> {
  let page =
    state.pages.get(matched.as_str()).ok_or_else(|| StoreError::not_found("Page not found"))?;
  let route = RouteContext::new(params);
  let settings = state.site.theme.settings().merge(page.settings);

  let session =
    resolve_session(state.sessions.as_ref(), access_token(&headers), state.session_timeout).await;
  let return_path = uri.path_and_query().map_or("/", |pq| pq.as_str());

  match page.guard.decide(&session, return_path) {
    GuardDecision::Fallback => {
      tracing::debug!(route = %page.route, "session pending, rendering fallback");
      let metadata = resolve_metadata(&route, &page.meta, &state.site);
      let html = render_shell(&state, &metadata, settings, &fallback_spinner(), None);
      // Reload until the session settles and the guard can decide.
      let reload = [
        (HeaderName::from_static("refresh"), FALLBACK_REFRESH_SECS),
        (header::CACHE_CONTROL, "no-store"),
      ];
      return Ok((StatusCode::OK, reload, Html(html)).into_response());
    }
    GuardDecision::Redirect(location) => {
      tracing::debug!(
        route = %page.route,
        guard = page.guard.as_str(),
        to = %location,
        "guard redirect"
      );
      return Ok(Redirect::temporary(&location).into_response());
    }
    GuardDecision::Render => {}
  }

  let decision =
    check_access(page.guard, &session, &page.permission, &page.acl, state.ability.as_ref());
  if decision == AclDecision::Deny {
    let denied = StoreError::forbidden(format!("ability check denied for '{}'", page.route));
    tracing::debug!(code = denied.code(), "{}", denied.message());
    let metadata = resolve_metadata(&route, &page.meta, &state.site);
    let html = render_shell(&state, &metadata, settings, &blank_layout(&not_authorized()), None);
    let status = StatusCode::from_u16(denied.status()).unwrap_or(StatusCode::FORBIDDEN);
    return Ok((status, Html(html)).into_response());
  }

  let loaded = match page.data {
    PageData::Static => Loaded { data: serde_json::json!({}), meta: page.meta.clone() },
    PageData::ProductDetail => load_product(&state, page, &route).await?,
  };

  let props = PageProps {
    params: route.params.clone(),
    user: session.user().cloned(),
    data: loaded.data,
  };
  let content = (page.render)(&props);
  let body = (page.layout)(&content);
  let metadata = resolve_metadata(&route, &loaded.meta, &state.site);

  Ok(Html(render_shell(&state, &metadata, settings, &body, Some(&props))).into_response())
}
