/* src/storefront/src/backend.rs */

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use storefront_core::{BoxFuture, Product, ProductSource, SessionResolver, StoreError, User};

/// Response envelope of the commerce API: `{ "data": ... }`.
#[derive(Deserialize)]
struct Envelope<T> {
  data: Option<T>,
}

/// Product and auth collaborator backed by the commerce REST API.
pub struct HttpBackend {
  client: Client,
  api_url: Url,
}

impl HttpBackend {
  pub fn new(api_url: &str) -> Result<Self, StoreError> {
    let api_url = Url::parse(api_url.trim_end_matches('/'))
      .map_err(|e| StoreError::validation(format!("invalid api url '{api_url}': {e}")))?;
    if api_url.cannot_be_a_base() {
      return Err(StoreError::validation(format!("api url '{api_url}' cannot be a base")));
    }
    let client = Client::builder()
      .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| StoreError::internal(format!("failed to build http client: {e}")))?;
    Ok(Self { client, api_url })
  }

  /// `{api_url}/{segments...}?{query}` with every segment percent-encoded.
  fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
    let mut url = self.api_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    if !query.is_empty() {
      url.query_pairs_mut().extend_pairs(query);
    }
    url
  }
}

/// GET a `{ data }` envelope. `Ok(None)` for 404 and for a null `data`.
async fn fetch_data<T: DeserializeOwned>(
  client: Client,
  url: Url,
  token: Option<String>,
) -> Result<Option<T>, StoreError> {
  let mut req = client.get(url.clone());
  if let Some(token) = token {
    req = req.bearer_auth(token);
  }
  let resp = req.send().await.map_err(|e| StoreError::upstream(format!("GET {url}: {e}")))?;

  let status = resp.status();
  if status == StatusCode::NOT_FOUND {
    return Ok(None);
  }
  if status == StatusCode::UNAUTHORIZED {
    return Err(StoreError::unauthorized(format!("GET {url}: unauthorized")));
  }
  if !status.is_success() {
    return Err(StoreError::upstream(format!("GET {url}: status {status}")));
  }

  let envelope: Envelope<T> = resp
    .json()
    .await
    .map_err(|e| StoreError::upstream(format!("GET {url}: invalid response body: {e}")))?;
  Ok(envelope.data)
}

impl ProductSource for HttpBackend {
  fn product_by_slug(
    &self,
    slug: String,
    public_only: bool,
  ) -> BoxFuture<Result<Product, StoreError>> {
    let is_public = if public_only { "true" } else { "false" };
    let url =
      self.endpoint(&["products", "public", "slug", slug.as_str()], &[("isPublic", is_public)]);
    let client = self.client.clone();
    Box::pin(async move {
      let product: Option<Product> = fetch_data(client, url, None).await?;
      Ok(product.unwrap_or_default())
    })
  }

  fn related_by_slug(&self, slug: String) -> BoxFuture<Result<Vec<Product>, StoreError>> {
    let url = self.endpoint(&["products", "related"], &[("slug", slug.as_str())]);
    let client = self.client.clone();
    Box::pin(async move {
      let related: Option<Vec<Product>> = fetch_data(client, url, None).await?;
      Ok(related.unwrap_or_default())
    })
  }
}

impl SessionResolver for HttpBackend {
  fn resolve(&self, token: String) -> BoxFuture<Result<Option<User>, StoreError>> {
    let url = self.endpoint(&["auth", "me"], &[]);
    let client = self.client.clone();
    Box::pin(async move {
      match fetch_data::<User>(client, url, Some(token)).await {
        Err(e) if e.code() == "UNAUTHORIZED" => Ok(None),
        other => other,
      }
    })
  }
}
