/* src/server/core/rust/src/product.rs */

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::BoxFuture;
use crate::errors::StoreError;
use crate::metadata::{PageMeta, text_from_html};

/// The backend sends `null` for unset text fields; treat it like a missing one.
fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
  Option::<String>::deserialize(de).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
  #[serde(
    rename = "_id",
    default,
    deserialize_with = "null_as_empty",
    skip_serializing_if = "String::is_empty"
  )]
  pub id: String,
  #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
  pub name: String,
  /// Rich text (HTML).
  #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
  pub description: String,
  #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
  pub image: String,
  /// Remaining commerce fields, carried through untouched.
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
  pub fn has_identity(&self) -> bool {
    !self.id.is_empty()
  }

  /// Page-level metadata derived from this product.
  pub fn page_meta(&self) -> PageMeta {
    PageMeta {
      title: None,
      description: Some(text_from_html(&self.description)).filter(|d| !d.is_empty()),
      keywords: None,
      url_image: Some(self.image.clone()).filter(|i| !i.is_empty()),
    }
  }
}

/// Backend collaborator for product data.
pub trait ProductSource: Send + Sync {
  fn product_by_slug(&self, slug: String, public_only: bool) -> BoxFuture<Result<Product, StoreError>>;
  fn related_by_slug(&self, slug: String) -> BoxFuture<Result<Vec<Product>, StoreError>>;
}

/// Terminal outcome of resolving a product detail page.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductResolution {
  Found { product: Product, related: Vec<Product> },
  NotFound,
  /// A fetch failed or timed out. The page still renders, with empty data.
  Degraded(StoreError),
}

impl ProductResolution {
  /// Data the page renders with. `None` for `NotFound`.
  pub fn into_page_data(self) -> Option<(Product, Vec<Product>)> {
    match self {
      Self::Found { product, related } => Some((product, related)),
      Self::Degraded(_) => Some((Product::default(), Vec::new())),
      Self::NotFound => None,
    }
  }

  pub fn outcome(&self) -> &'static str {
    match self {
      Self::Found { .. } => "found",
      Self::NotFound => "not_found",
      Self::Degraded(_) => "degraded",
    }
  }
}

async fn bounded<T>(
  what: &str,
  timeout: Duration,
  fut: BoxFuture<Result<T, StoreError>>,
) -> Result<T, StoreError> {
  match tokio::time::timeout(timeout, fut).await {
    Ok(result) => result,
    Err(_) => Err(StoreError::timeout(format!("{what} exceeded {}ms", timeout.as_millis()))),
  }
}

/// Fetch a product and its related list concurrently and decide the outcome.
///
/// One attempt per fetch, each bounded by `timeout`. The decision waits for
/// both fetches. A failed primary fetch degrades; a primary result without
/// identity is `NotFound` whatever the related fetch did; otherwise a failed
/// related fetch degrades the whole page.
pub async fn resolve_product_detail(
  source: &dyn ProductSource,
  slug: &str,
  timeout: Duration,
) -> ProductResolution {
  let (primary, related) = tokio::join!(
    bounded("product fetch", timeout, source.product_by_slug(slug.to_string(), true)),
    bounded("related products fetch", timeout, source.related_by_slug(slug.to_string())),
  );

  let product = match primary {
    Ok(product) => product,
    Err(e) => {
      tracing::warn!(slug, error = %e, "product fetch failed, rendering degraded page");
      return ProductResolution::Degraded(e);
    }
  };

  if !product.has_identity() {
    tracing::debug!(slug, "product has no identity");
    return ProductResolution::NotFound;
  }

  match related {
    Ok(related) => ProductResolution::Found { product, related },
    Err(e) => {
      tracing::warn!(slug, error = %e, "related products fetch failed, rendering degraded page");
      ProductResolution::Degraded(e)
    }
  }
}
