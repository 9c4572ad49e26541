/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use storefront_core::StoreError;
use storefront_engine::components::{error_page, not_found};
use storefront_engine::{Document, blank_layout};

/// Newtype wrapper to implement `IntoResponse` for `StoreError`.
/// Required because Rust's orphan rule prevents `impl IntoResponse for StoreError`
/// when both types are foreign to this crate.
pub(crate) struct AxumError(pub StoreError);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let err = self.0;
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
      tracing::error!(code = err.code(), message = err.message(), "page request failed");
    }
    let content = if status == StatusCode::NOT_FOUND {
      not_found()
    } else {
      error_page(status.as_u16(), err.message())
    };
    let doc = Document {
      title: format!("{} - {}", status.as_u16(), status.canonical_reason().unwrap_or("Error")),
      body: blank_layout(&content),
      ..Default::default()
    };
    (status, Html(doc.render())).into_response()
  }
}

impl From<StoreError> for AxumError {
  fn from(err: StoreError) -> Self {
    Self(err)
  }
}

/// Unmatched routes answer with the standard not-found page.
pub(crate) async fn handle_not_found() -> AxumError {
  AxumError(StoreError::not_found("Page not found"))
}
