/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;

use storefront_core::{StoreError, StorefrontServer};

/// Re-export storefront-core for convenience
pub use storefront_core;

/// Extension trait that converts a `StorefrontServer` into an Axum router.
pub trait IntoAxumRouter {
  fn into_axum_router(self) -> Result<axum::Router, StoreError>;
  fn serve(
    self,
    addr: &str,
  ) -> impl std::future::Future<Output = Result<(), Box<dyn std::error::Error>>> + Send;
}

impl IntoAxumRouter for StorefrontServer {
  fn into_axum_router(self) -> Result<axum::Router, StoreError> {
    let parts = self.into_parts()?;
    Ok(handler::build_router(parts))
  }

  async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = self.into_axum_router()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("storefront running on http://localhost:{}", local_addr.port());
    axum::serve(listener, router).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn into_axum_router_builds_without_panic() {
    assert!(StorefrontServer::new().into_axum_router().is_ok());
  }

  #[test]
  fn invalid_registration_surfaces_as_error() {
    let server = StorefrontServer::new()
      .page(storefront_core::PageDef::new("no-slash", |_: &storefront_core::PageProps| String::new()));
    let err = server.into_axum_router().err().map(|e| e.code().to_string());
    assert_eq!(err.as_deref(), Some("VALIDATION_ERROR"));
  }
}
