/* src/server/core/rust/src/lib.rs */

pub mod acl;
pub mod config;
pub mod errors;
pub mod guard;
pub mod metadata;
pub mod page;
pub mod product;
pub mod server;
pub mod session;
pub mod settings;

use std::future::Future;
use std::pin::Pin;

// Re-exports for ergonomic use
pub use acl::{AbilityCheck, AclDecision, AclSpec, PermissionAbility, check_access};
pub use config::{MetaDefaults, SiteConfig, ThemeConfig};
pub use errors::StoreError;
pub use guard::{GuardDecision, GuardMode};
pub use metadata::{MetadataBundle, PageMeta, RouteContext, resolve_metadata};
pub use page::{PageData, PageDef, PageDefaults, PageProps, ResolvedPage};
pub use product::{Product, ProductResolution, ProductSource, resolve_product_detail};
pub use server::{StorefrontParts, StorefrontServer};
pub use session::{NoSessions, SessionResolver, SessionState, User, resolve_session};
pub use settings::{Settings, SettingsOverride};

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
