/* src/server/engine/rust/src/lib.rs */

pub mod components;
pub mod document;
pub mod escape;
pub mod layout;

// Public API re-exports
pub use document::{Document, MetaKind, MetaTag, inject_data_script, inject_head_meta};
pub use escape::{ascii_escape_json, escape_html};
pub use layout::{blank_layout, not_app_layout, user_layout};
