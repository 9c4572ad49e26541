/* src/server/core/rust/src/metadata.rs */

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use storefront_engine::MetaTag;

use crate::config::{MetaDefaults, SiteConfig};

/// Path parameter naming the product on product routes.
pub const PRODUCT_ID_PARAM: &str = "productId";

/// Path parameters of the inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
  pub params: HashMap<String, String>,
}

impl RouteContext {
  pub fn new(params: HashMap<String, String>) -> Self {
    Self { params }
  }

  /// Non-empty `productId` parameter, if present.
  pub fn product_id(&self) -> Option<&str> {
    self.params.get(PRODUCT_ID_PARAM).map(String::as_str).filter(|s| !s.is_empty())
  }
}

/// Metadata a page declares for itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
  pub title: Option<String>,
  pub description: Option<String>,
  pub keywords: Option<String>,
  pub url_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataBundle {
  pub title: String,
  pub description: String,
  pub keywords: String,
  pub preview_image: String,
}

/// Turn a hyphen-delimited slug into display text.
pub fn slug_to_title(slug: &str) -> String {
  slug.replace('-', " ")
}

/// Resolve document metadata: product slug, then page declarations, then site defaults.
pub fn resolve_metadata(route: &RouteContext, page: &PageMeta, site: &SiteConfig) -> MetadataBundle {
  let template = &site.theme.template_name;
  let title = match (route.product_id(), &page.title) {
    (Some(slug), _) => format!("{template} - {}", slug_to_title(slug)),
    (None, Some(title)) => title.clone(),
    (None, None) => format!("{template} - E-commerce"),
  };

  MetadataBundle {
    title,
    description: page.description.clone().unwrap_or_else(|| site.meta.description.clone()),
    keywords: page.keywords.clone().unwrap_or_else(|| site.meta.keywords.clone()),
    preview_image: page.url_image.clone().unwrap_or_else(|| site.meta.image.clone()),
  }
}

impl MetadataBundle {
  /// The full meta tag set for the document head, in render order.
  pub fn meta_tags(&self, defaults: &MetaDefaults) -> Vec<MetaTag> {
    vec![
      MetaTag::name("description", &self.description),
      MetaTag::name("keywords", &self.keywords),
      MetaTag::name("viewport", "initial-scale=1, width=device-width"),
      MetaTag::name("author", &defaults.author),
      MetaTag::name("name", &defaults.author),
      MetaTag::name("image", &self.preview_image),
      // facebook
      MetaTag::property("og:type", "website"),
      MetaTag::property("og:title", &self.title),
      MetaTag::property("og:description", &self.description),
      MetaTag::property("og:image", &self.preview_image),
      // twitter
      MetaTag::property("twitter:card", "website"),
      MetaTag::property("twitter:title", &self.title),
      MetaTag::property("twitter:description", &self.description),
      MetaTag::property("twitter:image", &self.preview_image),
    ]
  }
}

fn tag_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

fn space_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Plain text of an HTML fragment: tags dropped, common entities decoded,
/// whitespace collapsed.
pub fn text_from_html(html: &str) -> String {
  let stripped = tag_re().replace_all(html, " ");
  let decoded = stripped
    .replace("&nbsp;", " ")
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&quot;", "\"")
    .replace("&#39;", "'")
    .replace("&amp;", "&");
  space_re().replace_all(&decoded, " ").trim().to_string()
}
