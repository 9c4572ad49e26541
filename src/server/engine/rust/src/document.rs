/* src/server/engine/rust/src/document.rs */

use crate::escape::{ascii_escape_json, escape_html};

/// Which attribute carries the key of a `<meta>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKind {
  /// `<meta name="..." content="...">`
  Name,
  /// `<meta property="..." content="...">` (Open Graph / Twitter card)
  Property,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
  pub kind: MetaKind,
  pub key: String,
  pub content: String,
}

impl MetaTag {
  pub fn name(key: impl Into<String>, content: impl Into<String>) -> Self {
    Self { kind: MetaKind::Name, key: key.into(), content: content.into() }
  }

  pub fn property(key: impl Into<String>, content: impl Into<String>) -> Self {
    Self { kind: MetaKind::Property, key: key.into(), content: content.into() }
  }

  pub fn to_html(&self) -> String {
    let attr = match self.kind {
      MetaKind::Name => "name",
      MetaKind::Property => "property",
    };
    format!(
      r#"<meta {attr}="{}" content="{}">"#,
      escape_html(&self.key),
      escape_html(&self.content)
    )
  }
}

/// A full HTML document ready to be rendered.
#[derive(Debug, Clone, Default)]
pub struct Document {
  pub lang: String,
  pub title: String,
  pub meta: Vec<MetaTag>,
  /// Attributes placed on `<body>`, e.g. `data-theme="dark"`.
  pub body_attrs: Vec<(String, String)>,
  pub body: String,
  /// Script ID and JSON payload embedded for client hydration.
  pub data_script: Option<(String, serde_json::Value)>,
}

impl Document {
  pub fn render(&self) -> String {
    let mut attrs = String::new();
    for (k, v) in &self.body_attrs {
      attrs.push_str(&format!(r#" {}="{}""#, escape_html(k), escape_html(v)));
    }

    let lang = if self.lang.is_empty() { "en" } else { self.lang.as_str() };
    let skeleton = format!(
      r#"<!DOCTYPE html><html lang="{}"><head><meta charset="utf-8"></head><body{attrs}>{}</body></html>"#,
      escape_html(lang),
      self.body
    );

    let mut head = format!("<title>{}</title>", escape_html(&self.title));
    for tag in &self.meta {
      head.push_str(&tag.to_html());
    }
    let html = inject_head_meta(&skeleton, &head);

    match self.data_script {
      Some((ref id, ref data)) => {
        let json = serde_json::to_string(data).unwrap_or_default();
        inject_data_script(&html, id, &ascii_escape_json(&json))
      }
      None => html,
    }
  }
}

/// Inject a `<script>` tag with JSON data before `</body>`.
pub fn inject_data_script(html: &str, data_id: &str, json: &str) -> String {
  let script =
    format!(r#"<script id="{}" type="application/json">{json}</script>"#, escape_html(data_id));
  if let Some(pos) = html.rfind("</body>") {
    let mut result = String::with_capacity(html.len() + script.len());
    result.push_str(&html[..pos]);
    result.push_str(&script);
    result.push_str(&html[pos..]);
    result
  } else {
    format!("{html}{script}")
  }
}

/// Inject head markup right after `<meta charset="utf-8">`.
pub fn inject_head_meta(html: &str, meta_html: &str) -> String {
  let charset = r#"<meta charset="utf-8">"#;
  if let Some(pos) = html.find(charset) {
    let insert_at = pos + charset.len();
    let mut result = String::with_capacity(html.len() + meta_html.len());
    result.push_str(&html[..insert_at]);
    result.push_str(meta_html);
    result.push_str(&html[insert_at..]);
    result
  } else {
    html.to_string()
  }
}
