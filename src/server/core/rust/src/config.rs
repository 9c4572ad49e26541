/* src/server/core/rust/src/config.rs */

use serde::Deserialize;

use crate::settings::{ContentWidth, Settings, Skin, ThemeMode, ToastPosition};

/// Site-wide configuration shared by every page render.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
  #[serde(default)]
  pub theme: ThemeConfig,
  #[serde(default)]
  pub meta: MetaDefaults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
  #[serde(default = "default_template_name")]
  pub template_name: String,
  /// Show the route-change progress bar.
  #[serde(default = "default_true")]
  pub routing_loader: bool,
  #[serde(default)]
  pub mode: ThemeMode,
  #[serde(default)]
  pub skin: Skin,
  #[serde(default)]
  pub content_width: ContentWidth,
  #[serde(default)]
  pub toast_position: ToastPosition,
}

impl Default for ThemeConfig {
  fn default() -> Self {
    Self {
      template_name: default_template_name(),
      routing_loader: true,
      mode: ThemeMode::default(),
      skin: Skin::default(),
      content_width: ContentWidth::default(),
      toast_position: ToastPosition::default(),
    }
  }
}

impl ThemeConfig {
  pub fn settings(&self) -> Settings {
    Settings {
      mode: self.mode,
      skin: self.skin,
      content_width: self.content_width,
      toast_position: self.toast_position,
    }
  }
}

/// Fallback metadata used when a page declares none.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaDefaults {
  #[serde(default = "default_description")]
  pub description: String,
  #[serde(default = "default_keywords")]
  pub keywords: String,
  #[serde(default = "default_image")]
  pub image: String,
  /// Value of the `author` and `name` meta tags.
  #[serde(default = "default_author")]
  pub author: String,
}

impl Default for MetaDefaults {
  fn default() -> Self {
    Self {
      description: default_description(),
      keywords: default_keywords(),
      image: default_image(),
      author: default_author(),
    }
  }
}

fn default_true() -> bool {
  true
}

fn default_template_name() -> String {
  "Storefront".to_string()
}

fn default_description() -> String {
  "Online store: browse products, manage your cart and track your orders.".to_string()
}

fn default_keywords() -> String {
  "E-commerce, online shopping, products, cart, orders".to_string()
}

fn default_image() -> String {
  "/images/preview.png".to_string()
}

fn default_author() -> String {
  "E-commerce".to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_json_uses_defaults() {
    let config: SiteConfig = serde_json::from_str("{}").unwrap_or_default();
    assert_eq!(config.theme.template_name, "Storefront");
    assert!(config.theme.routing_loader);
    assert_eq!(config.meta.image, "/images/preview.png");
  }

  #[test]
  fn partial_theme_keeps_other_defaults() {
    let config: SiteConfig =
      serde_json::from_str(r#"{"theme": {"template_name": "Lam Shop", "mode": "dark"}}"#)
        .unwrap_or_default();
    assert_eq!(config.theme.template_name, "Lam Shop");
    assert_eq!(config.theme.mode, ThemeMode::Dark);
    assert_eq!(config.theme.toast_position, ToastPosition::TopRight);
    assert_eq!(config.meta.author, "E-commerce");
  }

  #[test]
  fn theme_settings_projection() {
    let theme = ThemeConfig { skin: Skin::Bordered, ..Default::default() };
    let settings = theme.settings();
    assert_eq!(settings.skin, Skin::Bordered);
    assert_eq!(settings.mode, ThemeMode::Light);
  }
}
