/* src/server/core/rust/src/settings.rs */

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
  #[default]
  Light,
  Dark,
}

impl ThemeMode {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Light => "light",
      Self::Dark => "dark",
    }
  }

  /// Primary text color of the palette, used by toast styles.
  pub fn text_primary(self) -> &'static str {
    match self {
      Self::Light => "rgba(47, 43, 61, 0.87)",
      Self::Dark => "rgba(208, 212, 241, 0.87)",
    }
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
  #[default]
  Default,
  Bordered,
}

impl Skin {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Default => "default",
      Self::Bordered => "bordered",
    }
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentWidth {
  #[default]
  Boxed,
  Full,
}

impl ContentWidth {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Boxed => "boxed",
      Self::Full => "full",
    }
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
  TopLeft,
  TopCenter,
  #[default]
  TopRight,
  BottomLeft,
  BottomCenter,
  BottomRight,
}

impl ToastPosition {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::TopLeft => "top-left",
      Self::TopCenter => "top-center",
      Self::TopRight => "top-right",
      Self::BottomLeft => "bottom-left",
      Self::BottomCenter => "bottom-center",
      Self::BottomRight => "bottom-right",
    }
  }
}

/// Effective UI settings for one render.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
  #[serde(default)]
  pub mode: ThemeMode,
  #[serde(default)]
  pub skin: Skin,
  #[serde(default)]
  pub content_width: ContentWidth,
  #[serde(default)]
  pub toast_position: ToastPosition,
}

/// Per-page settings. Set fields win over the site defaults.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SettingsOverride {
  pub mode: Option<ThemeMode>,
  pub skin: Option<Skin>,
  pub content_width: Option<ContentWidth>,
  pub toast_position: Option<ToastPosition>,
}

impl Settings {
  pub fn merge(self, page: Option<SettingsOverride>) -> Self {
    let Some(page) = page else { return self };
    Self {
      mode: page.mode.unwrap_or(self.mode),
      skin: page.skin.unwrap_or(self.skin),
      content_width: page.content_width.unwrap_or(self.content_width),
      toast_position: page.toast_position.unwrap_or(self.toast_position),
    }
  }

  /// Attributes the theme stylesheet keys off, placed on `<body>`.
  pub fn body_attrs(&self) -> Vec<(String, String)> {
    vec![
      ("data-theme".to_string(), self.mode.as_str().to_string()),
      ("data-skin".to_string(), self.skin.as_str().to_string()),
      ("data-content-width".to_string(), self.content_width.as_str().to_string()),
    ]
  }

  pub fn toast_options(&self) -> ToastOptions {
    let color = self.mode.text_primary().to_string();
    ToastOptions {
      success: ToastStyle::new("#DDF6E8", color.clone()),
      error: ToastStyle::new("#FDE4D5", color),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastOptions {
  pub success: ToastStyle,
  pub error: ToastStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastStyle {
  #[serde(rename = "className")]
  pub class_name: String,
  pub style: ToastColors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastColors {
  pub background: String,
  pub color: String,
}

impl ToastStyle {
  fn new(background: &str, color: String) -> Self {
    Self {
      class_name: "react-hot-toast".to_string(),
      style: ToastColors { background: background.to_string(), color },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn merge_without_override_keeps_defaults() {
    let site = Settings { mode: ThemeMode::Dark, ..Default::default() };
    assert_eq!(site.merge(None), site);
  }

  #[test]
  fn override_fields_win() {
    let site = Settings::default();
    let page = SettingsOverride {
      content_width: Some(ContentWidth::Full),
      toast_position: Some(ToastPosition::BottomCenter),
      ..Default::default()
    };
    let merged = site.merge(Some(page));
    assert_eq!(merged.content_width, ContentWidth::Full);
    assert_eq!(merged.toast_position, ToastPosition::BottomCenter);
    assert_eq!(merged.mode, ThemeMode::Light);
    assert_eq!(merged.skin, Skin::Default);
  }

  #[test]
  fn toast_options_follow_mode() {
    let dark = Settings { mode: ThemeMode::Dark, ..Default::default() }.toast_options();
    assert_eq!(dark.success.style.background, "#DDF6E8");
    assert_eq!(dark.error.style.background, "#FDE4D5");
    assert_eq!(dark.error.style.color, ThemeMode::Dark.text_primary());
  }

  #[test]
  fn toast_options_serialize_like_client_expects() {
    let json = serde_json::to_value(Settings::default().toast_options()).unwrap_or_default();
    assert_eq!(json["success"]["className"], "react-hot-toast");
    assert_eq!(json["success"]["style"]["background"], "#DDF6E8");
  }

  #[test]
  fn body_attrs_reflect_settings() {
    let attrs = Settings { skin: Skin::Bordered, ..Default::default() }.body_attrs();
    assert!(attrs.contains(&("data-skin".to_string(), "bordered".to_string())));
    assert!(attrs.contains(&("data-theme".to_string(), "light".to_string())));
  }

  #[test]
  fn toast_position_deserializes_kebab_case() {
    let pos: ToastPosition = serde_json::from_str("\"bottom-left\"").unwrap_or_default();
    assert_eq!(pos, ToastPosition::BottomLeft);
  }
}
