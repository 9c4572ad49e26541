/* src/server/engine/rust/src/escape.rs */

/// Escape text for use in HTML element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

/// Escape non-ASCII characters in JSON string values to `\uXXXX` sequences,
/// and `<` everywhere so the payload cannot close its `<script>` element.
///
/// Walks the JSON text tracking whether the current position is inside a
/// JSON string (handling `\"` and `\\` correctly). Chars outside the BMP are
/// encoded as surrogate pairs (`\uHHHH\uLLLL`).
pub fn ascii_escape_json(json: &str) -> String {
  let mut out = String::with_capacity(json.len());
  let mut in_string = false;
  let mut chars = json.chars();

  while let Some(ch) = chars.next() {
    if !in_string {
      if ch == '"' {
        in_string = true;
      }
      out.push(ch);
      continue;
    }
    match ch {
      '\\' => {
        out.push(ch);
        if let Some(next) = chars.next() {
          out.push(next);
        }
      }
      '"' => {
        in_string = false;
        out.push(ch);
      }
      '<' => out.push_str("\\u003c"),
      c if c as u32 > 0x7F => {
        let code = c as u32;
        if code > 0xFFFF {
          let adjusted = code - 0x1_0000;
          let hi = (adjusted >> 10) + 0xD800;
          let lo = (adjusted & 0x3FF) + 0xDC00;
          out.push_str(&format!("\\u{hi:04x}\\u{lo:04x}"));
        } else {
          out.push_str(&format!("\\u{code:04x}"));
        }
      }
      c => out.push(c),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escape_html_special_chars() {
    assert_eq!(escape_html("<>&\"'"), "&lt;&gt;&amp;&quot;&#x27;");
  }

  #[test]
  fn escape_html_safe_string() {
    assert_eq!(escape_html("wireless mouse x1"), "wireless mouse x1");
  }

  #[test]
  fn ascii_passthrough() {
    let input = r#"{"name":"Mouse"}"#;
    assert_eq!(ascii_escape_json(input), input);
  }

  #[test]
  fn escapes_non_ascii_in_values() {
    let input = r#"{"name":"Chuột"}"#;
    assert_eq!(ascii_escape_json(input), r#"{"name":"Chu\u1ed9t"}"#);
  }

  #[test]
  fn surrogate_pair_for_emoji() {
    let input = "{\"emoji\":\"\u{1F600}\"}";
    assert_eq!(ascii_escape_json(input), r#"{"emoji":"\ud83d\ude00"}"#);
  }

  #[test]
  fn script_close_cannot_escape() {
    let input = r#"{"description":"</script><script>alert(1)</script>"}"#;
    let out = ascii_escape_json(input);
    assert!(!out.contains("</script>"));
    assert!(out.contains(r"\u003c/script>"));
  }

  #[test]
  fn preserves_existing_escapes() {
    let input = r#"{"a":"say \"hi\"","b":"line\nbreak"}"#;
    assert_eq!(ascii_escape_json(input), input);
  }
}
