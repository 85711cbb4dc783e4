//! Embed code for the iframe player

use crate::types::{Audiobook, AudiobookId};

/// Iframe dimensions, as CSS/HTML attribute values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOptions {
    pub width: String,
    pub height: String,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            width: "100%".to_string(),
            height: "500".to_string(),
        }
    }
}

/// Player URL for an audiobook
pub fn embed_url(base_url: &str, audiobook_id: &AudiobookId) -> String {
    format!(
        "{}/player/audiobook/{}",
        base_url.trim_end_matches('/'),
        audiobook_id
    )
}

/// Iframe snippet embedding the player for `audiobook`
pub fn iframe_code(base_url: &str, audiobook: &Audiobook, options: &EmbedOptions) -> String {
    format!(
        r#"<iframe
  width="{width}"
  height="{height}"
  src="{src}"
  frameborder="0"
  scrolling="no"
  seamless
  allow="autoplay"
  style="border-radius: 16px;"
  title="{title}">
</iframe>"#,
        width = escape_attribute(&options.width),
        height = escape_attribute(&options.height),
        src = escape_attribute(&embed_url(base_url, &audiobook.id)),
        title = escape_attribute(&audiobook.name),
    )
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
