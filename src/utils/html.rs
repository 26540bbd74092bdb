//! HTML utility functions.
//!
//! Provides `unescape()` for turning extracted text content back into the
//! characters the author wrote. Code blocks in rendered pages carry entities
//! (`&lt;`, `&amp;`, ...) that must not leak into clipboard text.

use std::borrow::Cow;

/// Unescape HTML entities back to characters.
///
/// Handles common named entities and numeric character references.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '&' {
            result.push(c);
            continue;
        }

        // Collect entity
        let mut entity = String::new();
        for c in chars.by_ref() {
            if c == ';' {
                break;
            }
            entity.push(c);
            if entity.len() > 10 {
                // Too long, not a valid entity
                result.push('&');
                result.push_str(&entity);
                entity.clear();
                break;
            }
        }

        if entity.is_empty() {
            result.push('&');
            continue;
        }

        // Decode entity
        match entity.as_str() {
            "lt" => result.push('<'),
            "gt" => result.push('>'),
            "amp" => result.push('&'),
            "quot" => result.push('"'),
            "apos" => result.push('\''),
            "nbsp" => result.push('\u{00A0}'),
            s if s.starts_with('#') => {
                let code = if s.starts_with("#x") || s.starts_with("#X") {
                    u32::from_str_radix(&s[2..], 16).ok()
                } else {
                    s[1..].parse().ok()
                };
                if let Some(c) = code.and_then(char::from_u32) {
                    result.push(c);
                } else {
                    result.push('&');
                    result.push_str(&entity);
                    result.push(';');
                }
            }
            _ => {
                result.push('&');
                result.push_str(&entity);
                result.push(';');
            }
        }
    }

    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_named_entities() {
        assert_eq!(unescape("&lt;div&gt;"), "<div>");
        assert_eq!(unescape("a &amp;&amp; b"), "a && b");
        assert_eq!(unescape("&quot;hi&quot;"), "\"hi\"");
    }

    #[test]
    fn test_unescape_numeric_entities() {
        assert_eq!(unescape("&#65;"), "A");
        assert_eq!(unescape("&#x41;"), "A");
    }

    #[test]
    fn test_unescape_borrows_when_clean() {
        let s = "no entities here";
        assert!(matches!(unescape(s), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_preserves_unknown_entities() {
        assert_eq!(unescape("&bogus;"), "&bogus;");
    }
}
