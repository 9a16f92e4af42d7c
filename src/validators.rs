use std::sync::LazyLock;

use regex::Regex;

/// Attribute validators referenced by the policy tables. Dispatch happens in
/// the sanitizer's attribute filter; the functions below are pure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Validator {
    /// Digits with an optional fractional tail, truncated to the integer part.
    Integer,
    /// The attribute must point at a whitelisted video embed.
    VideoEmbed,
    /// Resolve relative URLs against the configured base URL.
    CompleteUrl,
    /// Safe subset of inline CSS declarations.
    Style,
}

/// Known video embed URL shapes. Vimeo and Dailymotion embeds are plain http,
/// matching what those players actually serve.
static VIDEO_EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\A(?:https?://(?:www\.)?youtube\.com/embed/.+|http://player\.vimeo\.com/video/.+|http://www\.dailymotion\.com/embed/.+)\z",
    )
    .expect("video embed pattern")
});

/// CSS properties that may survive in a `style` attribute. Layout-breaking
/// and resource-loading properties are deliberately absent.
const SAFE_STYLE_PROPERTIES: &[&str] = &[
    "background-color",
    "border",
    "border-color",
    "border-radius",
    "border-style",
    "border-width",
    "clear",
    "color",
    "float",
    "font-family",
    "font-size",
    "font-style",
    "font-variant",
    "font-weight",
    "height",
    "letter-spacing",
    "line-height",
    "margin",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "max-height",
    "max-width",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "text-align",
    "text-decoration",
    "text-indent",
    "vertical-align",
    "white-space",
    "width",
];

/// Accepts a run of ASCII digits, optionally followed by a `.` and a
/// fractional part; the value is truncated at the first `.`. Empty values,
/// values starting with `.`, and values with any non-digit before the `.`
/// are rejected.
pub(crate) fn integer_value(value: &str) -> Option<&str> {
    for (index, ch) in value.char_indices() {
        if ch == '.' {
            if index == 0 {
                return None;
            }
            return Some(&value[..index]);
        }
        if !ch.is_ascii_digit() {
            return None;
        }
    }
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Whether `value` is an embed URL from one of the known video hosts.
pub(crate) fn video_embed_url(value: &str) -> bool {
    VIDEO_EMBED.is_match(value)
}

/// Filters a `style` attribute down to declarations with a safe property and
/// a token-safe value. Returns `None` when nothing survives, which drops the
/// attribute.
pub(crate) fn style_value(value: &str) -> Option<String> {
    let mut kept = Vec::new();
    for declaration in value.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let Some((property, val)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let val = val.trim();
        if !SAFE_STYLE_PROPERTIES.contains(&property.as_str()) {
            continue;
        }
        if !style_tokens_safe(val) {
            continue;
        }
        kept.push(format!("{property}: {val}"));
    }
    if kept.is_empty() {
        None
    } else {
        Some(kept.join("; "))
    }
}

fn style_tokens_safe(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    if lower.contains("url(") || lower.contains("expression") || lower.contains("javascript") {
        return false;
    }
    value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || " #%.,()-'\"/".contains(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_keeps_plain_digits() {
        assert_eq!(integer_value("123"), Some("123"));
        assert_eq!(integer_value("0"), Some("0"));
    }

    #[test]
    fn integer_truncates_at_first_dot() {
        assert_eq!(integer_value("12.5"), Some("12"));
        assert_eq!(integer_value("12.5px"), Some("12"));
    }

    #[test]
    fn integer_rejects_bad_values() {
        assert_eq!(integer_value(""), None);
        assert_eq!(integer_value(".5"), None);
        assert_eq!(integer_value("12px"), None);
        assert_eq!(integer_value("-3"), None);
        assert_eq!(integer_value("1 2"), None);
    }

    #[test]
    fn video_accepts_known_hosts() {
        assert!(video_embed_url("https://www.youtube.com/embed/abc123"));
        assert!(video_embed_url("http://youtube.com/embed/abc123"));
        assert!(video_embed_url("http://player.vimeo.com/video/12345"));
        assert!(video_embed_url("http://www.dailymotion.com/embed/video/x1"));
    }

    #[test]
    fn video_rejects_everything_else() {
        assert!(!video_embed_url("http://evil.com/embed/x"));
        assert!(!video_embed_url("https://www.youtube.com/watch?v=abc123"));
        assert!(!video_embed_url("https://www.youtube.com/embed/"));
        // vimeo and dailymotion embeds are http-only in the whitelist
        assert!(!video_embed_url("https://player.vimeo.com/video/12345"));
        assert!(!video_embed_url("javascript:alert(1)"));
        assert!(!video_embed_url("http://evil.com/?http://www.youtube.com/embed/x"));
    }

    #[test]
    fn style_keeps_safe_declarations_only() {
        assert_eq!(
            style_value("color: red; background-image: url(http://evil)"),
            Some("color: red".to_string())
        );
        assert_eq!(
            style_value("COLOR: red; font-size: 12px"),
            Some("color: red; font-size: 12px".to_string())
        );
        assert_eq!(style_value("position: fixed"), None);
        assert_eq!(style_value("color: expression(alert(1))"), None);
        assert_eq!(style_value(""), None);
    }

    #[test]
    fn style_filter_is_idempotent() {
        let once = style_value("color: red;   font-weight:bold").unwrap();
        assert_eq!(style_value(&once), Some(once.clone()));
    }
}
