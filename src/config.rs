use serde::Deserialize;

/// Per-feed sanitizer settings. Host applications usually carry this inside
/// their own configuration file, so every field has a sensible default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Feed website URL, used to resolve relative links and image sources.
    pub base_url: String,
    /// `rel` value forced onto sanitized links; `None` leaves links bare.
    pub link_rel: Option<String>,
    /// Keep iframes pointing at whitelisted video embeds. When disabled,
    /// every iframe is dropped.
    pub allow_videos: bool,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            link_rel: Some("nofollow".to_string()),
            allow_videos: true,
        }
    }
}
