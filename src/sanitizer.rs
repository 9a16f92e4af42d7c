use std::borrow::Cow;

use ammonia::{Builder, UrlRelative};
use regex::Regex;
use tracing::warn;

use crate::config::SanitizerConfig;
use crate::policy;
use crate::util::url::complete_url;
use crate::validators::{integer_value, style_value, video_embed_url, Validator};

/// URL schemes allowed to survive in `href`/`src` attributes.
const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Sanitizes article bodies coming from feeds.
///
/// Strips scripts and unknown markup, keeps a curated set of structural and
/// formatting elements, lets through iframes pointing at whitelisted video
/// embeds, and rewrites relative `src`/`href` values against the feed's
/// website URL.
pub struct ArticleSanitizer {
    config: SanitizerConfig,
}

impl ArticleSanitizer {
    /// Sanitizer for a feed whose website lives at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(SanitizerConfig {
            base_url: base_url.into(),
            ..SanitizerConfig::default()
        })
    }

    pub fn with_config(config: SanitizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Sanitize an HTML fragment.
    ///
    /// Malformed input is handled best-effort by the underlying parser; this
    /// never fails and never panics. A relative URL that cannot be resolved
    /// against the base URL is logged and passed through unmodified so the
    /// article still displays.
    pub fn sanitize(&self, html: &str) -> String {
        let policy = policy::article_policy(self.config.allow_videos);
        let validators = policy.validators.clone();
        let base_url = self.config.base_url.clone();

        let mut builder = Builder::default();
        builder
            .tags(policy.tags.clone())
            .tag_attributes(policy.tag_attributes.clone())
            .generic_attributes(policy.generic_attributes.clone())
            .url_schemes(ALLOWED_URL_SCHEMES.iter().copied().collect())
            .url_relative(UrlRelative::PassThrough)
            .link_rel(if policy.force_link_rel {
                self.config.link_rel.as_deref()
            } else {
                None
            })
            .attribute_filter(move |element, attribute, value| {
                apply_validator(&validators, &base_url, element, attribute, value)
            });

        let cleaned = builder.clean(html).to_string();

        strip_missing_required(&cleaned, &policy.require_attribute)
    }
}

/// Runs the validator registered for `(element, attribute)`, if any.
/// Returning `None` drops the attribute.
fn apply_validator<'a>(
    validators: &[(&str, &str, Validator)],
    base_url: &str,
    element: &str,
    attribute: &str,
    value: &'a str,
) -> Option<Cow<'a, str>> {
    let Some(validator) = policy::validator_for(validators, element, attribute) else {
        return Some(Cow::Borrowed(value));
    };
    match validator {
        Validator::Integer => integer_value(value).map(Cow::Borrowed),
        Validator::VideoEmbed => {
            if video_embed_url(value) {
                Some(Cow::Borrowed(value))
            } else {
                None
            }
        }
        Validator::Style => style_value(value).map(Cow::Owned),
        Validator::CompleteUrl => match complete_url(base_url, value) {
            Ok(resolved) => Some(Cow::Owned(resolved)),
            Err(err) => {
                warn!(
                    url = value,
                    base_url,
                    error = %err,
                    "keeping original url after failed resolution"
                );
                Some(Cow::Borrowed(value))
            }
        },
    }
}

/// Removes elements that lost a required attribute during validation. Runs on
/// the engine's serialized output, where tags are lowercase and attribute
/// values are always double-quoted.
fn strip_missing_required(html: &str, rules: &[(&str, &str)]) -> String {
    let mut output = html.to_string();
    for (tag, attribute) in rules.iter().copied() {
        let pattern = format!(r"(?is)<{tag}(\s[^>]*)?>.*?</{tag}>");
        let element = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(err) => {
                warn!(tag, error = %err, "skipping required-attribute rule");
                continue;
            }
        };
        let needle = format!("{attribute}=\"");
        output = element
            .replace_all(&output, |caps: &regex::Captures<'_>| {
                let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                if attrs.contains(&needle) {
                    caps[0].to_string()
                } else {
                    String::new()
                }
            })
            .into_owned();
    }
    output
}
