//! Sanitizes untrusted HTML fragments (feed article bodies) before display.
//!
//! The heavy lifting — tolerant HTML parsing, policy matching, serialization —
//! is done by [`ammonia`]; this crate defines the allow-list policy a feed
//! reader wants for article bodies: safe structural and formatting elements,
//! images with validated dimensions, a whitelist of video embed iframes, and
//! relative URLs rewritten against the feed's website URL.

mod config;
mod policy;
mod sanitizer;
mod util;
mod validators;

pub use config::SanitizerConfig;
pub use sanitizer::ArticleSanitizer;
pub use util::text::html_to_text;
pub use util::url::complete_url;
