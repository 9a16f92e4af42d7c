use anyhow::{Context, Result};
use url::Url;

/// Resolve a possibly-relative URL against the feed website URL. Already
/// absolute URLs are returned unchanged, byte for byte.
pub fn complete_url(base_url: &str, href: &str) -> Result<String> {
    if Url::parse(href).is_ok() {
        return Ok(href.to_string());
    }

    let base = Url::parse(base_url).with_context(|| format!("invalid base url: {base_url}"))?;
    let resolved = base
        .join(href)
        .with_context(|| format!("cannot resolve {href} against {base_url}"))?;

    Ok(resolved.to_string())
}
