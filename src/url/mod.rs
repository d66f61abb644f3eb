//! URL handling module for Visa-Harvest
//!
//! This module resolves discovered links against the site's base address and
//! maps nationality-page links to entity identifiers.

mod identifier;

pub use identifier::IdentifierResolver;

use url::Url;

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: schemes
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use url::Url;
/// use visa_harvest::url::resolve_link;
///
/// let base = Url::parse("https://en.wikipedia.org/").unwrap();
/// let resolved = resolve_link("/wiki/Visa_requirements_for_Foo_citizens", &base).unwrap();
/// assert_eq!(
///     resolved.as_str(),
///     "https://en.wikipedia.org/wiki/Visa_requirements_for_Foo_citizens"
/// );
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url),
        _ => None,
    }
}
