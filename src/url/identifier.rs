use crate::model::EntityIdentifier;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static VISA_PAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Visa_requirements_for_(.*?)_citizens(?:_of_(.*))?").unwrap()
});

/// Turns category-page links into nationality identifiers
///
/// Recognizes paths shaped like `Visa_requirements_for_<X>_citizens` and
/// `Visa_requirements_for_<X>_citizens_of_<Y>`. Resolution is a pure function
/// of the link text.
#[derive(Debug, Clone)]
pub struct IdentifierResolver {
    pattern: Regex,
}

impl Default for IdentifierResolver {
    fn default() -> Self {
        Self {
            pattern: VISA_PAGE_RE.clone(),
        }
    }
}

impl IdentifierResolver {
    /// Uses a custom pattern; capture group 1 is the nationality, optional
    /// group 2 the sub-region qualifier.
    pub fn with_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Resolves a link (absolute or relative) to an identifier
    ///
    /// Returns `None` for links that are not nationality pages. The fragment
    /// and query are ignored, so section links map to their page's identifier
    /// and edit/redlink URLs never match.
    pub fn resolve(&self, href: &str) -> Option<EntityIdentifier> {
        let path = href.split(['#', '?']).next().unwrap_or_default();
        let captures = self.pattern.captures(path)?;

        let nationality = decode_token(captures.get(1)?.as_str());
        if nationality.is_empty() {
            return None;
        }

        let subregion = captures
            .get(2)
            .map(|m| decode_token(m.as_str()))
            .filter(|region| !region.is_empty());

        Some(EntityIdentifier::new(&nationality, subregion.as_deref()))
    }
}

/// URL-decodes then trims a captured token; undecodable input is kept as-is
fn decode_token(raw: &str) -> String {
    let decoded = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
    decoded.trim().to_string()
}
