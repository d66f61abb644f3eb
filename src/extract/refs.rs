use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

static MARKER_ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("sup a, sub a").unwrap());
static ID_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[id]").unwrap());
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Recovers citation URLs from footnote markers
///
/// Markers usually link to a same-page footnote (`#cite_note-3`); those are
/// followed to the footnote definition and replaced by its first external
/// link. Holds an id index of the page, so build one per document.
pub struct ReferenceExtractor<'a> {
    ids: HashMap<&'a str, ElementRef<'a>>,
}

impl<'a> ReferenceExtractor<'a> {
    pub fn new(document: &'a Html) -> Self {
        let mut ids = HashMap::new();
        for element in document.select(&ID_SELECTOR) {
            if let Some(id) = element.value().id() {
                ids.entry(id).or_insert(element);
            }
        }
        Self { ids }
    }

    /// Citation URLs of every footnote marker in `cell`, in document order
    ///
    /// Dangling fragments and footnotes without an external link are dropped.
    pub fn extract(&self, cell: ElementRef<'_>) -> Vec<String> {
        cell.select(&MARKER_ANCHOR_SELECTOR)
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter_map(|href| match href.strip_prefix('#') {
                Some(fragment) => self.resolve_fragment(fragment),
                None => Some(href.to_string()),
            })
            .collect()
    }

    fn resolve_fragment(&self, fragment: &str) -> Option<String> {
        let target = self.ids.get(fragment).or_else(|| {
            let decoded = urlencoding::decode(fragment).ok()?;
            self.ids.get(&*decoded)
        });

        let Some(target) = target else {
            tracing::debug!("Footnote #{} not found on page", fragment);
            return None;
        };

        first_external_link(*target)
    }
}

/// First externally-pointing anchor inside a footnote definition
///
/// Prefers anchors classed `external`, then any absolute http(s) or
/// protocol-relative href.
fn first_external_link(footnote: ElementRef<'_>) -> Option<String> {
    let anchors: Vec<ElementRef<'_>> = footnote.select(&ANCHOR_SELECTOR).collect();

    anchors
        .iter()
        .find(|a| a.value().classes().any(|class| class == "external"))
        .or_else(|| {
            anchors.iter().find(|a| {
                a.value().attr("href").is_some_and(|href| {
                    href.starts_with("http://")
                        || href.starts_with("https://")
                        || href.starts_with("//")
                })
            })
        })
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}
