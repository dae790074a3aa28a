use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

/// Extract same-origin links from an HTML document.
///
/// Every `a[href]` is resolved against `base` (relative, absolute and
/// protocol-relative forms all work through `Url::join`), then filtered to
/// http/https URLs on the same authority as the base. `mailto:`,
/// `javascript:` and fragment-only references drop out; fragments are
/// stripped so `/page#a` and `/page#b` collapse to one frontier entry.
/// Unparseable markup simply yields fewer links.
pub fn extract_links(html: &str, base: &Url) -> HashSet<Url> {
    if base.host_str().is_none() {
        return HashSet::new();
    }

    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("static selector");

    let mut links = HashSet::new();
    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) => h,
            None => continue,
        };
        if let Some(url) = resolve(base, href) {
            if is_same_origin(&url, base) {
                links.insert(url);
            }
        }
    }
    links
}

/// Scheme-independent authority match: identical host and identical explicit
/// port. `Url` normalizes scheme-default ports away, so an https page may
/// link to its http twin, while the same host on another port is a
/// different origin.
fn is_same_origin(url: &Url, base: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
        && url.host_str() == base.host_str()
        && url.port() == base.port()
}

fn resolve(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let mut url = base.join(href).ok()?;
    url.set_fragment(None);
    Some(url)
}
