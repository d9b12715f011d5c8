//! Permissive lookups over a parsed page.
//!
//! Every helper returns `None` (or an empty `Vec`) when the selector is
//! invalid, nothing matches, or the match carries no text. Fallback chains
//! are plain slices of selectors tried in order; the first hit wins.

use scraper::{ElementRef, Selector};
use tracing::debug;

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(err) => {
            debug!("Invalid selector {:?}: {:?}", css, err);
            None
        }
    }
}

/// First descendant of `scope` matching `css`
pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    scope.select(&selector).next()
}

/// All descendants of `scope` matching `css`, in document order
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(selector) => scope.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// First element matched by any selector in `chain`, trying them in order
pub fn first_of<'a>(scope: ElementRef<'a>, chain: &[&str]) -> Option<ElementRef<'a>> {
    chain.iter().find_map(|css| select_first(scope, css))
}

/// Text of `el` with each text node trimmed and concatenated, empty as `None`
pub fn text(el: ElementRef<'_>) -> Option<String> {
    let joined = el
        .text()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<String>();

    non_empty(joined)
}

/// Prose text of `el`: every whitespace run collapsed to a single space
pub fn text_spaced(el: ElementRef<'_>) -> Option<String> {
    let joined = el
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    non_empty(joined)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Non-empty attribute value
pub fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// First non-empty attribute among `names`
pub fn attr_of(el: ElementRef<'_>, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| attr(el, name))
}

/// Text of the first match for `css` under `scope`
pub fn text_at(scope: ElementRef<'_>, css: &str) -> Option<String> {
    select_first(scope, css).and_then(text)
}

/// Attribute of the first match for `css` under `scope`
pub fn attr_at(scope: ElementRef<'_>, css: &str, name: &str) -> Option<String> {
    select_first(scope, css).and_then(|el| attr(el, name))
}

/// Resolve a possibly site-relative link against `origin` (e.g. `https://www.tayara.tn`)
pub fn absolute_url(origin: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        format!("{}/{}", origin.trim_end_matches('/'), href)
    }
}
