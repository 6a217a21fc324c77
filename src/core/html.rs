// src/core/html.rs
//
// Small query layer over a parsed document: find by CSS (tag + classes),
// find by visible-text predicate, read text and attributes, resolve links.
// Page specs in `specs::*` only talk to the DOM through these.

use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::ParseError;

pub fn compile(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::Selector(s!(css)))
}

/// First element under `scope` matching `sel`.
pub fn first<'a>(scope: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    scope.select(sel).next()
}

/// First element under `scope` matching `sel` whose visible text contains `needle`.
pub fn first_with_text<'a>(
    scope: ElementRef<'a>,
    sel: &Selector,
    needle: &str,
) -> Option<ElementRef<'a>> {
    scope.select(sel).find(|el| text(*el).contains(needle))
}

/// First element under `scope` matching `sel` that has a non-empty `name` attribute.
pub fn first_with_attr<'a>(
    scope: ElementRef<'a>,
    sel: &Selector,
    name: &str,
) -> Option<ElementRef<'a>> {
    scope
        .select(sel)
        .find(|el| attr(*el, name).is_some_and(|v| !v.trim().is_empty()))
}

/// Visible text: every text node trimmed, empty ones dropped, the rest glued
/// together without separators. Whitespace inside a node collapses to one space.
pub fn text(el: ElementRef<'_>) -> String {
    let mut out = s!();
    for piece in el.text() {
        let piece = super::sanitize::normalize_ws(piece);
        if !piece.is_empty() {
            out.push_str(&piece);
        }
    }
    out
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// Resolve `href` against the page it was found on.
pub fn resolve(base: &Url, href: &str) -> Result<Url, url::ParseError> {
    base.join(href.trim())
}
