//! Per-field extraction cascades.
//!
//! Each cascade tries its strategies in priority order and returns the first
//! non-empty value. Missing markup is never an error.

use super::document::Document;
use super::selectors::Selectors;

/// Price value used when the product cannot currently be bought.
pub const PRICE_NOT_AVAILABLE: &str = "not available";
/// Availability value used when the page has no availability block.
pub const AVAILABILITY_UNKNOWN: &str = "unknown";
/// Presence marker vocabulary.
pub const YES: &str = "Yes";
/// Presence marker vocabulary.
pub const NO: &str = "No";
/// Presence marker vocabulary for optional promotions.
pub const NOT_FOUND: &str = "Not Found";

const UNAVAILABLE_PHRASES: [&str; 2] = ["currently unavailable", "out of stock"];
const BREADCRUMB_SEPARATORS: [&str; 3] = ["›", "»", ">"];

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub(crate) fn title(doc: &Document, sel: &Selectors) -> String {
    doc.find_first(&sel.title)
        .map(|n| n.text())
        .unwrap_or_default()
}

/// Availability text and whether it marks the product as unavailable.
pub(crate) fn availability(doc: &Document, sel: &Selectors) -> (String, bool) {
    match doc.find_first(&sel.availability).map(|n| n.text()) {
        Some(text) if !text.is_empty() => {
            let lowered = text.to_lowercase();
            let unavailable = UNAVAILABLE_PHRASES.iter().any(|p| lowered.contains(p));
            (text, unavailable)
        }
        _ => (AVAILABILITY_UNKNOWN.to_string(), false),
    }
}

pub(crate) fn price(doc: &Document, sel: &Selectors, raw_markup: &str) -> String {
    split_price(doc, sel)
        .or_else(|| offscreen_price(doc, sel))
        .or_else(|| legacy_price(doc, sel))
        .or_else(|| meta_price(doc, sel))
        .or_else(|| pattern_price(sel, raw_markup))
        .unwrap_or_default()
}

fn split_price(doc: &Document, sel: &Selectors) -> Option<String> {
    let whole = doc.find_first(&sel.price_whole)?.text();
    let fraction = doc.find_first(&sel.price_fraction)?.text();
    let whole = whole.trim_end_matches(['.', ',']).trim();
    if whole.is_empty() {
        return None;
    }
    if fraction.is_empty() {
        return Some(whole.to_string());
    }
    Some(format!("{whole}.{fraction}"))
}

fn offscreen_price(doc: &Document, sel: &Selectors) -> Option<String> {
    doc.find_first(&sel.price_offscreen)
        .map(|n| n.text())
        .and_then(non_empty)
}

fn legacy_price(doc: &Document, sel: &Selectors) -> Option<String> {
    sel.legacy_price
        .iter()
        .find_map(|s| doc.find_first(s).map(|n| n.text()).and_then(non_empty))
}

fn meta_price(doc: &Document, sel: &Selectors) -> Option<String> {
    doc.find_all(&sel.price_meta)
        .iter()
        .find_map(|n| n.attr("content"))
}

fn pattern_price(sel: &Selectors, raw_markup: &str) -> Option<String> {
    sel.currency
        .find(raw_markup)
        .map(|m| m.as_str().to_string())
}

pub(crate) fn category(doc: &Document, sel: &Selectors) -> String {
    breadcrumb_list(doc, sel)
        .or_else(|| breadcrumb_items(doc, sel))
        .or_else(|| {
            doc.find_first(&sel.tertiary_category)
                .map(|n| n.text())
                .and_then(non_empty)
        })
        .unwrap_or_default()
}

fn join_crumbs(crumbs: impl Iterator<Item = String>) -> Option<String> {
    let parts: Vec<String> = crumbs
        .filter(|c| !c.is_empty() && !BREADCRUMB_SEPARATORS.contains(&c.as_str()))
        .collect();
    non_empty(parts.join(" > "))
}

fn breadcrumb_list(doc: &Document, sel: &Selectors) -> Option<String> {
    let list = doc.find_first(&sel.breadcrumb_list)?;
    join_crumbs(
        list.find_all(&sel.breadcrumb_list_item)
            .iter()
            .map(|n| n.text()),
    )
}

fn breadcrumb_items(doc: &Document, sel: &Selectors) -> Option<String> {
    join_crumbs(doc.find_all(&sel.breadcrumb_li).iter().map(|n| n.text()))
}

pub(crate) fn presence(doc: &Document, selector: &scraper::Selector, absent: &str) -> String {
    if doc.contains(selector) {
        YES.to_string()
    } else {
        absent.to_string()
    }
}

pub(crate) fn rating(doc: &Document, sel: &Selectors) -> String {
    doc.find_first(&sel.rating)
        .and_then(|n| n.attr("title"))
        .unwrap_or_default()
}

pub(crate) fn reviews(doc: &Document, sel: &Selectors) -> String {
    doc.find_first(&sel.reviews)
        .map(|n| n.text())
        .unwrap_or_default()
}

pub(crate) fn image_url(doc: &Document, sel: &Selectors) -> String {
    doc.find_first(&sel.image)
        .and_then(|n| n.attr("src"))
        .unwrap_or_default()
}

pub(crate) fn seller(doc: &Document, sel: &Selectors) -> String {
    doc.find_first(&sel.seller)
        .map(|n| n.text())
        .unwrap_or_default()
}

pub(crate) fn deal(doc: &Document, sel: &Selectors) -> String {
    doc.find_all(&sel.span)
        .iter()
        .map(|n| n.own_text())
        .find(|t| t.to_lowercase().contains("deal"))
        .unwrap_or_else(|| NOT_FOUND.to_string())
}
