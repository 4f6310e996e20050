//! Selector table for product pages.
//!
//! Sources are kept as constants so a markup revision only touches this file.

use regex::Regex;
use scraper::Selector;

use super::document::parse_selector;
use crate::errors::AsinflowError;

pub(crate) const TITLE: &str = "#productTitle";
pub(crate) const AVAILABILITY: &str = "#availability";
pub(crate) const PRICE_WHOLE: &str = "span.a-price-whole";
pub(crate) const PRICE_FRACTION: &str = "span.a-price-fraction";
pub(crate) const PRICE_OFFSCREEN: &str = "span.a-offscreen";
pub(crate) const LEGACY_PRICE_IDS: [&str; 3] = [
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    "#priceblock_saleprice",
];
pub(crate) const PRICE_META: &str = "[itemprop=\"price\"]";
pub(crate) const BREADCRUMB_LIST: &str = "ul.a-unordered-list.a-horizontal.a-size-small";
pub(crate) const BREADCRUMB_LIST_ITEM: &str = "span.a-list-item";
pub(crate) const BREADCRUMB_LI: &str = "li.a-breadcrumb-item";
pub(crate) const TERTIARY_CATEGORY: &str = "a.a-link-normal.a-color-tertiary";
pub(crate) const RICH_CONTENT: &str = "#aplus";
pub(crate) const VIDEO: &str = "div.video-block";
pub(crate) const COUPON: &str = "span.coupon";
pub(crate) const RATING: &str = "#acrPopover";
pub(crate) const REVIEWS: &str = "#acrCustomerReviewText";
pub(crate) const IMAGE: &str = "img#landingImage";
pub(crate) const SELLER: &str = "a#bylineInfo";
pub(crate) const SPAN: &str = "span";

/// Currency symbol followed by a grouped decimal number.
pub(crate) const CURRENCY_PATTERN: &str = r"[₹$€£]\s?\d[\d,]*(?:\.\d+)?";

/// Compiled selectors, built once per extractor.
#[derive(Debug)]
pub(crate) struct Selectors {
    pub title: Selector,
    pub availability: Selector,
    pub price_whole: Selector,
    pub price_fraction: Selector,
    pub price_offscreen: Selector,
    pub legacy_price: Vec<Selector>,
    pub price_meta: Selector,
    pub breadcrumb_list: Selector,
    pub breadcrumb_list_item: Selector,
    pub breadcrumb_li: Selector,
    pub tertiary_category: Selector,
    pub rich_content: Selector,
    pub video: Selector,
    pub coupon: Selector,
    pub rating: Selector,
    pub reviews: Selector,
    pub image: Selector,
    pub seller: Selector,
    pub span: Selector,
    pub currency: Regex,
}

impl Selectors {
    pub(crate) fn compile() -> Result<Self, AsinflowError> {
        Ok(Self {
            title: parse_selector(TITLE)?,
            availability: parse_selector(AVAILABILITY)?,
            price_whole: parse_selector(PRICE_WHOLE)?,
            price_fraction: parse_selector(PRICE_FRACTION)?,
            price_offscreen: parse_selector(PRICE_OFFSCREEN)?,
            legacy_price: LEGACY_PRICE_IDS
                .iter()
                .map(|s| parse_selector(s))
                .collect::<Result<_, _>>()?,
            price_meta: parse_selector(PRICE_META)?,
            breadcrumb_list: parse_selector(BREADCRUMB_LIST)?,
            breadcrumb_list_item: parse_selector(BREADCRUMB_LIST_ITEM)?,
            breadcrumb_li: parse_selector(BREADCRUMB_LI)?,
            tertiary_category: parse_selector(TERTIARY_CATEGORY)?,
            rich_content: parse_selector(RICH_CONTENT)?,
            video: parse_selector(VIDEO)?,
            coupon: parse_selector(COUPON)?,
            rating: parse_selector(RATING)?,
            reviews: parse_selector(REVIEWS)?,
            image: parse_selector(IMAGE)?,
            seller: parse_selector(SELLER)?,
            span: parse_selector(SPAN)?,
            currency: Regex::new(CURRENCY_PATTERN).map_err(|e| AsinflowError::Selector {
                selector: CURRENCY_PATTERN.to_string(),
                reason: e.to_string(),
            })?,
        })
    }
}
