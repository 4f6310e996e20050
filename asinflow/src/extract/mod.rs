//! Structured field extraction from product markup.
//!
//! This module provides:
//! - A typed, null-safe DOM query layer ([`Document`], [`Node`])
//! - Ordered per-field cascades
//! - [`ProductExtractor`], a pure markup-to-fields function
//!
//! Extraction never fails on missing markup; absent fields become empty
//! strings or a fixed sentinel.

mod cascades;
mod document;
mod selectors;

pub use cascades::{AVAILABILITY_UNKNOWN, NO, NOT_FOUND, PRICE_NOT_AVAILABLE, YES};
pub use document::{parse_selector, Document, Node};

use serde::{Deserialize, Serialize};

use crate::errors::AsinflowError;
use selectors::Selectors;

/// Fields pulled from one product page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    /// Product title.
    pub title: String,
    /// Display price, or [`PRICE_NOT_AVAILABLE`].
    pub price: String,
    /// Availability text, or [`AVAILABILITY_UNKNOWN`].
    pub availability: String,
    /// `Yes` when the availability text says the product is unavailable.
    pub currently_unavailable: String,
    /// Category path joined with `" > "`.
    pub category: String,
    /// Star rating text.
    pub rating: String,
    /// Review count text.
    pub reviews: String,
    /// Rich (A+) content present.
    pub rich_content: String,
    /// Product video present.
    pub video: String,
    /// Coupon present.
    pub coupon: String,
    /// Main image URL.
    pub image_url: String,
    /// Seller or brand byline.
    pub seller: String,
    /// Deal badge text.
    pub deal: String,
}

/// Extracts [`ProductFields`] from raw markup.
///
/// Selectors are compiled once in [`ProductExtractor::new`]; the extractor
/// is immutable afterwards and can be shared between workers.
#[derive(Debug)]
pub struct ProductExtractor {
    selectors: Selectors,
}

impl ProductExtractor {
    /// Compiles the selector table.
    pub fn new() -> Result<Self, AsinflowError> {
        Ok(Self {
            selectors: Selectors::compile()?,
        })
    }

    /// Runs every cascade over `markup`.
    #[must_use]
    pub fn extract(&self, markup: &str) -> ProductFields {
        let sel = &self.selectors;
        let doc = Document::parse(markup);

        let (availability, unavailable) = cascades::availability(&doc, sel);
        let price = if unavailable {
            PRICE_NOT_AVAILABLE.to_string()
        } else {
            cascades::price(&doc, sel, markup)
        };

        ProductFields {
            title: cascades::title(&doc, sel),
            price,
            availability,
            currently_unavailable: if unavailable { YES } else { NO }.to_string(),
            category: cascades::category(&doc, sel),
            rating: cascades::rating(&doc, sel),
            reviews: cascades::reviews(&doc, sel),
            rich_content: cascades::presence(&doc, &sel.rich_content, NO),
            video: cascades::presence(&doc, &sel.video, NO),
            coupon: cascades::presence(&doc, &sel.coupon, NOT_FOUND),
            image_url: cascades::image_url(&doc, sel),
            seller: cascades::seller(&doc, sel),
            deal: cascades::deal(&doc, sel),
        }
    }
}
