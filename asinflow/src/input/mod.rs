//! Identifier parsing at the input boundary.
//!
//! Identifiers arrive as free text, one per line. A line may be a bare
//! product token (`B000123456`) or a product URL, in which case the token is
//! the path segment after `/dp/`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Substring a line must contain before it is treated as a product URL.
pub const MARKETPLACE_HINT: &str = "amazon";

const PRODUCT_PATH: &str = "/dp/";

/// A trimmed, non-empty product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Parses one line of input.
    ///
    /// Returns `None` for blank input. Marketplace product URLs are reduced
    /// to the segment after `/dp/` up to the next `/` or `?`; if that
    /// segment is empty the whole trimmed line is kept.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if line.contains(MARKETPLACE_HINT) {
            if let Some(token) = product_segment(line) {
                return Some(Self(token.to_string()));
            }
        }
        Some(Self(line.to_string()))
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning its text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn product_segment(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once(PRODUCT_PATH)?;
    let end = rest.find(['/', '?']).unwrap_or(rest.len());
    let token = rest[..end].trim();
    (!token.is_empty()).then_some(token)
}

/// Parses free text into identifiers, one per non-blank line.
///
/// Order is preserved and duplicates are kept.
pub fn parse_identifiers(text: &str) -> Vec<Identifier> {
    text.lines().filter_map(Identifier::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(text: &str) -> Vec<String> {
        parse_identifiers(text)
            .into_iter()
            .map(Identifier::into_inner)
            .collect()
    }

    #[test]
    fn test_bare_tokens_are_trimmed() {
        assert_eq!(ids("  B000123456  \n\n\tB0000000XY\n"), vec!["B000123456", "B0000000XY"]);
    }

    #[test]
    fn test_product_urls_reduce_to_token() {
        let text = "https://www.amazon.in/dp/B000ABCDEF/ref=xyz\n\
                    https://www.amazon.in/dp/B0QUERY001?th=1\n\
                    https://www.amazon.in/Acme-Kettle/dp/B0SLUGGED1";
        assert_eq!(ids(text), vec!["B000ABCDEF", "B0QUERY001", "B0SLUGGED1"]);
    }

    #[test]
    fn test_url_without_token_keeps_line() {
        assert_eq!(
            ids("https://www.amazon.in/dp/"),
            vec!["https://www.amazon.in/dp/"]
        );
    }

    #[test]
    fn test_foreign_url_is_kept_verbatim() {
        assert_eq!(
            ids("https://shop.example/dp/B000123456"),
            vec!["https://shop.example/dp/B000123456"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(ids("B1\nB1\nB1"), vec!["B1", "B1", "B1"]);
    }

    #[test]
    fn test_blank_input() {
        assert!(Identifier::parse("   ").is_none());
        assert!(parse_identifiers("").is_empty());
    }

    #[test]
    fn test_display_and_serde() {
        let id = Identifier::parse(" B000123456 ").expect("identifier");
        assert_eq!(id.to_string(), "B000123456");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"B000123456\"");
    }
}
