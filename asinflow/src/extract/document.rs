//! Typed, null-safe query layer over parsed HTML.

use scraper::{ElementRef, Html, Selector};

use crate::errors::AsinflowError;

/// Parses a selector, reporting the source text on failure.
pub fn parse_selector(source: &str) -> Result<Selector, AsinflowError> {
    Selector::parse(source).map_err(|e| AsinflowError::Selector {
        selector: source.to_string(),
        reason: e.to_string(),
    })
}

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses markup. Malformed input never fails; html5ever recovers.
    #[must_use]
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// First element matching `selector`, if any.
    #[must_use]
    pub fn find_first(&self, selector: &Selector) -> Option<Node<'_>> {
        self.html.select(selector).next().map(Node)
    }

    /// All elements matching `selector`, in document order.
    #[must_use]
    pub fn find_all(&self, selector: &Selector) -> Vec<Node<'_>> {
        self.html.select(selector).map(Node).collect()
    }

    /// Whether any element matches `selector`.
    #[must_use]
    pub fn contains(&self, selector: &Selector) -> bool {
        self.find_first(selector).is_some()
    }
}

/// An element inside a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// Text content with runs of whitespace collapsed to single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        collapse_whitespace(self.0.text())
    }

    /// Text of this element's direct text children only.
    #[must_use]
    pub fn own_text(&self) -> String {
        collapse_whitespace(
            self.0
                .children()
                .filter_map(|child| child.value().as_text().map(|t| &**t)),
        )
    }

    /// Attribute value, trimmed; `None` when absent or blank.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<String> {
        self.0
            .value()
            .attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Descendants of this element matching `selector`.
    #[must_use]
    pub fn find_all(&self, selector: &Selector) -> Vec<Node<'a>> {
        self.0.select(selector).map(Node).collect()
    }
}

fn collapse_whitespace<'t>(parts: impl Iterator<Item = &'t str>) -> String {
    let joined: String = parts.collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r#"
        <html><body>
          <div id="main">
            <span class="label">  Hello
                 <b>brave</b>   world </span>
            <span class="label">second</span>
            <img id="pic" src=" https://img.example/a.jpg " alt="">
          </div>
        </body></html>"#;

    #[test]
    fn test_find_first_and_text() {
        let doc = Document::parse(MARKUP);
        let sel = parse_selector("span.label").expect("selector");
        let node = doc.find_first(&sel).expect("present");
        assert_eq!(node.text(), "Hello brave world");
        assert_eq!(node.own_text(), "Hello world");
    }

    #[test]
    fn test_find_all_order() {
        let doc = Document::parse(MARKUP);
        let sel = parse_selector("span.label").expect("selector");
        let texts: Vec<String> = doc.find_all(&sel).iter().map(Node::text).collect();
        assert_eq!(texts, vec!["Hello brave world", "second"]);
    }

    #[test]
    fn test_absent_is_none() {
        let doc = Document::parse(MARKUP);
        let sel = parse_selector("#missing").expect("selector");
        assert!(doc.find_first(&sel).is_none());
        assert!(doc.find_all(&sel).is_empty());
        assert!(!doc.contains(&sel));
    }

    #[test]
    fn test_attr_trimmed_and_blank_is_none() {
        let doc = Document::parse(MARKUP);
        let sel = parse_selector("#pic").expect("selector");
        let node = doc.find_first(&sel).expect("present");
        assert_eq!(node.attr("src").as_deref(), Some("https://img.example/a.jpg"));
        assert_eq!(node.attr("alt"), None);
        assert_eq!(node.attr("title"), None);
    }

    #[test]
    fn test_invalid_selector_reports_source() {
        let err = parse_selector("span[").err().expect("invalid");
        assert!(matches!(err, AsinflowError::Selector { ref selector, .. } if selector == "span["));
    }
}
