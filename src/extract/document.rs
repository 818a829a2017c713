//! Minimal document capability the extractors are written against.
//!
//! Extraction logic only needs path lookups and text, so it depends on the
//! [`StructuredDocument`] / [`DocumentNode`] pair rather than on a parser's
//! object model. [`HtmlDocument`] backs them with `scraper`.

use scraper::{ElementRef, Html, Selector};

use super::ExtractError;

/// A node that supports CSS-path lookups relative to itself
pub trait DocumentNode: Sized {
    /// First descendant matching `path`
    fn find(&self, path: &str) -> Result<Option<Self>, ExtractError>;

    /// All descendants matching `path`, in document order
    fn find_all(&self, path: &str) -> Result<Vec<Self>, ExtractError>;

    /// Concatenated text of the node and its descendants
    fn text(&self) -> String;

    /// Like [`DocumentNode::text`], skipping the subtrees matching `path`
    fn text_excluding(&self, path: &str) -> Result<String, ExtractError>;

    /// Attribute value, if present
    fn attr(&self, name: &str) -> Option<String>;

    /// First descendant matching `path`, or a structure mismatch naming `what`
    fn require(&self, path: &str, what: &'static str) -> Result<Self, ExtractError> {
        self.find(path)?
            .ok_or_else(|| ExtractError::StructureMismatch {
                what,
                path: path.to_string(),
            })
    }

    /// Attribute value, or a missing-attribute error naming `what`
    fn require_attr(&self, name: &str, what: &'static str) -> Result<String, ExtractError> {
        self.attr(name).ok_or_else(|| ExtractError::MissingAttribute {
            what,
            attr: name.to_string(),
        })
    }

    /// Trimmed text of the node
    fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }
}

/// A parsed document exposing its root node
pub trait StructuredDocument {
    type Node<'a>: DocumentNode
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_>;
}

/// HTML document parsed with `scraper`
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML page; the parser never fails, malformed markup is repaired
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }
}

impl StructuredDocument for HtmlDocument {
    type Node<'a>
        = HtmlNode<'a>
    where
        Self: 'a;

    fn root(&self) -> HtmlNode<'_> {
        HtmlNode {
            element: self.html.root_element(),
        }
    }
}

/// Element handle inside an [`HtmlDocument`]
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a> {
    element: ElementRef<'a>,
}

fn selector(path: &str) -> Result<Selector, ExtractError> {
    Selector::parse(path).map_err(|e| ExtractError::InvalidSelector {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

impl<'a> DocumentNode for HtmlNode<'a> {
    fn find(&self, path: &str) -> Result<Option<Self>, ExtractError> {
        let selector = selector(path)?;
        Ok(self
            .element
            .select(&selector)
            .next()
            .map(|element| HtmlNode { element }))
    }

    fn find_all(&self, path: &str) -> Result<Vec<Self>, ExtractError> {
        let selector = selector(path)?;
        Ok(self
            .element
            .select(&selector)
            .map(|element| HtmlNode { element })
            .collect())
    }

    fn text(&self) -> String {
        self.element.text().collect()
    }

    fn text_excluding(&self, path: &str) -> Result<String, ExtractError> {
        let selector = selector(path)?;
        let excluded: Vec<_> = self.element.select(&selector).map(|e| e.id()).collect();

        let mut out = String::new();
        for node in self.element.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            if node.ancestors().any(|a| excluded.contains(&a.id())) {
                continue;
            }
            out.push_str(text);
        }
        Ok(out)
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.element.value().attr(name).map(str::to_string)
    }
}
