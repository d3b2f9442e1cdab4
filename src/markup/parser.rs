//! XML parsing layer for MEI pattern documents
//!
//! Thin wrappers around roxmltree: locating the pattern container and reading
//! plain and `query:`-namespaced attributes.

use super::{CONTAINER_PATH, QUERY_NAMESPACE};
use crate::pattern::PatternError;
use roxmltree::{Document, Node, ParsingOptions};

// ============================================================================
// XML DOCUMENT WRAPPER
// ============================================================================

/// Wrapper around roxmltree::Document for MEI pattern documents
pub struct XmlDocument<'input> {
    doc: Document<'input>,
}

impl<'input> XmlDocument<'input> {
    /// Parse an MEI document
    pub fn parse(xml: &'input str) -> Result<Self, PatternError> {
        // MEI files exported by notation editors often carry a DOCTYPE
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };

        let doc = Document::parse_with_options(xml, options)
            .map_err(|e| PatternError::InvalidXml(format!("XML parse error: {}", e)))?;

        Ok(XmlDocument { doc })
    }

    /// Every element found at the container path
    pub fn pattern_containers(&self) -> Vec<Node<'_, 'input>> {
        let root = self.doc.root_element();
        if root.tag_name().name() != CONTAINER_PATH[0] {
            return Vec::new();
        }

        CONTAINER_PATH[1..]
            .iter()
            .fold(vec![root], |nodes, &segment| {
                nodes
                    .into_iter()
                    .flat_map(move |node| {
                        child_elements(node).filter(move |n| n.tag_name().name() == segment)
                    })
                    .collect()
            })
    }

    /// The single pattern container
    pub fn pattern_container(&self) -> Result<Node<'_, 'input>, PatternError> {
        let containers = self.pattern_containers();
        match containers.as_slice() {
            [container] => Ok(*container),
            _ => Err(PatternError::Structure {
                found: containers.len(),
            }),
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Element children in document order (text and comments skipped)
pub fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

/// Whether the element belongs to the `query:` vocabulary
pub fn is_query_element(node: Node) -> bool {
    node.tag_name().namespace() == Some(QUERY_NAMESPACE)
}

/// Tag name as written in pattern markup (`query:group`, `note`)
pub fn display_name(node: Node) -> String {
    if is_query_element(node) {
        format!("query:{}", node.tag_name().name())
    } else {
        node.tag_name().name().to_string()
    }
}

/// Plain (un-namespaced) attribute value
pub fn attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// `query:` attribute flag; only the literal "true" enables it
pub fn query_flag(node: Node, name: &str) -> bool {
    node.attribute((QUERY_NAMESPACE, name)) == Some("true")
}
