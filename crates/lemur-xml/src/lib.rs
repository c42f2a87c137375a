//! UI hierarchy XML ingest and snapshot query facade.
//!
//! Android's `uiautomator dump` (and similar accessibility tooling) emits
//! one XML document per screen. This crate parses that text into the arena
//! tree the selector engine consumes and wraps the pair in [`Snapshot`],
//! the main entry point for callers:
//!
//! ```
//! use lemur_xml::Snapshot;
//!
//! let snapshot = Snapshot::parse(r#"<hierarchy>
//!     <node class="a" text="X"/>
//!     <node class="b" text="Y" bounds="[0,0][100,50]"/>
//! </hierarchy>"#)?;
//! let tap = snapshot.query_selector_point(r#"[class="a"] + [class="b"]"#);
//! assert_eq!(tap.map(|p| (p.x, p.y)), Some((50, 25)));
//! # Ok::<(), lemur_xml::HierarchyError>(())
//! ```
//!
//! Element tag names and attribute document order are preserved exactly;
//! text, CDATA, and comment nodes are materialized as non-element nodes so
//! sibling navigation skips them the way it must on a real dump.

use lemur_dom::bounds::{self, Point};
use lemur_dom::{ElementData, NodeId, NodeKind, UiTree};
use lemur_select::{query_all, query_first};
use thiserror::Error;

/// Failure to ingest a hierarchy dump.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// The dump is not well-formed XML.
    #[error("invalid hierarchy XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Parse hierarchy XML text into a tree.
///
/// The returned tree holds a synthetic document node whose first element
/// child is the dump's root element (`<hierarchy>` for Android dumps).
///
/// # Errors
///
/// Returns [`HierarchyError::Xml`] when the text is not well-formed XML.
pub fn parse_hierarchy(xml: &str) -> Result<UiTree, HierarchyError> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut tree = UiTree::new();
    append_subtree(&mut tree, NodeId::ROOT, doc.root());
    Ok(tree)
}

/// Copy `source`'s children (recursively) into the arena under `parent`.
fn append_subtree(tree: &mut UiTree, parent: NodeId, source: roxmltree::Node<'_, '_>) {
    for child in source.children() {
        if child.is_element() {
            let data = ElementData {
                tag_name: child.tag_name().name().to_string(),
                attrs: child
                    .attributes()
                    .map(|attr| (attr.name().to_string(), attr.value().to_string()))
                    .collect(),
            };
            let id = tree.alloc(NodeKind::Element(data));
            tree.append_child(parent, id);
            append_subtree(tree, id, child);
        } else if child.is_text() {
            let id = tree.alloc(NodeKind::Text(
                child.text().unwrap_or_default().to_string(),
            ));
            tree.append_child(parent, id);
        } else if child.is_comment() {
            let id = tree.alloc(NodeKind::Comment(
                child.text().unwrap_or_default().to_string(),
            ));
            tree.append_child(parent, id);
        }
        // Processing instructions and doctypes carry nothing queryable.
    }
}

/// A parsed UI hierarchy snapshot with selector-based lookup.
///
/// Queries run from the dump's root element, inclusive, mirroring a query
/// against the document element of the dump.
#[derive(Debug, Clone)]
pub struct Snapshot {
    tree: UiTree,
}

impl Snapshot {
    /// Parse hierarchy XML into a queryable snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::Xml`] when the text is not well-formed
    /// XML.
    pub fn parse(xml: &str) -> Result<Self, HierarchyError> {
        Ok(Self {
            tree: parse_hierarchy(xml)?,
        })
    }

    /// The underlying tree, for direct traversal or the navigation
    /// helpers.
    #[must_use]
    pub const fn tree(&self) -> &UiTree {
        &self.tree
    }

    /// The dump's root element (`<hierarchy>` on Android), if the dump had
    /// any element at all.
    #[must_use]
    pub fn root_element(&self) -> Option<NodeId> {
        self.tree.document_element()
    }

    /// The first element matching `selector`, in document order.
    #[must_use]
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        query_first(&self.tree, self.root_element()?, selector)
    }

    /// Every element matching `selector`, in document order, deduplicated.
    #[must_use]
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.root_element()
            .map_or_else(Vec::new, |root| query_all(&self.tree, root, selector))
    }

    /// The screen midpoint of the first element matching `selector`, or
    /// `None` when nothing matches or the match has no parsable bounds.
    #[must_use]
    pub fn query_selector_point(&self, selector: &str) -> Option<Point> {
        let id = self.query_selector(selector)?;
        bounds::center_of(self.tree.as_element(id)?)
    }
}
