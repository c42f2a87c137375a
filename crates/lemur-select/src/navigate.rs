//! Sibling and ancestor navigation helpers.
//!
//! These operate on the tree abstraction and the predicate matcher only;
//! filters are single selector *fragments* (no combinators), parsed with
//! [`parse_simple`]. A detached or stale [`NodeId`] yields an empty result
//! rather than an error.
//!
//! [`next`] and [`prev`] deliberately do not search: with a filter, they
//! inspect only the nearest element sibling and return `None` if that one
//! specific node fails the filter.

use lemur_dom::{NodeId, UiTree};

use crate::parser::parse_simple;
use crate::selector::SimpleSelector;

/// Whether `id` passes the optional filter (no filter passes everything).
fn passes(tree: &UiTree, id: NodeId, filter: Option<&SimpleSelector>) -> bool {
    match filter {
        None => true,
        Some(selector) => tree.as_element(id).is_some_and(|e| selector.matches(e)),
    }
}

/// The nearest following element sibling. With a selector, that one
/// sibling is returned only if it matches; no further siblings are tried.
#[must_use]
pub fn next(tree: &UiTree, node: NodeId, selector: Option<&str>) -> Option<NodeId> {
    let candidate = tree
        .following_siblings(node)
        .find(|&id| tree.as_element(id).is_some())?;
    let filter = selector.map(parse_simple);
    passes(tree, candidate, filter.as_ref()).then_some(candidate)
}

/// The nearest preceding element sibling. Same non-searching filter
/// semantics as [`next`].
#[must_use]
pub fn prev(tree: &UiTree, node: NodeId, selector: Option<&str>) -> Option<NodeId> {
    let candidate = tree
        .preceding_siblings(node)
        .find(|&id| tree.as_element(id).is_some())?;
    let filter = selector.map(parse_simple);
    passes(tree, candidate, filter.as_ref()).then_some(candidate)
}

/// All element siblings of `node` (self excluded) in document order,
/// optionally filtered.
#[must_use]
pub fn siblings(tree: &UiTree, node: NodeId, selector: Option<&str>) -> Vec<NodeId> {
    let Some(parent) = tree.parent(node) else {
        return Vec::new();
    };
    let filter = selector.map(parse_simple);
    tree.children(parent)
        .iter()
        .copied()
        .filter(|&id| id != node && tree.as_element(id).is_some())
        .filter(|&id| passes(tree, id, filter.as_ref()))
        .collect()
}

/// All element ancestors of `node`, nearest first, optionally filtered.
#[must_use]
pub fn parents(tree: &UiTree, node: NodeId, selector: Option<&str>) -> Vec<NodeId> {
    let filter = selector.map(parse_simple);
    tree.ancestors(node)
        .filter(|&id| tree.as_element(id).is_some())
        .filter(|&id| passes(tree, id, filter.as_ref()))
        .collect()
}
