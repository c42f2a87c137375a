//! Subtree querying: first match and all matches.
//!
//! Both entry points parse the selector text, then walk the subtree rooted
//! at the given node (root inclusive) with an explicit stack. Children are
//! pushed in reverse so the pop order is a pre-order walk in document
//! order, which keeps multi-match results stable and testable.

use std::collections::HashSet;

use lemur_dom::{NodeId, UiTree};

use crate::parser::parse_group;

/// The first node in document order, starting at `root` inclusive, that
/// matches any chain of the parsed selector group. Blank or unparsable
/// selector text yields `None`.
#[must_use]
pub fn query_first(tree: &UiTree, root: NodeId, selector: &str) -> Option<NodeId> {
    let group = parse_group(selector);
    if group.is_empty() {
        return None;
    }
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if group.matches(tree, id) {
            return Some(id);
        }
        stack.extend(tree.children(id).iter().rev().copied());
    }
    None
}

/// All nodes in the subtree rooted at `root` (inclusive) that match any
/// chain of the parsed selector group, in the order they are first
/// discovered, each node at most once even when several chains match it.
#[must_use]
pub fn query_all(tree: &UiTree, root: NodeId, selector: &str) -> Vec<NodeId> {
    let group = parse_group(selector);
    let mut results = Vec::new();
    if group.is_empty() {
        return results;
    }
    let mut seen = HashSet::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if group.matches(tree, id) && seen.insert(id) {
            results.push(id);
        }
        stack.extend(tree.children(id).iter().rev().copied());
    }
    results
}
