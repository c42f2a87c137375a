//! Chain and predicate matching against tree nodes.
//!
//! Predicate matching ([`SimpleSelector::matches`]) needs only the element
//! itself. Chain matching ([`SelectorChain::matches`]) walks the tree
//! right-to-left from the subject, and *backtracks*: an ancestor or sibling
//! that satisfies the immediately preceding step is only good if the rest
//! of the chain also succeeds from it, so every candidate at every level is
//! tried until one works or all are exhausted.
//!
//! Worst case this is combinatorial - O(depth x breadth) work per step for
//! stacked descendant/sibling combinators. Queries over real hierarchy
//! dumps are tiny; correctness of the search order matters here, not
//! asymptotics.

use lemur_dom::{ElementData, NodeId, UiTree};

use crate::selector::{
    AttrOperator, AttributeSelector, Combinator, SelectorChain, SelectorGroup, SimpleSelector,
};

impl AttributeSelector {
    /// Evaluate this predicate against one element.
    ///
    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// A missing attribute reads as the empty string for every operator
    /// except [`AttrOperator::Present`], which tests existence outright.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        let actual = element.attr(&self.name).unwrap_or_default();
        match self.op {
            AttrOperator::Present => element.attrs.contains(&self.name),
            AttrOperator::Equals => actual == self.value,
            // [attr~="word"]: must contain the whole word (space separated)
            AttrOperator::Includes => actual
                .split_ascii_whitespace()
                .any(|word| word == self.value),
            // [attr|="v"]: actual == v OR starts with v + '-'
            AttrOperator::DashMatch => {
                actual == self.value || actual.starts_with(&format!("{}-", self.value))
            }
            AttrOperator::Prefix => actual.starts_with(self.value.as_str()),
            AttrOperator::Suffix => actual.ends_with(self.value.as_str()),
            AttrOperator::Substring => actual.contains(self.value.as_str()),
        }
    }
}

impl SimpleSelector {
    /// Whether one element satisfies every constraint of this selector.
    ///
    /// Tag and attribute names/values compare case-sensitively (hierarchy
    /// dumps are not HTML). The identifier constraint resolves through
    /// [`ElementData::identifier`], i.e. `resource-id` first with an `id`
    /// fallback. Class constraints are set containment: the element must
    /// carry every named class, in any order.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag_name {
            if element.tag_name != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            match element.identifier() {
                Some(actual) if actual == id => {}
                _ => return false,
            }
        }
        if !self.class_names.is_empty() {
            let classes = element.classes();
            if !self
                .class_names
                .iter()
                .all(|class| classes.contains(class.as_str()))
            {
                return false;
            }
        }
        self.attr_selectors.iter().all(|attr| attr.matches(element))
    }
}

impl SelectorChain {
    /// Whether `node` is matched by this chain.
    ///
    /// The rightmost step must match the node itself; each preceding step
    /// is then verified against the combinator-appropriate related nodes,
    /// recursively, with backtracking across candidates. Only element
    /// nodes ever match; an empty chain matches nothing.
    #[must_use]
    pub fn matches(&self, tree: &UiTree, node: NodeId) -> bool {
        match self.steps.len().checked_sub(1) {
            Some(last) => self.satisfied_from(tree, node, last),
            None => false,
        }
    }

    /// Whether `node` satisfies step `index` and, transitively, every step
    /// before it.
    ///
    /// For `Descendant` and `SubsequentSibling` the candidate set has many
    /// members; `Iterator::any` over them nearest-first is exactly the
    /// backtracking search: a candidate that matches the preceding step
    /// but whose own prefix fails is abandoned and the scan continues
    /// outward.
    fn satisfied_from(&self, tree: &UiTree, node: NodeId, index: usize) -> bool {
        let Some(element) = tree.as_element(node) else {
            return false;
        };
        if !self.steps[index].selector.matches(element) {
            return false;
        }
        let Some(prev) = index.checked_sub(1) else {
            return true;
        };
        match self.steps[index].combinator {
            Combinator::Descendant => tree
                .ancestors(node)
                .any(|ancestor| self.satisfied_from(tree, ancestor, prev)),
            Combinator::Child => tree
                .parent(node)
                .is_some_and(|parent| self.satisfied_from(tree, parent, prev)),
            Combinator::NextSibling => previous_element_sibling(tree, node)
                .is_some_and(|sibling| self.satisfied_from(tree, sibling, prev)),
            Combinator::SubsequentSibling => tree
                .preceding_siblings(node)
                .filter(|&sibling| tree.as_element(sibling).is_some())
                .any(|sibling| self.satisfied_from(tree, sibling, prev)),
        }
    }
}

impl SelectorGroup {
    /// Whether `node` is matched by any chain in the group.
    #[must_use]
    pub fn matches(&self, tree: &UiTree, node: NodeId) -> bool {
        self.chains.iter().any(|chain| chain.matches(tree, node))
    }
}

/// The nearest preceding *element* sibling, skipping text and comment
/// nodes.
pub(crate) fn previous_element_sibling(tree: &UiTree, node: NodeId) -> Option<NodeId> {
    tree.preceding_siblings(node)
        .find(|&sibling| tree.as_element(sibling).is_some())
}
