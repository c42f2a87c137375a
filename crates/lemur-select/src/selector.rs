//! The parsed selector data model.
//!
//! A selector string parses into a [`SelectorGroup`] (comma-separated
//! alternatives), each a [`SelectorChain`] of [`SelectorStep`]s, each a
//! [`SimpleSelector`] plus the [`Combinator`] relating it to the step
//! before it. All of these are plain immutable data: construction happens
//! once per parse, matching never mutates them.

use core::fmt;
use std::collections::BTreeSet;

use strum_macros::Display;

/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// How an attribute predicate compares the actual value to the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AttrOperator {
    /// `[attr]` - the attribute exists; the expected value is ignored.
    #[strum(serialize = "")]
    Present,
    /// `[attr="v"]` - exact string equality.
    #[strum(serialize = "=")]
    Equals,
    /// `[attr~="v"]` - the value, split on whitespace, contains `v` as a
    /// whole word.
    #[strum(serialize = "~=")]
    Includes,
    /// `[attr|="v"]` - the value is exactly `v` or begins with `v-`.
    #[strum(serialize = "|=")]
    DashMatch,
    /// `[attr^="v"]` - the value starts with `v`.
    #[strum(serialize = "^=")]
    Prefix,
    /// `[attr$="v"]` - the value ends with `v`.
    #[strum(serialize = "$=")]
    Suffix,
    /// `[attr*="v"]` - the value contains `v` anywhere.
    #[strum(serialize = "*=")]
    Substring,
}

/// One `[attr op value]` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    /// Attribute name, matched case-sensitively.
    pub name: String,
    /// Comparison operator; [`AttrOperator::Present`] ignores `value`.
    pub op: AttrOperator,
    /// Expected value. Empty for presence-only predicates.
    pub value: String,
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.op == AttrOperator::Present {
            write!(f, "[{}]", self.name)
        } else {
            write!(f, "[{}{}\"{}\"]", self.name, self.op, self.value)
        }
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// A single selector fragment with no combinator: the conjunction of an
/// optional tag name, an optional identifier, class names, and attribute
/// predicates. Absent fields impose no constraint, so the default value
/// matches every element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleSelector {
    /// Tag name constraint, matched case-sensitively.
    pub tag_name: Option<String>,
    /// `#id` constraint, resolved against `resource-id` then `id`.
    pub id: Option<String>,
    /// `.class` constraints; the element must carry every one of them.
    pub class_names: BTreeSet<String>,
    /// `[attr...]` constraints; all must pass.
    pub attr_selectors: Vec<AttributeSelector>,
}

impl SimpleSelector {
    /// Whether no constraint was parsed at all. Such a selector matches
    /// any element; the parser deliberately produces it for fragments it
    /// cannot make sense of.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.tag_name.is_none()
            && self.id.is_none()
            && self.class_names.is_empty()
            && self.attr_selectors.is_empty()
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag_name {
            f.write_str(tag)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.class_names {
            write!(f, ".{class}")?;
        }
        for attr in &self.attr_selectors {
            write!(f, "{attr}")?;
        }
        Ok(())
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// The structural relationship between a step and the step immediately
/// before it in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Combinator {
    /// Whitespace: the previous step matches some ancestor.
    #[strum(serialize = " ")]
    Descendant,
    /// `>`: the previous step matches the immediate parent.
    #[strum(serialize = ">")]
    Child,
    /// `+`: the previous step matches the nearest preceding element
    /// sibling.
    #[strum(serialize = "+")]
    NextSibling,
    /// `~`: the previous step matches some preceding element sibling.
    #[strum(serialize = "~")]
    SubsequentSibling,
}

/// One step of a chain: a simple selector plus its relation to the
/// previous step. The first step's combinator is unused and defaults to
/// [`Combinator::Descendant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorStep {
    /// The step's own constraints.
    pub selector: SimpleSelector,
    /// Relation to the step before this one.
    pub combinator: Combinator,
}

impl fmt::Display for SelectorStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.combinator {
            Combinator::Descendant => write!(f, "{}", self.selector),
            other => write!(f, "{} {}", other, self.selector),
        }
    }
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// An ordered chain of steps, leftmost = outermost ancestor constraint,
/// rightmost = the subject (the node a match is reported for). A chain
/// with no steps matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorChain {
    /// Steps in source order.
    pub steps: Vec<SelectorStep>,
}

impl fmt::Display for SelectorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// A comma-separated selector list. A node matches the group when it
/// matches any of its chains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorGroup {
    /// Alternative chains, in source order.
    pub chains: Vec<SelectorChain>,
}

impl SelectorGroup {
    /// Whether the group holds no chains (blank input parses to this; it
    /// matches nothing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl fmt::Display for SelectorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.chains.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{chain}")?;
        }
        Ok(())
    }
}
