//! Selector parsing, matching, and tree querying for UI hierarchy snapshots.
//!
//! # Scope
//!
//! This crate implements a practical subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) evaluated against
//! the attributed tree in `lemur-dom`:
//!
//! - **Selector Parser**
//!   - Type (`node`), ID (`#logo`), and class (`.button`) selectors
//!   - All seven attribute forms: `[attr]`, `[attr="v"]`, `[attr~="v"]`,
//!     `[attr|="v"]`, `[attr^="v"]`, `[attr$="v"]`, `[attr*="v"]`
//!   - Combinators: descendant (whitespace), `>`, `+`, `~`
//!   - Comma-separated selector groups, quote- and bracket-aware
//!
//! - **Matching**
//!   - Predicate matching of one element against one simple selector,
//!     with `resource-id`-first identifier resolution
//!   - Right-to-left chain matching with recursive backtracking across
//!     ancestor and sibling candidates
//!
//! - **Querying**
//!   - `query_first` / `query_all` over a subtree in document order,
//!     with union semantics across groups and order-preserving dedup
//!
//! - **Navigation**
//!   - `next` / `prev` / `siblings` / `parents` helpers with optional
//!     simple-selector filters
//!
//! # Error philosophy
//!
//! Selector text never produces an error: malformed input degrades to
//! fewer constraints (at the limit, a selector that matches any element)
//! or to an empty result, and suspicious syntax is reported through the
//! deduplicated warning sink in `lemur-common`.
//!
//! # Not Implemented
//!
//! - Pseudo-classes and pseudo-elements
//! - Specificity and any cascade semantics
//! - Selector indexing; every query re-walks the tree

/// Chain and predicate matching against tree nodes.
pub mod matching;
/// Sibling/ancestor navigation helpers with optional filters.
pub mod navigate;
/// Selector text parsing per the grammar subset above.
pub mod parser;
/// Subtree querying: first match and all matches.
pub mod query;
/// The parsed selector data model.
pub mod selector;

pub use parser::{parse_chain, parse_group, parse_simple};
pub use query::{query_all, query_first};
pub use selector::{
    AttrOperator, AttributeSelector, Combinator, SelectorChain, SelectorGroup, SelectorStep,
    SimpleSelector,
};
