//! Selector text parsing.
//!
//! Three layers, outermost first:
//!
//! 1. [`parse_group`] splits on top-level commas (a comma inside an
//!    attribute block or a quoted string is part of the selector).
//! 2. [`parse_chain`] splits one group member into steps at combinators.
//!    Quotes suspend all combinator and whitespace recognition until the
//!    matching quote closes; `[`/`]` do the same for `>`, `+`, `~` and
//!    whitespace.
//! 3. [`parse_simple`] parses one fragment into a [`SimpleSelector`]:
//!    a leading tag name, the first `#id`, every `.class` outside
//!    attribute blocks, and every `[attr op value]` block.
//!
//! Parsing never fails. Input the scanner cannot make sense of degrades to
//! fewer constraints - at the limit an unconstrained selector that matches
//! any element - and suspicious syntax (unterminated quotes, unbalanced
//! brackets) is reported once per unique message via
//! [`lemur_common::warning::warn_once`].

use std::iter::Peekable;
use std::str::Chars;

use lemur_common::warning::warn_once;

use crate::selector::{
    AttrOperator, AttributeSelector, Combinator, SelectorChain, SelectorGroup, SelectorStep,
    SimpleSelector,
};

/// Component tag used for parser diagnostics.
const COMPONENT: &str = "selector";

/// Characters allowed in tag names and class names.
const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Characters allowed in identifiers and attribute names. Android
/// resource ids carry a `:` (`com.example:id/button`), so it is allowed
/// on top of the plain name characters.
const fn is_id_char(c: char) -> bool {
    is_name_char(c) || c == ':'
}

/// Parse a full selector list into a group of chains.
///
/// Blank or whitespace-only input yields an empty group, which matches
/// nothing. Blank group members (`"a, "`) are dropped.
#[must_use]
pub fn parse_group(text: &str) -> SelectorGroup {
    if text.trim().is_empty() {
        return SelectorGroup::default();
    }
    let chains = split_top_level_commas(text)
        .into_iter()
        .map(|part| parse_chain(&part))
        .filter(|chain| !chain.steps.is_empty())
        .collect();
    SelectorGroup { chains }
}

/// Parse one group member into a chain of steps.
#[must_use]
pub fn parse_chain(text: &str) -> SelectorChain {
    let steps = split_steps(text)
        .into_iter()
        .map(|(fragment, combinator)| SelectorStep {
            selector: parse_simple(&fragment),
            combinator,
        })
        .collect();
    SelectorChain { steps }
}

/// Split on commas that are not nested inside `[...]` or a quoted string.
fn split_top_level_commas(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in text.chars() {
        match c {
            _ if quote.is_some() => {
                current.push(c);
                if quote == Some(c) {
                    quote = None;
                }
            }
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(core::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}

/// Split a chain into `(fragment, combinator)` pairs by scanning left to
/// right. The combinator paired with a fragment relates it to the fragment
/// *before* it; the first fragment keeps the `Descendant` default.
fn split_steps(text: &str) -> Vec<(String, Combinator)> {
    /// Flush the accumulated fragment, if any, with the pending combinator.
    fn flush(current: &mut String, combinator: Combinator, out: &mut Vec<(String, Combinator)>) {
        let fragment = current.trim();
        if !fragment.is_empty() {
            out.push((fragment.to_string(), combinator));
        }
        current.clear();
    }

    let mut result = Vec::new();
    let mut current = String::new();
    let mut pending = Combinator::Descendant;
    let mut in_attr = false;
    let mut quote: Option<char> = None;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '[' => {
                in_attr = true;
                current.push(c);
            }
            ']' => {
                in_attr = false;
                current.push(c);
            }
            '>' | '+' | '~' if !in_attr => {
                flush(&mut current, pending, &mut result);
                pending = match c {
                    '>' => Combinator::Child,
                    '+' => Combinator::NextSibling,
                    _ => Combinator::SubsequentSibling,
                };
                skip_whitespace(&mut chars);
            }
            _ if c.is_whitespace() && !in_attr => {
                flush(&mut current, pending, &mut result);
                pending = Combinator::Descendant;
                skip_whitespace(&mut chars);
            }
            _ => current.push(c),
        }
    }
    flush(&mut current, pending, &mut result);

    if quote.is_some() {
        warn_once(COMPONENT, &format!("unterminated quote in \"{text}\""));
    }
    if in_attr {
        warn_once(COMPONENT, &format!("unbalanced '[' in \"{text}\""));
    }
    result
}

/// Parse a single combinator-free fragment into a simple selector.
///
/// Permissive by design: characters the scanner does not recognize impose
/// no constraint, so at the limit a broken fragment matches any element.
#[must_use]
pub fn parse_simple(fragment: &str) -> SimpleSelector {
    let fragment = fragment.trim();
    let mut selector = SimpleSelector::default();
    let mut chars = fragment.chars().peekable();

    // Tag name, anchored at the start of the fragment.
    let tag = collect_while(&mut chars, is_name_char);
    if !tag.is_empty() {
        selector.tag_name = Some(tag);
    }

    while let Some(c) = chars.next() {
        match c {
            '[' => {
                if let Some(attr) = parse_attr_block(&mut chars, fragment) {
                    selector.attr_selectors.push(attr);
                }
            }
            '#' => {
                let id = collect_while(&mut chars, is_id_char);
                // First #id wins; later ones impose nothing.
                if !id.is_empty() && selector.id.is_none() {
                    selector.id = Some(id);
                }
            }
            '.' => {
                let class = collect_while(&mut chars, is_name_char);
                if !class.is_empty() {
                    let _ = selector.class_names.insert(class);
                }
            }
            _ => {}
        }
    }
    selector
}

/// Consume and return the run of characters satisfying `pred`.
fn collect_while(chars: &mut Peekable<Chars<'_>>, pred: fn(char) -> bool) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !pred(c) {
            break;
        }
        out.push(c);
        let _ = chars.next();
    }
    out
}

/// Consume the run of whitespace at the cursor.
fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|&c| c.is_whitespace()) {
        let _ = chars.next();
    }
}

/// Consume up to and including the next `]`, for skipping a block the
/// scanner gave up on.
fn skip_past_close(chars: &mut Peekable<Chars<'_>>) {
    for c in chars.by_ref() {
        if c == ']' {
            break;
        }
    }
}

/// Parse one `[attr op value]` block; the leading `[` is already consumed.
///
/// Recognizes an optional operator from `=`, `~=`, `|=`, `^=`, `$=`, `*=`
/// and an optional single-quoted, double-quoted, or bare value. A bare
/// `[attr]` is a presence test. Returns `None` (no constraint) for blocks
/// that cannot be parsed, warning once per unique message.
fn parse_attr_block(
    chars: &mut Peekable<Chars<'_>>,
    fragment: &str,
) -> Option<AttributeSelector> {
    skip_whitespace(chars);
    let name = collect_while(chars, is_id_char);
    skip_whitespace(chars);
    if name.is_empty() {
        skip_past_close(chars);
        warn_once(
            COMPONENT,
            &format!("attribute block without a name in \"{fragment}\""),
        );
        return None;
    }

    let op = match chars.peek() {
        Some(']') => {
            let _ = chars.next();
            return Some(AttributeSelector {
                name,
                op: AttrOperator::Present,
                value: String::new(),
            });
        }
        Some('=') => {
            let _ = chars.next();
            AttrOperator::Equals
        }
        Some(&prefix @ ('~' | '|' | '^' | '$' | '*')) => {
            let _ = chars.next();
            if chars.peek() != Some(&'=') {
                skip_past_close(chars);
                warn_once(
                    COMPONENT,
                    &format!("'{prefix}' without '=' in attribute block in \"{fragment}\""),
                );
                return None;
            }
            let _ = chars.next();
            match prefix {
                '~' => AttrOperator::Includes,
                '|' => AttrOperator::DashMatch,
                '^' => AttrOperator::Prefix,
                '$' => AttrOperator::Suffix,
                _ => AttrOperator::Substring,
            }
        }
        _ => {
            skip_past_close(chars);
            warn_once(
                COMPONENT,
                &format!("unrecognized attribute block in \"{fragment}\""),
            );
            return None;
        }
    };

    skip_whitespace(chars);
    let value = match chars.peek() {
        Some(&q @ ('"' | '\'')) => {
            let _ = chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some(c) if c == q => break,
                    Some(c) => value.push(c),
                    None => {
                        warn_once(
                            COMPONENT,
                            &format!("unterminated quote in attribute block in \"{fragment}\""),
                        );
                        return None;
                    }
                }
            }
            value
        }
        _ => {
            // Bare value: everything up to the closing bracket.
            let mut value = String::new();
            while chars.peek().is_some_and(|&c| c != ']') {
                value.push(chars.next()?);
            }
            value.trim_end().to_string()
        }
    };

    skip_whitespace(chars);
    match chars.next() {
        Some(']') => Some(AttributeSelector { name, op, value }),
        _ => {
            skip_past_close(chars);
            warn_once(
                COMPONENT,
                &format!("attribute block not closed in \"{fragment}\""),
            );
            None
        }
    }
}
