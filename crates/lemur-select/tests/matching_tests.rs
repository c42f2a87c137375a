//! Integration tests for predicate and chain matching.

use lemur_dom::{AttributeMap, ElementData, NodeId, NodeKind, UiTree};
use lemur_select::{parse_chain, parse_simple};

fn element(tree: &mut UiTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let mut map = AttributeMap::new();
    for (name, value) in attrs {
        map.set(name, value);
    }
    let id = tree.alloc(NodeKind::Element(ElementData {
        tag_name: tag.to_string(),
        attrs: map,
    }));
    tree.append_child(parent, id);
    id
}

fn text(tree: &mut UiTree, parent: NodeId, content: &str) -> NodeId {
    let id = tree.alloc(NodeKind::Text(content.to_string()));
    tree.append_child(parent, id);
    id
}

fn matches_simple(tree: &UiTree, id: NodeId, fragment: &str) -> bool {
    parse_simple(fragment).matches(tree.as_element(id).expect("element"))
}

fn matches_chain(tree: &UiTree, id: NodeId, selector: &str) -> bool {
    parse_chain(selector).matches(tree, id)
}

// ========== predicate matcher ==========

#[test]
fn test_tag_match_is_case_sensitive() {
    let mut tree = UiTree::new();
    let lower = element(&mut tree, NodeId::ROOT, "node", &[]);
    let upper = element(&mut tree, NodeId::ROOT, "Node", &[]);

    assert!(matches_simple(&tree, lower, "node"));
    assert!(!matches_simple(&tree, lower, "Node"));
    assert!(matches_simple(&tree, upper, "Node"));
    assert!(!matches_simple(&tree, upper, "node"));
}

#[test]
fn test_id_resolves_resource_id_before_plain_id() {
    let mut tree = UiTree::new();
    let by_resource = element(&mut tree, NodeId::ROOT, "node", &[("resource-id", "logo")]);
    let by_plain = element(&mut tree, NodeId::ROOT, "node", &[("id", "logo")]);
    let shadowed = element(
        &mut tree,
        NodeId::ROOT,
        "node",
        &[("resource-id", "real"), ("id", "decoy")],
    );

    assert!(matches_simple(&tree, by_resource, "#logo"));
    assert!(matches_simple(&tree, by_plain, "#logo"));
    assert!(matches_simple(&tree, shadowed, "#real"));
    assert!(!matches_simple(&tree, shadowed, "#decoy"));
    assert!(!matches_simple(&tree, by_resource, "#other"));
}

#[test]
fn test_class_constraints_all_required() {
    let mut tree = UiTree::new();
    let both = element(&mut tree, NodeId::ROOT, "node", &[("class", "foo bar baz")]);
    let one = element(&mut tree, NodeId::ROOT, "node", &[("class", "foo baz")]);

    assert!(matches_simple(&tree, both, ".foo.bar"));
    assert!(!matches_simple(&tree, one, ".foo.bar"));
    assert!(matches_simple(&tree, one, ".foo"));
}

#[test]
fn test_class_order_is_irrelevant() {
    let mut tree = UiTree::new();
    let id = element(&mut tree, NodeId::ROOT, "node", &[("class", "b a")]);
    assert!(matches_simple(&tree, id, ".a.b"));
}

#[test]
fn test_attribute_equals_and_presence() {
    let mut tree = UiTree::new();
    let id = element(&mut tree, NodeId::ROOT, "node", &[("foo", "Bar")]);

    assert!(matches_simple(&tree, id, "[foo]"));
    assert!(!matches_simple(&tree, id, "[baz]"));
    assert!(matches_simple(&tree, id, r#"[foo="Bar"]"#));
    // Values compare case-sensitively.
    assert!(!matches_simple(&tree, id, r#"[foo="bar"]"#));
}

#[test]
fn test_attribute_includes_requires_whole_word() {
    let mut tree = UiTree::new();
    let id = element(&mut tree, NodeId::ROOT, "node", &[("class", "foo button1 bar")]);

    assert!(matches_simple(&tree, id, r#"[class~="button1"]"#));
    assert!(!matches_simple(&tree, id, r#"[class~="button"]"#));
    assert!(!matches_simple(&tree, id, r#"[class~="notfound"]"#));
}

#[test]
fn test_attribute_dashmatch_exact_or_dash_prefix() {
    let mut tree = UiTree::new();
    let dashed = element(&mut tree, NodeId::ROOT, "node", &[("class", "button1-foo")]);
    let exact = element(&mut tree, NodeId::ROOT, "node", &[("class", "button1")]);
    let similar = element(&mut tree, NodeId::ROOT, "node", &[("class", "button11")]);

    assert!(matches_simple(&tree, dashed, r#"[class|="button1"]"#));
    assert!(matches_simple(&tree, exact, r#"[class|="button1"]"#));
    assert!(!matches_simple(&tree, similar, r#"[class|="button1"]"#));
}

#[test]
fn test_attribute_prefix_suffix_substring() {
    let mut tree = UiTree::new();
    let id = element(&mut tree, NodeId::ROOT, "node", &[("class", "foo_button1_bar")]);

    assert!(matches_simple(&tree, id, r#"[class^="foo_"]"#));
    assert!(matches_simple(&tree, id, r#"[class$="_bar"]"#));
    assert!(matches_simple(&tree, id, r#"[class*="button1"]"#));
    assert!(!matches_simple(&tree, id, r#"[class^="button1"]"#));
    assert!(!matches_simple(&tree, id, r#"[class$="button1"]"#));
}

#[test]
fn test_missing_attribute_reads_as_empty_string() {
    let mut tree = UiTree::new();
    let id = element(&mut tree, NodeId::ROOT, "node", &[]);

    // Prefix/suffix/substring with "" vacuously hold on the empty string;
    // equality against a non-empty value does not.
    assert!(!matches_simple(&tree, id, r#"[text="x"]"#));
    assert!(!matches_simple(&tree, id, r#"[text*="x"]"#));
    assert!(!matches_simple(&tree, id, "[text]"));
}

#[test]
fn test_unconstrained_selector_matches_any_element() {
    let mut tree = UiTree::new();
    let id = element(&mut tree, NodeId::ROOT, "node", &[("text", "anything")]);
    assert!(matches_simple(&tree, id, ""));
    assert!(matches_simple(&tree, id, "@!?"));
}

// ========== chain matcher ==========

#[test]
fn test_child_vs_descendant() {
    // p > q > r
    let mut tree = UiTree::new();
    let p = element(&mut tree, NodeId::ROOT, "p", &[]);
    let q = element(&mut tree, p, "q", &[]);
    let r = element(&mut tree, q, "r", &[]);

    assert!(matches_chain(&tree, r, "p r"));
    assert!(!matches_chain(&tree, r, "p > r"));
    assert!(matches_chain(&tree, r, "q > r"));
    assert!(matches_chain(&tree, r, "p > q > r"));
    assert!(matches_chain(&tree, q, "p > q"));
}

#[test]
fn test_adjacent_vs_general_sibling() {
    // a, b, c under one parent
    let mut tree = UiTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "hierarchy", &[]);
    let _a = element(&mut tree, parent, "a", &[]);
    let _b = element(&mut tree, parent, "b", &[]);
    let c = element(&mut tree, parent, "c", &[]);

    assert!(!matches_chain(&tree, c, "a + c"));
    assert!(matches_chain(&tree, c, "a ~ c"));
    assert!(matches_chain(&tree, c, "b + c"));
}

#[test]
fn test_adjacent_skips_non_element_siblings() {
    let mut tree = UiTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "hierarchy", &[]);
    let _a = element(&mut tree, parent, "a", &[]);
    let _gap = text(&mut tree, parent, "Some Text");
    let b = element(&mut tree, parent, "b", &[]);

    assert!(matches_chain(&tree, b, "a + b"));
}

#[test]
fn test_single_step_chain_matches_the_node_itself() {
    let mut tree = UiTree::new();
    let id = element(&mut tree, NodeId::ROOT, "node", &[("text", "X")]);
    assert!(matches_chain(&tree, id, r#"[text="X"]"#));
    assert!(!matches_chain(&tree, id, r#"[text="Y"]"#));
}

#[test]
fn test_non_element_nodes_never_match() {
    let mut tree = UiTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "hierarchy", &[]);
    let stray = text(&mut tree, parent, "plain");

    assert!(!matches_chain(&tree, stray, ""));
    assert!(!parse_chain("hierarchy *stray*").matches(&tree, stray));
    assert!(!matches_chain(&tree, NodeId::ROOT, "hierarchy"));
}

#[test]
fn test_empty_chain_matches_nothing() {
    let mut tree = UiTree::new();
    let id = element(&mut tree, NodeId::ROOT, "node", &[]);
    assert!(!parse_chain("").matches(&tree, id));
}

#[test]
fn test_descendant_backtracks_past_a_dead_end_ancestor() {
    // The nearest .b ancestor of leaf has no .a parent; the chain must
    // retry the farther .b ancestor instead of failing on the first.
    //
    //   a(.a) > b_high(.b) > mid(.x) > b_low(.b) > leaf
    let mut tree = UiTree::new();
    let a = element(&mut tree, NodeId::ROOT, "node", &[("class", "a")]);
    let b_high = element(&mut tree, a, "node", &[("class", "b")]);
    let mid = element(&mut tree, b_high, "node", &[("class", "x")]);
    let b_low = element(&mut tree, mid, "node", &[("class", "b")]);
    let leaf = element(&mut tree, b_low, "leaf", &[]);

    // Needs the backtrack: b_low matches .b but its parent is .x, not .a.
    assert!(matches_chain(&tree, leaf, ".a > .b leaf"));
    // The near candidate satisfies this one without backtracking.
    assert!(matches_chain(&tree, leaf, ".x > .b leaf"));
    // No .x ancestor has an .a parent.
    assert!(!matches_chain(&tree, leaf, ".a > .x leaf"));
}

#[test]
fn test_general_sibling_backtracks_past_a_dead_end_candidate() {
    // Nearest preceding .a sibling of s is not adjacent to .first; the
    // matcher must retry the earlier .a candidate.
    //
    //   f(.first), a1(.a), z, a2(.a), s
    let mut tree = UiTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "hierarchy", &[]);
    let _f = element(&mut tree, parent, "node", &[("class", "first")]);
    let _a1 = element(&mut tree, parent, "node", &[("class", "a")]);
    let _z = element(&mut tree, parent, "node", &[]);
    let _a2 = element(&mut tree, parent, "node", &[("class", "a")]);
    let s = element(&mut tree, parent, "s", &[]);

    assert!(matches_chain(&tree, s, ".first + .a ~ s"));
}

#[test]
fn test_chain_fails_when_no_candidate_survives_the_prefix() {
    //   b_high(.b) > mid(.x) > b_low(.b) > leaf   (no .a anywhere)
    let mut tree = UiTree::new();
    let b_high = element(&mut tree, NodeId::ROOT, "node", &[("class", "b")]);
    let mid = element(&mut tree, b_high, "node", &[("class", "x")]);
    let b_low = element(&mut tree, mid, "node", &[("class", "b")]);
    let leaf = element(&mut tree, b_low, "leaf", &[]);

    assert!(!matches_chain(&tree, leaf, ".a > .b leaf"));
}
