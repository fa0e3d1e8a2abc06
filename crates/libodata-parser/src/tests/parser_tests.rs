//! Tests for successful and soft-recovered parses.
//!
//! These tests verify:
//! - Service root capture (verbatim text, marker trivia trimmed)
//! - `$select` list splitting, item ordering, and whitespace handling
//! - Navigation path classification
//! - Local recovery into embedded error nodes
//! - Treatment of unanalyzed clause keywords

use crate::syntax::SelectItemSyntax;
use crate::ODataParser;

fn parse(text: &str) -> crate::syntax::SyntaxTree {
    ODataParser::new(text)
        .parse_document()
        .expect("input should parse")
}

fn item_names(select: &crate::syntax::SelectSyntax) -> Vec<&str> {
    select
        .items
        .iter()
        .map(|item| item.property().property_name.as_str())
        .collect()
}

// =============================================================================
// Service root
// =============================================================================

/// A bare resource URI with no query string parses to a root with no
/// select clause and no errors.
#[test]
fn test_bare_service_root() {
    let tree = parse("http://host/svc/Items");
    assert_eq!(tree.root.service_root, "http://host/svc/Items");
    assert!(tree.root.select.is_none(), "No query string, no select");
    assert!(tree.root.error.is_none(), "Valid input should carry no error");
}

/// The service root is captured verbatim up to the query marker;
/// whitespace inside it is significant.
#[test]
fn test_service_root_inner_whitespace_is_significant() {
    let tree = parse("http://host/svc/My Items?$select=id");
    assert_eq!(tree.root.service_root, "http://host/svc/My Items");
}

/// Trivia between the service root and the query marker (the layout
/// the formatter emits) is not part of the literal root text.
#[test]
fn test_service_root_marker_trivia_trimmed() {
    let tree = parse("http://host/svc/Items\r\n    ?$select=id");
    assert_eq!(tree.root.service_root, "http://host/svc/Items");
    let select = tree.root.select.as_ref().expect("select should parse");
    assert_eq!(item_names(select), vec!["id"]);
}

// =============================================================================
// $select lists
// =============================================================================

/// Elements split on the list separator in source order.
#[test]
fn test_select_items_in_source_order() {
    let tree = parse("http://host/x?$select=zebra,apple,mango");
    let select = tree.root.select.as_ref().unwrap();
    assert_eq!(
        item_names(select),
        vec!["zebra", "apple", "mango"],
        "Projection order must be source order, never sorted"
    );
}

/// Whitespace around list elements is insignificant and excluded from
/// item spans.
#[test]
fn test_select_whitespace_insignificant() {
    let tree = parse("http://a/b?$select=id, name , age");
    let select = tree.root.select.as_ref().unwrap();
    assert_eq!(item_names(select), vec!["id", "name", "age"]);

    let name = select.items[1].property();
    assert_eq!(name.span.start.offset(), 23, "span starts at `n`");
    assert_eq!(name.span.end.offset(), 27, "span ends after `e`");
}

/// A `/`-separated path element becomes a navigation property; plain
/// names stay primitive.
#[test]
fn test_select_navigation_path() {
    let tree = parse("http://a/b?$select=id,Supplier/Name");
    let select = tree.root.select.as_ref().unwrap();
    assert!(matches!(
        select.items[0],
        SelectItemSyntax::PrimitiveProperty(_)
    ));
    match &select.items[1] {
        SelectItemSyntax::NavigationProperty(p) => {
            assert_eq!(p.property_name, "Supplier/Name");
        }
        other => panic!("Expected a navigation property, got {other:?}"),
    }
}

/// Namespace-qualified names (dots) are valid property names.
#[test]
fn test_select_dotted_property_name() {
    let tree = parse("http://a/b?$select=System.Title");
    let select = tree.root.select.as_ref().unwrap();
    assert_eq!(item_names(select), vec!["System.Title"]);
}

// =============================================================================
// Soft recovery
// =============================================================================

/// An invalid list element is recovered into an embedded error node
/// spanning exactly the offending range; valid neighbors still parse.
#[test]
fn test_select_invalid_element_recovers() {
    let tree = parse("http://a/b?$select=id,%$!,name");
    let select = tree.root.select.as_ref().unwrap();

    assert_eq!(
        item_names(select),
        vec!["id", "name"],
        "Valid elements on both sides of the bad one must survive"
    );
    let error = select.error.as_ref().expect("bad element becomes an error");
    assert_eq!(error.span.start.offset(), 22);
    assert_eq!(error.span.end.offset(), 25);
}

/// An empty list element yields a zero-width error node at the
/// element position.
#[test]
fn test_select_empty_element_recovers() {
    let tree = parse("http://a/b?$select=id,,name");
    let select = tree.root.select.as_ref().unwrap();
    assert_eq!(item_names(select), vec!["id", "name"]);
    let error = select.error.as_ref().expect("empty element becomes an error");
    assert!(error.span.is_empty(), "Empty element error is zero-width");
    assert_eq!(error.span.start.offset(), 22);
}

/// An unknown clause keyword is recovered on the enclosing uri node
/// without aborting the parse.
#[test]
fn test_unknown_clause_recovers_on_uri() {
    let tree = parse("http://a/b?$bogus=1&$select=id");
    let select = tree.root.select.as_ref().expect("select after bad clause");
    assert_eq!(item_names(select), vec!["id"]);

    let error = tree.root.error.as_ref().expect("unknown clause is an error");
    assert_eq!(error.span.start.offset(), 11, "error starts at `$bogus`");
    assert_eq!(error.span.end.offset(), 19, "error covers `$bogus=1`");
}

/// A clause with no `=` is an error region.
#[test]
fn test_clause_without_value_recovers() {
    let tree = parse("http://a/b?stray");
    assert!(tree.root.select.is_none());
    assert!(tree.root.error.is_some(), "`stray` matches no production");
}

// =============================================================================
// Unanalyzed clauses
// =============================================================================

/// Known non-`$select` clauses are accepted without errors and
/// carried verbatim as unanalyzed clause nodes.
#[test]
fn test_unanalyzed_clauses_accepted() {
    let tree = parse("http://a/b?$top=5&$select=id&$filter=age gt 3");
    assert!(tree.root.error.is_none(), "Known clauses are not errors");
    let select = tree.root.select.as_ref().unwrap();
    assert_eq!(item_names(select), vec!["id"]);

    let texts: Vec<&str> = tree
        .root
        .unanalyzed
        .iter()
        .map(|clause| clause.text.as_str())
        .collect();
    assert_eq!(texts, vec!["$top=5", "$filter=age gt 3"]);

    let top = &tree.root.unanalyzed[0];
    assert_eq!(top.span.start.offset(), 11, "clause starts at `$top`");
    assert_eq!(top.span.end.offset(), 17, "clause span covers `$top=5`");
    let filter = &tree.root.unanalyzed[1];
    assert_eq!(filter.span.start.offset(), 29);
    assert_eq!(filter.span.end.offset(), 45);
}

// =============================================================================
// Property-based checks
// =============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn property_name() -> impl Strategy<Value = String> {
        "[a-zA-Z_][a-zA-Z0-9_]{0,12}"
    }

    proptest! {
        /// Every generated `$select` list parses to the same names in
        /// the same order.
        #[test]
        fn select_lists_round_trip_names(
            names in prop::collection::vec(property_name(), 1..8),
        ) {
            let input = format!(
                "http://host/svc/Items?$select={}",
                names.join(","),
            );
            let tree = parse(&input);
            let select = tree.root.select.as_ref().unwrap();
            prop_assert_eq!(item_names(select), names);
            prop_assert!(select.error.is_none());
        }

        /// Every node span in a parsed tree stays within the
        /// document's UTF-16 length bound.
        #[test]
        fn spans_stay_within_document(
            names in prop::collection::vec(property_name(), 1..8),
        ) {
            let input = format!(
                "http://host/svc/Items?$select={}",
                names.join(", "),
            );
            let len: usize = input.chars().map(char::len_utf16).sum();
            let tree = parse(&input);
            let select = tree.root.select.as_ref().unwrap();
            for item in &select.items {
                let span = item.property().span;
                prop_assert!(span.start.offset() <= span.end.offset());
                prop_assert!(span.end.offset() <= len);
                prop_assert!(select.span.contains(&span));
            }
            prop_assert!(tree.root.span.contains(&select.span));
        }
    }
}
