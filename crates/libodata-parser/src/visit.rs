//! Dispatch-by-kind traversal over the syntax tree.
//!
//! [`SyntaxVisitor`] computes one value per node and is the basis of
//! the formatter; [`SyntaxWalker`] is its unit-valued specialization
//! that recurses into every structural child, used for diagnostics
//! collection and binding.
//!
//! Dispatch happens purely on the node tag — nodes themselves carry no
//! dispatch logic, so the parser can produce plain data. The `match`
//! in [`SyntaxVisitor::visit`] is exhaustive over [`SyntaxNode`]:
//! adding a node kind fails compilation here rather than silently
//! falling through at runtime.

use crate::syntax::ErrorSyntax;
use crate::syntax::PropertySyntax;
use crate::syntax::SelectSyntax;
use crate::syntax::SyntaxNode;
use crate::syntax::UnanalyzedClauseSyntax;
use crate::syntax::UriSyntax;

/// A per-kind traversal that computes a value for each visited node.
///
/// Every `visit_*` method defaults to [`visit_default`]
/// (`SyntaxVisitor::visit_default`), the fallback leaf behavior.
/// Implementations override the kinds they care about.
pub trait SyntaxVisitor {
    type Output;

    /// Dispatches `node` to the matching `visit_*` method.
    fn visit(&mut self, node: SyntaxNode<'_>) -> Self::Output {
        match node {
            SyntaxNode::Uri(n) => self.visit_uri(n),
            SyntaxNode::Select(n) => self.visit_select(n),
            SyntaxNode::PrimitiveProperty(n) => self.visit_primitive_property(n),
            SyntaxNode::NavigationProperty(n) => {
                self.visit_navigation_property(n)
            }
            SyntaxNode::UnanalyzedClause(n) => self.visit_unanalyzed_clause(n),
            SyntaxNode::Error(n) => self.visit_error(n),
        }
    }

    /// Fallback behavior for kinds an implementation does not
    /// override.
    fn visit_default(&mut self, node: SyntaxNode<'_>) -> Self::Output;

    fn visit_uri(&mut self, node: &UriSyntax) -> Self::Output {
        self.visit_default(SyntaxNode::Uri(node))
    }

    fn visit_select(&mut self, node: &SelectSyntax) -> Self::Output {
        self.visit_default(SyntaxNode::Select(node))
    }

    fn visit_primitive_property(
        &mut self,
        node: &PropertySyntax,
    ) -> Self::Output {
        self.visit_default(SyntaxNode::PrimitiveProperty(node))
    }

    fn visit_navigation_property(
        &mut self,
        node: &PropertySyntax,
    ) -> Self::Output {
        self.visit_default(SyntaxNode::NavigationProperty(node))
    }

    fn visit_unanalyzed_clause(
        &mut self,
        node: &UnanalyzedClauseSyntax,
    ) -> Self::Output {
        self.visit_default(SyntaxNode::UnanalyzedClause(node))
    }

    fn visit_error(&mut self, node: &ErrorSyntax) -> Self::Output {
        self.visit_default(SyntaxNode::Error(node))
    }
}

/// A full-tree, pre-order traversal.
///
/// The unit-valued counterpart of [`SyntaxVisitor`]: [`walk`]
/// (`SyntaxWalker::walk`) invokes [`on_node`](SyntaxWalker::on_node)
/// for the node itself and then recurses into every structural child
/// (including unanalyzed clauses and embedded error nodes),
/// guaranteeing every node in the tree is visited exactly once.
/// Children of one kind are visited in source order; under a uri node
/// the select clause comes first, then unanalyzed clauses, then the
/// embedded error.
pub trait SyntaxWalker {
    /// Per-node hook, invoked once per node in pre-order.
    fn on_node(&mut self, _node: SyntaxNode<'_>) {}

    /// Walks `node` and its children, pre-order.
    fn walk(&mut self, node: SyntaxNode<'_>) {
        self.on_node(node);
        match node {
            SyntaxNode::Uri(uri) => {
                if let Some(select) = &uri.select {
                    self.walk(SyntaxNode::Select(select));
                }
                for clause in &uri.unanalyzed {
                    self.walk(SyntaxNode::UnanalyzedClause(clause));
                }
                if let Some(error) = &uri.error {
                    self.walk(SyntaxNode::Error(error));
                }
            }
            SyntaxNode::Select(select) => {
                for item in &select.items {
                    self.walk(item.as_node());
                }
                if let Some(error) = &select.error {
                    self.walk(SyntaxNode::Error(error));
                }
            }
            SyntaxNode::PrimitiveProperty(_)
            | SyntaxNode::NavigationProperty(_)
            | SyntaxNode::UnanalyzedClause(_)
            | SyntaxNode::Error(_) => {}
        }
    }
}
