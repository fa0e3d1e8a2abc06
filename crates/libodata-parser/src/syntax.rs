//! The OData syntax tree: a closed, flat set of tagged node variants.
//!
//! The parser produces plain data — no polymorphic objects, no
//! per-node dispatch logic. All dispatch happens in the
//! [`SyntaxVisitor`](crate::visit::SyntaxVisitor) framework via an
//! exhaustive `match` over [`SyntaxNode`], so adding a node kind here
//! is a compile-time obligation for every traversal in the workspace.
//!
//! Nodes are immutable once parsed. The only annotations that live
//! inside the tree are the `error` fields the parser itself fills in
//! during local recovery; semantic annotations (binding symbols) are
//! kept in side tables keyed by [`NodeId`].

use crate::SourceSpan;
use smallvec::SmallVec;

/// A stable identity for a syntax node within one [`SyntaxTree`].
///
/// Ids are assigned by the parser in creation order and are unique
/// within the tree that produced them. Downstream passes use them to
/// key side tables (e.g. the binder's symbol table) without mutating
/// shared tree structure.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the raw index value of this id.
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// The tag of a syntax node variant.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum SyntaxKind {
    Uri,
    Select,
    PrimitiveProperty,
    NavigationProperty,
    UnanalyzedClause,
    Error,
}

/// The root node of a parsed query document.
#[derive(Clone, Debug, PartialEq)]
pub struct UriSyntax {
    pub id: NodeId,
    pub span: SourceSpan,

    /// The scheme+host+path portion of the query, captured verbatim
    /// (inner whitespace is significant) with structural trivia
    /// around the query marker trimmed.
    pub service_root: String,

    /// The `$select` clause, when present.
    pub select: Option<SelectSyntax>,

    /// Accepted clauses with no semantic model (`$filter`, `$top`,
    /// …), carried verbatim so re-rendering can preserve them.
    pub unanalyzed: Vec<UnanalyzedClauseSyntax>,

    /// Locally recovered parse failure within this node's extent, if
    /// any. Soft recovery marker; the rest of the tree is usable.
    pub error: Option<ErrorSyntax>,
}

/// A `$select` clause: an ordered projection over property names.
///
/// Item order is source order and is semantically meaningful — it is
/// the projection order the query requests.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectSyntax {
    pub id: NodeId,
    pub span: SourceSpan,

    /// Selected items, in source order. Most real-world queries select
    /// a handful of properties, so the items are stored inline.
    pub items: SmallVec<[SelectItemSyntax; 4]>,

    /// Locally recovered parse failure within this clause, if any.
    pub error: Option<ErrorSyntax>,
}

/// A single selected property reference.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertySyntax {
    pub id: NodeId,
    pub span: SourceSpan,

    /// The referenced property name. For navigation paths this is the
    /// full `/`-joined path text.
    pub property_name: String,
}

/// An item of a [`SelectSyntax`] list.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectItemSyntax {
    /// A structural (non-navigational) property reference, e.g. `id`.
    PrimitiveProperty(PropertySyntax),

    /// A `/`-separated navigation path, e.g. `Supplier/Name`.
    NavigationProperty(PropertySyntax),
}

impl SelectItemSyntax {
    /// Returns the underlying property node regardless of variant.
    pub fn property(&self) -> &PropertySyntax {
        match self {
            SelectItemSyntax::PrimitiveProperty(p) => p,
            SelectItemSyntax::NavigationProperty(p) => p,
        }
    }

    /// Returns this item as a dispatchable [`SyntaxNode`].
    pub fn as_node(&self) -> SyntaxNode<'_> {
        match self {
            SelectItemSyntax::PrimitiveProperty(p) => {
                SyntaxNode::PrimitiveProperty(p)
            }
            SelectItemSyntax::NavigationProperty(p) => {
                SyntaxNode::NavigationProperty(p)
            }
        }
    }
}

/// A known clause the grammar accepts without modeling its value,
/// e.g. `$top=5`.
///
/// The clause's `$keyword=value` text is carried verbatim; it has no
/// semantic children but must survive re-rendering untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct UnanalyzedClauseSyntax {
    pub id: NodeId,
    pub span: SourceSpan,

    /// The full clause text as written, keyword and value included.
    pub text: String,
}

/// A span of input that could not be assigned a valid production.
///
/// Carries no semantic children; its span covers exactly the
/// offending character range.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorSyntax {
    pub id: NodeId,
    pub span: SourceSpan,
}

/// A by-reference view of any node in the tree, tagged by kind.
///
/// This is the closed variant set that every
/// [`SyntaxVisitor`](crate::visit::SyntaxVisitor) dispatches over.
#[derive(Clone, Copy, Debug)]
pub enum SyntaxNode<'tree> {
    Uri(&'tree UriSyntax),
    Select(&'tree SelectSyntax),
    PrimitiveProperty(&'tree PropertySyntax),
    NavigationProperty(&'tree PropertySyntax),
    UnanalyzedClause(&'tree UnanalyzedClauseSyntax),
    Error(&'tree ErrorSyntax),
}

impl<'tree> SyntaxNode<'tree> {
    /// Returns the variant tag of this node.
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxNode::Uri(_) => SyntaxKind::Uri,
            SyntaxNode::Select(_) => SyntaxKind::Select,
            SyntaxNode::PrimitiveProperty(_) => SyntaxKind::PrimitiveProperty,
            SyntaxNode::NavigationProperty(_) => SyntaxKind::NavigationProperty,
            SyntaxNode::UnanalyzedClause(_) => SyntaxKind::UnanalyzedClause,
            SyntaxNode::Error(_) => SyntaxKind::Error,
        }
    }

    /// Returns the stable id of this node.
    pub fn id(&self) -> NodeId {
        match self {
            SyntaxNode::Uri(n) => n.id,
            SyntaxNode::Select(n) => n.id,
            SyntaxNode::PrimitiveProperty(n) => n.id,
            SyntaxNode::NavigationProperty(n) => n.id,
            SyntaxNode::UnanalyzedClause(n) => n.id,
            SyntaxNode::Error(n) => n.id,
        }
    }

    /// Returns the source span of this node.
    pub fn span(&self) -> SourceSpan {
        match self {
            SyntaxNode::Uri(n) => n.span,
            SyntaxNode::Select(n) => n.span,
            SyntaxNode::PrimitiveProperty(n) => n.span,
            SyntaxNode::NavigationProperty(n) => n.span,
            SyntaxNode::UnanalyzedClause(n) => n.span,
            SyntaxNode::Error(n) => n.span,
        }
    }
}

/// A freshly parsed query document.
///
/// Produced per parse call and discarded after the analysis pass; no
/// tree structure is shared across documents or recomputations.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxTree {
    pub root: UriSyntax,
}

impl SyntaxTree {
    /// Returns the root as a dispatchable [`SyntaxNode`].
    pub fn root_node(&self) -> SyntaxNode<'_> {
        SyntaxNode::Uri(&self.root)
    }
}
