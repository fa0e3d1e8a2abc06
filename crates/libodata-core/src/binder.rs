//! Semantic analysis: resolving selected property names against the
//! active metadata schema.
//!
//! Binding is pure with respect to tree structure — it never rewrites
//! node kinds or spans. Resolution results land in a side table keyed
//! by [`NodeId`] (the tree stays immutable), and unresolved names
//! become diagnostics without aborting the rest of the walk.
//!
//! # Candidate scoping
//!
//! The candidate property set is scoped to the entity type addressed
//! by the query's resource path: the last path segment of the service
//! root is matched (case-insensitively) against entity-set names, and
//! the matched set's entity type contributes its properties. When no
//! entity set matches, the candidate set falls back to the union of
//! properties across all entity types in the metadata.

use crate::diagnostics::Diagnostic;
use crate::metadata::EntityType;
use crate::metadata::Metadata;
use indexmap::IndexMap;
use libodata_parser::syntax::NodeId;
use libodata_parser::syntax::PropertySyntax;
use libodata_parser::syntax::SyntaxNode;
use libodata_parser::syntax::SyntaxTree;
use libodata_parser::visit::SyntaxWalker;
use std::collections::HashMap;

/// Annotation term whose value aliases a property under an external
/// reference name.
const REFERENCE_NAME_TERM: &str = "Ref.ReferenceName";

/// The resolution attached to a successfully bound property node.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertySymbol {
    /// Canonical name of the resolved property (may differ from the
    /// queried text when an annotation alias matched).
    pub property_name: String,

    /// Name of the entity type declaring the property.
    pub declaring_type: String,

    /// The property's EDM type name.
    pub edm_type: String,
}

/// The result of one binding pass over a tree.
#[derive(Debug, Default)]
pub struct BindOutcome {
    /// Node-identity → resolution side table.
    pub symbols: HashMap<NodeId, PropertySymbol>,

    /// One diagnostic per unresolved property reference.
    pub diagnostics: Vec<Diagnostic>,
}

impl BindOutcome {
    /// Returns the symbol bound to `id`, if resolution succeeded.
    pub fn symbol(&self, id: NodeId) -> Option<&PropertySymbol> {
        self.symbols.get(&id)
    }
}

/// Walks `tree`, resolving every selected property against
/// `metadata`.
pub fn bind(tree: &SyntaxTree, metadata: &Metadata) -> BindOutcome {
    let candidates = CandidateSet::for_service_root(
        metadata,
        &tree.root.service_root,
    );
    let mut binder = Binder {
        candidates,
        outcome: BindOutcome::default(),
    };
    binder.walk(tree.root_node());
    binder.outcome
}

/// One resolvable name in scope.
#[derive(Clone, Copy)]
struct Candidate<'md> {
    property_name: &'md str,
    declaring_type: &'md str,
    edm_type: &'md str,
}

/// The flattened, ordered set of property names in scope for a query.
struct CandidateSet<'md> {
    /// Declared property and navigation-property names.
    by_name: IndexMap<&'md str, Candidate<'md>>,

    /// `Ref.ReferenceName` annotation values, aliasing a declared
    /// property under an external name.
    by_alias: IndexMap<&'md str, Candidate<'md>>,
}

impl<'md> CandidateSet<'md> {
    fn for_service_root(metadata: &'md Metadata, service_root: &str) -> Self {
        let mut set = Self {
            by_name: IndexMap::new(),
            by_alias: IndexMap::new(),
        };
        match addressed_entity_type(metadata, service_root) {
            Some(entity_type) => set.add_entity_type(entity_type),
            None => {
                // Scoping gap fallback: no addressable entity set, so
                // all entity types contribute.
                for entity_type in metadata.entity_types() {
                    set.add_entity_type(entity_type);
                }
            }
        }
        set
    }

    fn add_entity_type(&mut self, entity_type: &'md EntityType) {
        for property in &entity_type.properties {
            let candidate = Candidate {
                property_name: &property.name,
                declaring_type: &entity_type.name,
                edm_type: &property.ty,
            };
            self.by_name.entry(&property.name).or_insert(candidate);

            for annotation in &property.annotations {
                if annotation.term == REFERENCE_NAME_TERM
                    && let Some(alias) = &annotation.value
                {
                    self.by_alias.entry(alias).or_insert(candidate);
                }
            }
        }
        for navigation in &entity_type.navigation_properties {
            let candidate = Candidate {
                property_name: &navigation.name,
                declaring_type: &entity_type.name,
                edm_type: &navigation.ty,
            };
            self.by_name.entry(&navigation.name).or_insert(candidate);
        }
    }

    fn lookup(&self, name: &str) -> Option<Candidate<'md>> {
        self.by_name
            .get(name)
            .or_else(|| self.by_alias.get(name))
            .copied()
    }
}

/// Returns the entity type addressed by the service root's last path
/// segment, if any entity set matches it.
fn addressed_entity_type<'md>(
    metadata: &'md Metadata,
    service_root: &str,
) -> Option<&'md EntityType> {
    let segment = service_root
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())?;
    let entity_set = metadata.entity_set(segment)?;
    metadata.entity_type(&entity_set.entity_type)
}

struct Binder<'md> {
    candidates: CandidateSet<'md>,
    outcome: BindOutcome,
}

impl Binder<'_> {
    fn bind_property(&mut self, node: &PropertySyntax, name: &str) {
        match self.candidates.lookup(name) {
            Some(candidate) => {
                self.outcome.symbols.insert(
                    node.id,
                    PropertySymbol {
                        property_name: candidate.property_name.to_string(),
                        declaring_type: candidate.declaring_type.to_string(),
                        edm_type: candidate.edm_type.to_string(),
                    },
                );
            }
            None => {
                log::trace!("No property `{name}` in scope.");
                self.outcome.diagnostics.push(Diagnostic::error(
                    node.span,
                    format!("Cannot find property '{name}'."),
                ));
            }
        }
    }
}

impl SyntaxWalker for Binder<'_> {
    fn on_node(&mut self, node: SyntaxNode<'_>) {
        match node {
            SyntaxNode::PrimitiveProperty(property) => {
                self.bind_property(property, &property.property_name);
            }
            SyntaxNode::NavigationProperty(property) => {
                // Only the first path segment is resolvable against
                // the addressed type; deeper segments would need the
                // navigation target's schema.
                let first_segment = property
                    .property_name
                    .split('/')
                    .next()
                    .unwrap_or(&property.property_name);
                self.bind_property(property, first_segment);
            }
            _ => {}
        }
    }
}
