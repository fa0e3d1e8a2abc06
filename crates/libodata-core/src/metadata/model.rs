//! Owned object model for an EDMX metadata document.
//!
//! The model is consumed, not owned, by the analysis passes: one
//! [`Metadata`] instance is loaded per distinct schema file and shared
//! (via `Arc`) for the process lifetime. Collection fields are plain
//! `Vec`s that read as empty when the source document omits them —
//! absence and emptiness are deliberately indistinguishable on read.

/// A parsed metadata document: the schemas of one service.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Metadata {
    pub schemas: Vec<Schema>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Schema {
    pub namespace: String,
    pub entity_types: Vec<EntityType>,
    pub entity_containers: Vec<EntityContainer>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EntityType {
    pub name: String,
    pub key: Vec<PropertyRef>,
    pub properties: Vec<Property>,
    pub navigation_properties: Vec<NavigationProperty>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PropertyRef {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Property {
    pub name: String,

    /// The EDM type name, e.g. `Edm.String`.
    #[serde(rename = "type")]
    pub ty: String,

    pub nullable: Option<bool>,
    pub annotations: Vec<Annotation>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NavigationProperty {
    pub name: String,

    /// The target type name, e.g. `Collection(Self.Revision)`.
    #[serde(rename = "type")]
    pub ty: String,

    pub referential_constraints: Vec<ReferentialConstraint>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ReferentialConstraint {
    pub property: String,
    pub referenced_property: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EntityContainer {
    pub name: String,
    pub entity_sets: Vec<EntitySet>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EntitySet {
    pub name: String,

    /// The (usually namespace-qualified) name of the entity type this
    /// set contains, e.g. `Self.WorkItem`.
    pub entity_type: String,

    pub navigation_property_bindings: Vec<NavigationPropertyBinding>,
    pub annotations: Vec<Annotation>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NavigationPropertyBinding {
    pub path: String,
    pub target: String,
}

/// A vocabulary annotation. Only string-valued annotations are
/// modeled; other value kinds read as `None`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Annotation {
    pub term: String,
    pub value: Option<String>,
}

impl Metadata {
    /// Iterates all entity types across all schemas.
    pub fn entity_types(&self) -> impl Iterator<Item = &EntityType> {
        self.schemas.iter().flat_map(|schema| &schema.entity_types)
    }

    /// Iterates all entity sets across all containers of all schemas.
    pub fn entity_sets(&self) -> impl Iterator<Item = &EntitySet> {
        self.schemas
            .iter()
            .flat_map(|schema| &schema.entity_containers)
            .flat_map(|container| &container.entity_sets)
    }

    /// Looks up an entity set by name, case-insensitively (resource
    /// path segments are matched the way hosts match URLs).
    pub fn entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets()
            .find(|set| set.name.eq_ignore_ascii_case(name))
    }

    /// Looks up an entity type by plain or namespace-qualified name
    /// (`WorkItem`, `Self.WorkItem`, `Microsoft.VSTS.WorkItem`).
    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types().find(|entity_type| {
            name == entity_type.name
                || name
                    .rsplit_once('.')
                    .is_some_and(|(_, tail)| tail == entity_type.name)
        })
    }
}
