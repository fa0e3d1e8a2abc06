//! The EDMX metadata schema: object model, XML reader, and the
//! prefix-map resolver with its memoizing async cache.

mod edmx;
mod model;
mod resolver;

pub use edmx::EdmxReader;
pub use edmx::MetadataError;
pub use model::Annotation;
pub use model::EntityContainer;
pub use model::EntitySet;
pub use model::EntityType;
pub use model::Metadata;
pub use model::NavigationProperty;
pub use model::NavigationPropertyBinding;
pub use model::Property;
pub use model::PropertyRef;
pub use model::ReferentialConstraint;
pub use model::Schema;
pub use resolver::MetadataMapEntry;
pub use resolver::MetadataResolver;
pub use resolver::ResolveError;
