//! Pull-parsing of EDMX metadata XML into the object model.
//!
//! Only the elements the analysis passes consume are read (`Schema`,
//! `EntityType`, `Property`, `NavigationProperty`, `EntityContainer`,
//! `EntitySet`, `NavigationPropertyBinding`, `Annotation` and their
//! attributes); everything else in the document is skipped without
//! error. Malformed XML or a document that is not an EDMX envelope is
//! rejected.

use crate::metadata::Annotation;
use crate::metadata::EntityContainer;
use crate::metadata::EntitySet;
use crate::metadata::EntityType;
use crate::metadata::Metadata;
use crate::metadata::NavigationProperty;
use crate::metadata::NavigationPropertyBinding;
use crate::metadata::Property;
use crate::metadata::PropertyRef;
use crate::metadata::ReferentialConstraint;
use crate::metadata::Schema;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A failure to interpret a metadata document.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Malformed metadata document: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed metadata attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Element `{element}` is missing its `{attribute}` attribute.")]
    MissingAttribute {
        element: String,
        attribute: String,
    },

    #[error("The document is not an EDMX metadata document.")]
    NotEdmx,
}

/// Reads EDMX metadata text into a [`Metadata`] model.
pub struct EdmxReader;

impl EdmxReader {
    /// Parses `text` as an EDMX document.
    pub fn read(text: &str) -> Result<Metadata, MetadataError> {
        let mut reader = Reader::from_str(text);
        let mut builder = ModelBuilder::default();

        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Start(element) => builder.open(&element)?,
                Event::Empty(element) => {
                    builder.open(&element)?;
                    builder.close(element.local_name().as_ref());
                }
                Event::End(element) => {
                    builder.close(element.local_name().as_ref());
                }
                _ => {}
            }
        }

        if !builder.saw_data_services {
            return Err(MetadataError::NotEdmx);
        }
        Ok(builder.metadata)
    }
}

/// Incremental model assembly driven by open/close element events.
///
/// Each `Option` holds the element currently being populated; `close`
/// folds it into its parent. Elements appearing outside their
/// expected parent are skipped, matching the read-as-empty convention
/// of the model.
#[derive(Default)]
struct ModelBuilder {
    metadata: Metadata,
    saw_data_services: bool,
    schema: Option<Schema>,
    entity_type: Option<EntityType>,
    property: Option<Property>,
    navigation_property: Option<NavigationProperty>,
    container: Option<EntityContainer>,
    entity_set: Option<EntitySet>,
}

impl ModelBuilder {
    fn open(&mut self, element: &BytesStart<'_>) -> Result<(), MetadataError> {
        match element.local_name().as_ref() {
            b"DataServices" => {
                self.saw_data_services = true;
            }
            b"Schema" => {
                self.schema = Some(Schema {
                    namespace: attribute(element, "Namespace")?
                        .unwrap_or_default(),
                    ..Schema::default()
                });
            }
            b"EntityType" if self.schema.is_some() => {
                self.entity_type = Some(EntityType {
                    name: required_attribute(element, "Name")?,
                    ..EntityType::default()
                });
            }
            b"PropertyRef" => {
                if let Some(entity_type) = &mut self.entity_type {
                    entity_type.key.push(PropertyRef {
                        name: required_attribute(element, "Name")?,
                    });
                }
            }
            b"Property" if self.entity_type.is_some() => {
                self.property = Some(Property {
                    name: required_attribute(element, "Name")?,
                    ty: required_attribute(element, "Type")?,
                    nullable: attribute(element, "Nullable")?
                        .map(|value| value.eq_ignore_ascii_case("true")),
                    annotations: Vec::new(),
                });
            }
            b"NavigationProperty" if self.entity_type.is_some() => {
                self.navigation_property = Some(NavigationProperty {
                    name: required_attribute(element, "Name")?,
                    ty: required_attribute(element, "Type")?,
                    referential_constraints: Vec::new(),
                });
            }
            b"ReferentialConstraint" => {
                if let Some(navigation) = &mut self.navigation_property {
                    navigation.referential_constraints.push(
                        ReferentialConstraint {
                            property: required_attribute(element, "Property")?,
                            referenced_property: required_attribute(
                                element,
                                "ReferencedProperty",
                            )?,
                        },
                    );
                }
            }
            b"EntityContainer" if self.schema.is_some() => {
                self.container = Some(EntityContainer {
                    name: required_attribute(element, "Name")?,
                    entity_sets: Vec::new(),
                });
            }
            b"EntitySet" if self.container.is_some() => {
                self.entity_set = Some(EntitySet {
                    name: required_attribute(element, "Name")?,
                    entity_type: required_attribute(element, "EntityType")?,
                    navigation_property_bindings: Vec::new(),
                    annotations: Vec::new(),
                });
            }
            b"NavigationPropertyBinding" => {
                if let Some(entity_set) = &mut self.entity_set {
                    entity_set.navigation_property_bindings.push(
                        NavigationPropertyBinding {
                            path: required_attribute(element, "Path")?,
                            target: required_attribute(element, "Target")?,
                        },
                    );
                }
            }
            b"Annotation" => {
                let annotation = Annotation {
                    term: required_attribute(element, "Term")?,
                    value: attribute(element, "String")?,
                };
                // Annotations nest under whichever element is
                // currently open, innermost first.
                if let Some(property) = &mut self.property {
                    property.annotations.push(annotation);
                } else if let Some(entity_set) = &mut self.entity_set {
                    entity_set.annotations.push(annotation);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"Schema" => {
                if let Some(schema) = self.schema.take() {
                    self.metadata.schemas.push(schema);
                }
            }
            b"EntityType" => {
                if let (Some(schema), Some(entity_type)) =
                    (&mut self.schema, self.entity_type.take())
                {
                    schema.entity_types.push(entity_type);
                }
            }
            b"Property" => {
                if let (Some(entity_type), Some(property)) =
                    (&mut self.entity_type, self.property.take())
                {
                    entity_type.properties.push(property);
                }
            }
            b"NavigationProperty" => {
                if let (Some(entity_type), Some(navigation)) =
                    (&mut self.entity_type, self.navigation_property.take())
                {
                    entity_type.navigation_properties.push(navigation);
                }
            }
            b"EntityContainer" => {
                if let (Some(schema), Some(container)) =
                    (&mut self.schema, self.container.take())
                {
                    schema.entity_containers.push(container);
                }
            }
            b"EntitySet" => {
                if let (Some(container), Some(entity_set)) =
                    (&mut self.container, self.entity_set.take())
                {
                    container.entity_sets.push(entity_set);
                }
            }
            _ => {}
        }
    }
}

/// Reads an optional attribute by local name.
fn attribute(
    element: &BytesStart<'_>,
    name: &str,
) -> Result<Option<String>, MetadataError> {
    for attribute in element.attributes() {
        let attribute = attribute?;
        if attribute.key.local_name().as_ref() == name.as_bytes() {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Reads a required attribute by local name.
fn required_attribute(
    element: &BytesStart<'_>,
    name: &str,
) -> Result<String, MetadataError> {
    attribute(element, name)?.ok_or_else(|| MetadataError::MissingAttribute {
        element: String::from_utf8_lossy(element.local_name().as_ref())
            .into_owned(),
        attribute: name.to_string(),
    })
}
