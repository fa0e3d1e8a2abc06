//! Shared test fixtures.

/// A small but representative EDMX document: two entity types, one
/// container with two entity sets, key refs, a navigation property
/// with a referential constraint, and annotations on a property and
/// an entity set.
pub const SAMPLE_EDMX: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="Analytics">
      <EntityType Name="WorkItem">
        <Key>
          <PropertyRef Name="id"/>
        </Key>
        <Property Name="id" Type="Edm.Int32" Nullable="false"/>
        <Property Name="name" Type="Edm.String"/>
        <Property Name="title" Type="Edm.String">
          <Annotation Term="Ref.ReferenceName" String="System.Title"/>
        </Property>
        <NavigationProperty Name="Supplier" Type="Analytics.Supplier">
          <ReferentialConstraint Property="supplierId" ReferencedProperty="id"/>
        </NavigationProperty>
      </EntityType>
      <EntityType Name="Supplier">
        <Property Name="id" Type="Edm.Int32"/>
        <Property Name="rating" Type="Edm.Int32"/>
      </EntityType>
      <EntityContainer Name="Default">
        <EntitySet Name="WorkItems" EntityType="Analytics.WorkItem">
          <NavigationPropertyBinding Path="Supplier" Target="Suppliers"/>
          <Annotation Term="Org.DisplayName" String="Work items"/>
        </EntitySet>
        <EntitySet Name="Suppliers" EntityType="Analytics.Supplier"/>
      </EntityContainer>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>
"#;
