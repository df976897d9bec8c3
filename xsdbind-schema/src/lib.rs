//! # xsdbind Schema
//!
//! Schema compiler front end: reads an XML Schema describing a
//! record-like document format and derives the intermediate model the
//! emitter consumes.
//!
//! This crate provides:
//! - A navigable element tree over the schema document
//! - The scalar type table for the supported primitive vocabulary
//! - The intermediate model of classes, fields and constants
//! - The inference engine and the two-pass reference resolver

pub mod error;
pub mod infer;
pub mod ir;
pub mod resolve;
pub mod scalar;
pub mod xml;

pub use error::{CompileError, InferenceError, ResolutionError, SyntaxError};
pub use ir::{
    CellKind, ClassDef, ConstDef, Package, Storage, VarDef, VarKind, attr_field_name,
    detect_implicit_reference, fix_name,
};
pub use scalar::ScalarKind;
pub use xml::Element;

/// Compiles an XML schema string into a fully resolved package.
///
/// # Arguments
/// * `xml` - XML schema content
/// * `package_name` - Name of the generated package
///
/// # Errors
/// Returns `CompileError` if the XML is malformed, a construct falls
/// outside the supported subset, or a reference cannot be resolved.
pub fn compile(xml: &str, package_name: &str) -> Result<Package, CompileError> {
    let root = xml::parse_document(xml)?;
    compile_schema(&root, package_name)
}

/// Compiles a parsed schema element tree into a fully resolved package.
///
/// Classes are built in schema declaration order, then the reference
/// resolver runs over the complete class list. Compilation either
/// completes or fails as a whole; a failed package is discarded.
///
/// # Errors
/// Returns `CompileError` under the same conditions as [`compile`].
pub fn compile_schema(root: &Element, package_name: &str) -> Result<Package, CompileError> {
    let span = tracing::debug_span!("compile", package = package_name);
    let _enter = span.enter();

    let mut package = Package::new(package_name);
    package.schema_version = root.attr("version").unwrap_or_default().to_string();

    for element in root.children_named("element") {
        let class = infer::build_class(element, &package.schema_version)?;
        package.classes.push(class);
    }

    resolve::resolve(&mut package)?;
    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" version="1.0.2">
    <xs:element name="network">
        <xs:complexType>
            <xs:sequence>
                <xs:element ref="node" maxOccurs="unbounded"/>
                <xs:element ref="pathList" maxOccurs="unbounded"/>
                <xs:element ref="parameters"/>
            </xs:sequence>
            <xs:attribute name="schemaVersion" type="xs:string" use="required"/>
            <xs:anyAttribute/>
        </xs:complexType>
    </xs:element>
    <xs:element name="node">
        <xs:complexType>
            <xs:attribute name="id" type="xs:string" use="required"/>
            <xs:attribute name="lat" type="xs:decimal" use="optional" default="0"/>
        </xs:complexType>
    </xs:element>
    <xs:element name="pathList">
        <xs:complexType mixed="true">
            <xs:attribute name="cellType" type="xs:string" use="optional" default="link"/>
            <xs:attribute name="delims" type="xs:string" use="optional" default=","/>
        </xs:complexType>
    </xs:element>
    <xs:element name="link">
        <xs:complexType>
            <xs:attribute name="id" type="xs:string" use="required"/>
            <xs:attribute name="node_id" type="xs:string" use="required"/>
        </xs:complexType>
    </xs:element>
</xs:schema>"#;

    #[test]
    fn test_compile_network_schema() {
        let package = compile(NETWORK_SCHEMA, "aurora").expect("Failed to compile");

        assert_eq!(package.name, "aurora");
        assert_eq!(package.schema_version, "1.0.2");

        let names: Vec<_> = package.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Network", "Node", "PathList", "Link"]);

        let network = package.get_class("Network").unwrap();
        assert!(network.any_attr);
        assert_eq!(
            network.consts,
            vec![ConstDef {
                name: "SchemaVersion".to_string(),
                value: "1.0.2".to_string()
            }]
        );

        // PathList cells hold link IDs, and Link points at Node by ID.
        assert_eq!(package.referenced_classes, ["Link", "Node"]);
        let link = package.get_class("Link").unwrap();
        assert!(link.referenced);
        assert_eq!(link.ref_name.as_deref(), Some("link"));
    }

    #[test]
    fn test_end_to_end_array_traits() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" version="2.0">
            <xs:element name="node">
                <xs:complexType mixed="true">
                    <xs:attribute name="id" type="xs:string" use="required"/>
                    <xs:attribute name="cellType" type="xs:string" use="optional" default="xs:decimal"/>
                    <xs:attribute name="delims" type="xs:string" use="optional" default=";,:"/>
                </xs:complexType>
            </xs:element>
        </xs:schema>"#;

        let package = compile(xml, "test").expect("Failed to compile");
        let node = package.get_class("Node").unwrap();

        assert_eq!(node.dim, Some(3));
        assert_eq!(node.delims.as_deref(), Some([';', ',', ':'].as_slice()));
        assert_eq!(node.cell_kind, Some(CellKind::Scalar(ScalarKind::Number)));
        assert!(!node.cells_are_references());

        let cells = node.text_var().expect("text var");
        assert_eq!(cells.name, "cells");
        assert_eq!(cells.kind, VarKind::Cells);
    }

    #[test]
    fn test_unresolved_reference_fails_compilation() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:element name="event">
                <xs:complexType>
                    <xs:attribute name="ghost_id" type="xs:string" use="required"/>
                </xs:complexType>
            </xs:element>
        </xs:schema>"#;

        let err = compile(xml, "test").expect_err("expected an error");
        assert!(matches!(err, CompileError::Resolution(_)));
    }

    #[test]
    fn test_missing_version_is_empty() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:element name="note" type="xs:string"/>
        </xs:schema>"#;
        let package = compile(xml, "test").expect("Failed to compile");
        assert_eq!(package.schema_version, "");
    }
}
