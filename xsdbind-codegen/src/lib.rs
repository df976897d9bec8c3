//! # xsdbind Codegen
//!
//! Back end of the schema compiler: turns the resolved intermediate
//! model into Backbone model sources, one file per class.
//!
//! This crate provides:
//! - A line tree with nested-block indentation for assembling sources
//! - The per-class generator for importers, exporters and constants
//! - A package renderer producing the full file set

pub mod backbone;
pub mod error;
pub mod lines;

pub use backbone::ClassGenerator;
pub use error::CodegenError;
pub use lines::{Line, render};

use xsdbind_schema::Package;

/// Renders every class of a package, returning `(file name, source)`
/// pairs in declaration order.
///
/// # Errors
/// Returns `CodegenError` if any class fails to generate; no partial
/// output is returned.
pub fn render_package(package: &Package) -> Result<Vec<(String, String)>, CodegenError> {
    let generator = ClassGenerator::new(package);
    package
        .classes
        .iter()
        .map(|class| {
            let source = generator.generate(class)?;
            Ok((format!("{}.coffee", class.name), source))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsdbind_schema::compile;

    #[test]
    fn test_render_package_one_file_per_class() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" version="1.0">
            <xs:element name="network">
                <xs:complexType>
                    <xs:sequence>
                        <xs:element ref="node" maxOccurs="unbounded"/>
                    </xs:sequence>
                </xs:complexType>
            </xs:element>
            <xs:element name="node">
                <xs:complexType>
                    <xs:attribute name="id" type="xs:string" use="required"/>
                </xs:complexType>
            </xs:element>
        </xs:schema>"#;

        let package = compile(xml, "aurora").expect("Failed to compile");
        let files = render_package(&package).expect("Failed to render");

        let names: Vec<_> = files.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["Network.coffee", "Node.coffee"]);
        assert!(files[1].1.contains("class window.aurora.Node"));
    }
}
