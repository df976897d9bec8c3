//! Backbone model source generation.
//!
//! Renders one finished class definition into the source text of a
//! Backbone model: class-level array traits and constants, a two-phase
//! importer (`from_xml1`/`from_xml2` with a deferred list so ID
//! references resolve after the whole document is constructed), and a
//! `to_xml` exporter.

use crate::error::CodegenError;
use crate::lines::{Line, render};
use xsdbind_schema::{CellKind, ClassDef, Package, ScalarKind, Storage, VarDef, VarKind};

/// Generator for class sources within one package.
pub struct ClassGenerator<'a> {
    package: &'a Package,
}

impl<'a> ClassGenerator<'a> {
    /// Creates a generator for the given package.
    #[must_use]
    pub fn new(package: &'a Package) -> Self {
        Self { package }
    }

    /// Generates the source text for one class.
    ///
    /// # Errors
    /// Returns `CodegenError` when the class model is internally
    /// inconsistent (an array text body without delimiters, an object
    /// field outside sub-element storage).
    pub fn generate(&self, class: &ClassDef) -> Result<String, CodegenError> {
        tracing::debug!(class = %class.name, "generating class source");
        Ok(render(&self.class_lines(class)?))
    }

    fn qualified_name(&self, class: &ClassDef) -> String {
        format!("window.{}.{}", self.package.name, class.name)
    }

    fn class_lines(&self, class: &ClassDef) -> Result<Vec<Line>, CodegenError> {
        let mut body = Vec::new();

        if let Some(dim) = class.dim {
            body.push(Line::text(format!("@dim = {dim}")));
            let delims = class.delims.as_deref().unwrap_or_default();
            body.push(Line::text(format!("@delims = {}", delims_literal(delims))));
        }
        if let Some(kind) = &class.cell_kind {
            body.push(Line::text(format!(
                "@cell_type = {:?}",
                cell_type_name(kind)
            )));
        }
        for constant in &class.consts {
            body.push(Line::text(format!(
                "@{} = {:?}",
                constant.name, constant.value
            )));
        }

        body.push(Line::text(format!(
            "### $a = alias for {} namespace ###",
            self.package.name
        )));
        body.push(Line::text(format!("$a = window.{}", self.package.name)));

        body.push(Line::text("@from_xml1: (xml, object_with_id) ->"));
        body.push(Line::block(from_xml1_body()));
        body.push(Line::blank());

        body.push(Line::text("@from_xml2: (xml, deferred, object_with_id) ->"));
        body.push(Line::block(self.from_xml2_body(class)?));
        body.push(Line::blank());

        body.push(Line::text("to_xml: (doc) ->"));
        body.push(Line::block(self.to_xml_body(class)?));
        body.push(Line::blank());

        body.push(Line::text(format!(
            "deep_copy: -> {}.from_xml1(@to_xml(document), {{}})",
            class.name
        )));

        Ok(vec![
            Line::text(format!(
                "class {} extends Backbone.Model",
                self.qualified_name(class)
            )),
            Line::block(body),
        ])
    }

    fn from_xml2_body(&self, class: &ClassDef) -> Result<Vec<Line>, CodegenError> {
        let mut lines = vec![
            Line::text("return null if (not xml? or xml.length == 0)"),
            Line::text(format!("obj = new {}()", self.qualified_name(class))),
        ];

        for var in &class.vars {
            lines.extend(importer(class, var)?);
        }

        if class.referenced {
            let key = class.ref_name.as_deref().unwrap_or(&class.xml_name);
            // object_with_id.<key> may be null in deep_copy().
            lines.push(Line::text(format!("if object_with_id.{key}")));
            lines.push(Line::block(vec![Line::text(format!(
                "object_with_id.{key}[obj.id] = obj"
            ))]));
        }

        lines.push(Line::text("if obj.resolve_references"));
        lines.push(Line::block(vec![Line::text(
            "obj.resolve_references(deferred, object_with_id)",
        )]));
        lines.push(Line::text("obj"));
        Ok(lines)
    }

    fn to_xml_body(&self, class: &ClassDef) -> Result<Vec<Line>, CodegenError> {
        let mut lines = vec![
            Line::text(format!("xml = doc.createElement('{}')", class.xml_name)),
            Line::text("if @encode_references"),
            Line::block(vec![Line::text("@encode_references()")]),
        ];

        for var in &class.vars {
            lines.extend(exporter(class, var)?);
        }

        lines.push(Line::text("xml"));
        Ok(lines)
    }
}

fn from_xml1_body() -> Vec<Line> {
    vec![
        Line::text("deferred = []"),
        Line::text("obj = @from_xml2(xml, deferred, object_with_id)"),
        Line::text("fn() for fn in deferred"),
        Line::text("obj"),
    ]
}

/// Lines that read one field out of the XML representation into `obj`.
fn importer(class: &ClassDef, var: &VarDef) -> Result<Vec<Line>, CodegenError> {
    let name = &var.name;
    match var.storage {
        Storage::Attribute => {
            let xml_name = var.xml_name.as_deref().unwrap_or(name);
            let read = Line::text(format!("{name} = $(xml).attr('{xml_name}')"));
            let converted = scalar_conversion(var, name)?;
            let rhs = match &var.default {
                Some(default) => format!("(if {name}? then {converted} else {default})"),
                None => converted,
            };
            Ok(vec![
                read,
                Line::text(format!("obj.set('{name}', {rhs})")),
            ])
        }

        Storage::SubElement => {
            let VarKind::Object(target) = &var.kind else {
                return Err(CodegenError::generation(format!(
                    "field '{name}' of {}: sub-element storage requires an object type",
                    class.name
                )));
            };
            let xml_name = var.xml_name.as_deref().unwrap_or(name);
            if var.collection {
                Ok(vec![
                    Line::text(format!("{name} = xml.children('{xml_name}')")),
                    Line::text(format!(
                        "obj.set('{name}', _.map($({name}), ({name}_i) -> \
                         $a.{target}.from_xml2($({name}_i), deferred, object_with_id)))"
                    )),
                ])
            } else {
                Ok(vec![
                    Line::text(format!("{name} = xml.children('{xml_name}')[0]")),
                    Line::text(format!(
                        "obj.set('{name}', $a.{target}.from_xml2({name}, deferred, object_with_id))"
                    )),
                ])
            }
        }

        Storage::Parameters => {
            if var.kind != VarKind::Parameters {
                return Err(CodegenError::generation(format!(
                    "field '{name}' of {}: parameters storage requires the parameters type",
                    class.name
                )));
            }
            Ok(vec![
                Line::text(format!("{name} = xml.find('{name}')")),
                Line::text(format!(
                    "obj.set('{name}', _.reduce({name}.find('parameter'),"
                )),
                Line::block(vec![
                    Line::text("((acc, par_xml) ->"),
                    Line::block(vec![
                        Line::text("wrapped_xml = $(par_xml)"),
                        Line::text("acc[wrapped_xml.attr('name')] = wrapped_xml.attr('value')"),
                        Line::text("acc),"),
                    ]),
                    Line::text("{}))"),
                ]),
            ])
        }

        Storage::Text => text_importer(class, var),
    }
}

fn text_importer(class: &ClassDef, var: &VarDef) -> Result<Vec<Line>, CodegenError> {
    let name = &var.name;
    match &var.kind {
        VarKind::Scalar(ScalarKind::Text) => Ok(vec![Line::text(format!(
            "obj.set('{name}', xml.text())"
        ))]),
        VarKind::Scalar(ScalarKind::Bool) => Ok(vec![Line::text(format!(
            "obj.set('{name}', xml.text().toLowerCase() == 'true')"
        ))]),
        VarKind::Scalar(_) => Ok(vec![Line::text(format!(
            "obj.set('{name}', Number(xml.text()))"
        ))]),

        VarKind::Cells => {
            let (Some(_), Some(kind)) = (&class.delims, &class.cell_kind) else {
                return Err(CodegenError::generation(format!(
                    "{} needs delims and cellType",
                    class.name
                )));
            };
            let cell_type = cell_type_name(kind);
            if let CellKind::Reference(key) = kind {
                // The id map is only populated once the whole document
                // is read, so cell resolution is deferred.
                Ok(vec![Line::text(format!(
                    "deferred.push(=> obj.set('{name}', $a.ArrayText.parse(\
                     xml.text(), @delims, {cell_type:?}, object_with_id.{key})))"
                ))])
            } else {
                Ok(vec![Line::text(format!(
                    "obj.set('{name}', $a.ArrayText.parse(xml.text(), @delims, {cell_type:?}, null))"
                ))])
            }
        }

        VarKind::Object(_) | VarKind::Parameters => Err(CodegenError::generation(format!(
            "field '{name}' of {}: complex type must use sub-element storage",
            class.name
        ))),
    }
}

/// Lines that write one field of `this` into the XML representation.
fn exporter(class: &ClassDef, var: &VarDef) -> Result<Vec<Line>, CodegenError> {
    let name = &var.name;
    match var.storage {
        Storage::Attribute => {
            let xml_name = var.xml_name.as_deref().unwrap_or(name);
            let guard = match &var.default {
                // A value equal to the default round-trips via the default.
                Some(default) => {
                    format!("if @has('{name}') and @get('{name}') != {default}")
                }
                None => format!("if @has('{name}')"),
            };
            Ok(vec![Line::text(format!(
                "xml.setAttribute('{xml_name}', @get('{name}')) {guard}"
            ))])
        }

        Storage::SubElement => {
            if var.collection {
                Ok(vec![Line::text(format!(
                    "_.each(@get('{name}') || [], (a_{name}) -> xml.appendChild(a_{name}.to_xml(doc)))"
                ))])
            } else {
                Ok(vec![Line::text(format!(
                    "xml.appendChild(@get('{name}').to_xml(doc)) if @has('{name}')"
                ))])
            }
        }

        Storage::Text => {
            if class.delims.is_some() {
                if class.cells_are_references() {
                    Ok(vec![Line::text(format!(
                        "xml.appendChild(doc.createTextNode($a.ArrayText.emit(\
                         (@get('{name}') || []).map((x) -> x.id), @delims)))"
                    ))])
                } else {
                    Ok(vec![Line::text(format!(
                        "xml.appendChild(doc.createTextNode($a.ArrayText.emit(\
                         @get('{name}') || [], @delims)))"
                    ))])
                }
            } else {
                Ok(vec![Line::text(format!(
                    "xml.appendChild(doc.createTextNode('' + (@get('{name}') ? '')))"
                ))])
            }
        }

        Storage::Parameters => {
            let xml_name = var.xml_name.as_deref().unwrap_or(name);
            Ok(vec![
                Line::text(format!("if @has('{name}')")),
                Line::block(vec![
                    Line::text(format!(
                        "parameters_xml = doc.createElement('{xml_name}')"
                    )),
                    Line::text(format!(
                        "_.each(@get('{name}'), (par_val, par_name) ->"
                    )),
                    Line::block(vec![
                        Line::text("parameter_xml = doc.createElement('parameter')"),
                        Line::text("parameter_xml.setAttribute('name', par_name)"),
                        Line::text("parameter_xml.setAttribute('value', par_val)"),
                        Line::text("parameters_xml.appendChild(parameter_xml))"),
                    ]),
                    Line::text("xml.appendChild(parameters_xml)"),
                ]),
            ])
        }
    }
}

/// Conversion expression for an attribute value read into a local
/// variable of the given name.
fn scalar_conversion(var: &VarDef, local: &str) -> Result<String, CodegenError> {
    match &var.kind {
        VarKind::Scalar(ScalarKind::Text) => Ok(local.to_string()),
        VarKind::Scalar(ScalarKind::Bool) => {
            Ok(format!("({local}.toLowerCase() == 'true')"))
        }
        VarKind::Scalar(_) => Ok(format!("Number({local})")),
        other => Err(CodegenError::generation(format!(
            "attribute storage requires a scalar type, got {other:?} for '{}'",
            var.name
        ))),
    }
}

fn cell_type_name(kind: &CellKind) -> String {
    match kind {
        CellKind::Scalar(scalar) => scalar.target_type().to_string(),
        CellKind::Reference(name) => name.clone(),
    }
}

fn delims_literal(delims: &[char]) -> String {
    let quoted: Vec<String> = delims.iter().map(|d| format!("{:?}", d.to_string())).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsdbind_schema::compile;

    const SCHEMA: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" version="1.0">
        <xs:element name="network">
            <xs:complexType>
                <xs:sequence>
                    <xs:element ref="node" maxOccurs="unbounded"/>
                    <xs:element ref="pathList"/>
                    <xs:element ref="parameters"/>
                </xs:sequence>
                <xs:attribute name="name" type="xs:string" use="optional" default="net"/>
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
                <xs:attribute name="cellType" type="xs:string" use="optional" default="node"/>
                <xs:attribute name="delims" type="xs:string" use="optional" default=","/>
            </xs:complexType>
        </xs:element>
    </xs:schema>"#;

    fn compiled() -> Package {
        compile(SCHEMA, "aurora").expect("Failed to compile")
    }

    #[test]
    fn test_generates_class_header() {
        let package = compiled();
        let generator = ClassGenerator::new(&package);
        let source = generator
            .generate(package.get_class("Node").unwrap())
            .expect("Failed to generate");

        assert!(source.starts_with("class window.aurora.Node extends Backbone.Model\n"));
        assert!(source.contains("$a = window.aurora"));
        assert!(source.contains("@from_xml1: (xml, object_with_id) ->"));
        assert!(source.contains("to_xml: (doc) ->"));
    }

    #[test]
    fn test_attribute_import_and_default() {
        let package = compiled();
        let generator = ClassGenerator::new(&package);
        let source = generator
            .generate(package.get_class("Node").unwrap())
            .expect("Failed to generate");

        assert!(source.contains("id = $(xml).attr('id')"));
        assert!(source.contains("obj.set('id', id)"));
        assert!(source.contains("obj.set('lat', (if lat? then Number(lat) else 0))"));
        assert!(source.contains("xml.setAttribute('lat', @get('lat')) if @has('lat') and @get('lat') != 0"));
    }

    #[test]
    fn test_array_traits_and_deferred_cells() {
        let package = compiled();
        let generator = ClassGenerator::new(&package);
        let source = generator
            .generate(package.get_class("PathList").unwrap())
            .expect("Failed to generate");

        assert!(source.contains("@dim = 1"));
        assert!(source.contains("@delims = [\",\"]"));
        assert!(source.contains("@cell_type = \"node\""));
        assert!(source.contains(
            "deferred.push(=> obj.set('cells', $a.ArrayText.parse(xml.text(), @delims, \"node\", object_with_id.node)))"
        ));
        assert!(source.contains("(@get('cells') || []).map((x) -> x.id)"));
    }

    #[test]
    fn test_reference_target_registers_by_id() {
        let package = compiled();
        let generator = ClassGenerator::new(&package);
        let source = generator
            .generate(package.get_class("Node").unwrap())
            .expect("Failed to generate");

        assert!(source.contains("if object_with_id.node"));
        assert!(source.contains("object_with_id.node[obj.id] = obj"));
    }

    #[test]
    fn test_subelement_and_parameters() {
        let package = compiled();
        let generator = ClassGenerator::new(&package);
        let source = generator
            .generate(package.get_class("Network").unwrap())
            .expect("Failed to generate");

        assert!(source.contains("node = xml.children('node')"));
        assert!(source.contains("$a.Node.from_xml2($(node_i), deferred, object_with_id)"));
        assert!(source.contains("pathlist = xml.children('pathList')[0]"));
        assert!(source.contains("parameters = xml.find('parameters')"));
        assert!(source.contains("parameter_xml.setAttribute('name', par_name)"));
    }

    #[test]
    fn test_cells_without_delims_is_an_error() {
        let mut class = ClassDef::new("broken");
        class
            .vars
            .push(VarDef::new("cells", VarKind::Cells, Storage::Text));
        let mut package = Package::new("test");
        package.classes.push(class);

        let generator = ClassGenerator::new(&package);
        let err = generator
            .generate(package.get_class("Broken").unwrap())
            .expect_err("expected an error");
        assert!(err.to_string().contains("needs delims and cellType"));
    }
}
