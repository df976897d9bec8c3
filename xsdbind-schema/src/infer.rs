//! Inference engine: derives one class from one top-level schema element.
//!
//! Walks an `xs:element` declaration and decides, per child construct,
//! whether it becomes an attribute field, a sub-element field, the
//! special parameters field, or a class-level array trait. Attribute
//! inference returns a tagged outcome rather than a field so that the
//! `cellType` and `delims` declarations can be merged into the class
//! instead of producing fields.

use crate::error::{CompileError, InferenceError, SyntaxError};
use crate::ir::{
    CellKind, ClassDef, ConstDef, Storage, VarDef, VarKind, attr_field_name, fix_name,
};
use crate::scalar::ScalarKind;
use crate::xml::Element;
use xsdbind_core::validate_delims;

/// Outcome of inferring one attribute declaration: either an ordinary
/// field, or a class-level trait signal.
#[derive(Debug)]
pub enum AttrOutcome {
    /// An ordinary field with attribute storage.
    Field(VarDef),
    /// The class's text content is an array of cells of this kind.
    CellKind(CellKind),
    /// The class's text content is nested with these delimiters,
    /// outermost first.
    Delims(Vec<char>),
}

/// Builds one class from a top-level schema element.
///
/// `schema_version` is the schema's version string, materialized as a
/// `SchemaVersion` constant when the class declares a field named
/// "schemaVersion".
///
/// # Errors
/// Returns `CompileError` when the element uses a construct outside the
/// supported subset; the error is annotated with the element name.
pub fn build_class(e: &Element, schema_version: &str) -> Result<ClassDef, CompileError> {
    let xml_name = e
        .attr("name")
        .ok_or_else(|| CompileError::missing_attr("element", "name"))?;
    let mut class = ClassDef::new(xml_name);

    build_vars(&mut class, e).map_err(|err| err.in_element(xml_name))?;

    if class.vars.iter().any(|var| var.name == "schemaVersion") {
        class.consts.push(ConstDef {
            name: "SchemaVersion".to_string(),
            value: schema_version.to_string(),
        });
    }

    tracing::debug!(class = %class.name, vars = class.vars.len(), "built class");
    Ok(class)
}

fn build_vars(class: &mut ClassDef, e: &Element) -> Result<(), CompileError> {
    match e.find_child("complexType") {
        Some(complex) => {
            let mixed = complex.attr("mixed") == Some("true");
            build_from_children(class, complex)?;
            if mixed {
                push_text_var(class)?;
            }
            Ok(())
        }
        None => build_from_simple_type(class, e),
    }
}

fn build_from_children(class: &mut ClassDef, complex: &Element) -> Result<(), CompileError> {
    for child in &complex.children {
        match child.name.as_str() {
            "attribute" => match build_attribute(child)? {
                AttrOutcome::Field(var) => class.vars.push(var),
                AttrOutcome::CellKind(kind) => merge_cell_kind(class, kind)?,
                AttrOutcome::Delims(delims) => merge_delims(class, delims)?,
            },

            "anyAttribute" => class.any_attr = true,

            "all" | "choice" | "sequence" => {
                for sub in child.descendants_named("element") {
                    let Some(ref_name) = sub.attr("ref") else {
                        return Err(InferenceError::InlineChild {
                            element: sub.attr("name").unwrap_or(&sub.name).to_string(),
                        }
                        .into());
                    };
                    if ref_name == "parameters" {
                        push_parameters_var(class);
                    } else {
                        push_subelement_var(class, ref_name, sub);
                    }
                }
            }

            other => {
                return Err(InferenceError::UnsupportedConstruct {
                    element: other.to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Infers one attribute declaration.
///
/// # Errors
/// Returns `CompileError` when no type can be determined, or when a
/// `cellType`/`delims` trait attribute lacks the default value that
/// carries its payload.
pub fn build_attribute(attr: &Element) -> Result<AttrOutcome, CompileError> {
    let xml_name = attr
        .attr("name")
        .ok_or_else(|| CompileError::missing_attr("attribute", "name"))?;
    let field_name = attr_field_name(xml_name);

    let xs_type = resolve_type_name(attr).ok_or_else(|| SyntaxError::NoType {
        attribute: xml_name.to_string(),
    })?;

    // A default is only honored on optional attributes.
    let default = match attr.attr("use") {
        Some("optional") => attr.attr("default"),
        _ => None,
    };

    match field_name.as_str() {
        // The default value is the only place the cell type is carried:
        // there is no way in the schema language to say that this
        // attribute's own values should be converted to the indicated
        // type.
        "cellType" => {
            let literal = default.ok_or(SyntaxError::CellTypeNeedsDefault)?;
            let kind = match ScalarKind::from_xs_name(literal) {
                Some(scalar) => CellKind::Scalar(scalar),
                // Not a primitive: the literal names another class.
                None => CellKind::Reference(literal.to_string()),
            };
            Ok(AttrOutcome::CellKind(kind))
        }

        "delims" => {
            let literal = default.ok_or(SyntaxError::DelimsNeedDefault)?;
            Ok(AttrOutcome::Delims(literal.chars().collect()))
        }

        _ => {
            let kind = ScalarKind::from_xs_name(&xs_type).ok_or(SyntaxError::UnknownScalarType {
                type_name: xs_type,
            })?;
            let mut var = VarDef::new(field_name, VarKind::Scalar(kind), Storage::Attribute);
            var.xml_name = Some(xml_name.to_string());
            var.default = default.map(|literal| match kind {
                // Quoted, so the literal survives code generation.
                ScalarKind::Text => quote(literal),
                _ => literal.to_string(),
            });
            Ok(AttrOutcome::Field(var))
        }
    }
}

/// Resolves an attribute's type name from an explicit reference or an
/// inline restriction base.
fn resolve_type_name(attr: &Element) -> Option<String> {
    attr.attr("type")
        .or_else(|| {
            attr.find_child("simpleType")
                .and_then(|simple| simple.find_child("restriction"))
                .and_then(|restriction| restriction.attr("base"))
        })
        .map(str::to_string)
}

fn merge_cell_kind(class: &mut ClassDef, kind: CellKind) -> Result<(), CompileError> {
    match &class.cell_kind {
        Some(existing) if *existing != kind => Err(InferenceError::ConflictingTrait {
            trait_name: "cellType".to_string(),
        }
        .into()),
        _ => {
            class.cell_kind = Some(kind);
            Ok(())
        }
    }
}

fn merge_delims(class: &mut ClassDef, delims: Vec<char>) -> Result<(), CompileError> {
    validate_delims(&delims)?;
    match &class.delims {
        Some(existing) if *existing != delims => Err(InferenceError::ConflictingTrait {
            trait_name: "delims".to_string(),
        }
        .into()),
        _ => {
            class.dim = Some(delims.len());
            class.delims = Some(delims);
            Ok(())
        }
    }
}

fn push_parameters_var(class: &mut ClassDef) {
    let mut var = VarDef::new("parameters", VarKind::Parameters, Storage::Parameters);
    var.xml_name = Some("parameters".to_string());
    var.default = Some("{}".to_string());
    class.vars.push(var);
}

fn push_subelement_var(class: &mut ClassDef, ref_name: &str, sub: &Element) {
    let collection = sub.attr("maxOccurs").is_some_and(|max| {
        max == "unbounded" || max.parse::<u64>().is_ok_and(|n| n > 1)
    });

    let mut var = VarDef::new(
        ref_name.to_lowercase(),
        VarKind::Object(fix_name(ref_name)),
        Storage::SubElement,
    );
    var.xml_name = Some(ref_name.to_string());
    var.collection = collection;
    class.vars.push(var);
}

/// Synthesizes the implicit text-body field of a mixed complex type.
/// Its name and kind follow the class's accumulated array traits.
fn push_text_var(class: &mut ClassDef) -> Result<(), CompileError> {
    let (name, kind) = match class.dim {
        None => ("text", VarKind::Scalar(ScalarKind::Text)),
        // A 0-dimensional array is just a single value of the cell kind.
        Some(0) => match &class.cell_kind {
            Some(CellKind::Scalar(scalar)) => ("value", VarKind::Scalar(*scalar)),
            Some(CellKind::Reference(target)) => ("value", VarKind::Object(fix_name(target))),
            None => return Err(InferenceError::MissingCellType.into()),
        },
        Some(_) => ("cells", VarKind::Cells),
    };

    class
        .vars
        .push(VarDef::new(name, kind, Storage::Text));
    Ok(())
}

fn build_from_simple_type(class: &mut ClassDef, e: &Element) -> Result<(), CompileError> {
    let xs_type = resolve_type_name(e).ok_or_else(|| SyntaxError::NoType {
        attribute: e.attr("name").unwrap_or(&e.name).to_string(),
    })?;
    let kind = ScalarKind::from_xs_name(&xs_type)
        .ok_or(InferenceError::UnknownTextType { type_name: xs_type })?;

    class
        .vars
        .push(VarDef::new("text", VarKind::Scalar(kind), Storage::Text));
    Ok(())
}

/// Quotes a string default so it round-trips through generated code.
fn quote(literal: &str) -> String {
    format!("{literal:?}")
}
