//! Intermediate model of the compilation unit.
//!
//! A [`Package`] holds the classes derived from one schema, each class
//! its fields and constants. The model is built once per class by the
//! inference engine and mutated afterwards only by the reference
//! resolver, which marks reference-target classes.

use crate::scalar::ScalarKind;

/// The full compilation unit derived from one schema.
#[derive(Debug, Clone)]
pub struct Package {
    /// Package name (from the schema file name).
    pub name: String,
    /// Schema version string, may be empty.
    pub schema_version: String,
    /// Classes in schema declaration order.
    pub classes: Vec<ClassDef>,
    /// Normalized names of classes marked as reference targets, in
    /// marking order. A class appears here at most once.
    pub referenced_classes: Vec<String>,
}

impl Package {
    /// Creates an empty package.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_version: String::new(),
            classes: Vec::new(),
            referenced_classes: Vec::new(),
        }
    }

    /// Looks up a class by normalized name.
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.iter().find(|class| class.name == name)
    }
}

/// Cell type of a class's array-structured text content.
#[derive(Debug, Clone, PartialEq)]
pub enum CellKind {
    /// Cells are scalar values.
    Scalar(ScalarKind),
    /// Cells are IDs referencing instances of the named class. The
    /// name is kept as written in the schema (un-normalized); it doubles
    /// as the reference key of the target class.
    Reference(String),
}

/// One generated class.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Class name, first character upper-cased.
    pub name: String,
    /// Element name as written in the schema, used for serialization tags.
    pub xml_name: String,
    /// Fields in declaration order.
    pub vars: Vec<VarDef>,
    /// Class-level constants.
    pub consts: Vec<ConstDef>,
    /// Cell type of the text content, if it is a delimited array.
    pub cell_kind: Option<CellKind>,
    /// Nesting depth of the array-structured text content.
    pub dim: Option<usize>,
    /// Per-level separator characters, outermost first. Set together
    /// with `dim`; the lengths agree.
    pub delims: Option<Vec<char>>,
    /// Whether the element accepts arbitrary attributes.
    pub any_attr: bool,
    /// Whether some other class references instances of this one by ID.
    /// Set only by the reference resolver.
    pub referenced: bool,
    /// Name other classes use when pointing at this class by ID.
    pub ref_name: Option<String>,
}

impl ClassDef {
    /// Creates a class for the given schema element name.
    #[must_use]
    pub fn new(xml_name: impl Into<String>) -> Self {
        let xml_name = xml_name.into();
        Self {
            name: fix_name(&xml_name),
            xml_name,
            vars: Vec::new(),
            consts: Vec::new(),
            cell_kind: None,
            dim: None,
            delims: None,
            any_attr: false,
            referenced: false,
            ref_name: None,
        }
    }

    /// Whether the cells of the text content are IDs referencing another
    /// class. Meaningful only when `cell_kind` is set.
    #[must_use]
    pub fn cells_are_references(&self) -> bool {
        matches!(self.cell_kind, Some(CellKind::Reference(_)))
    }

    /// Returns the text-body field, if the class has one.
    #[must_use]
    pub fn text_var(&self) -> Option<&VarDef> {
        self.vars.iter().find(|var| var.storage == Storage::Text)
    }
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum VarKind {
    /// A scalar value.
    Scalar(ScalarKind),
    /// An instance of another generated class, by normalized name.
    Object(String),
    /// A free-form key/value map read from a parameters block.
    Parameters,
    /// The nested-array value of an array-structured text body.
    Cells,
}

/// Where a field's value lives in the XML representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// An attribute on the element.
    Attribute,
    /// A child element.
    SubElement,
    /// The element's text content. At most one field per class.
    Text,
    /// A `<parameters>` block of key/value entries.
    Parameters,
}

/// One declared field of a class.
#[derive(Debug, Clone)]
pub struct VarDef {
    /// Field name as referenced in generated code.
    pub name: String,
    /// Attribute or element name the value is stored under; `None` for
    /// text storage.
    pub xml_name: Option<String>,
    /// What the field holds.
    pub kind: VarKind,
    /// Where the value lives in the XML representation.
    pub storage: Storage,
    /// Whether the field holds a collection of values.
    pub collection: bool,
    /// Default value literal, already in target syntax.
    pub default: Option<String>,
    /// When the field name matches `<base>_id`, the base name: this
    /// scalar actually holds a foreign-key-style ID into `<base>`.
    pub reference: Option<String>,
}

impl VarDef {
    /// Creates a field, deriving the implicit reference name from the
    /// field name.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: VarKind, storage: Storage) -> Self {
        let name = name.into();
        let reference = detect_implicit_reference(&name);
        Self {
            name,
            xml_name: None,
            kind,
            storage,
            collection: false,
            default: None,
            reference,
        }
    }
}

/// A named class-level literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDef {
    /// Constant name.
    pub name: String,
    /// Literal value.
    pub value: String,
}

/// Normalizes a class name: first character upper-cased, rest unchanged.
#[must_use]
pub fn fix_name(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Maps an attribute name to a field name. "class" is reserved in the
/// target language and becomes "class_name".
#[must_use]
pub fn attr_field_name(xml_name: &str) -> String {
    match xml_name {
        "class" => "class_name".to_string(),
        other => other.to_string(),
    }
}

/// Detects the `<base>_id` foreign-key naming convention.
#[must_use]
pub fn detect_implicit_reference(field_name: &str) -> Option<String> {
    field_name
        .strip_suffix("_id")
        .filter(|base| !base.is_empty())
        .map(str::to_string)
}
