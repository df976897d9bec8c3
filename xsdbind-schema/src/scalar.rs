//! Scalar type table.
//!
//! Fixed mapping from the supported schema primitive vocabulary to the
//! scalar kinds of the generated object model. This is also what tells
//! scalar-typed declarations apart from references to generated classes:
//! a name that does not map here is taken to be a class name.

/// Scalar kind of a field in the generated object model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Free-form text (`xs:string`).
    Text,
    /// Integer (`xs:integer`).
    Int,
    /// Boolean (`xs:boolean`).
    Bool,
    /// Floating-point number (`xs:decimal`).
    Number,
}

impl ScalarKind {
    /// Maps a schema primitive type name to a scalar kind.
    #[must_use]
    pub fn from_xs_name(name: &str) -> Option<Self> {
        match name {
            "xs:string" => Some(Self::Text),
            "xs:integer" => Some(Self::Int),
            "xs:boolean" => Some(Self::Bool),
            "xs:decimal" => Some(Self::Number),
            _ => None,
        }
    }

    /// Returns the schema primitive type name.
    #[must_use]
    pub const fn xs_name(&self) -> &'static str {
        match self {
            Self::Text => "xs:string",
            Self::Int => "xs:integer",
            Self::Bool => "xs:boolean",
            Self::Number => "xs:decimal",
        }
    }

    /// Returns the type name used in generated code.
    #[must_use]
    pub const fn target_type(&self) -> &'static str {
        match self {
            Self::Text => "String",
            Self::Int => "int",
            Self::Bool => "Boolean",
            Self::Number => "Number",
        }
    }
}
