//! Error types for schema compilation.

use thiserror::Error;
use xsdbind_core::DataError;

/// A declaration that cannot be read at all: a missing name or type, or
/// a trait attribute without the default value that carries its payload.
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// Missing required attribute on a schema element.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// An attribute declaration with neither a type reference nor an
    /// inline restriction base.
    #[error("attribute '{attribute}' has no type declaration")]
    NoType {
        /// Attribute name.
        attribute: String,
    },

    /// A scalar type name outside the supported primitive vocabulary.
    #[error("no scalar type for {type_name:?}")]
    UnknownScalarType {
        /// The unmapped type name.
        type_name: String,
    },

    /// The default value is the only place the cell type is carried.
    #[error("use of 'cellType' requires that a default type be given")]
    CellTypeNeedsDefault,

    /// The default value is the only place the delimiter list is carried.
    #[error("use of 'delims' requires that default delimiters be given")]
    DelimsNeedDefault,
}

/// A schema construct the compiler does not understand, or one that
/// contradicts an earlier declaration in the same class.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Unsupported schema construct inside a complex type.
    #[error("unhandled element '{element}' in complex type")]
    UnsupportedConstruct {
        /// Name of the offending element.
        element: String,
    },

    /// A child element that is not a reference to a named element.
    #[error("unhandled inline child element '{element}', expected a ref")]
    InlineChild {
        /// Name of the offending element, if it has one.
        element: String,
    },

    /// A class-level trait declared twice with conflicting values.
    #[error("conflicting '{trait_name}' declarations on one class")]
    ConflictingTrait {
        /// Which trait conflicted ("cellType" or "delims").
        trait_name: String,
    },

    /// A class declaring a 0-dimensional array without a cell type.
    #[error("class declares 'delims' but no 'cellType'")]
    MissingCellType,

    /// A simple-type element whose primitive type is not supported.
    #[error("no scalar type for {type_name:?} on simple-type element")]
    UnknownTextType {
        /// The unmapped type name.
        type_name: String,
    },
}

/// A referenced class name that does not exist among the compiled
/// classes.
#[derive(Debug, Error)]
#[error("cannot resolve reference to class {target:?} from class '{class}'")]
pub struct ResolutionError {
    /// The unresolved target name, as written in the schema.
    pub target: String,
    /// The class that referenced it.
    pub class: String,
}

/// Error type for the whole compilation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Document structure error (no schema root, stray close tag).
    #[error("invalid schema document: {message}")]
    InvalidDocument {
        /// Error message.
        message: String,
    },

    /// A declaration that could not be read.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// An unsupported or inconsistent construct.
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// Delimiter traits rejected by the array-text codec.
    #[error("invalid delimiters: {0}")]
    Data(#[from] DataError),

    /// A reference to a class that does not exist.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// An error annotated with the schema element it originated in.
    #[error("in element '{element}': {source}")]
    InElement {
        /// Name of the originating schema element.
        element: String,
        /// The underlying error.
        #[source]
        source: Box<CompileError>,
    },
}

impl CompileError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::Syntax(SyntaxError::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        })
    }

    /// Creates an invalid document error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Annotates this error with the schema element it surfaced from.
    #[must_use]
    pub fn in_element(self, element: impl Into<String>) -> Self {
        Self::InElement {
            element: element.into(),
            source: Box::new(self),
        }
    }
}
