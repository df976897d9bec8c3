//! # xsdbind
//!
//! Schema-driven XML data-binding compiler.
//!
//! xsdbind reads an XML Schema describing a record-like document
//! format and generates one Backbone model class per declared element,
//! complete with two-phase deserialization, cross-class ID reference
//! resolution, and a delimiter-based codec for array-structured text
//! content.
//!
//! ## Quick Start
//!
//! ```ignore
//! use xsdbind::prelude::*;
//!
//! let package = compile(&schema_xml, "aurora")?;
//! for (file_name, source) in render_package(&package)? {
//!     std::fs::write(out_dir.join(file_name), source)?;
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - The delimiter-based array-text codec
//! - [`schema`] - Schema parsing, inference and reference resolution
//! - [`codegen`] - Class source generation

pub mod prelude;

/// Array-text codec.
pub mod core {
    pub use xsdbind_core::*;
}

/// Schema compiler front end.
pub mod schema {
    pub use xsdbind_schema::*;
}

/// Class source generation.
pub mod codegen {
    pub use xsdbind_codegen::*;
}

// Re-export commonly used items at the crate root
pub use xsdbind_core::{Cells, DataError, Scalar};
pub use xsdbind_schema::{
    CellKind, ClassDef, CompileError, Package, Storage, VarDef, VarKind, compile,
};
pub use xsdbind_codegen::{ClassGenerator, CodegenError, render_package};
