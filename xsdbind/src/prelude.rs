//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use xsdbind::prelude::*;
//! ```

// Codec types
pub use xsdbind_core::{Cells, DataError, Scalar, emit, parse, validate_delims};

// Schema compiler types
pub use xsdbind_schema::{
    CellKind, ClassDef, CompileError, ConstDef, Element, InferenceError, Package,
    ResolutionError, ScalarKind, Storage, SyntaxError, VarDef, VarKind, compile,
    compile_schema,
};

// Codegen types
pub use xsdbind_codegen::{ClassGenerator, CodegenError, render_package};
