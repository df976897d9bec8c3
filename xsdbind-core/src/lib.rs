//! # xsdbind Core
//!
//! Runtime support shared by the compiler and the generated classes.
//!
//! This crate provides:
//! - The array-text codec for delimiter-separated N-dimensional arrays
//!   embedded in XML text content
//! - The scalar value types those arrays are built from

pub mod arraytext;
pub mod error;

pub use arraytext::{Cells, Scalar, emit, parse, validate_delims};
pub use error::DataError;
