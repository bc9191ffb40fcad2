// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `core` module provides foundational types and functions used by the various compiler stages.

mod internal_error;
mod type_tag;

pub use internal_error::ICE;
pub use type_tag::TypeTag;

/// The name of the function synthesized from a program's top-level statements.
pub const ENTRY_FUNCTION_NAME: &str = "_entry";
