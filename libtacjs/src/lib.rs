// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The tacjs library.
//!
//! tacjs is the middle and back end of a compiler for a small imperative language. It type checks a syntax tree
//! produced by an external parser, lowers it to a three-address intermediate representation, and generates
//! JavaScript that reconstructs the program's structured control flow with a program-counter dispatch loop.
//!
//! The stages can be used individually ([sema::check], [ir::build_program], [codegen::generate]) or orchestrated
//! by the [compiler_driver::Driver].

#![doc(html_no_source)]

pub mod ast;
pub mod codegen;
pub mod compiler_driver;
pub mod core;
pub mod ir;
pub mod sema;

pub use core::{ICE, TypeTag};
