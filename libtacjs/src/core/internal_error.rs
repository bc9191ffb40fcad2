// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `internal_error` module reports Internal Compiler Errors (ICE).
//!
//! An ICE is a defect in tacjs itself, such as the IR builder being asked for the value of a void call. Problems in
//! the program being compiled are reported as [SemanticError](crate::sema::SemanticError)s instead.

/// Aborts compilation with an internal compiler error.
#[allow(non_snake_case)]
pub fn ICE<S: AsRef<str>>(error_message: S) -> ! {
    panic!("tacjs internal compiler error: {}", error_message.as_ref());
}

/// Aborts compilation with a formatted internal compiler error.
#[macro_export]
macro_rules! ICE {
    ($($arg:tt)*) => {
        ::std::panic!("tacjs internal compiler error: {}", ::std::format_args!($($arg)*))
    };
}
