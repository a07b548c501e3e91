//! Semantic resolution for the hawk language.
//!
//! This module turns the parser's untyped AST into a resolved program. It:
//!
//! - Classifies every variable as global, local (function parameter), or
//!   special (built-in)
//! - Infers whether each variable is a scalar or an associative array,
//!   propagating types across the call graph in topological order
//! - Assigns dense 0-based indexes so the interpreter can use slot lookup
//!   instead of name lookup
//! - Resolves call sites to user or native function indexes and validates
//!   arity and scalar/array argument compatibility
//!
//! Resolution runs as a single depth-first walk (reference recording and
//! call-graph construction) followed by a batch phase (call resolution,
//! type propagation, index assignment, validation, back-patching). The
//! first error aborts the whole pass.

pub mod resolve;
pub mod resolver;
pub mod topo_sort;
pub mod walk;

#[cfg(test)]
mod tests;
