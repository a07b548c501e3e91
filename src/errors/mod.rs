//! Error types for the resolver.
//!
//! All resolver failures are fatal and synchronous. Each error carries:
//!
//! - A specific variant describing what went wrong
//! - The source position of the offending reference or call
//! - A coarse kind (undefined function / arity / type mismatch) that the
//!   CLI uses for its exit diagnostics
//! - A suggestion message where one is helpful
//!
//! Errors are returned through the normal call chain; the resolver never
//! recovers from one internally.

pub mod errors;

#[cfg(test)]
mod tests;
