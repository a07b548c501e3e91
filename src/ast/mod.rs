//! Abstract Syntax Tree definitions for the hawk language.
//!
//! This module defines the tree the parser hands to the resolver and the
//! resolver hands to the interpreter. It includes:
//!
//! - Program structure (BEGIN/END blocks, pattern-action rules, functions)
//! - Statement and expression node types
//! - Variable, array, and call nodes carrying scope and index annotations
//! - The special (built-in) variable table
//!
//! Variable, array, and call nodes are shared (`Rc<RefCell<_>>`) because the
//! resolver records handles to them during its walk and back-patches their
//! index fields after whole-program analysis. Index fields are `None` until
//! resolution completes.

pub mod ast;
pub mod expressions;
pub mod special;
pub mod statements;
