use std::collections::HashMap;

use crate::Position;

use super::expressions::Expr;
use super::statements::Stmt;

/// Scope of a variable reference, filled in by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarScope {
    Global,
    Local,
    Special,
}

/// A complete parsed program, unresolved.
///
/// Variable and call nodes inside the tree carry `None` indexes and unset
/// scopes until the resolver has run.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub begin: Vec<Vec<Stmt>>,
    pub actions: Vec<Action>,
    pub end: Vec<Vec<Stmt>>,
    pub functions: Vec<Function>,
    /// Position just past the last token, used for whole-program errors.
    pub end_pos: Position,
}

/// A pattern-action rule. An empty pattern matches every record.
#[derive(Debug, Clone)]
pub struct Action {
    pub pattern: Vec<Expr>,
    pub stmts: Vec<Stmt>,
}

/// A user-defined function declaration.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    /// Parallel to `params`: true for parameters resolved as arrays.
    /// Filled in by the resolver; the interpreter relies on it when
    /// setting up a call frame.
    pub arrays: Vec<bool>,
    pub body: Vec<Stmt>,
    pub pos: Position,
}

impl Function {
    pub fn new(name: &str, params: &[&str], body: Vec<Stmt>, pos: Position) -> Self {
        Function {
            name: String::from(name),
            params: params.iter().map(|p| String::from(*p)).collect(),
            arrays: vec![false; params.len()],
            body,
            pos,
        }
    }
}

/// A program that has been through the resolver: every reference carries a
/// scope and a dense index, and the global name-to-index maps are filled in.
#[derive(Debug)]
pub struct ResolvedProgram {
    pub program: Program,
    /// Global scalar name to index. Dense, 0-based.
    pub scalars: HashMap<String, usize>,
    /// Global array name to index. A separate dense, 0-based namespace.
    pub arrays: HashMap<String, usize>,
}
