use std::cell::RefCell;
use std::rc::Rc;

use super::expressions::{ArrayExpr, Expr, VarExpr};

/// Statement node.
#[derive(Debug, Clone)]
pub enum Stmt {
    Expr(Expr),
    Print(Vec<Expr>),
    If {
        cond: Expr,
        then_stmts: Vec<Stmt>,
        else_stmts: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    For {
        pre: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Vec<Stmt>,
    },
    /// `for (k in a) body`: `k` is a scalar reference, `a` an array
    /// reference.
    ForIn {
        var: Rc<RefCell<VarExpr>>,
        array: Rc<RefCell<ArrayExpr>>,
        body: Vec<Stmt>,
    },
    Return(Option<Expr>),
    /// `delete a[i]` (or `delete a` when `index` is empty).
    Delete {
        array: Rc<RefCell<ArrayExpr>>,
        index: Vec<Expr>,
    },
    Block(Vec<Stmt>),
    Break,
    Continue,
    Next,
}
