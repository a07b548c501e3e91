use std::cell::RefCell;
use std::rc::Rc;

use crate::Position;

use super::ast::VarScope;

/// A scalar variable reference.
///
/// `scope` and `index` are unset until the resolver back-patches them.
#[derive(Debug, Clone)]
pub struct VarExpr {
    pub name: String,
    pub scope: Option<VarScope>,
    pub index: Option<usize>,
    pub pos: Position,
}

impl VarExpr {
    pub fn new(name: &str, pos: Position) -> Self {
        VarExpr {
            name: String::from(name),
            scope: None,
            index: None,
            pos,
        }
    }

    /// Shared handle form, as stored in the tree.
    pub fn shared(name: &str, pos: Position) -> Rc<RefCell<VarExpr>> {
        Rc::new(RefCell::new(VarExpr::new(name, pos)))
    }
}

/// An array variable used in array context (subscript, `in`, `delete`,
/// `for-in`). Same annotation lifecycle as [`VarExpr`].
#[derive(Debug, Clone)]
pub struct ArrayExpr {
    pub name: String,
    pub scope: Option<VarScope>,
    pub index: Option<usize>,
    pub pos: Position,
}

impl ArrayExpr {
    pub fn new(name: &str, pos: Position) -> Self {
        ArrayExpr {
            name: String::from(name),
            scope: None,
            index: None,
            pos,
        }
    }

    pub fn shared(name: &str, pos: Position) -> Rc<RefCell<ArrayExpr>> {
        Rc::new(RefCell::new(ArrayExpr::new(name, pos)))
    }
}

/// A call to a user-defined or native function.
///
/// After resolution, `index` is the callee's declaration index (user
/// functions) or its slot in the alphabetically ordered native table, and
/// `native` distinguishes the two.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub name: String,
    pub args: Vec<Expr>,
    pub native: bool,
    pub index: Option<usize>,
    pub pos: Position,
}

impl CallExpr {
    pub fn new(name: &str, args: Vec<Expr>, pos: Position) -> Self {
        CallExpr {
            name: String::from(name),
            args,
            native: false,
            index: None,
            pos,
        }
    }

    pub fn shared(name: &str, args: Vec<Expr>, pos: Position) -> Rc<RefCell<CallExpr>> {
        Rc::new(RefCell::new(CallExpr::new(name, args, pos)))
    }
}

/// Binary operators. The resolver never inspects the operator, only the
/// operands, but the interpreter needs the distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    Equals,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    NotEquals,
    Match,
    NotMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    Plus,
    Not,
}

/// Expression node.
#[derive(Debug, Clone)]
pub enum Expr {
    Num(f64),
    Str(String),
    Regex(String),
    /// Field access: `$0`, `$1`, `$(i+1)`.
    Field(Box<Expr>),
    Var(Rc<RefCell<VarExpr>>),
    /// Array subscript: `a[i]` or `a[i, j]` (multi-index joins on SUBSEP).
    Index(Rc<RefCell<ArrayExpr>>, Vec<Expr>),
    Assign(Box<Expr>, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
    /// Membership test: `(i) in a`.
    InArray(Vec<Expr>, Rc<RefCell<ArrayExpr>>),
    Call(Rc<RefCell<CallExpr>>),
    Grouping(Box<Expr>),
}

impl Expr {
    pub fn var(name: &str, pos: Position) -> Self {
        Expr::Var(VarExpr::shared(name, pos))
    }

    pub fn index(name: &str, index: Vec<Expr>, pos: Position) -> Self {
        Expr::Index(ArrayExpr::shared(name, pos), index)
    }

    pub fn call(name: &str, args: Vec<Expr>, pos: Position) -> Self {
        Expr::Call(CallExpr::shared(name, args, pos))
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Expr::Assign(Box::new(target), Box::new(value))
    }

    /// Short human-readable form, used in argument-mismatch messages.
    pub fn short_desc(&self) -> String {
        match self {
            Expr::Num(n) => format!("{}", n),
            Expr::Str(s) => format!("{:?}", s),
            Expr::Regex(re) => format!("/{}/", re),
            Expr::Var(var) => var.borrow().name.clone(),
            Expr::Index(array, _) => format!("{}[...]", array.borrow().name),
            Expr::Call(call) => format!("{}(...)", call.borrow().name),
            _ => String::from("expression"),
        }
    }
}
