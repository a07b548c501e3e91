//! The single depth-first walk that feeds the resolver: every scalar
//! reference, array reference, and call site in the program is recorded
//! exactly once, in source order (BEGIN blocks, pattern-action rules, END
//! blocks, then function bodies in declaration order).

use crate::ast::ast::Program;
use crate::ast::expressions::Expr;
use crate::ast::statements::Stmt;
use crate::errors::errors::Error;

use super::resolver::Resolver;

pub fn walk_program(r: &mut Resolver, prog: &Program) -> Result<(), Error> {
    for block in &prog.begin {
        walk_stmts(r, block)?;
    }
    for action in &prog.actions {
        for expr in &action.pattern {
            walk_expr(r, expr)?;
        }
        walk_stmts(r, &action.stmts)?;
    }
    for block in &prog.end {
        walk_stmts(r, block)?;
    }
    for function in &prog.functions {
        r.start_function(&function.name, &function.params);
        walk_stmts(r, &function.body)?;
        r.stop_function();
    }
    Ok(())
}

fn walk_stmts(r: &mut Resolver, stmts: &[Stmt]) -> Result<(), Error> {
    for stmt in stmts {
        walk_stmt(r, stmt)?;
    }
    Ok(())
}

fn walk_stmt(r: &mut Resolver, stmt: &Stmt) -> Result<(), Error> {
    match stmt {
        Stmt::Expr(expr) => walk_expr(r, expr),
        Stmt::Print(args) => {
            for arg in args {
                walk_expr(r, arg)?;
            }
            Ok(())
        }
        Stmt::If {
            cond,
            then_stmts,
            else_stmts,
        } => {
            walk_expr(r, cond)?;
            walk_stmts(r, then_stmts)?;
            walk_stmts(r, else_stmts)
        }
        Stmt::While { cond, body } => {
            walk_expr(r, cond)?;
            walk_stmts(r, body)
        }
        Stmt::For {
            pre,
            cond,
            post,
            body,
        } => {
            if let Some(pre) = pre {
                walk_stmt(r, pre)?;
            }
            if let Some(cond) = cond {
                walk_expr(r, cond)?;
            }
            if let Some(post) = post {
                walk_stmt(r, post)?;
            }
            walk_stmts(r, body)
        }
        Stmt::ForIn { var, array, body } => {
            r.record_var_ref(var);
            r.record_array_ref(array)?;
            walk_stmts(r, body)
        }
        Stmt::Return(expr) => {
            if let Some(expr) = expr {
                walk_expr(r, expr)?;
            }
            Ok(())
        }
        Stmt::Delete { array, index } => {
            r.record_array_ref(array)?;
            for expr in index {
                walk_expr(r, expr)?;
            }
            Ok(())
        }
        Stmt::Block(stmts) => walk_stmts(r, stmts),
        Stmt::Break | Stmt::Continue | Stmt::Next => Ok(()),
    }
}

fn walk_expr(r: &mut Resolver, expr: &Expr) -> Result<(), Error> {
    match expr {
        Expr::Num(_) | Expr::Str(_) | Expr::Regex(_) => Ok(()),
        Expr::Field(expr) => walk_expr(r, expr),
        Expr::Var(var) => {
            r.record_var_ref(var);
            Ok(())
        }
        Expr::Index(array, index) => {
            r.record_array_ref(array)?;
            for expr in index {
                walk_expr(r, expr)?;
            }
            Ok(())
        }
        Expr::Assign(target, value) => {
            walk_expr(r, target)?;
            walk_expr(r, value)
        }
        Expr::Binary(_, left, right) => {
            walk_expr(r, left)?;
            walk_expr(r, right)
        }
        Expr::Unary(_, expr) | Expr::Grouping(expr) => walk_expr(r, expr),
        Expr::InArray(index, array) => {
            for expr in index {
                walk_expr(r, expr)?;
            }
            r.record_array_ref(array)
        }
        Expr::Call(call) => {
            r.record_user_call(call);
            let call = call.borrow();
            for (i, arg) in call.args.iter().enumerate() {
                walk_expr(r, arg)?;
                // A bare variable argument may take its type from the
                // callee's parameter later.
                if let Expr::Var(var) = arg {
                    r.record_call_arg(&call.name, var, i);
                }
            }
            Ok(())
        }
    }
}
