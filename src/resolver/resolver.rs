use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::io::Write;
use std::rc::Rc;

use crate::ast::ast::{Program, VarScope};
use crate::ast::expressions::{ArrayExpr, CallExpr, VarExpr};
use crate::ast::special::special_var_index;
use crate::errors::errors::{Error, ErrorImpl};
use crate::Position;

/// Arity signature of a natively provided function.
#[derive(Debug, Clone, Copy)]
pub struct NativeFunc {
    pub arity: usize,
    pub variadic: bool,
}

/// Resolver configuration supplied by the embedding application.
pub struct Config {
    /// Native callables exposed to hawk programs, by name.
    pub funcs: HashMap<String, NativeFunc>,
    /// Dump variable-type tables and propagation steps to `debug_writer`.
    pub debug_types: bool,
    pub debug_writer: Box<dyn Write>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            funcs: HashMap::new(),
            debug_types: false,
            debug_writer: Box::new(std::io::stderr()),
        }
    }
}

/// Inferred kind of a variable. `Unknown` is provisional only: after
/// resolution every variable is `Scalar` or `Array`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Unknown,
    Scalar,
    Array,
}

impl Display for VarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VarType::Scalar => write!(f, "Scalar"),
            VarType::Array => write!(f, "Array"),
            VarType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Type information for a single (function context, variable name) pair.
///
/// `first_ref` is the node of the variable's first scalar reference; it lets
/// a later call-argument record detect that the call was the variable's very
/// first use. `call_name`/`arg_index` hold the pending call that may pin
/// this variable's type during propagation.
#[derive(Debug, Clone)]
pub(crate) struct TypeInfo {
    pub typ: VarType,
    pub first_ref: Option<Rc<RefCell<VarExpr>>>,
    pub scope: VarScope,
    pub index: usize,
    pub call_name: String,
    pub arg_index: usize,
}

impl Default for TypeInfo {
    fn default() -> Self {
        TypeInfo {
            typ: VarType::Unknown,
            first_ref: None,
            scope: VarScope::Global,
            index: 0,
            call_name: String::new(),
            arg_index: 0,
        }
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scope = match self.scope {
            VarScope::Global => "Global",
            VarScope::Local => "Local",
            VarScope::Special => "Special",
        };
        write!(
            f,
            "typ={} scope={} index={} callName={:?} argIndex={}",
            self.typ, scope, self.index, self.call_name, self.arg_index
        )
    }
}

/// A single scalar-context variable reference.
pub(crate) struct VarRef {
    pub func_name: String,
    pub var: Rc<RefCell<VarExpr>>,
    pub is_arg: bool,
}

/// A single array-context variable reference.
pub(crate) struct ArrayRef {
    pub func_name: String,
    pub array: Rc<RefCell<ArrayExpr>>,
}

/// A call to a user (or native) function, kept for index resolution.
pub(crate) struct UserCall {
    pub call: Rc<RefCell<CallExpr>>,
    pub pos: Position,
    pub in_func: String,
}

/// Whole-program resolver state. One instance per resolution run; never
/// shared between threads or reused after a failure.
pub struct Resolver {
    /// Current function context during the walk ("" = top level).
    pub(crate) func_name: String,
    /// Parameter names of the function currently being walked.
    pub(crate) locals: HashSet<String>,
    /// Function context ("" = globals) -> variable name -> type info.
    pub(crate) var_types: HashMap<String, HashMap<String, TypeInfo>>,
    pub(crate) var_refs: Vec<VarRef>,
    pub(crate) array_refs: Vec<ArrayRef>,
    /// Function name -> declaration index.
    pub(crate) functions: HashMap<String, usize>,
    pub(crate) user_calls: Vec<UserCall>,
    pub(crate) native_funcs: HashMap<String, NativeFunc>,
    pub(crate) debug_types: bool,
    pub(crate) debug_writer: Box<dyn Write>,
}

impl Resolver {
    pub(crate) fn new(config: Config) -> Result<Self, Error> {
        let mut r = Resolver {
            func_name: String::new(),
            locals: HashSet::new(),
            var_types: HashMap::new(),
            var_refs: Vec::new(),
            array_refs: Vec::new(),
            functions: HashMap::new(),
            user_calls: Vec::new(),
            native_funcs: config.funcs,
            debug_types: config.debug_types,
            debug_writer: config.debug_writer,
        };
        r.var_types.insert(String::new(), HashMap::new()); // globals
        // The interpreter relies on the built-in arrays existing whether or
        // not the program mentions them.
        r.record_array_ref(&ArrayExpr::shared("ARGV", Position::start()))?;
        r.record_array_ref(&ArrayExpr::shared("ENVIRON", Position::start()))?;
        r.record_array_ref(&ArrayExpr::shared("FIELDS", Position::start()))?;
        Ok(r)
    }

    /// Register every declared function name before the walk so forward
    /// references resolve.
    pub(crate) fn add_functions(&mut self, prog: &Program) {
        for (index, function) in prog.functions.iter().enumerate() {
            self.functions.insert(function.name.clone(), index);
        }
    }

    pub(crate) fn start_function(&mut self, name: &str, params: &[String]) {
        self.func_name = String::from(name);
        self.locals = params.iter().cloned().collect();
        self.var_types.insert(String::from(name), HashMap::new());
    }

    pub(crate) fn stop_function(&mut self) {
        self.func_name.clear();
        self.locals.clear();
    }

    /// Determine the scope of `name` in the current context, and the
    /// function context key it lives under ("" unless it is a local).
    pub(crate) fn get_scope(&self, name: &str) -> (VarScope, String) {
        if self.locals.contains(name) {
            (VarScope::Local, self.func_name.clone())
        } else if special_var_index(name) > 0 {
            (VarScope::Special, String::new())
        } else {
            (VarScope::Global, String::new())
        }
    }

    /// Record a scalar variable reference. The node's index is patched at
    /// the end of resolution.
    pub(crate) fn record_var_ref(&mut self, expr: &Rc<RefCell<VarExpr>>) {
        let name = expr.borrow().name.clone();
        let (scope, func_name) = self.get_scope(&name);
        expr.borrow_mut().scope = Some(scope);
        self.var_refs.push(VarRef {
            func_name: func_name.clone(),
            var: Rc::clone(expr),
            is_arg: false,
        });
        let info = self
            .var_types
            .get(&func_name)
            .and_then(|infos| infos.get(&name))
            .cloned()
            .unwrap_or_default();
        if info.typ == VarType::Unknown {
            self.var_types.entry(func_name).or_default().insert(
                name,
                TypeInfo {
                    typ: VarType::Scalar,
                    first_ref: Some(Rc::clone(expr)),
                    scope,
                    index: 0,
                    call_name: info.call_name,
                    arg_index: 0,
                },
            );
        }
    }

    /// Record an array variable reference. Special variables can never be
    /// used as arrays.
    pub(crate) fn record_array_ref(&mut self, expr: &Rc<RefCell<ArrayExpr>>) -> Result<(), Error> {
        let (name, pos) = {
            let e = expr.borrow();
            (e.name.clone(), e.pos)
        };
        let (scope, func_name) = self.get_scope(&name);
        if scope == VarScope::Special {
            return Err(Error::new(ErrorImpl::ScalarAsArray { variable: name }, pos));
        }
        expr.borrow_mut().scope = Some(scope);
        self.array_refs.push(ArrayRef {
            func_name: func_name.clone(),
            array: Rc::clone(expr),
        });
        let info = self
            .var_types
            .get(&func_name)
            .and_then(|infos| infos.get(&name))
            .cloned()
            .unwrap_or_default();
        if info.typ == VarType::Unknown {
            self.var_types.entry(func_name).or_default().insert(
                name,
                TypeInfo {
                    typ: VarType::Array,
                    first_ref: None,
                    scope,
                    index: 0,
                    call_name: info.call_name,
                    arg_index: 0,
                },
            );
        }
        Ok(())
    }

    /// Record a user call site for later index resolution.
    pub(crate) fn record_user_call(&mut self, call: &Rc<RefCell<CallExpr>>) {
        let pos = call.borrow().pos;
        self.user_calls.push(UserCall {
            call: Rc::clone(call),
            pos,
            in_func: self.func_name.clone(),
        });
    }

    /// Record that a bare variable was passed as argument `arg_index` of a
    /// call to `call_name`. If this call was the variable's very first
    /// reference, its type reverts to Unknown with the call attached, so the
    /// propagator can borrow the callee parameter's type later. The most
    /// recent [`VarRef`] is flagged as a call argument either way, which
    /// exempts it from the array-used-as-scalar check.
    pub(crate) fn record_call_arg(
        &mut self,
        call_name: &str,
        arg: &Rc<RefCell<VarExpr>>,
        arg_index: usize,
    ) {
        let name = arg.borrow().name.clone();
        let (scope, func_name) = self.get_scope(&name);
        let first_reference = self
            .var_types
            .get(&func_name)
            .and_then(|infos| infos.get(&name))
            .and_then(|info| info.first_ref.as_ref())
            .map(|first| Rc::ptr_eq(first, arg))
            .unwrap_or(false);
        if first_reference {
            // Otherwise the type is already known and stays as recorded.
            self.var_types.entry(func_name).or_default().insert(
                name,
                TypeInfo {
                    typ: VarType::Unknown,
                    first_ref: Some(Rc::clone(arg)),
                    scope,
                    index: 0,
                    call_name: String::from(call_name),
                    arg_index,
                },
            );
        }
        if let Some(var_ref) = self.var_refs.last_mut() {
            var_ref.is_arg = true;
        }
    }
}
