//! Batch phase of resolution, run after the walk: call-site resolution,
//! type propagation across the call graph, index assignment, call
//! validation, and back-patching of every recorded reference.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use crate::ast::ast::{Program, ResolvedProgram, VarScope};
use crate::ast::expressions::Expr;
use crate::ast::special::special_var_index;
use crate::errors::errors::{Error, ErrorImpl};

use super::resolver::{Config, Resolver, VarType};
use super::topo_sort::topo_sort;
use super::walk::walk_program;

/// Resolve a parsed program: infer every variable's scalar/array type,
/// assign dense indexes, and bind every call site to its callee. This is
/// the single entry point of the pass; on error the program is unusable
/// and must be discarded.
pub fn resolve(prog: Program, config: Config) -> Result<ResolvedProgram, Error> {
    let mut r = Resolver::new(config)?;
    r.add_functions(&prog);
    walk_program(&mut r, &prog)?;
    r.resolve_user_calls(&prog)?;

    let mut resolved = ResolvedProgram {
        program: prog,
        scalars: HashMap::new(),
        arrays: HashMap::new(),
    };
    r.resolve_vars(&mut resolved)?;
    r.check_fully_resolved();
    Ok(resolved)
}

impl Resolver {
    /// Resolve every recorded call to a function index. User-defined
    /// functions take precedence over natives; natives are numbered by
    /// sorted name so their indexing is deterministic.
    pub(crate) fn resolve_user_calls(&mut self, prog: &Program) -> Result<(), Error> {
        let mut native_names: Vec<&String> = self.native_funcs.keys().collect();
        native_names.sort();
        let native_indexes: HashMap<&str, usize> = native_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        for c in &self.user_calls {
            let mut call = c.call.borrow_mut();
            if let Some(&index) = self.functions.get(&call.name) {
                let function = &prog.functions[index];
                if call.args.len() > function.params.len() {
                    return Err(Error::new(
                        ErrorImpl::TooManyArguments {
                            function: call.name.clone(),
                            declared: function.params.len(),
                            received: call.args.len(),
                        },
                        c.pos,
                    ));
                }
                call.index = Some(index);
            } else if let Some(native) = self.native_funcs.get(&call.name) {
                if !native.variadic && call.args.len() > native.arity {
                    return Err(Error::new(
                        ErrorImpl::TooManyArguments {
                            function: call.name.clone(),
                            declared: native.arity,
                            received: call.args.len(),
                        },
                        c.pos,
                    ));
                }
                call.native = true;
                call.index = Some(native_indexes[call.name.as_str()]);
            } else {
                return Err(Error::new(
                    ErrorImpl::UndefinedFunction {
                        function: call.name.clone(),
                    },
                    c.pos,
                ));
            }
        }
        Ok(())
    }

    /// Settle every variable's type, assign indexes, validate call
    /// arguments, and back-patch the recorded references.
    pub(crate) fn resolve_vars(&mut self, resolved: &mut ResolvedProgram) -> Result<(), Error> {
        // Backward inference: process functions so callees come before
        // callers, and pull still-unknown variable types from the callee
        // parameter they were passed as.
        let mut call_graph: HashMap<String, HashSet<String>> = HashMap::new();
        for c in &self.user_calls {
            call_graph
                .entry(c.in_func.clone())
                .or_default()
                .insert(c.call.borrow().name.clone());
        }
        let sorted_funcs = topo_sort(&call_graph);
        for func_name in &sorted_funcs {
            let infos = match self.var_types.get(func_name) {
                Some(infos) => infos,
                None => continue, // native or undefined callee name
            };
            let mut updates: Vec<(String, VarType)> = Vec::new();
            for (name, info) in infos {
                if info.scope == VarScope::Special || info.typ != VarType::Unknown {
                    continue;
                }
                let func_index = match self.functions.get(&info.call_name) {
                    Some(&index) => index,
                    None => continue, // pending call is to a native function
                };
                let param_name = match resolved.program.functions[func_index]
                    .params
                    .get(info.arg_index)
                {
                    Some(param) => param,
                    None => continue,
                };
                let typ = self
                    .var_types
                    .get(&info.call_name)
                    .and_then(|infos| infos.get(param_name))
                    .map(|info| info.typ)
                    .unwrap_or(VarType::Unknown);
                if typ != VarType::Unknown {
                    updates.push((name.clone(), typ));
                }
            }
            for (name, typ) in updates {
                if self.debug_types {
                    let _ = writeln!(
                        self.debug_writer,
                        "resolving {}:{} to {}",
                        func_name, name, typ
                    );
                }
                if let Some(info) = self
                    .var_types
                    .get_mut(func_name)
                    .and_then(|infos| infos.get_mut(&name))
                {
                    info.typ = typ;
                }
            }
        }

        // Globals: specials keep their fixed slots; arrays and scalars get
        // the next index in their own dense namespaces. A global may not
        // share its name with a function.
        let mut global_names: Vec<String> = match self.var_types.get("") {
            Some(globals) => globals.keys().cloned().collect(),
            None => Vec::new(),
        };
        global_names.sort();
        for name in global_names {
            if self.functions.contains_key(&name) {
                return Err(Error::new(
                    ErrorImpl::GlobalNameConflict { name },
                    resolved.program.end_pos,
                ));
            }
            let scope_and_type = self
                .var_types
                .get("")
                .and_then(|globals| globals.get(&name))
                .map(|info| (info.scope, info.typ));
            let (scope, typ) = match scope_and_type {
                Some(pair) => pair,
                None => continue,
            };
            let index = if scope == VarScope::Special {
                special_var_index(&name)
            } else if typ == VarType::Array {
                let index = resolved.arrays.len();
                resolved.arrays.insert(name.clone(), index);
                index
            } else {
                // Unknown never constrained anywhere defaults to scalar.
                let index = resolved.scalars.len();
                resolved.scalars.insert(name.clone(), index);
                index
            };
            if let Some(info) = self
                .var_types
                .get_mut("")
                .and_then(|globals| globals.get_mut(&name))
            {
                info.index = index;
            }
        }

        // Forward inference: an array passed at a call site pins a callee
        // parameter that nothing else constrained, as in
        //   BEGIN { arr[0]; f(arr) }
        //   function f(a) { }
        for c in &self.user_calls {
            let call = c.call.borrow();
            if call.native {
                continue;
            }
            let func_index = match call.index {
                Some(index) => index,
                None => continue,
            };
            for (i, arg) in call.args.iter().enumerate() {
                let var = match arg {
                    Expr::Var(var) => var,
                    _ => continue,
                };
                let var_name = var.borrow().name.clone();
                let var_func = self.get_var_func_name(&resolved.program, &var_name, &c.in_func);
                let arg_type = self
                    .var_types
                    .get(&var_func)
                    .and_then(|infos| infos.get(&var_name))
                    .map(|info| info.typ)
                    .unwrap_or(VarType::Unknown);
                let callee_name = resolved.program.functions[func_index].name.clone();
                let param_name = resolved.program.functions[func_index].params[i].clone();
                let param_type = self
                    .var_types
                    .get(&callee_name)
                    .and_then(|infos| infos.get(&param_name))
                    .map(|info| info.typ)
                    .unwrap_or(VarType::Unknown);
                if arg_type == VarType::Array && param_type == VarType::Unknown {
                    // The parameter may have no entry yet (never referenced
                    // in the callee body); the pin must create one.
                    self.var_types
                        .entry(callee_name)
                        .or_default()
                        .entry(param_name)
                        .or_default()
                        .typ = VarType::Array;
                }
            }
        }

        // Locals: parameters get indexes in declaration order, each in its
        // function's own scalar or array namespace. The per-slot array
        // markers are what the interpreter uses to build call frames.
        for function in resolved.program.functions.iter_mut() {
            let mut scalar_index = 0;
            let mut array_index = 0;
            let mut arrays = vec![false; function.params.len()];
            for (i, name) in function.params.iter().enumerate() {
                let typ = self
                    .var_types
                    .get(&function.name)
                    .and_then(|infos| infos.get(name))
                    .map(|info| info.typ)
                    .unwrap_or(VarType::Unknown);
                let index = if typ == VarType::Array {
                    arrays[i] = true;
                    array_index += 1;
                    array_index - 1
                } else {
                    // Scalar, or never referenced at all: default to scalar.
                    scalar_index += 1;
                    scalar_index - 1
                };
                if let Some(info) = self
                    .var_types
                    .get_mut(&function.name)
                    .and_then(|infos| infos.get_mut(name))
                {
                    info.index = index;
                }
            }
            function.arrays = arrays;
        }

        self.check_call_args(resolved)?;

        if self.debug_types {
            self.print_var_types(resolved);
        }

        // Back-patch every reference with its final index. A scalar-context
        // use of an array is only legal as a call argument.
        for var_ref in &self.var_refs {
            let mut var = var_ref.var.borrow_mut();
            let info = self
                .var_types
                .get(&var_ref.func_name)
                .and_then(|infos| infos.get(&var.name))
                .cloned()
                .unwrap_or_default();
            if info.typ == VarType::Array && !var_ref.is_arg {
                return Err(Error::new(
                    ErrorImpl::ArrayAsScalar {
                        variable: var.name.clone(),
                    },
                    var.pos,
                ));
            }
            var.index = Some(info.index);
        }
        for array_ref in &self.array_refs {
            let mut array = array_ref.array.borrow_mut();
            let info = self
                .var_types
                .get(&array_ref.func_name)
                .and_then(|infos| infos.get(&array.name))
                .cloned()
                .unwrap_or_default();
            if info.typ == VarType::Scalar {
                return Err(Error::new(
                    ErrorImpl::ScalarAsArray {
                        variable: array.name.clone(),
                    },
                    array.pos,
                ));
            }
            array.index = Some(info.index);
        }
        Ok(())
    }

    /// Check scalar/array compatibility of every call's arguments against
    /// the resolved callee. Native functions only ever take scalars.
    fn check_call_args(&self, resolved: &ResolvedProgram) -> Result<(), Error> {
        for c in &self.user_calls {
            let call = c.call.borrow();
            if call.native {
                for arg in &call.args {
                    let var = match arg {
                        Expr::Var(var) => var,
                        _ => continue, // non-variable expression, always scalar
                    };
                    let var_name = var.borrow().name.clone();
                    let var_func =
                        self.get_var_func_name(&resolved.program, &var_name, &c.in_func);
                    let typ = self
                        .var_types
                        .get(&var_func)
                        .and_then(|infos| infos.get(&var_name))
                        .map(|info| info.typ)
                        .unwrap_or(VarType::Unknown);
                    if typ == VarType::Array {
                        return Err(Error::new(
                            ErrorImpl::ArrayToNative {
                                variable: var_name,
                                function: call.name.clone(),
                            },
                            c.pos,
                        ));
                    }
                }
                continue;
            }

            let func_index = match call.index {
                Some(index) => index,
                None => continue,
            };
            let function = &resolved.program.functions[func_index];
            for (i, arg) in call.args.iter().enumerate() {
                let var = match arg {
                    Expr::Var(var) => var,
                    _ => {
                        if function.arrays[i] {
                            return Err(Error::new(
                                ErrorImpl::ScalarAsArrayParam {
                                    argument: arg.short_desc(),
                                },
                                c.pos,
                            ));
                        }
                        continue;
                    }
                };
                let var_name = var.borrow().name.clone();
                let var_func = self.get_var_func_name(&resolved.program, &var_name, &c.in_func);
                let typ = self
                    .var_types
                    .get(&var_func)
                    .and_then(|infos| infos.get(&var_name))
                    .map(|info| info.typ)
                    .unwrap_or(VarType::Unknown);
                if typ == VarType::Array && !function.arrays[i] {
                    return Err(Error::new(
                        ErrorImpl::ArrayAsScalarParam { variable: var_name },
                        c.pos,
                    ));
                }
                if typ != VarType::Array && function.arrays[i] {
                    return Err(Error::new(
                        ErrorImpl::ScalarAsArrayParam { argument: var_name },
                        c.pos,
                    ));
                }
            }
        }
        Ok(())
    }

    /// If `name` is a parameter of `in_func`, return that function's
    /// context key, otherwise "" (global).
    fn get_var_func_name(&self, prog: &Program, name: &str, in_func: &str) -> String {
        if in_func.is_empty() {
            return String::new();
        }
        let func_index = match self.functions.get(in_func) {
            Some(&index) => index,
            None => return String::new(),
        };
        if prog.functions[func_index].params.iter().any(|p| p == name) {
            String::from(in_func)
        } else {
            String::new()
        }
    }

    /// Dump the variable-type tables to the debug sink. Informational only;
    /// the format is not a stable contract.
    fn print_var_types(&mut self, resolved: &ResolvedProgram) {
        let _ = writeln!(self.debug_writer, "scalars: {:?}", resolved.scalars);
        let _ = writeln!(self.debug_writer, "arrays: {:?}", resolved.arrays);
        let mut func_names: Vec<&String> = self.var_types.keys().collect();
        func_names.sort();
        for func_name in func_names {
            if func_name.is_empty() {
                let _ = writeln!(self.debug_writer, "globals");
            } else {
                let _ = writeln!(self.debug_writer, "function {}", func_name);
            }
            let infos = &self.var_types[func_name.as_str()];
            let mut var_names: Vec<&String> = infos.keys().collect();
            var_names.sort();
            for name in var_names {
                let _ = writeln!(self.debug_writer, "  {}: {}", name, infos[name.as_str()]);
            }
        }
    }

    /// No unresolved sentinel may survive resolution; a leftover means a
    /// resolver bug, not a bad program.
    fn check_fully_resolved(&self) {
        for var_ref in &self.var_refs {
            let var = var_ref.var.borrow();
            assert!(
                var.scope.is_some() && var.index.is_some(),
                "variable {:?} left unresolved",
                var.name
            );
        }
        for array_ref in &self.array_refs {
            let array = array_ref.array.borrow();
            assert!(
                array.scope.is_some() && array.index.is_some(),
                "array {:?} left unresolved",
                array.name
            );
        }
        for c in &self.user_calls {
            let call = c.call.borrow();
            assert!(
                call.index.is_some(),
                "call to {:?} left unresolved",
                call.name
            );
        }
    }
}
