//! Unit tests for the resolver internals: scope classification, reference
//! recording, and the call-graph topological sort.

use std::collections::{HashMap, HashSet};

use crate::ast::ast::VarScope;
use crate::ast::expressions::{ArrayExpr, VarExpr};
use crate::resolver::resolver::{Config, Resolver, VarType};
use crate::resolver::topo_sort::topo_sort;
use crate::Position;

fn new_resolver() -> Resolver {
    Resolver::new(Config {
        debug_writer: Box::new(std::io::sink()),
        ..Config::default()
    })
    .unwrap()
}

#[test]
fn test_scope_of_global() {
    let r = new_resolver();
    assert_eq!(r.get_scope("x"), (VarScope::Global, String::new()));
}

#[test]
fn test_scope_of_special() {
    let r = new_resolver();
    assert_eq!(r.get_scope("NF"), (VarScope::Special, String::new()));
    assert_eq!(r.get_scope("SUBSEP"), (VarScope::Special, String::new()));
}

#[test]
fn test_scope_of_local() {
    let mut r = new_resolver();
    r.start_function("f", &["a".to_string(), "b".to_string()]);
    assert_eq!(r.get_scope("a"), (VarScope::Local, "f".to_string()));
    assert_eq!(r.get_scope("x"), (VarScope::Global, String::new()));
    r.stop_function();
    assert_eq!(r.get_scope("a"), (VarScope::Global, String::new()));
}

#[test]
fn test_local_shadows_special() {
    // A parameter named like a special variable is still a local.
    let mut r = new_resolver();
    r.start_function("f", &["NF".to_string()]);
    assert_eq!(r.get_scope("NF"), (VarScope::Local, "f".to_string()));
}

#[test]
fn test_builtin_arrays_registered_eagerly() {
    let r = new_resolver();
    let globals = r.var_types.get("").unwrap();
    for name in ["ARGV", "ENVIRON", "FIELDS"] {
        let info = globals.get(name).unwrap();
        assert_eq!(info.typ, VarType::Array, "{} should be an array", name);
        assert_eq!(info.scope, VarScope::Global);
    }
    assert_eq!(r.array_refs.len(), 3);
}

#[test]
fn test_record_var_ref_pins_scalar() {
    let mut r = new_resolver();
    let var = VarExpr::shared("x", Position(1, 9));
    r.record_var_ref(&var);

    assert_eq!(var.borrow().scope, Some(VarScope::Global));
    let info = r.var_types.get("").unwrap().get("x").unwrap();
    assert_eq!(info.typ, VarType::Scalar);
    assert!(info.first_ref.is_some());
}

#[test]
fn test_record_array_ref_pins_array() {
    let mut r = new_resolver();
    let array = ArrayExpr::shared("a", Position(1, 9));
    r.record_array_ref(&array).unwrap();

    let info = r.var_types.get("").unwrap().get("a").unwrap();
    assert_eq!(info.typ, VarType::Array);
}

#[test]
fn test_record_array_ref_rejects_special() {
    let mut r = new_resolver();
    let array = ArrayExpr::shared("NF", Position(2, 3));
    let err = r.record_array_ref(&array).unwrap_err();
    assert_eq!(err.get_error_name(), "TypeMismatchError");
    assert_eq!(*err.get_position(), Position(2, 3));
}

#[test]
fn test_call_arg_reverts_first_reference_to_unknown() {
    let mut r = new_resolver();
    let var = VarExpr::shared("x", Position(1, 12));
    r.record_var_ref(&var);
    r.record_call_arg("f", &var, 0);

    let info = r.var_types.get("").unwrap().get("x").unwrap();
    assert_eq!(info.typ, VarType::Unknown);
    assert_eq!(info.call_name, "f");
    assert_eq!(info.arg_index, 0);
    assert!(r.var_refs.last().unwrap().is_arg);
}

#[test]
fn test_call_arg_keeps_known_type() {
    // Second reference: the type is already pinned, only the arg flag moves.
    let mut r = new_resolver();
    let first = VarExpr::shared("x", Position(1, 3));
    r.record_var_ref(&first);
    let second = VarExpr::shared("x", Position(1, 12));
    r.record_var_ref(&second);
    r.record_call_arg("f", &second, 1);

    let info = r.var_types.get("").unwrap().get("x").unwrap();
    assert_eq!(info.typ, VarType::Scalar);
    assert_eq!(info.call_name, "");
    assert!(r.var_refs.last().unwrap().is_arg);
}

fn graph(edges: &[(&str, &[&str])]) -> HashMap<String, HashSet<String>> {
    edges
        .iter()
        .map(|(from, tos)| {
            (
                from.to_string(),
                tos.iter().map(|t| t.to_string()).collect(),
            )
        })
        .collect()
}

#[test]
fn test_topo_sort_chain() {
    // f calls g, g calls h: h must come first.
    let sorted = topo_sort(&graph(&[("f", &["g"]), ("g", &["h"])]));
    assert_eq!(sorted, vec!["h", "g", "f"]);
}

#[test]
fn test_topo_sort_diamond() {
    let sorted = topo_sort(&graph(&[("a", &["b", "c"]), ("b", &["d"]), ("c", &["d"])]));
    let position = |name: &str| sorted.iter().position(|n| n == name).unwrap();
    assert!(position("d") < position("b"));
    assert!(position("d") < position("c"));
    assert!(position("b") < position("a"));
    assert!(position("c") < position("a"));
}

#[test]
fn test_topo_sort_skips_cycles() {
    // Mutual recursion must neither hang nor drop a function.
    let sorted = topo_sort(&graph(&[("f", &["g"]), ("g", &["f"])]));
    assert_eq!(sorted.len(), 2);
    assert!(sorted.contains(&"f".to_string()));
    assert!(sorted.contains(&"g".to_string()));
}

#[test]
fn test_topo_sort_self_loop() {
    let sorted = topo_sort(&graph(&[("f", &["f"])]));
    assert_eq!(sorted, vec!["f"]);
}

#[test]
fn test_topo_sort_empty() {
    let sorted = topo_sort(&HashMap::new());
    assert!(sorted.is_empty());
}
