use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Topologically sorts the call graph so every function appears after the
/// functions it calls. Cycles (self or mutual recursion) are not errors: an
/// edge back to an in-progress node is skipped, which only means the types
/// reachable through that edge are inferred from the information available
/// at that point.
///
/// Roots and edges are visited in sorted order so the result is
/// deterministic; only the topological constraints are semantically
/// significant.
pub fn topo_sort(graph: &HashMap<String, HashSet<String>>) -> Vec<String> {
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut sorted = Vec::new();

    let mut roots: Vec<&String> = graph.keys().collect();
    roots.sort();
    for root in roots {
        if mark_of(&marks, root) == Mark::Unvisited {
            visit(graph, root, &mut marks, &mut sorted);
        }
    }
    sorted
}

fn mark_of(marks: &HashMap<&str, Mark>, node: &str) -> Mark {
    *marks.get(node).unwrap_or(&Mark::Unvisited)
}

fn visit<'graph>(
    graph: &'graph HashMap<String, HashSet<String>>,
    node: &'graph str,
    marks: &mut HashMap<&'graph str, Mark>,
    sorted: &mut Vec<String>,
) {
    marks.insert(node, Mark::InProgress);
    if let Some(callees) = graph.get(node) {
        let mut callees: Vec<&String> = callees.iter().collect();
        callees.sort();
        for callee in callees {
            if mark_of(marks, callee) == Mark::Unvisited {
                visit(graph, callee, marks, sorted);
            }
        }
    }
    marks.insert(node, Mark::Done);
    sorted.push(String::from(node));
}
