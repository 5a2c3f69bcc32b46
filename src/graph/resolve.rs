//! # Dependency resolution.
//!
//! Depth-first, post-order traversal over the dependency map:
//!
//! ```text
//! for id in registration order:
//!   visit(id)
//!     ├─ visited?      → done
//!     ├─ in progress?  → CircularDependency(id)
//!     ├─ mark in progress
//!     ├─ visit(dep) for every declared dependency (unknown deps: skip | MissingDependency)
//!     ├─ unmark, mark visited
//!     └─ append id        (dependencies land first)
//! ```
//!
//! The walk keeps its own frame stack, so graph depth is bounded by memory, not
//! by the thread stack. Registration order makes the output deterministic.

use std::collections::{HashMap, HashSet};

use crate::error::GraphError;
use crate::graph::config::DependencyMode;

/// Returns every id of `order` exactly once, each after its registered dependencies.
pub(crate) fn resolve(
    order: &[String],
    deps: &HashMap<String, Vec<String>>,
    mode: DependencyMode,
) -> Result<Vec<String>, GraphError> {
    let mut walk = Walk {
        deps,
        mode,
        visited: HashSet::with_capacity(order.len()),
        in_progress: HashSet::new(),
        out: Vec::with_capacity(order.len()),
    };
    for id in order {
        walk.visit(id)?;
    }
    Ok(walk.out)
}

struct Walk<'a> {
    deps: &'a HashMap<String, Vec<String>>,
    mode: DependencyMode,
    visited: HashSet<&'a str>,
    in_progress: HashSet<&'a str>,
    out: Vec<String>,
}

impl<'a> Walk<'a> {
    fn visit(&mut self, root: &'a str) -> Result<(), GraphError> {
        let graph: &'a HashMap<String, Vec<String>> = self.deps;
        if self.visited.contains(root) || !graph.contains_key(root) {
            return Ok(());
        }

        // (node, index of the next dependency to look at)
        let mut stack: Vec<(&'a str, usize)> = vec![(root, 0)];
        self.in_progress.insert(root);

        while let Some(frame) = stack.last_mut() {
            let (id, next) = *frame;
            let deps = graph.get(id).map(Vec::as_slice).unwrap_or_default();

            let Some(dep) = deps.get(next) else {
                stack.pop();
                self.in_progress.remove(id);
                self.visited.insert(id);
                self.out.push(id.to_string());
                continue;
            };
            frame.1 += 1;

            let dep = dep.as_str();
            if !graph.contains_key(dep) {
                match self.mode {
                    DependencyMode::Permissive => continue,
                    DependencyMode::Strict => {
                        return Err(GraphError::MissingDependency {
                            task: id.to_string(),
                            dependency: dep.to_string(),
                        });
                    }
                }
            }
            if self.visited.contains(dep) {
                continue;
            }
            if self.in_progress.contains(dep) {
                return Err(GraphError::CircularDependency { id: dep.to_string() });
            }
            self.in_progress.insert(dep);
            stack.push((dep, 0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &[&str])]) -> (Vec<String>, HashMap<String, Vec<String>>) {
        let order = edges.iter().map(|(id, _)| id.to_string()).collect();
        let deps = edges
            .iter()
            .map(|(id, ds)| (id.to_string(), ds.iter().map(|d| d.to_string()).collect()))
            .collect();
        (order, deps)
    }

    fn position(out: &[String], id: &str) -> usize {
        out.iter().position(|x| x == id).unwrap()
    }

    #[test]
    fn test_abc_example() {
        let (order, deps) = graph(&[("C", &["A", "B"]), ("B", &["A"]), ("A", &[])]);
        let out = resolve(&order, &deps, DependencyMode::Permissive).unwrap();
        assert_eq!(out, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_every_task_once_after_its_dependencies() {
        let (order, deps) = graph(&[
            ("deploy", &["test", "package"]),
            ("package", &["build"]),
            ("test", &["build", "lint"]),
            ("lint", &["fetch"]),
            ("build", &["fetch"]),
            ("fetch", &[]),
            ("notify", &[]),
        ]);
        let out = resolve(&order, &deps, DependencyMode::Permissive).unwrap();

        assert_eq!(out.len(), order.len());
        let unique: HashSet<_> = out.iter().collect();
        assert_eq!(unique.len(), out.len());
        for (id, ds) in &deps {
            for d in ds {
                assert!(
                    position(&out, d) < position(&out, id),
                    "{d} must precede {id} in {out:?}"
                );
            }
        }
    }

    #[test]
    fn test_deterministic_order() {
        let (order, deps) = graph(&[("x", &["y"]), ("y", &[]), ("z", &["x"])]);
        let first = resolve(&order, &deps, DependencyMode::Permissive).unwrap();
        for _ in 0..10 {
            assert_eq!(resolve(&order, &deps, DependencyMode::Permissive).unwrap(), first);
        }
        assert_eq!(first, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_two_node_cycle() {
        let (order, deps) = graph(&[("A", &["B"]), ("B", &["A"])]);
        let err = resolve(&order, &deps, DependencyMode::Permissive).unwrap_err();
        assert_eq!(err, GraphError::CircularDependency { id: "A".into() });
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let (order, deps) = graph(&[("A", &["A"])]);
        let err = resolve(&order, &deps, DependencyMode::Permissive).unwrap_err();
        assert_eq!(err, GraphError::CircularDependency { id: "A".into() });
    }

    #[test]
    fn test_cycle_behind_acyclic_prefix() {
        let (order, deps) = graph(&[("root", &[]), ("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let err = resolve(&order, &deps, DependencyMode::Permissive).unwrap_err();
        assert!(matches!(err, GraphError::CircularDependency { .. }));
    }

    #[test]
    fn test_dangling_dependency_permissive() {
        let (order, deps) = graph(&[("a", &["ghost"]), ("b", &["a"])]);
        let out = resolve(&order, &deps, DependencyMode::Permissive).unwrap();
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn test_dangling_dependency_strict() {
        let (order, deps) = graph(&[("a", &["ghost"])]);
        let err = resolve(&order, &deps, DependencyMode::Strict).unwrap_err();
        assert_eq!(
            err,
            GraphError::MissingDependency {
                task: "a".into(),
                dependency: "ghost".into()
            }
        );
    }

    #[test]
    fn test_deep_chain_does_not_exhaust_stack() {
        const N: usize = 100_000;
        let id = |i: usize| format!("t{i}");

        // t0 <- t1 <- ... <- t(N-1), registered last-first so the walk starts at the deep end
        let order: Vec<String> = (0..N).rev().map(id).collect();
        let deps: HashMap<String, Vec<String>> = (0..N)
            .map(|i| {
                let ds = if i == 0 { Vec::new() } else { vec![id(i - 1)] };
                (id(i), ds)
            })
            .collect();

        let out = resolve(&order, &deps, DependencyMode::Strict).unwrap();
        assert_eq!(out.len(), N);
        assert_eq!(out[0], "t0");
        assert_eq!(out[N - 1], id(N - 1));
        assert!(out.iter().enumerate().all(|(i, x)| *x == id(i)));
    }

    #[test]
    fn test_deep_cycle_is_reported() {
        const N: usize = 50_000;
        let id = |i: usize| format!("c{i}");
        let order: Vec<String> = (0..N).map(id).collect();
        let deps: HashMap<String, Vec<String>> =
            (0..N).map(|i| (id(i), vec![id((i + 1) % N)])).collect();

        let err = resolve(&order, &deps, DependencyMode::Permissive).unwrap_err();
        assert_eq!(err, GraphError::CircularDependency { id: "c0".into() });
    }

    #[test]
    fn test_empty_graph() {
        let out = resolve(&[], &HashMap::new(), DependencyMode::Strict).unwrap();
        assert!(out.is_empty());
    }
}
