//! Dependency graph analysis: adjacency, dependents and cycle detection.
//!
//! # Edge Direction
//!
//! Edges point from a task to the tasks it depends on (`blocked → blocker`).
//! Only ids present in the batch become edges; dangling references are
//! dropped without a warning.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::task::{TaskRecord, TaskSet};

/// Result of a cycle scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub has_cycle: bool,
    /// Each cycle starts and ends at the same id, e.g. `["1", "2", "3", "1"]`.
    pub cycles: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    edges: HashMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Build from a raw slice. Repeated ids collapse onto one node the same
    /// way [`TaskSet`] collapses them.
    pub fn build(tasks: &[TaskRecord]) -> Self {
        let set: TaskSet = tasks.iter().cloned().collect();
        Self::from_set(&set)
    }

    pub fn from_set(set: &TaskSet) -> Self {
        let nodes: Vec<String> = set.ids().map(str::to_string).collect();
        let edges = set
            .iter()
            .map(|task| {
                let deps: Vec<String> = task
                    .dependencies
                    .iter()
                    .filter(|d| set.contains(d))
                    .cloned()
                    .collect();
                (task.id.clone(), deps)
            })
            .collect();
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn dependencies_of(&self, id: &str) -> &[String] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct *other* tasks that list each id as a dependency.
    pub fn dependents_counts(&self) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> =
            self.nodes.iter().map(|n| (n.clone(), 0)).collect();

        for node in &self.nodes {
            let unique: HashSet<&str> = self
                .dependencies_of(node)
                .iter()
                .map(String::as_str)
                .filter(|dep| *dep != node.as_str())
                .collect();
            for dep in unique {
                if let Some(c) = counts.get_mut(dep) {
                    *c += 1;
                }
            }
        }

        counts
    }

    /// Depth-first cycle scan rooted at every unvisited node, in input order.
    ///
    /// A back-edge to a node on the current path records that path segment,
    /// closed with the repeated node. Fully explored nodes are never
    /// re-entered, so a cycle reachable from several roots is reported once
    /// and some overlapping cycles may go unreported; `has_cycle` is exact.
    pub fn find_cycles(&self) -> CycleReport {
        let mut traversal = Traversal::new(self);
        for node in &self.nodes {
            traversal.run(node);
        }

        let cycles = traversal.cycles;
        CycleReport {
            has_cycle: !cycles.is_empty(),
            cycles,
        }
    }
}

/// Explicit DFS state for one scan.
///
/// `stack` is the current path; each frame holds the index of the next
/// edge to follow, so chain depth is bounded by the heap, not the thread
/// stack.
struct Traversal<'g> {
    graph: &'g DependencyGraph,
    visited: HashSet<&'g str>,
    on_stack: HashSet<&'g str>,
    stack: Vec<(&'g str, usize)>,
    cycles: Vec<Vec<String>>,
}

impl<'g> Traversal<'g> {
    fn new(graph: &'g DependencyGraph) -> Self {
        Self {
            graph,
            visited: HashSet::new(),
            on_stack: HashSet::new(),
            stack: Vec::new(),
            cycles: Vec::new(),
        }
    }

    fn enter(&mut self, node: &'g str) {
        self.visited.insert(node);
        self.on_stack.insert(node);
        self.stack.push((node, 0));
    }

    fn record_cycle(&mut self, node: &str) {
        if let Some(start) = self.stack.iter().position(|(n, _)| *n == node) {
            let mut cycle: Vec<String> = self.stack[start..]
                .iter()
                .map(|(n, _)| n.to_string())
                .collect();
            cycle.push(node.to_string());
            self.cycles.push(cycle);
        }
    }

    fn run(&mut self, root: &'g str) {
        if self.visited.contains(root) {
            return;
        }
        self.enter(root);

        let graph = self.graph;
        while let Some(frame) = self.stack.last_mut() {
            let (node, next) = *frame;
            let deps = graph.dependencies_of(node);

            let Some(dep) = deps.get(next) else {
                self.stack.pop();
                self.on_stack.remove(node);
                continue;
            };
            frame.1 += 1;

            let dep = dep.as_str();
            if self.on_stack.contains(dep) {
                self.record_cycle(dep);
            } else if !self.visited.contains(dep) {
                self.enter(dep);
            }
        }
    }
}

/// Detect dependency cycles in a batch.
pub fn detect_cycle(tasks: &[TaskRecord]) -> CycleReport {
    DependencyGraph::build(tasks).find_cycles()
}

/// Render a cycle as `a → b → a`.
pub fn format_cycle(cycle: &[String]) -> String {
    cycle.join(" → ")
}
