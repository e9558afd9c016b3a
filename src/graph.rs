//! Class dependency graph
//!
//! Nodes are fully-qualified class names (analyzed classes plus every type
//! they depend on); an edge `a -> b` means `a` depends on `b`.
//!
//! - **Fan-in (Ca)**: number of classes that depend on this class
//! - **Fan-out (Ce)**: number of types this class depends on
//! - **Instability**: Ce / (Ca + Ce), from 0 (stable) to 1 (unstable)
//! - **Transitive deps**: every node reachable from this one
//!
//! Cycles are strongly connected components with more than one node
//! (Tarjan). A class depending on itself is not reported as a cycle.

use crate::model::ClassRecord;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use serde::Serialize;
use std::collections::HashMap;

pub struct DependencyGraph {
    pub graph: DiGraph<String, ()>,
    pub nodes: HashMap<String, NodeIndex>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ClassGraphMetrics {
    pub fan_in: usize,
    pub fan_out: usize,
    pub instability: f64,
    pub transitive_deps: usize,
}

#[derive(Debug)]
pub struct CycleInfo {
    /// Each cycle's members, sorted by name; cycles sorted by first member.
    pub cycles: Vec<Vec<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            nodes: HashMap::new(),
        }
    }

    pub fn from_classes(classes: &[ClassRecord]) -> Self {
        let mut graph = Self::new();
        for class in classes {
            let name = class.qualified_name();
            graph.get_or_create_node(&name);
            for dep in &class.dependencies {
                graph.add_dependency(&name, dep);
            }
        }
        graph
    }

    pub fn get_or_create_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(name) {
            idx
        } else {
            let idx = self.graph.add_node(name.to_string());
            self.nodes.insert(name.to_string(), idx);
            idx
        }
    }

    /// Add a dependency: `from` depends on `to`
    pub fn add_dependency(&mut self, from: &str, to: &str) {
        let from_idx = self.get_or_create_node(from);
        let to_idx = self.get_or_create_node(to);
        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    pub fn class_metrics(&self, name: &str) -> ClassGraphMetrics {
        let Some(&idx) = self.nodes.get(name) else {
            return ClassGraphMetrics::default();
        };

        let fan_in = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .count();
        let fan_out = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .count();
        let instability = if fan_in + fan_out > 0 {
            fan_out as f64 / (fan_in + fan_out) as f64
        } else {
            0.0
        };

        ClassGraphMetrics {
            fan_in,
            fan_out,
            instability,
            transitive_deps: self.count_transitive_deps(idx),
        }
    }

    fn count_transitive_deps(&self, start: NodeIndex) -> usize {
        let mut dfs = Dfs::new(&self.graph, start);
        // Skip the starting node itself
        dfs.next(&self.graph);

        let mut count = 0;
        while dfs.next(&self.graph).is_some() {
            count += 1;
        }
        count
    }

    pub fn find_cycles(&self) -> CycleInfo {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut names: Vec<String> = scc.into_iter().map(|idx| self.graph[idx].clone()).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        CycleInfo { cycles }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Coupling numbers for one analyzed class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouplingRow {
    pub class_name: String,
    pub metrics: ClassGraphMetrics,
}

/// One row per analyzed class, in the order of `classes`. Classes sharing a
/// qualified name share a row.
#[must_use]
pub fn collect_coupling(graph: &DependencyGraph, classes: &[ClassRecord]) -> Vec<CouplingRow> {
    let mut seen = std::collections::HashSet::new();
    classes
        .iter()
        .map(ClassRecord::qualified_name)
        .filter(|name| seen.insert(name.clone()))
        .map(|class_name| {
            let metrics = graph.class_metrics(&class_name);
            CouplingRow { class_name, metrics }
        })
        .collect()
}
