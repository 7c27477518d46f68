//! Writing the dependency graph out as a Graphviz diagram.
//!
//! The diagram is only for people to look at, nothing reads it back. Edges taking part in a
//! cycle are drawn red so a cyclic graph shows where it needs fixing.

use std::collections::HashSet;
use std::hash::Hash;

use petgraph::dot::{Config, Dot};
use petgraph::prelude::*;
use petgraph::visit::NodeIndexable;

use super::{DependencyGraph, EdgeData};
use crate::sheet::AssignmentId;

/// Where the diagram of an assignment's dependencies is written.
pub fn graph_path(config: &crate::Config, assignment_id: AssignmentId) -> std::path::PathBuf {
	config.graph_output_dir().join(format!("graph_{}.dot", assignment_id))
}

impl<L> DependencyGraph<L>
where L: Clone + Eq + Hash + std::fmt::Display,
{
	/// Edges whose endpoints are in the same strongly connected component.
	pub fn cyclic_edges(&self) -> HashSet<EdgeIndex> {
		let mut component = vec![usize::MAX; self.graph.node_bound()];
		for (c, scc) in petgraph::algo::tarjan_scc(&self.graph).into_iter().enumerate() {
			for i in scc {
				component[i.index()] = c;
			}
		}

		self.graph.edge_indices()
			.filter(|e| match self.graph.edge_endpoints(*e) {
				Some((src, dst)) => component[src.index()] == component[dst.index()],
				None => false,
			})
			.collect()
	}

	/// The graph in Graphviz dot format, nodes labelled with `L`.
	pub fn to_dot(&self) -> String {
		let cyclic = self.cyclic_edges();
		let edge_attrs = |_, edge: petgraph::stable_graph::EdgeReference<'_, EdgeData>| {
			if cyclic.contains(&edge.id()) { "color = red".to_string() } else { String::new() }
		};
		let node_attrs = |_, _| String::new();
		let dot = Dot::with_attr_getters(&self.graph, &[Config::EdgeNoLabel], &edge_attrs, &node_attrs);
		format!("{}", dot)
	}
}

/// Writes `graph` to `path` in dot format, creating parent directories.
pub fn write_dot<L>(graph: &DependencyGraph<L>, path: impl AsRef<std::path::Path>) -> crate::Result<()>
where L: Clone + Eq + Hash + std::fmt::Display,
{
	let path = path.as_ref();
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, graph.to_dot())?;
	log::debug!("Wrote dependency graph to {}", path.display());
	Ok(())
}
