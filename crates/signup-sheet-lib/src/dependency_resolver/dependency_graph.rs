//! Module for only DependencyGraph functions not related to the layering.

use std::collections::HashMap;
use std::hash::Hash;

use petgraph::prelude::*;
use serde::{Serialize, Deserialize};

use crate::sheet::{DependsOn, TopicId};

/// Directed graph of topics, an edge points from a topic to the topic it depends on.
///
/// Nodes are labelled with `L`, a [`TopicId`] when ordering and something readable when exporting.
/// Each label appears once no matter how many pairs mention it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyGraph<L = TopicId>
where L: Clone + Eq + Hash,
{
	pub graph: StableDiGraph<L, EdgeData>,
	nodes: HashMap<L, NodeIndex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeData {
	/// The source can't be attempted until the target is done.
	DependsOn,
}

impl std::fmt::Display for EdgeData {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			EdgeData::DependsOn => write!(f, "depends on"),
		}
	}
}

impl DependencyGraph<TopicId> {
	/// Builds a graph keyed by topic id.
	///
	/// Pairs with [`DependsOn::Nothing`] only add their topic.
	pub fn by_id(pairs: impl IntoIterator<Item = (TopicId, DependsOn)>) -> Self {
		let mut dg = Self::default();
		for (topic, depends_on) in pairs {
			let src = dg.get_or_add_node_index(topic);
			if let DependsOn::Topic(target) = depends_on {
				let dst = dg.get_or_add_node_index(target);
				dg.graph.update_edge(src, dst, EdgeData::DependsOn);
			}
		}
		dg
	}
}

impl<L> DependencyGraph<L>
where L: Clone + Eq + Hash,
{
	/// Builds a graph whose nodes are labelled by `label`, e.g. with a topic's name.
	///
	/// Fails with the first error `label` returns.
	pub fn with_labels<F>(pairs: impl IntoIterator<Item = (TopicId, DependsOn)>, mut label: F) -> crate::Result<Self>
	where F: FnMut(TopicId) -> crate::Result<L>,
	{
		let mut dg = Self::default();
		for (topic, depends_on) in pairs {
			let src = dg.get_or_add_node_index(label(topic)?);
			if let DependsOn::Topic(target) = depends_on {
				let dst = dg.get_or_add_node_index(label(target)?);
				dg.graph.update_edge(src, dst, EdgeData::DependsOn);
			}
		}
		Ok(dg)
	}

	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	pub fn edge_count(&self) -> usize {
		self.graph.edge_count()
	}

	pub fn contains(&self, label: &L) -> bool {
		self.nodes.contains_key(label)
	}

	pub fn labels(&self) -> impl Iterator<Item = &L> {
		self.graph.node_weights()
	}

	/// `(dependent, dependency)` for every edge.
	pub fn edges(&self) -> impl Iterator<Item = (&L, &L)> {
		self.graph.edge_indices()
			.filter_map(|e| self.graph.edge_endpoints(e))
			.map(|(src, dst)| (&self.graph[src], &self.graph[dst]))
	}

	/// Whether the graph has no directed cycle, a topic depending on itself counts as one.
	pub fn is_acyclic(&self) -> bool {
		!petgraph::algo::is_cyclic_directed(&self.graph)
	}

	/// Every topic ordered so each comes after all the topics it depends on.
	///
	/// # Errors
	/// - [`CyclicDependency`](crate::Error::CyclicDependency) when the graph has a cycle.
	pub fn topological_order(&self) -> crate::Result<Vec<L>> {
		/* Edges point at dependencies, walking them reversed puts dependencies first */
		let order = petgraph::algo::toposort(petgraph::visit::Reversed(&self.graph), None)
			.map_err(|cycle| {
				log::debug!("Topological sort hit a cycle at node {}", cycle.node_id().index());
				crate::Error::CyclicDependency
			})?;
		Ok(order.into_iter().map(|i| self.graph[i].clone()).collect())
	}

	fn get_or_add_node_index(&mut self, label: L) -> NodeIndex {
		if let Some(i) = self.nodes.get(&label) {
			return *i;
		}
		let i = self.graph.add_node(label.clone());
		self.nodes.insert(label, i);
		i
	}
}

impl<L> Default for DependencyGraph<L>
where L: Clone + Eq + Hash,
{
	fn default() -> Self {
		Self { graph: Default::default(), nodes: Default::default() }
	}
}
