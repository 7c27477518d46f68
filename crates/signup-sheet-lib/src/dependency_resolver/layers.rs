//! Grouping topics into layers that share a start time.
//!
//! Layers are peeled from the graph walked in reverse: each round takes every topic nothing
//! left depends on, removes them together and releases the topics they depend on. The rounds
//! are then reversed, so the last layer holds every topic no other topic depends on and each
//! topic lands in a later layer than all of its dependencies.

use std::collections::BTreeSet;
use std::hash::Hash;

use petgraph::prelude::*;
use petgraph::visit::NodeIndexable;

use super::DependencyGraph;

/// Ordered groups of topics, every topic is in exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layers<L> {
	layers: Vec<BTreeSet<L>>,
}

impl<L: Ord> Layers<L> {
	pub fn len(&self) -> usize {
		self.layers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.layers.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, BTreeSet<L>> {
		self.layers.iter()
	}

	pub fn get(&self, index: usize) -> Option<&BTreeSet<L>> {
		self.layers.get(index)
	}

	/// Index of the layer containing `label`.
	pub fn layer_of(&self, label: &L) -> Option<usize> {
		self.layers.iter().position(|layer| layer.contains(label))
	}

	pub fn into_inner(self) -> Vec<BTreeSet<L>> {
		self.layers
	}
}

impl<'a, L> IntoIterator for &'a Layers<L> {
	type Item = &'a BTreeSet<L>;
	type IntoIter = std::slice::Iter<'a, BTreeSet<L>>;

	fn into_iter(self) -> Self::IntoIter {
		self.layers.iter()
	}
}

impl<L> DependencyGraph<L>
where L: Clone + Eq + Hash + Ord,
{
	/// Partitions the topics into layers with a common start time.
	///
	/// # Errors
	/// - [`CyclicDependency`](crate::Error::CyclicDependency) when a round finds nothing to peel,
	/// which only happens when what's left contains a cycle.
	pub fn layers(&self) -> crate::Result<Layers<L>> {
		/* Outstanding dependents per node, indexed by node index. `None` once peeled */
		let mut pending: Vec<Option<usize>> = vec![None; self.graph.node_bound()];
		for i in self.graph.node_indices() {
			pending[i.index()] = Some(self.graph.neighbors_directed(i, Incoming).count());
		}

		let mut layers = Vec::<BTreeSet<L>>::new();
		let mut remaining = self.graph.node_count();

		while remaining > 0 {
			/* The whole round is decided on the counts as they were at its start */
			let ready: Vec<NodeIndex> = self.graph.node_indices()
				.filter(|i| pending[i.index()] == Some(0))
				.collect();

			if ready.is_empty() {
				log::debug!("Layering stopped with {} topic(s) left in a cycle", remaining);
				return Err(crate::Error::CyclicDependency);
			}

			for &i in &ready {
				pending[i.index()] = None;
				for dependency in self.graph.neighbors_directed(i, Outgoing) {
					if let Some(n) = pending[dependency.index()].as_mut() {
						*n -= 1;
					}
				}
			}

			remaining -= ready.len();
			log::trace!("Peeled {} topic(s) in round {}", ready.len(), layers.len());
			layers.push(ready.into_iter().map(|i| self.graph[i].clone()).collect());
		}

		/* Peeled from the topics nothing depends on, dependencies come first */
		layers.reverse();
		Ok(Layers { layers })
	}
}
