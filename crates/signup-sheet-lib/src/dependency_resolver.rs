//! Ordering topics by their dependencies for staggered deadlines.
//!
//! # Usage
//! 1. Flatten the submitted selections into `(topic, depends_on)` pairs with [`DependencySelection::pairs()`](crate::sheet::DependencySelection::pairs()).
//! 1. [`DependencyGraph::by_id()`] to build the graph keyed by topic id,
//! or [`DependencyGraph::with_labels()`] to key it by anything else, such as topic names for display.
//! 1. [`DependencyGraph::is_acyclic()`], nothing else is defined for a cyclic graph.
//! 1. [`DependencyGraph::topological_order()`] for a total order and [`DependencyGraph::layers()`]
//! for the groups of topics that share a start time.
//! 1. [`export::write_dot()`] to save a diagram of the graph.

mod dependency_graph;
pub use dependency_graph::DependencyGraph;
pub use dependency_graph::EdgeData;

mod layers;
pub use layers::Layers;

pub mod export;
