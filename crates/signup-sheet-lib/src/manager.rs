//! The operations an instructor or student performs on a sign-up sheet.
//!
//! [`SignupSheet`] pairs a store with the library [`Config`](crate::Config). Every operation
//! takes the [`Notices`] to report to explicitly.

use std::collections::BTreeSet;

use crate::Notices;
use crate::NotFound;
use crate::deadline::{self, DeadlineEdit, DeadlineRow};
use crate::dependency_resolver::{export, DependencyGraph, Layers};
use crate::sheet::*;
use crate::signup::{self, SlotSummary, TeamAdvertisement};
use crate::store::*;
use crate::waitlist::Reconciliation;

/// The result of saving an acyclic set of dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyResolution {
	/// Topics sharing a start time, dependencies first.
	pub layers: Layers<TopicId>,
	/// Every topic after the topics it depends on.
	pub topological_order: Vec<TopicId>,
	/// Number of deadlines copied from the assignment.
	pub deadlines_created: usize,
}

#[derive(Debug)]
pub struct SignupSheet<S: SheetStore> {
	store: S,
	config: crate::Config,
}

impl<S: SheetStore> SignupSheet<S> {
	pub fn new(store: S, config: crate::Config) -> Self {
		Self { store, config }
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn store_mut(&mut self) -> &mut S {
		&mut self.store
	}

	pub fn into_store(self) -> S {
		self.store
	}

	pub fn config(&self) -> &crate::Config {
		&self.config
	}

	/* Topics */

	/// Adds a topic to the assignment.
	///
	/// If the assignment already has a topic with this name that topic is updated instead,
	/// its capacity going through the waitlist like [`update_topic()`](Self::update_topic()).
	pub fn create_topic(&mut self, notices: &mut Notices, assignment_id: AssignmentId, new: NewTopic) -> crate::Result<TopicId> {
		let assignment = self.store.assignment(assignment_id)?;

		if let Some(existing) = self.store.find_topic_by_name(assignment_id, &new.name)? {
			log::debug!("Topic \"{}\" already exists in assignment {}, updating it", new.name, assignment_id);
			let update = TopicUpdate {
				identifier: Some(new.identifier),
				category: Some(new.category),
				max_choosers: Some(new.max_choosers),
				..Default::default()
			};
			self.update_topic(notices, existing.id, update)?;
			return Ok(existing.id);
		}

		let new = NewTopic {
			micropayment: if assignment.microtask { new.micropayment } else { None },
			..new
		};
		let name = new.name.clone();
		let id = self.store.insert_topic(assignment_id, new)?;
		log::info!("Created topic {} \"{}\" in assignment {}", id, name, assignment_id);
		notices.info(format!("Topic: \"{}\" has been created successfully.", name));
		Ok(id)
	}

	/// Adds the placeholder topic microtask assignments start with.
	pub fn add_default_microtask(&mut self, notices: &mut Notices, assignment_id: AssignmentId) -> crate::Result<TopicId> {
		self.store.assignment(assignment_id)?;
		let id = self.store.insert_topic(assignment_id, NewTopic {
			name: "Microtask Topic".to_string(),
			identifier: "MT1".to_string(),
			category: String::new(),
			max_choosers: 0,
			micropayment: Some(0),
		})?;
		notices.info("Default Microtask topic was created - please update.");
		Ok(id)
	}

	/// Edits a topic.
	///
	/// A refused capacity change is reported as a notice, the other fields are still saved.
	pub fn update_topic(&mut self, notices: &mut Notices, topic_id: TopicId, update: TopicUpdate) -> crate::Result<()> {
		if let Some(requested) = update.max_choosers {
			self.change_capacity(notices, topic_id, requested)?;
		}

		let mut topic = self.store.topic(topic_id)?;
		topic.apply_details(&update);
		self.store.save_topic(&topic)?;
		log::info!("Updated topic {} \"{}\"", topic.id, topic.name);
		notices.info(format!("Topic: \"{}\" has been updated successfully.", topic.name));
		Ok(())
	}

	/// See [`signup::change_capacity()`].
	pub fn change_capacity(&mut self, notices: &mut Notices, topic_id: TopicId, requested: u32) -> crate::Result<Option<Reconciliation>> {
		signup::change_capacity(&mut self.store, notices, topic_id, requested)
	}

	/// Deletes a topic along with its signups, deadlines and the dependencies from and to it.
	pub fn destroy_topic(&mut self, notices: &mut Notices, topic_id: TopicId) -> crate::Result<()> {
		let topic = self.store.topic(topic_id)?;

		self.store.delete_deadlines_for_topic(topic_id)?;
		self.store.delete_dependencies_for_topic(topic_id)?;
		self.store.delete_topic(topic_id)?;

		log::info!("Deleted topic {} \"{}\"", topic_id, topic.name);
		notices.info(format!("Topic: \"{}\" has been deleted successfully.", topic.name));
		Ok(())
	}

	pub fn topics(&self, assignment_id: AssignmentId) -> crate::Result<Vec<Topic>> {
		self.store.topics_for_assignment(assignment_id)
	}

	/* Signups */

	/// See [`signup::sign_up_team()`].
	pub fn sign_up_team(&mut self, notices: &mut Notices, assignment_id: AssignmentId, team_id: TeamId, topic_id: TopicId) -> crate::Result<SignupStatus> {
		signup::sign_up_team(&mut self.store, notices, assignment_id, team_id, topic_id)
	}

	/// See [`signup::withdraw_signup()`].
	pub fn withdraw_signup(&mut self, assignment_id: AssignmentId, team_id: TeamId, topic_id: TopicId) -> crate::Result<Option<TeamId>> {
		signup::withdraw_signup(&mut self.store, assignment_id, team_id, topic_id)
	}

	/// See [`signup::set_priority()`].
	pub fn set_priority(&mut self, notices: &mut Notices, assignment_id: AssignmentId, team_id: TeamId, topic_id: TopicId, raw: &str) -> crate::Result<bool> {
		signup::set_priority(&mut self.store, notices, assignment_id, team_id, topic_id, raw)
	}

	pub fn slot_summary(&self, assignment_id: AssignmentId) -> crate::Result<Vec<SlotSummary>> {
		signup::slot_summary(&self.store, assignment_id)
	}

	pub fn team_advertisements(&self, topic_id: TopicId) -> crate::Result<Vec<TeamAdvertisement>> {
		signup::team_advertisements(&self.store, topic_id)
	}

	/* Dependencies */

	/// Saves the dependencies picked for the assignment's topics and derives the staggered deadlines.
	///
	/// Topics of the assignment missing from `selections` depend on nothing. The dependencies are
	/// saved before they're checked, so a cyclic set is kept for the instructor to correct.
	/// When enabled a diagram of the graph is written whatever the outcome, failing to write it
	/// only logs a warning.
	///
	/// # Errors
	/// - [`CyclicDependency`](crate::Error::CyclicDependency) when the dependencies form a cycle,
	/// a notice is added and no deadlines are assigned.
	/// - [`NotFound`](crate::Error::NotFound) when a selection names a topic outside the assignment.
	pub fn save_topic_dependencies(&mut self, notices: &mut Notices, assignment_id: AssignmentId, selections: &[DependencySelection]) -> crate::Result<DependencyResolution> {
		self.store.assignment(assignment_id)?;
		let topics = self.store.topics_for_assignment(assignment_id)?;
		let known: BTreeSet<TopicId> = topics.iter().map(|t| t.id).collect();

		let mut pairs = Vec::new();
		for topic in &topics {
			let selection = selections.iter().find(|s| s.topic_id == topic.id);
			match selection {
				Some(selection) => pairs.extend(selection.pairs()?),
				None => pairs.push((topic.id, DependsOn::Nothing)),
			}
		}
		for selection in selections {
			if !known.contains(&selection.topic_id) {
				return Err(NotFound::Topic(selection.topic_id).into());
			}
		}
		for (_, depends_on) in &pairs {
			if let DependsOn::Topic(target) = depends_on {
				if !known.contains(target) {
					return Err(NotFound::Topic(*target).into());
				}
			}
		}

		let dependencies: Vec<TopicDependency> = pairs.iter()
			.filter_map(|(topic_id, depends_on)| match depends_on {
				DependsOn::Topic(target) => Some(TopicDependency { topic_id: *topic_id, depends_on: *target }),
				DependsOn::Nothing => None,
			})
			.collect();
		self.store.replace_dependencies(assignment_id, &dependencies)?;
		log::info!("Saved {} dependencies for assignment {}", dependencies.len(), assignment_id);

		let resolution = self.resolve_dependencies(assignment_id, &pairs);

		if self.config.export_dependency_graph() {
			self.export_dependency_graph(assignment_id, &pairs, &topics);
		}

		if let Err(e @ crate::Error::CyclicDependency) = &resolution {
			log::warn!("Dependencies of assignment {} are cyclic", assignment_id);
			notices.error(e.to_string());
		}
		resolution
	}

	fn resolve_dependencies(&mut self, assignment_id: AssignmentId, pairs: &[(TopicId, DependsOn)]) -> crate::Result<DependencyResolution> {
		let dg = DependencyGraph::<TopicId>::by_id(pairs.iter().copied());
		if !dg.is_acyclic() {
			return Err(crate::Error::CyclicDependency);
		}

		let layers = dg.layers()?;
		let topological_order = dg.topological_order()?;
		let deadlines_created = deadline::assign_deadlines(&mut self.store, assignment_id, &layers)?;

		Ok(DependencyResolution { layers, topological_order, deadlines_created })
	}

	/// Writes the assignment's graph keyed by topic name. Failures are only logged.
	fn export_dependency_graph(&self, assignment_id: AssignmentId, pairs: &[(TopicId, DependsOn)], topics: &[Topic]) {
		let name_of = |id: TopicId| -> crate::Result<String> {
			topics.iter()
				.find(|t| t.id == id)
				.map(|t| t.name.clone())
				.ok_or_else(|| NotFound::Topic(id).into())
		};

		let path = export::graph_path(&self.config, assignment_id);
		let res = DependencyGraph::with_labels(pairs.iter().copied(), name_of)
			.and_then(|dg| export::write_dot(&dg, &path));
		if let Err(e) = res {
			log::warn!("Failed to write dependency graph to {}: {}", path.display(), e);
		}
	}

	/* Deadlines */

	/// See [`deadline::staggered_deadline_table()`].
	pub fn staggered_deadline_table(&mut self, assignment_id: AssignmentId) -> crate::Result<Vec<DeadlineRow>> {
		deadline::staggered_deadline_table(&mut self.store, &self.config, assignment_id)
	}

	/// See [`deadline::save_topic_deadlines()`].
	pub fn save_topic_deadlines(&mut self, notices: &mut Notices, assignment_id: AssignmentId, edits: &[DeadlineEdit]) -> crate::Result<usize> {
		deadline::save_topic_deadlines(&mut self.store, &self.config, notices, assignment_id, edits)
	}
}
