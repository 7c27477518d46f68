//! Interfaces to the records a sheet is built from.
//!
//! The web layer owns persistence, these traits are the narrow surface the sheet logic reads
//! and writes through. [`MemoryStore`] is a complete implementation kept in memory,
//! used by the terminal front end and the tests.
//!
//! Lookups of a single record return [`NotFound`](crate::NotFound) when absent.

use crate::sheet::*;

mod memory;
pub use memory::MemoryStore;

pub trait AssignmentStore {
	fn assignment(&self, id: AssignmentId) -> crate::Result<Assignment>;
}

pub trait TopicStore {
	fn topic(&self, id: TopicId) -> crate::Result<Topic>;
	fn topics_for_assignment(&self, assignment_id: AssignmentId) -> crate::Result<Vec<Topic>>;
	fn find_topic_by_name(&self, assignment_id: AssignmentId, name: &str) -> crate::Result<Option<Topic>>;
	/// Stores a new topic and returns the id it was given.
	fn insert_topic(&mut self, assignment_id: AssignmentId, topic: NewTopic) -> crate::Result<TopicId>;
	fn save_topic(&mut self, topic: &Topic) -> crate::Result<()>;
	fn delete_topic(&mut self, id: TopicId) -> crate::Result<()>;
}

pub trait SignupStore {
	/// Every signup for the topic, ascending by [`SignupRecord::sequence`].
	fn signups_for_topic(&self, topic_id: TopicId) -> crate::Result<Vec<SignupRecord>>;
	/// Every signup the team holds in the assignment, ascending by [`SignupRecord::sequence`].
	fn signups_for_team(&self, assignment_id: AssignmentId, team_id: TeamId) -> crate::Result<Vec<SignupRecord>>;
	/// Stores a new signup, assigning the next sequence number.
	fn insert_signup(&mut self, topic_id: TopicId, team_id: TeamId, status: SignupStatus) -> crate::Result<SignupRecord>;
	/// Updates status and priority of an existing signup.
	fn save_signup(&mut self, signup: &SignupRecord) -> crate::Result<()>;
	fn delete_signup(&mut self, topic_id: TopicId, team_id: TeamId) -> crate::Result<()>;
}

pub trait TeamStore {
	fn team(&self, id: TeamId) -> crate::Result<Team>;
}

pub trait DependencyStore {
	fn dependencies_for_assignment(&self, assignment_id: AssignmentId) -> crate::Result<Vec<TopicDependency>>;
	/// Replaces every dependency between topics of the assignment with `dependencies`.
	fn replace_dependencies(&mut self, assignment_id: AssignmentId, dependencies: &[TopicDependency]) -> crate::Result<()>;
	/// Removes edges from and to the topic.
	fn delete_dependencies_for_topic(&mut self, topic_id: TopicId) -> crate::Result<()>;
}

pub trait DeadlineStore {
	fn topic_deadline(&self, topic_id: TopicId, deadline_type: DeadlineType, round: Option<u32>) -> crate::Result<Option<TopicDeadline>>;
	fn deadlines_for_assignment(&self, assignment_id: AssignmentId) -> crate::Result<Vec<TopicDeadline>>;
	/// Inserts the deadline or replaces the one with the same topic, type and round.
	fn save_topic_deadline(&mut self, deadline: &TopicDeadline) -> crate::Result<()>;
	fn delete_deadlines_for_topic(&mut self, topic_id: TopicId) -> crate::Result<()>;
}

/// Everything a sheet needs, plus a unit of work.
pub trait SheetStore: AssignmentStore + TopicStore + SignupStore + TeamStore + DependencyStore + DeadlineStore {
	/// Runs `f` so no other change to `topic_id` interleaves with it.
	///
	/// If `f` fails none of its writes may remain. Implementations backed by a database
	/// use a transaction (or lock the topic's row), reading signups, deciding and writing
	/// all happen inside `f`.
	fn atomically<T, F>(&mut self, topic_id: TopicId, f: F) -> crate::Result<T>
	where
		Self: Sized,
		F: FnOnce(&mut Self) -> crate::Result<T>;
}
