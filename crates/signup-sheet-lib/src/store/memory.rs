use serde::{Serialize, Deserialize};

use crate::NotFound;
use super::*;

/// A sheet store held entirely in memory.
///
/// Serializes to JSON so a whole sheet can be kept in one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStore {
	assignments: Vec<Assignment>,
	topics: Vec<Topic>,
	teams: Vec<Team>,
	signups: Vec<SignupRecord>,
	dependencies: Vec<TopicDependency>,
	deadlines: Vec<TopicDeadline>,
	next_topic_id: u64,
	next_sequence: u64,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces an assignment.
	pub fn put_assignment(&mut self, assignment: Assignment) {
		self.assignments.retain(|a| a.id != assignment.id);
		self.assignments.push(assignment);
	}

	/// Adds or replaces a team.
	pub fn put_team(&mut self, team: Team) {
		self.teams.retain(|t| t.id != team.id);
		self.teams.push(team);
	}

	pub fn signups(&self) -> &[SignupRecord] {
		&self.signups
	}

	pub fn dependencies(&self) -> &[TopicDependency] {
		&self.dependencies
	}

	pub fn deadlines(&self) -> &[TopicDeadline] {
		&self.deadlines
	}

	/// # Errors
	/// - [`IO`](crate::Error::IO) when opening or reading from the file.
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when deserializing the file.
	pub fn load_from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path)?;
		Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
	}

	pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
		let path = path.as_ref();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		let file = std::fs::File::create(path)?;
		serde_json::to_writer_pretty(file, self)?;
		Ok(())
	}

	fn topic_ids_of(&self, assignment_id: AssignmentId) -> Vec<TopicId> {
		self.topics.iter().filter(|t| t.assignment_id == assignment_id).map(|t| t.id).collect()
	}
}

impl AssignmentStore for MemoryStore {
	fn assignment(&self, id: AssignmentId) -> crate::Result<Assignment> {
		self.assignments.iter()
			.find(|a| a.id == id)
			.cloned()
			.ok_or_else(|| NotFound::Assignment(id).into())
	}
}

impl TopicStore for MemoryStore {
	fn topic(&self, id: TopicId) -> crate::Result<Topic> {
		self.topics.iter()
			.find(|t| t.id == id)
			.cloned()
			.ok_or_else(|| NotFound::Topic(id).into())
	}

	fn topics_for_assignment(&self, assignment_id: AssignmentId) -> crate::Result<Vec<Topic>> {
		Ok(self.topics.iter().filter(|t| t.assignment_id == assignment_id).cloned().collect())
	}

	fn find_topic_by_name(&self, assignment_id: AssignmentId, name: &str) -> crate::Result<Option<Topic>> {
		Ok(self.topics.iter().find(|t| t.assignment_id == assignment_id && t.name == name).cloned())
	}

	fn insert_topic(&mut self, assignment_id: AssignmentId, topic: NewTopic) -> crate::Result<TopicId> {
		/* Ids start at 1, 0 is the "no dependency" value */
		self.next_topic_id = self.next_topic_id.max(self.topics.iter().map(|t| t.id.0).max().unwrap_or(0)) + 1;
		let id = TopicId(self.next_topic_id);
		self.topics.push(Topic::new(id, assignment_id, topic));
		Ok(id)
	}

	fn save_topic(&mut self, topic: &Topic) -> crate::Result<()> {
		let existing = self.topics.iter_mut().find(|t| t.id == topic.id).ok_or(NotFound::Topic(topic.id))?;
		*existing = topic.clone();
		Ok(())
	}

	fn delete_topic(&mut self, id: TopicId) -> crate::Result<()> {
		let before = self.topics.len();
		self.topics.retain(|t| t.id != id);
		if self.topics.len() == before {
			return Err(NotFound::Topic(id).into());
		}
		self.signups.retain(|s| s.topic_id != id);
		Ok(())
	}
}

impl SignupStore for MemoryStore {
	fn signups_for_topic(&self, topic_id: TopicId) -> crate::Result<Vec<SignupRecord>> {
		let mut signups: Vec<_> = self.signups.iter().filter(|s| s.topic_id == topic_id).cloned().collect();
		signups.sort_by_key(|s| s.sequence);
		Ok(signups)
	}

	fn signups_for_team(&self, assignment_id: AssignmentId, team_id: TeamId) -> crate::Result<Vec<SignupRecord>> {
		let topics = self.topic_ids_of(assignment_id);
		let mut signups: Vec<_> = self.signups.iter()
			.filter(|s| s.team_id == team_id && topics.contains(&s.topic_id))
			.cloned()
			.collect();
		signups.sort_by_key(|s| s.sequence);
		Ok(signups)
	}

	fn insert_signup(&mut self, topic_id: TopicId, team_id: TeamId, status: SignupStatus) -> crate::Result<SignupRecord> {
		if self.signups.iter().any(|s| s.topic_id == topic_id && s.team_id == team_id) {
			return Err(crate::Error::AlreadyExists);
		}
		self.next_sequence += 1;
		let signup = SignupRecord { topic_id, team_id, status, sequence: self.next_sequence, priority: None };
		self.signups.push(signup.clone());
		Ok(signup)
	}

	fn save_signup(&mut self, signup: &SignupRecord) -> crate::Result<()> {
		let existing = self.signups.iter_mut()
			.find(|s| s.topic_id == signup.topic_id && s.team_id == signup.team_id)
			.ok_or(NotFound::Signup { topic: signup.topic_id, team: signup.team_id })?;
		existing.status = signup.status;
		existing.priority = signup.priority;
		Ok(())
	}

	fn delete_signup(&mut self, topic_id: TopicId, team_id: TeamId) -> crate::Result<()> {
		let before = self.signups.len();
		self.signups.retain(|s| !(s.topic_id == topic_id && s.team_id == team_id));
		if self.signups.len() == before {
			return Err(NotFound::Signup { topic: topic_id, team: team_id }.into());
		}
		Ok(())
	}
}

impl TeamStore for MemoryStore {
	fn team(&self, id: TeamId) -> crate::Result<Team> {
		self.teams.iter()
			.find(|t| t.id == id)
			.cloned()
			.ok_or_else(|| NotFound::Team(id).into())
	}
}

impl DependencyStore for MemoryStore {
	fn dependencies_for_assignment(&self, assignment_id: AssignmentId) -> crate::Result<Vec<TopicDependency>> {
		let topics = self.topic_ids_of(assignment_id);
		Ok(self.dependencies.iter().filter(|d| topics.contains(&d.topic_id)).copied().collect())
	}

	fn replace_dependencies(&mut self, assignment_id: AssignmentId, dependencies: &[TopicDependency]) -> crate::Result<()> {
		let topics = self.topic_ids_of(assignment_id);
		self.dependencies.retain(|d| !topics.contains(&d.topic_id));
		for d in dependencies {
			if !self.dependencies.contains(d) {
				self.dependencies.push(*d);
			}
		}
		Ok(())
	}

	fn delete_dependencies_for_topic(&mut self, topic_id: TopicId) -> crate::Result<()> {
		self.dependencies.retain(|d| d.topic_id != topic_id && d.depends_on != topic_id);
		Ok(())
	}
}

impl DeadlineStore for MemoryStore {
	fn topic_deadline(&self, topic_id: TopicId, deadline_type: DeadlineType, round: Option<u32>) -> crate::Result<Option<TopicDeadline>> {
		Ok(self.deadlines.iter()
			.find(|d| d.topic_id == topic_id && d.deadline_type == deadline_type && d.round == round)
			.cloned())
	}

	fn deadlines_for_assignment(&self, assignment_id: AssignmentId) -> crate::Result<Vec<TopicDeadline>> {
		let topics = self.topic_ids_of(assignment_id);
		Ok(self.deadlines.iter().filter(|d| topics.contains(&d.topic_id)).cloned().collect())
	}

	fn save_topic_deadline(&mut self, deadline: &TopicDeadline) -> crate::Result<()> {
		let existing = self.deadlines.iter_mut()
			.find(|d| d.topic_id == deadline.topic_id && d.deadline_type == deadline.deadline_type && d.round == deadline.round);
		if let Some(existing) = existing {
			existing.due_at = deadline.due_at;
		} else {
			self.deadlines.push(deadline.clone());
		}
		Ok(())
	}

	fn delete_deadlines_for_topic(&mut self, topic_id: TopicId) -> crate::Result<()> {
		self.deadlines.retain(|d| d.topic_id != topic_id);
		Ok(())
	}
}

impl SheetStore for MemoryStore {
	fn atomically<T, F>(&mut self, topic_id: TopicId, f: F) -> crate::Result<T>
	where
		F: FnOnce(&mut Self) -> crate::Result<T>,
	{
		/* `&mut self` already excludes other writers, only rollback is needed */
		log::trace!("Starting unit of work on topic {}", topic_id);
		let snapshot = self.clone();
		let res = f(self);
		if res.is_err() {
			log::debug!("Rolling back unit of work on topic {}", topic_id);
			*self = snapshot;
		}
		res
	}
}
