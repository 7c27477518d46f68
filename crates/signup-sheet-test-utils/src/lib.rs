//! Various helper functions for testing
//!
//! functions in this module should use results and not use any panics to avoid confusion in callers

use signup_sheet::sheet::*;
use signup_sheet::store::TopicStore;
use signup_sheet::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
	#[error("Sign-up sheet error: {0}")]
	Sheet(#[from] signup_sheet::Error),
	#[error("Invalid date \"{0}\": {1}")]
	Date(String, chrono::ParseError),
}

/// Parses `%Y-%m-%d %H:%M` into a date time.
pub fn datetime(s: &str) -> Result<chrono::NaiveDateTime, FixtureError> {
	chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
		.map_err(|e| FixtureError::Date(s.to_string(), e))
}

/// Gets a config writing everything below `dir`, graph export enabled.
pub fn config_in(dir: &tempfile::TempDir) -> signup_sheet::Config {
	let mut config = signup_sheet::Config::default();
	config.set_data_dir(dir.path().to_path_buf());
	config.set_graph_output_dir(dir.path().join("graphs"));
	config.set_export_dependency_graph(true);
	config
}

/// Builds a [`MemoryStore`] holding one assignment.
///
/// Topics are created in the order they were added, the ids handed out come back from
/// [`build()`](SheetFixture::build()) in the same order.
#[derive(Debug, Clone)]
pub struct SheetFixture {
	assignment: Assignment,
	topics: Vec<NewTopic>,
	teams: Vec<Team>,
}

impl SheetFixture {
	/// A staggered deadline assignment with two review rounds and no due dates.
	pub fn new(id: u64) -> Self {
		Self {
			assignment: Assignment {
				id: AssignmentId::from(id),
				name: format!("Assignment {}", id),
				staggered_deadline: true,
				microtask: false,
				review_rounds: 2,
				days_between_submissions: 0,
				due_dates: vec![],
			},
			topics: vec![],
			teams: vec![],
		}
	}

	pub fn microtask(mut self) -> Self {
		self.assignment.microtask = true;
		self
	}

	pub fn review_rounds(mut self, rounds: u32) -> Self {
		self.assignment.review_rounds = rounds;
		self
	}

	pub fn days_between_submissions(mut self, days: u32) -> Self {
		self.assignment.days_between_submissions = days;
		self
	}

	/// Adds an assignment due date, `due_at` as accepted by [`datetime()`].
	pub fn due_date(mut self, deadline_type: DeadlineType, round: Option<u32>, due_at: &str) -> Result<Self, FixtureError> {
		self.assignment.due_dates.push(AssignmentDueDate { deadline_type, round, due_at: datetime(due_at)? });
		Ok(self)
	}

	/// Adds submission and review due dates for every round a week apart starting at `first`,
	/// and a meta review due date after the last round.
	pub fn weekly_due_dates(mut self, first: &str) -> Result<Self, FixtureError> {
		let start = datetime(first)?;
		let week = chrono::Duration::days(7);
		let mut at = start;
		for round in 1..=self.assignment.review_rounds {
			for deadline_type in [DeadlineType::Submission, DeadlineType::Review] {
				self.assignment.due_dates.push(AssignmentDueDate { deadline_type, round: Some(round), due_at: at });
				at += week;
			}
		}
		self.assignment.due_dates.push(AssignmentDueDate { deadline_type: DeadlineType::Metareview, round: None, due_at: at });
		Ok(self)
	}

	/// Adds a topic named `name` with the identifier `T<n>`.
	pub fn topic(mut self, name: &str, max_choosers: u32) -> Self {
		let n = self.topics.len() + 1;
		self.topics.push(NewTopic {
			name: name.to_string(),
			identifier: format!("T{}", n),
			category: String::new(),
			max_choosers,
			micropayment: None,
		});
		self
	}

	/// Adds a team with one member.
	pub fn team(mut self, id: u64) -> Self {
		self.teams.push(Team {
			id: TeamId::from(id),
			name: format!("Team {}", id),
			advertisement: None,
			members: vec![format!("student{}", id)],
		});
		self
	}

	pub fn assignment_id(&self) -> AssignmentId {
		self.assignment.id
	}

	pub fn build(self) -> Result<(MemoryStore, Vec<TopicId>), FixtureError> {
		let mut store = MemoryStore::new();
		let assignment_id = self.assignment.id;
		store.put_assignment(self.assignment);
		for team in self.teams {
			store.put_team(team);
		}
		let mut ids = Vec::with_capacity(self.topics.len());
		for topic in self.topics {
			ids.push(store.insert_topic(assignment_id, topic)?);
		}
		Ok((store, ids))
	}
}

/// Turns `(topic, [depends on])` index pairs into selections over `ids`.
///
/// Indices out of range are skipped.
pub fn selections(ids: &[TopicId], deps: &[(usize, &[usize])]) -> Vec<DependencySelection> {
	deps.iter()
		.filter_map(|(topic, on)| {
			let topic_id = *ids.get(*topic)?;
			let depends_on = on.iter()
				.filter_map(|i| ids.get(*i))
				.map(|id| id.to_string())
				.collect();
			Some(DependencySelection { topic_id, depends_on })
		})
		.collect()
}
