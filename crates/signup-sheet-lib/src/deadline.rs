//! Per topic deadlines for assignments with staggered deadlines.
//!
//! A topic without its own deadlines gets copies of the assignment's, shifted by
//! `days_between_submissions` for every dependency layer before it. After that the instructor
//! can edit them one by one, a bad value only affects its own field.

use crate::Notices;
use crate::NotFound;
use crate::dependency_resolver::Layers;
use crate::sheet::*;
use crate::store::*;

/// Which deadline of a topic a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineField {
	pub deadline_type: DeadlineType,
	pub round: Option<u32>,
}

impl std::fmt::Display for DeadlineField {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let round = self.round.unwrap_or(1);
		match self.deadline_type {
			DeadlineType::Submission if round > 1 => write!(f, "Resubmission deadline {}", round - 1),
			DeadlineType::Submission => write!(f, "Submission deadline"),
			DeadlineType::Review if round > 1 => write!(f, "Review deadline {}", round - 1),
			DeadlineType::Review => write!(f, "Review deadline"),
			DeadlineType::Metareview => write!(f, "Meta review deadline"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeadlineError {
	/// The value is empty or doesn't match the configured timestamp format.
	#[error("Please enter a valid {field}")]
	InvalidValue { field: DeadlineField, value: String },
}

/// One round of a topic's deadlines, rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundDeadlines {
	pub round: u32,
	pub submission: String,
	pub review: String,
}

/// A topic's deadlines, rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineRow {
	pub topic_id: TopicId,
	pub identifier: String,
	pub name: String,
	pub rounds: Vec<RoundDeadlines>,
	pub metareview: Option<String>,
}

/// Submitted values for one round, in the configured timestamp format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundDeadlineInput {
	pub submission: String,
	pub review: String,
}

/// Submitted deadlines for one topic. `rounds[0]` is round 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineEdit {
	pub topic_id: TopicId,
	pub rounds: Vec<RoundDeadlineInput>,
	/// `None` leaves the meta review deadline untouched.
	pub metareview: Option<String>,
}

pub fn parse_due_at(config: &crate::Config, field: DeadlineField, raw: &str) -> Result<chrono::NaiveDateTime, DeadlineError> {
	chrono::NaiveDateTime::parse_from_str(raw.trim(), config.timestamp_format())
		.map_err(|_| DeadlineError::InvalidValue { field, value: raw.to_string() })
}

pub fn format_due_at(config: &crate::Config, due_at: &chrono::NaiveDateTime) -> String {
	due_at.format(config.timestamp_format()).to_string()
}

/// Creates any deadline `topic_id` is missing by copying the assignment's, `offset_days` later.
///
/// Existing deadlines are left alone. A missing meta review deadline is only created when the
/// assignment has one. Returns how many were created.
///
/// # Errors
/// - [`NotFound`](crate::Error::NotFound) when the assignment lacks a submission or review due date for a round.
pub fn ensure_topic_deadlines<S: DeadlineStore>(store: &mut S, assignment: &Assignment, topic_id: TopicId, offset_days: u32) -> crate::Result<usize> {
	let offset = chrono::Duration::days(i64::from(offset_days));
	let mut created = 0;

	for round in 1..=assignment.review_rounds {
		for deadline_type in [DeadlineType::Submission, DeadlineType::Review] {
			if store.topic_deadline(topic_id, deadline_type, Some(round))?.is_some() {
				continue;
			}
			let due = assignment.due_date(deadline_type, Some(round))
				.ok_or(NotFound::AssignmentDueDate { deadline_type, round: Some(round) })?;
			store.save_topic_deadline(&TopicDeadline { topic_id, deadline_type, round: Some(round), due_at: due.due_at + offset })?;
			created += 1;
		}
	}

	if store.topic_deadline(topic_id, DeadlineType::Metareview, None)?.is_none() {
		if let Some(due) = assignment.due_date(DeadlineType::Metareview, None) {
			store.save_topic_deadline(&TopicDeadline { topic_id, deadline_type: DeadlineType::Metareview, round: None, due_at: due.due_at + offset })?;
			created += 1;
		}
	}

	if created > 0 {
		log::debug!("Copied {} deadline(s) from assignment {} to topic {}", created, assignment.id, topic_id);
	}
	Ok(created)
}

/// Makes sure every topic in `layers` has its deadlines, layer `k` offset by `k` times the
/// assignment's `days_between_submissions`.
pub fn assign_deadlines<S: AssignmentStore + DeadlineStore>(store: &mut S, assignment_id: AssignmentId, layers: &Layers<TopicId>) -> crate::Result<usize> {
	let assignment = store.assignment(assignment_id)?;
	let mut created = 0;
	for (k, layer) in layers.iter().enumerate() {
		let offset_days = assignment.days_between_submissions.saturating_mul(k as u32);
		for topic_id in layer {
			created += ensure_topic_deadlines(store, &assignment, *topic_id, offset_days)?;
		}
	}
	log::info!("Assigned deadlines over {} layer(s) of assignment {}, {} created", layers.len(), assignment_id, created);
	Ok(created)
}

/// The deadlines of every topic in the assignment, copying the assignment's to topics lacking them.
pub fn staggered_deadline_table<S: AssignmentStore + TopicStore + DeadlineStore>(store: &mut S, config: &crate::Config, assignment_id: AssignmentId) -> crate::Result<Vec<DeadlineRow>> {
	let assignment = store.assignment(assignment_id)?;
	let mut rows = Vec::new();

	for topic in store.topics_for_assignment(assignment_id)? {
		ensure_topic_deadlines(store, &assignment, topic.id, 0)?;

		let mut rounds = Vec::new();
		for round in 1..=assignment.review_rounds {
			let get = |deadline_type| -> crate::Result<String> {
				let deadline = store.topic_deadline(topic.id, deadline_type, Some(round))?
					.ok_or(NotFound::AssignmentDueDate { deadline_type, round: Some(round) })?;
				Ok(format_due_at(config, &deadline.due_at))
			};
			rounds.push(RoundDeadlines { round, submission: get(DeadlineType::Submission)?, review: get(DeadlineType::Review)? });
		}

		let metareview = store.topic_deadline(topic.id, DeadlineType::Metareview, None)?
			.map(|d| format_due_at(config, &d.due_at));

		rows.push(DeadlineRow { topic_id: topic.id, identifier: topic.identifier, name: topic.name, rounds, metareview });
	}

	Ok(rows)
}

/// Parses `raw` and writes it as the `field` deadline of `topic_id`.
///
/// # Errors
/// - [`InvalidDeadlineValue`](crate::Error::InvalidDeadlineValue) when `raw` doesn't match the
/// configured timestamp format, nothing is written.
pub fn save_deadline_field<S: DeadlineStore>(store: &mut S, config: &crate::Config, topic_id: TopicId, field: DeadlineField, raw: &str) -> crate::Result<()> {
	let due_at = parse_due_at(config, field, raw)?;
	store.save_topic_deadline(&TopicDeadline { topic_id, deadline_type: field.deadline_type, round: field.round, due_at })
}

/// Applies instructor edits to topic deadlines.
///
/// Each field is checked on its own: a bad value adds a notice and is skipped while the
/// remaining fields are still written. Returns how many deadlines were written.
///
/// # Errors
/// - [`NotFound`](crate::Error::NotFound) when an edit names a topic outside the assignment.
pub fn save_topic_deadlines<S: AssignmentStore + TopicStore + DeadlineStore>(store: &mut S, config: &crate::Config, notices: &mut Notices, assignment_id: AssignmentId, edits: &[DeadlineEdit]) -> crate::Result<usize> {
	let assignment = store.assignment(assignment_id)?;
	let mut written = 0;

	for edit in edits {
		let topic = store.topic(edit.topic_id)?;
		if topic.assignment_id != assignment_id {
			return Err(NotFound::Topic(edit.topic_id).into());
		}

		let mut fields = Vec::<(DeadlineField, &str)>::new();
		for round in 1..=assignment.review_rounds {
			let input = edit.rounds.get(round as usize - 1);
			fields.push((DeadlineField { deadline_type: DeadlineType::Submission, round: Some(round) }, input.map_or("", |i| i.submission.as_str())));
			fields.push((DeadlineField { deadline_type: DeadlineType::Review, round: Some(round) }, input.map_or("", |i| i.review.as_str())));
		}
		if let Some(raw) = &edit.metareview {
			fields.push((DeadlineField { deadline_type: DeadlineType::Metareview, round: None }, raw.as_str()));
		}

		for (field, raw) in fields {
			match save_deadline_field(store, config, topic.id, field, raw) {
				Ok(()) => written += 1,
				Err(crate::Error::InvalidDeadlineValue(e)) => {
					log::warn!("Skipping {} of topic {}: \"{}\"", field, topic.id, raw);
					notices.error(e.to_string());
				},
				Err(e) => return Err(e),
			}
		}
	}

	Ok(written)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn field_names() {
		let name = |deadline_type, round| DeadlineField { deadline_type, round }.to_string();
		assert_eq!(name(DeadlineType::Submission, Some(1)), "Submission deadline");
		assert_eq!(name(DeadlineType::Submission, Some(3)), "Resubmission deadline 2");
		assert_eq!(name(DeadlineType::Review, Some(1)), "Review deadline");
		assert_eq!(name(DeadlineType::Review, Some(2)), "Review deadline 1");
		assert_eq!(name(DeadlineType::Metareview, None), "Meta review deadline");
	}

	#[test]
	fn invalid_field_is_not_written() {
		let config = crate::Config::default();
		let mut store = crate::MemoryStore::new();
		let field = DeadlineField { deadline_type: DeadlineType::Review, round: Some(2) };

		let err = save_deadline_field(&mut store, &config, TopicId(1), field, "2024-02-30 10:00:00").unwrap_err();
		assert!(matches!(err, crate::Error::InvalidDeadlineValue(DeadlineError::InvalidValue { .. })));
		assert_eq!(err.to_string(), "Please enter a valid Review deadline 1");
		assert!(store.deadlines().is_empty());

		save_deadline_field(&mut store, &config, TopicId(1), field, "2024-02-28 10:00:00").unwrap();
		assert_eq!(store.topic_deadline(TopicId(1), DeadlineType::Review, Some(2)).unwrap().map(|d| d.round), Some(Some(2)));
	}

	#[test]
	fn parses_configured_format() {
		let config = crate::Config::default();
		let field = DeadlineField { deadline_type: DeadlineType::Submission, round: Some(1) };

		let due = parse_due_at(&config, field, "2024-03-01 23:59:00").unwrap();
		assert_eq!(format_due_at(&config, &due), "2024-03-01 23:59:00");

		let err = parse_due_at(&config, field, "next friday").unwrap_err();
		assert_eq!(err.to_string(), "Please enter a valid Submission deadline");
		assert!(parse_due_at(&config, field, "").is_err());
	}
}
