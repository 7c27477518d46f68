use serde::{Serialize, Deserialize};

use super::TopicId;

/// The kinds of deadline a topic carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeadlineType {
	Submission,
	Review,
	/// Has no round, there is one per topic.
	Metareview,
}

impl std::fmt::Display for DeadlineType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DeadlineType::Submission => write!(f, "submission"),
			DeadlineType::Review => write!(f, "review"),
			DeadlineType::Metareview => write!(f, "metareview"),
		}
	}
}

/// A due date for one topic.
///
/// There is at most one record per `(topic_id, deadline_type, round)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDeadline {
	pub topic_id: TopicId,
	pub deadline_type: DeadlineType,
	/// Always `None` for [`DeadlineType::Metareview`].
	pub round: Option<u32>,
	pub due_at: chrono::NaiveDateTime,
}
