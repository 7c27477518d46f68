//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

use crate::sheet::{AssignmentId, DeadlineType, TeamId, TopicId};

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	/// Capacity can't shrink once a topic has choosers, the previous capacity is kept.
	#[error("Value of maximum choosers can only be increased! No change has been made to max choosers.")]
	CapacityDecreaseRejected { current: u32, requested: u32 },
	/// The dependency edges contain a cycle so no ordering or layering exists.
	#[error("There may be one or more cycles in the dependencies. Please correct them")]
	CyclicDependency,
	#[error(transparent)]
	InvalidDeadlineValue(#[from] crate::deadline::DeadlineError),
	#[error("Invalid priority")]
	InvalidPriorityValue(String),
	#[error("{0} not found")]
	NotFound(#[from] NotFound),
	#[error("already exists")]
	AlreadyExists,
}

/// Records the caller was expected to provide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
	#[error("assignment {0}")]
	Assignment(AssignmentId),
	#[error("topic {0}")]
	Topic(TopicId),
	#[error("team {0}")]
	Team(TeamId),
	#[error("signup of team {team} for topic {topic}")]
	Signup { topic: TopicId, team: TeamId },
	#[error("{deadline_type} due date for round {round:?}")]
	AssignmentDueDate { deadline_type: DeadlineType, round: Option<u32> },
}
