use serde::{Serialize, Deserialize};

use super::{TeamId, TopicId};

/// Whether a signup holds one of the topic's slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignupStatus {
	Confirmed,
	Waitlisted,
}

/// A team's claim on a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRecord {
	pub topic_id: TopicId,
	pub team_id: TeamId,
	pub status: SignupStatus,
	/// Position among every signup made, assigned by the store on creation.
	/// Waitlisted signups are promoted in ascending order of this value.
	pub sequence: u64,
	/// The team's preference for this topic, lower is preferred.
	/// Unrelated to the waitlist order.
	pub priority: Option<u32>,
}

impl SignupRecord {
	pub fn is_confirmed(&self) -> bool {
		self.status == SignupStatus::Confirmed
	}

	pub fn is_waitlisted(&self) -> bool {
		self.status == SignupStatus::Waitlisted
	}
}

/// The parts of a team shown next to a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
	pub id: TeamId,
	pub name: String,
	/// Text the team posted looking for partners.
	pub advertisement: Option<String>,
	pub members: Vec<String>,
}
