use serde::{Serialize, Deserialize};

use super::{AssignmentId, TopicId};

/// A unit of work students can choose for an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
	pub id: TopicId,
	pub assignment_id: AssignmentId,
	pub name: String,
	/// Short code shown next to the name, e.g. `E1402`.
	pub identifier: String,
	pub category: String,
	/// How many teams can hold a confirmed signup at once.
	pub max_choosers: u32,
	/// Only used by microtask assignments.
	pub micropayment: Option<u32>,
}

/// Fields needed to create a topic, the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTopic {
	pub name: String,
	pub identifier: String,
	pub category: String,
	pub max_choosers: u32,
	pub micropayment: Option<u32>,
}

/// An edit to an existing topic.
///
/// Each field group is applied on its own, `None` leaves the field as is.
/// `max_choosers` goes through the waitlist reconciler and can be refused
/// while the other groups still apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicUpdate {
	pub name: Option<String>,
	pub identifier: Option<String>,
	pub category: Option<String>,
	pub max_choosers: Option<u32>,
	pub micropayment: Option<Option<u32>>,
}

impl Topic {
	pub fn new(id: TopicId, assignment_id: AssignmentId, new: NewTopic) -> Self {
		Self {
			id,
			assignment_id,
			name: new.name,
			identifier: new.identifier,
			category: new.category,
			max_choosers: new.max_choosers,
			micropayment: new.micropayment,
		}
	}

	/// Applies every field group of `update` except the capacity.
	pub(crate) fn apply_details(&mut self, update: &TopicUpdate) {
		if let Some(name) = &update.name { self.name = name.clone(); }
		if let Some(identifier) = &update.identifier { self.identifier = identifier.clone(); }
		if let Some(category) = &update.category { self.category = category.clone(); }
		if let Some(micropayment) = update.micropayment { self.micropayment = micropayment; }
	}
}
