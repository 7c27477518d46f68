use serde::{Serialize, Deserialize};

use super::{AssignmentId, DeadlineType};

/// The parts of an assignment the sign-up sheet reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
	pub id: AssignmentId,
	pub name: String,
	/// Topics carry their own deadlines instead of sharing the assignment's.
	pub staggered_deadline: bool,
	pub microtask: bool,
	pub review_rounds: u32,
	/// Added once per dependency layer when topic deadlines are derived from the assignment's.
	#[serde(default)]
	pub days_between_submissions: u32,
	#[serde(default)]
	pub due_dates: Vec<AssignmentDueDate>,
}

/// An assignment level due date which topic deadlines are copied from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentDueDate {
	pub deadline_type: DeadlineType,
	/// `None` applies to every round.
	pub round: Option<u32>,
	pub due_at: chrono::NaiveDateTime,
}

impl Assignment {
	/// Gets the due date for `deadline_type` in `round`.
	///
	/// A due date for the exact round is preferred over one without a round.
	pub fn due_date(&self, deadline_type: DeadlineType, round: Option<u32>) -> Option<&AssignmentDueDate> {
		let mut of_type = self.due_dates.iter().filter(|d| d.deadline_type == deadline_type);
		let exact = of_type.clone().find(|d| d.round == round);
		exact.or_else(|| of_type.find(|d| d.round.is_none()))
	}
}
