//! Types making up a sign-up sheet.
//!
//! A sheet belongs to one [`Assignment`] and holds its [`Topic`]s, the teams signed up to them,
//! the dependencies between topics and the per topic deadlines used by staggered deadline assignments.

use serde::{Serialize, Deserialize};

mod assignment;
pub use assignment::Assignment;
pub use assignment::AssignmentDueDate;

mod topic;
pub use topic::Topic;
pub use topic::NewTopic;
pub use topic::TopicUpdate;

mod signup;
pub use signup::SignupRecord;
pub use signup::SignupStatus;
pub use signup::Team;

mod deadline;
pub use deadline::DeadlineType;
pub use deadline::TopicDeadline;

mod dependency;
pub use dependency::TopicDependency;
pub use dependency::DependsOn;
pub use dependency::DependencySelection;

macro_rules! id_type {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub u64);

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<u64> for $name {
			fn from(value: u64) -> Self {
				Self(value)
			}
		}
	};
}

id_type!(
	/// Identifies an assignment, and with it the one sign-up sheet it owns.
	AssignmentId
);
id_type!(
	/// Identifies a topic. Unique across every assignment.
	TopicId
);
id_type!(
	/// Identifies a team. Individual students are represented as a team of one.
	TeamId
);
