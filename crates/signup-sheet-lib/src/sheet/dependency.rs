use serde::{Serialize, Deserialize};

use super::TopicId;

/// A stored dependency, `topic_id` can't be attempted until `depends_on` is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TopicDependency {
	pub topic_id: TopicId,
	pub depends_on: TopicId,
}

/// The target of a submitted dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependsOn {
	/// Submitted as `"0"`, the topic has no dependency.
	Nothing,
	Topic(TopicId),
}

impl std::str::FromStr for DependsOn {
	type Err = crate::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let id = s.trim().parse::<u64>().map_err(|_| crate::Error::Parse(format!("Couldn't parse \"{}\" as a topic id", s)))?;
		if id == 0 {
			Ok(DependsOn::Nothing)
		} else {
			Ok(DependsOn::Topic(TopicId(id)))
		}
	}
}

/// What an instructor picked as dependencies for one topic.
///
/// Topics without a submission are treated as depending on nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySelection {
	pub topic_id: TopicId,
	pub depends_on: Vec<String>,
}

impl DependencySelection {
	/// Parses the submitted values into `(topic, target)` pairs.
	///
	/// An empty selection yields a single [`DependsOn::Nothing`] so the topic still appears.
	pub fn pairs(&self) -> crate::Result<Vec<(TopicId, DependsOn)>> {
		if self.depends_on.is_empty() {
			return Ok(vec![(self.topic_id, DependsOn::Nothing)]);
		}
		self.depends_on.iter()
			.map(|s| Ok((self.topic_id, s.parse::<DependsOn>()?)))
			.collect()
	}
}
