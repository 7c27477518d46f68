//! Teams signing up to topics, and capacity changes applied to stored signups.
//!
//! Every operation here that decides between confirmed and waitlisted runs inside
//! [`SheetStore::atomically`] for the topic, so the count of confirmed signups it reads
//! can't go stale before its writes land.

use crate::Notices;
use crate::sheet::*;
use crate::store::*;
use crate::waitlist::{reconcile_capacity, Reconciliation};

/// Signup counts for one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSummary {
	pub topic_id: TopicId,
	pub max_choosers: u32,
	pub filled: usize,
	pub waitlisted: usize,
}

impl SlotSummary {
	pub fn available(&self) -> usize {
		(self.max_choosers as usize).saturating_sub(self.filled)
	}
}

/// A team signed up to a topic, as shown to students looking for partners.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamAdvertisement {
	pub team_id: TeamId,
	pub team_name: String,
	pub advertisement: Option<String>,
	pub members: Vec<String>,
	pub status: SignupStatus,
}

/// Changes the capacity of a topic, promoting waitlisted signups when it grows.
///
/// Returns `None` when the change was refused, a notice explains why and the capacity is unchanged.
pub fn change_capacity<S: SheetStore>(store: &mut S, notices: &mut Notices, topic_id: TopicId, requested: u32) -> crate::Result<Option<Reconciliation>> {
	let res = store.atomically(topic_id, |store| {
		let mut topic = store.topic(topic_id)?;
		let mut signups = store.signups_for_topic(topic_id)?;

		let rec = reconcile_capacity(&topic, requested, &signups)?;
		rec.apply(&mut signups);
		for signup in signups.iter().filter(|s| rec.promoted.contains(&s.team_id)) {
			store.save_signup(signup)?;
		}

		topic.max_choosers = rec.capacity;
		store.save_topic(&topic)?;
		Ok(rec)
	});

	match res {
		Ok(rec) => {
			if !rec.promoted.is_empty() {
				log::info!("Promoted {} waitlisted team(s) on topic {}", rec.promoted.len(), topic_id);
			}
			Ok(Some(rec))
		},
		Err(e @ crate::Error::CapacityDecreaseRejected { .. }) => {
			log::warn!("Capacity change on topic {} refused: {}", topic_id, e);
			notices.error(e.to_string());
			Ok(None)
		},
		Err(e) => Err(e),
	}
}

/// Signs `team_id` up for `topic_id`, returning the status it was given.
///
/// The team is confirmed if the topic has a free slot and the team doesn't already hold a
/// confirmed topic in the assignment, otherwise it joins the waitlist.
///
/// # Errors
/// - [`AlreadyExists`](crate::Error::AlreadyExists) if the team is already signed up for the topic.
/// - [`NotFound`](crate::Error::NotFound) if the topic isn't part of the assignment.
pub fn sign_up_team<S: SheetStore>(store: &mut S, notices: &mut Notices, assignment_id: AssignmentId, team_id: TeamId, topic_id: TopicId) -> crate::Result<SignupStatus> {
	let signup = store.atomically(topic_id, |store| {
		let topic = store.topic(topic_id)?;
		if topic.assignment_id != assignment_id {
			return Err(crate::NotFound::Topic(topic_id).into());
		}

		let held = store.signups_for_team(assignment_id, team_id)?;
		if held.iter().any(|s| s.topic_id == topic_id) {
			return Err(crate::Error::AlreadyExists);
		}
		let holds_confirmed = held.iter().any(|s| s.is_confirmed());

		let confirmed = store.signups_for_topic(topic_id)?.iter().filter(|s| s.is_confirmed()).count();
		let status = if !holds_confirmed && confirmed < topic.max_choosers as usize {
			SignupStatus::Confirmed
		} else {
			SignupStatus::Waitlisted
		};

		store.insert_signup(topic_id, team_id, status)
	});

	match signup {
		Ok(signup) => {
			log::info!("Team {} signed up for topic {} as {:?}", team_id, topic_id, signup.status);
			Ok(signup.status)
		},
		Err(crate::Error::AlreadyExists) => {
			notices.error("You have already signed up for this topic.");
			Err(crate::Error::AlreadyExists)
		},
		Err(e) => Err(e),
	}
}

/// Removes the team's signup for a topic.
///
/// Freeing a confirmed slot promotes the earliest waitlisted signup of the topic, which is returned.
pub fn withdraw_signup<S: SheetStore>(store: &mut S, assignment_id: AssignmentId, team_id: TeamId, topic_id: TopicId) -> crate::Result<Option<TeamId>> {
	store.atomically(topic_id, |store| {
		let signup = store.signups_for_team(assignment_id, team_id)?
			.into_iter()
			.find(|s| s.topic_id == topic_id)
			.ok_or(crate::NotFound::Signup { topic: topic_id, team: team_id })?;

		store.delete_signup(topic_id, team_id)?;
		log::info!("Team {} withdrew from topic {}", team_id, topic_id);

		if !signup.is_confirmed() {
			return Ok(None);
		}

		let topic = store.topic(topic_id)?;
		let remaining = store.signups_for_topic(topic_id)?;
		let confirmed = remaining.iter().filter(|s| s.is_confirmed()).count();
		if confirmed >= topic.max_choosers as usize {
			return Ok(None);
		}

		/* `signups_for_topic` is already in waitlist order */
		match remaining.into_iter().find(|s| s.is_waitlisted()) {
			Some(mut next) => {
				next.status = SignupStatus::Confirmed;
				store.save_signup(&next)?;
				log::info!("Promoted team {} on topic {} after withdrawal", next.team_id, topic_id);
				Ok(Some(next.team_id))
			},
			None => Ok(None),
		}
	})
}

/// Sets the team's preference for a topic from a submitted value.
///
/// Returns `false` without changing anything if another of the team's signups in the
/// assignment already has that priority. A value that isn't a positive whole number
/// is reported as a notice and skipped.
pub fn set_priority<S: SheetStore>(store: &mut S, notices: &mut Notices, assignment_id: AssignmentId, team_id: TeamId, topic_id: TopicId, raw: &str) -> crate::Result<bool> {
	let priority = match parse_priority(raw) {
		Ok(p) => p,
		Err(e) => {
			log::warn!("Ignoring priority \"{}\" for team {} on topic {}", raw, team_id, topic_id);
			notices.error(e.to_string());
			return Ok(false);
		},
	};

	let held = store.signups_for_team(assignment_id, team_id)?;
	if held.iter().any(|s| s.priority == Some(priority)) {
		log::debug!("Team {} already uses priority {}", team_id, priority);
		return Ok(false);
	}

	let mut signup = held.into_iter()
		.find(|s| s.topic_id == topic_id)
		.ok_or(crate::NotFound::Signup { topic: topic_id, team: team_id })?;
	signup.priority = Some(priority);
	store.save_signup(&signup)?;
	Ok(true)
}

fn parse_priority(raw: &str) -> crate::Result<u32> {
	match raw.trim().parse::<u32>() {
		Ok(p) if p > 0 => Ok(p),
		_ => Err(crate::Error::InvalidPriorityValue(raw.to_string())),
	}
}

/// Confirmed and waitlisted counts for every topic of the assignment.
pub fn slot_summary<S: TopicStore + SignupStore>(store: &S, assignment_id: AssignmentId) -> crate::Result<Vec<SlotSummary>> {
	store.topics_for_assignment(assignment_id)?
		.into_iter()
		.map(|topic| {
			let signups = store.signups_for_topic(topic.id)?;
			Ok(SlotSummary {
				topic_id: topic.id,
				max_choosers: topic.max_choosers,
				filled: signups.iter().filter(|s| s.is_confirmed()).count(),
				waitlisted: signups.iter().filter(|s| s.is_waitlisted()).count(),
			})
		})
		.collect()
}

/// Every team signed up for the topic along with its advertisement and members.
pub fn team_advertisements<S: SignupStore + TeamStore>(store: &S, topic_id: TopicId) -> crate::Result<Vec<TeamAdvertisement>> {
	store.signups_for_topic(topic_id)?
		.into_iter()
		.map(|signup| {
			let team = store.team(signup.team_id)?;
			Ok(TeamAdvertisement {
				team_id: team.id,
				team_name: team.name,
				advertisement: team.advertisement,
				members: team.members,
				status: signup.status,
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn priority_must_be_positive() {
		assert_eq!(parse_priority(" 2 ").unwrap(), 2);
		assert!(matches!(parse_priority("0"), Err(crate::Error::InvalidPriorityValue(_))));
		assert!(matches!(parse_priority("-1"), Err(crate::Error::InvalidPriorityValue(_))));
		assert!(matches!(parse_priority("first"), Err(crate::Error::InvalidPriorityValue(_))));
		assert!(matches!(parse_priority("1.5"), Err(crate::Error::InvalidPriorityValue(_))));
	}

	#[test]
	fn available_never_negative() {
		let summary = SlotSummary { topic_id: TopicId(1), max_choosers: 1, filled: 3, waitlisted: 0 };
		assert_eq!(summary.available(), 0);
	}
}
