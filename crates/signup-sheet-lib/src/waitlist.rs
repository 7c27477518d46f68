//! Reconciles a topic's signups with a change to its capacity.
//!
//! Increasing the capacity promotes waitlisted signups, earliest first, until the
//! topic is full or the waitlist is empty. Decreasing it is refused once the topic has any
//! signups since that would mean dropping teams that already hold a slot.

use crate::sheet::*;

/// An accepted capacity change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
	pub topic_id: TopicId,
	pub capacity: u32,
	/// Teams moving from the waitlist to confirmed, in promotion order.
	pub promoted: Vec<TeamId>,
}

impl Reconciliation {
	/// Marks the promoted signups in `signups` as confirmed.
	pub fn apply(&self, signups: &mut [SignupRecord]) {
		for signup in signups.iter_mut() {
			if signup.topic_id == self.topic_id && self.promoted.contains(&signup.team_id) {
				signup.status = SignupStatus::Confirmed;
			}
		}
	}
}

/// Works out the outcome of setting `topic`'s capacity to `requested`.
///
/// `signups` are the topic's signups, signups for other topics are ignored.
/// Running it again on the reconciled signups with the same `requested` promotes nobody.
///
/// # Errors
/// - [`CapacityDecreaseRejected`](crate::Error::CapacityDecreaseRejected) when `requested` is
/// lower than the current capacity and the topic has signups.
pub fn reconcile_capacity(topic: &Topic, requested: u32, signups: &[SignupRecord]) -> crate::Result<Reconciliation> {
	let current = topic.max_choosers;
	let signups: Vec<&SignupRecord> = signups.iter().filter(|s| s.topic_id == topic.id).collect();

	if signups.is_empty() || requested == current {
		return Ok(Reconciliation { topic_id: topic.id, capacity: requested, promoted: vec![] });
	}

	if requested < current {
		log::debug!("Refusing to lower capacity of topic {} from {} to {}", topic.id, current, requested);
		return Err(crate::Error::CapacityDecreaseRejected { current, requested });
	}

	let confirmed = signups.iter().filter(|s| s.is_confirmed()).count();
	let free = (requested as usize).saturating_sub(confirmed);

	let mut waitlist: Vec<&SignupRecord> = signups.into_iter().filter(|s| s.is_waitlisted()).collect();
	waitlist.sort_by_key(|s| s.sequence);

	let promoted: Vec<TeamId> = waitlist.into_iter().take(free).map(|s| s.team_id).collect();
	log::debug!("Raising capacity of topic {} from {} to {} promotes {} team(s)", topic.id, current, requested, promoted.len());

	Ok(Reconciliation { topic_id: topic.id, capacity: requested, promoted })
}
