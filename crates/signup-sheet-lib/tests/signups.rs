use signup_sheet::sheet::*;
use signup_sheet::{Notices, SignupSheet};
use signup_sheet_test_utils::*;

fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn statuses(sheet: &SignupSheet<signup_sheet::MemoryStore>, topic_id: TopicId) -> Vec<(u64, SignupStatus)> {
	sheet.store().signups().iter()
		.filter(|s| s.topic_id == topic_id)
		.map(|s| (s.team_id.0, s.status))
		.collect()
}

/// One topic of capacity 2 with teams 1 and 2 confirmed, 3 and 4 waitlisted.
fn full_topic() -> Result<(SignupSheet<signup_sheet::MemoryStore>, TopicId), FixtureError> {
	let fixture = SheetFixture::new(1)
		.topic("Refactor users controller", 2)
		.team(1).team(2).team(3).team(4);
	let assignment_id = fixture.assignment_id();
	let (store, ids) = fixture.build()?;
	let mut sheet = SignupSheet::new(store, signup_sheet::Config::default());

	let mut notices = Notices::new();
	for team in 1..=4 {
		sheet.sign_up_team(&mut notices, assignment_id, TeamId(team), ids[0])?;
	}
	Ok((sheet, ids[0]))
}

#[test]
fn signups_beyond_capacity_are_waitlisted() {
	use SignupStatus::*;
	init_logging();

	let (sheet, topic) = full_topic().unwrap();
	assert_eq!(statuses(&sheet, topic), vec![(1, Confirmed), (2, Confirmed), (3, Waitlisted), (4, Waitlisted)]);

	let summary = sheet.slot_summary(AssignmentId(1)).unwrap();
	assert_eq!(summary.len(), 1);
	assert_eq!((summary[0].filled, summary[0].waitlisted, summary[0].available()), (2, 2, 0));
}

#[test]
fn capacity_changes_walk_the_waitlist() {
	use SignupStatus::*;
	init_logging();

	let (mut sheet, topic) = full_topic().unwrap();
	let mut notices = Notices::new();

	let rec = sheet.change_capacity(&mut notices, topic, 3).unwrap().unwrap();
	assert_eq!(rec.promoted, vec![TeamId(3)]);
	assert_eq!(statuses(&sheet, topic), vec![(1, Confirmed), (2, Confirmed), (3, Confirmed), (4, Waitlisted)]);

	let rec = sheet.change_capacity(&mut notices, topic, 4).unwrap().unwrap();
	assert_eq!(rec.promoted, vec![TeamId(4)]);

	/* Same value again changes nothing */
	let rec = sheet.change_capacity(&mut notices, topic, 4).unwrap().unwrap();
	assert!(rec.promoted.is_empty());
	assert!(!notices.has_errors());

	let rec = sheet.change_capacity(&mut notices, topic, 2).unwrap();
	assert!(rec.is_none());
	assert_eq!(
		notices.error_message().as_deref(),
		Some("Value of maximum choosers can only be increased! No change has been made to max choosers.")
	);
	assert_eq!(sheet.topics(AssignmentId(1)).unwrap()[0].max_choosers, 4);
	assert_eq!(statuses(&sheet, topic), vec![(1, Confirmed), (2, Confirmed), (3, Confirmed), (4, Confirmed)]);
}

#[test]
fn rejected_capacity_still_saves_other_fields() {
	init_logging();

	let (mut sheet, topic) = full_topic().unwrap();
	let mut notices = Notices::new();

	let update = TopicUpdate {
		name: Some("Refactor accounts controller".to_string()),
		max_choosers: Some(1),
		..Default::default()
	};
	sheet.update_topic(&mut notices, topic, update).unwrap();

	let saved = &sheet.topics(AssignmentId(1)).unwrap()[0];
	assert_eq!(saved.name, "Refactor accounts controller");
	assert_eq!(saved.max_choosers, 2);
	assert!(notices.has_errors());
}

#[test]
fn withdrawing_promotes_earliest_waitlisted() {
	use SignupStatus::*;
	init_logging();

	let (mut sheet, topic) = full_topic().unwrap();

	let promoted = sheet.withdraw_signup(AssignmentId(1), TeamId(1), topic).unwrap();
	assert_eq!(promoted, Some(TeamId(3)));
	assert_eq!(statuses(&sheet, topic), vec![(2, Confirmed), (3, Confirmed), (4, Waitlisted)]);

	/* A waitlisted team leaving frees nothing */
	let promoted = sheet.withdraw_signup(AssignmentId(1), TeamId(4), topic).unwrap();
	assert_eq!(promoted, None);

	let err = sheet.withdraw_signup(AssignmentId(1), TeamId(4), topic).unwrap_err();
	assert!(matches!(err, signup_sheet::Error::NotFound(_)));
}

#[test]
fn duplicate_signup_is_refused() {
	init_logging();

	let (mut sheet, topic) = full_topic().unwrap();
	let mut notices = Notices::new();

	let err = sheet.sign_up_team(&mut notices, AssignmentId(1), TeamId(2), topic).unwrap_err();
	assert!(matches!(err, signup_sheet::Error::AlreadyExists));
	assert_eq!(notices.error_message().as_deref(), Some("You have already signed up for this topic."));
	assert_eq!(sheet.store().signups().len(), 4);
}

#[test]
fn team_with_a_confirmed_topic_is_waitlisted_elsewhere() {
	init_logging();

	let fixture = SheetFixture::new(1)
		.topic("Refactor users controller", 1)
		.topic("Add OAuth login", 1)
		.team(1);
	let (store, ids) = fixture.build().unwrap();
	let mut sheet = SignupSheet::new(store, signup_sheet::Config::default());
	let mut notices = Notices::new();

	assert_eq!(sheet.sign_up_team(&mut notices, AssignmentId(1), TeamId(1), ids[0]).unwrap(), SignupStatus::Confirmed);
	assert_eq!(sheet.sign_up_team(&mut notices, AssignmentId(1), TeamId(1), ids[1]).unwrap(), SignupStatus::Waitlisted);
}

#[test]
fn priorities_are_unique_per_team() {
	init_logging();

	let fixture = SheetFixture::new(1)
		.topic("Refactor users controller", 1)
		.topic("Add OAuth login", 1)
		.team(1);
	let (store, ids) = fixture.build().unwrap();
	let mut sheet = SignupSheet::new(store, signup_sheet::Config::default());
	let mut notices = Notices::new();
	for id in &ids {
		sheet.sign_up_team(&mut notices, AssignmentId(1), TeamId(1), *id).unwrap();
	}

	assert!(sheet.set_priority(&mut notices, AssignmentId(1), TeamId(1), ids[0], "1").unwrap());
	assert!(!sheet.set_priority(&mut notices, AssignmentId(1), TeamId(1), ids[1], "1").unwrap());
	assert!(!notices.has_errors());

	assert!(!sheet.set_priority(&mut notices, AssignmentId(1), TeamId(1), ids[1], "soon").unwrap());
	assert_eq!(notices.error_message().as_deref(), Some("Invalid priority"));

	assert!(sheet.set_priority(&mut notices, AssignmentId(1), TeamId(1), ids[1], "2").unwrap());
	let priorities: Vec<_> = sheet.store().signups().iter().map(|s| s.priority).collect();
	assert_eq!(priorities, vec![Some(1), Some(2)]);
}

#[test]
fn advertisements_list_every_signed_up_team() {
	init_logging();

	let (sheet, topic) = full_topic().unwrap();
	let ads = sheet.team_advertisements(topic).unwrap();
	let names: Vec<_> = ads.iter().map(|a| a.team_name.as_str()).collect();
	assert_eq!(names, vec!["Team 1", "Team 2", "Team 3", "Team 4"]);
	assert_eq!(ads[0].members, vec!["student1".to_string()]);
}
