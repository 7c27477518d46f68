use signup_sheet::deadline::{DeadlineEdit, RoundDeadlineInput};
use signup_sheet::sheet::*;
use signup_sheet::store::DeadlineStore;
use signup_sheet::{Notices, SignupSheet};
use signup_sheet_test_utils::*;

fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn two_round_sheet() -> Result<(SignupSheet<signup_sheet::MemoryStore>, Vec<TopicId>), FixtureError> {
	let (store, ids) = SheetFixture::new(1)
		.review_rounds(2)
		.weekly_due_dates("2024-02-05 23:59")?
		.topic("Design", 1)
		.topic("Implementation", 1)
		.build()?;
	Ok((SignupSheet::new(store, signup_sheet::Config::default()), ids))
}

#[test]
fn table_copies_assignment_deadlines() {
	init_logging();
	let (mut sheet, ids) = two_round_sheet().unwrap();
	assert!(sheet.store().deadlines().is_empty());

	let rows = sheet.staggered_deadline_table(AssignmentId(1)).unwrap();
	assert_eq!(rows.len(), 2);
	assert_eq!(rows[0].topic_id, ids[0]);
	assert_eq!(rows[0].identifier, "T1");
	assert_eq!(rows[1].name, "Implementation");

	let round_two = &rows[1].rounds[1];
	assert_eq!(round_two.round, 2);
	assert_eq!(round_two.submission, "2024-02-19 23:59:00");
	assert_eq!(round_two.review, "2024-02-26 23:59:00");
	assert_eq!(rows[1].metareview.as_deref(), Some("2024-03-04 23:59:00"));

	/* 2 rounds of submission and review plus the meta review, per topic */
	assert_eq!(sheet.store().deadlines().len(), 10);
}

#[test]
fn edited_deadlines_survive_the_table() {
	init_logging();
	let (mut sheet, ids) = two_round_sheet().unwrap();
	let mut notices = Notices::new();

	let edit = DeadlineEdit {
		topic_id: ids[0],
		rounds: vec![
			RoundDeadlineInput { submission: "2024-02-06 12:00:00".into(), review: "2024-02-13 12:00:00".into() },
			RoundDeadlineInput { submission: "2024-02-20 12:00:00".into(), review: "2024-02-27 12:00:00".into() },
		],
		metareview: Some("2024-03-05 12:00:00".into()),
	};
	let written = sheet.save_topic_deadlines(&mut notices, AssignmentId(1), &[edit]).unwrap();
	assert_eq!(written, 5);
	assert!(notices.is_empty());

	let rows = sheet.staggered_deadline_table(AssignmentId(1)).unwrap();
	assert_eq!(rows[0].rounds[0].submission, "2024-02-06 12:00:00");
	assert_eq!(rows[0].metareview.as_deref(), Some("2024-03-05 12:00:00"));
	assert_eq!(rows[1].rounds[0].submission, "2024-02-05 23:59:00");
}

#[test]
fn bad_values_only_skip_their_field() {
	init_logging();
	let (mut sheet, ids) = two_round_sheet().unwrap();
	let mut notices = Notices::new();

	let edit = DeadlineEdit {
		topic_id: ids[1],
		rounds: vec![
			RoundDeadlineInput { submission: "2024-02-06 12:00:00".into(), review: "tomorrow".into() },
			RoundDeadlineInput { submission: String::new(), review: "2024-02-27 12:00:00".into() },
		],
		metareview: None,
	};
	let written = sheet.save_topic_deadlines(&mut notices, AssignmentId(1), &[edit]).unwrap();
	assert_eq!(written, 2);
	assert_eq!(
		notices.error_message().as_deref(),
		Some("Please enter a valid Review deadline\nPlease enter a valid Resubmission deadline 1")
	);

	let saved = sheet.store().topic_deadline(ids[1], DeadlineType::Review, Some(2)).unwrap().unwrap();
	assert_eq!(saved.due_at, datetime("2024-02-27 12:00").unwrap());
	assert!(sheet.store().topic_deadline(ids[1], DeadlineType::Review, Some(1)).unwrap().is_none());
}

#[test]
fn missing_assignment_due_date_is_reported() {
	init_logging();
	let (store, _) = SheetFixture::new(1)
		.review_rounds(1)
		.due_date(DeadlineType::Submission, None, "2024-02-05 23:59")
		.unwrap()
		.topic("Design", 1)
		.build()
		.unwrap();
	let mut sheet = SignupSheet::new(store, signup_sheet::Config::default());

	let err = sheet.staggered_deadline_table(AssignmentId(1)).unwrap_err();
	assert_eq!(err.to_string(), "review due date for round Some(1) not found");
}
