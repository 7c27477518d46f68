use std::collections::BTreeSet;

use signup_sheet::dependency_resolver::export;
use signup_sheet::sheet::*;
use signup_sheet::store::DeadlineStore;
use signup_sheet::{Notices, SignupSheet};
use signup_sheet_test_utils::*;

fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// Three topics with weekly due dates, each layer starting 3 days after the previous one.
fn three_topics(dir: &tempfile::TempDir) -> Result<(SignupSheet<signup_sheet::MemoryStore>, Vec<TopicId>), FixtureError> {
	let (store, ids) = SheetFixture::new(1)
		.review_rounds(1)
		.days_between_submissions(3)
		.weekly_due_dates("2024-01-01 12:00")?
		.topic("Design", 2)
		.topic("Implementation", 2)
		.topic("Testing", 2)
		.build()?;
	Ok((SignupSheet::new(store, config_in(dir)), ids))
}

fn set(ids: &[TopicId]) -> BTreeSet<TopicId> {
	ids.iter().copied().collect()
}

#[test]
fn dependents_start_a_layer_later() {
	init_logging();
	let dir = tempfile::tempdir().unwrap();
	let (mut sheet, ids) = three_topics(&dir).unwrap();
	let mut notices = Notices::new();

	let selections = selections(&ids, &[(1, &[0]), (2, &[0])]);
	let res = sheet.save_topic_dependencies(&mut notices, AssignmentId(1), &selections).unwrap();

	assert_eq!(res.layers.len(), 2);
	assert_eq!(res.layers.get(0), Some(&set(&ids[..1])));
	assert_eq!(res.layers.get(1), Some(&set(&ids[1..])));
	assert_eq!(res.topological_order[0], ids[0]);
	assert_eq!(res.deadlines_created, 9);
	assert!(notices.is_empty());

	let submission = |topic| sheet.store().topic_deadline(topic, DeadlineType::Submission, Some(1)).unwrap().unwrap().due_at;
	assert_eq!(submission(ids[0]), datetime("2024-01-01 12:00").unwrap());
	assert_eq!(submission(ids[1]), datetime("2024-01-04 12:00").unwrap());
	assert_eq!(submission(ids[2]), datetime("2024-01-04 12:00").unwrap());

	let metareview = sheet.store().topic_deadline(ids[2], DeadlineType::Metareview, None).unwrap().unwrap();
	assert_eq!(metareview.due_at, datetime("2024-01-18 12:00").unwrap());
}

#[test]
fn topics_without_a_selection_depend_on_nothing() {
	init_logging();
	let dir = tempfile::tempdir().unwrap();
	let (mut sheet, ids) = three_topics(&dir).unwrap();
	let mut notices = Notices::new();

	let selections = vec![
		DependencySelection { topic_id: ids[2], depends_on: vec![ids[1].to_string()] },
		DependencySelection { topic_id: ids[1], depends_on: vec!["0".to_string()] },
	];
	let res = sheet.save_topic_dependencies(&mut notices, AssignmentId(1), &selections).unwrap();

	/* Topics nothing depends on start in the last layer */
	assert_eq!(res.layers.get(0), Some(&set(&ids[1..2])));
	assert_eq!(res.layers.get(1), Some(&set(&[ids[0], ids[2]])));
	assert_eq!(sheet.store().dependencies(), &[TopicDependency { topic_id: ids[2], depends_on: ids[1] }]);
}

#[test]
fn saving_again_replaces_dependencies() {
	init_logging();
	let dir = tempfile::tempdir().unwrap();
	let (mut sheet, ids) = three_topics(&dir).unwrap();
	let mut notices = Notices::new();

	sheet.save_topic_dependencies(&mut notices, AssignmentId(1), &selections(&ids, &[(1, &[0]), (2, &[1])])).unwrap();
	assert_eq!(sheet.store().dependencies().len(), 2);

	let res = sheet.save_topic_dependencies(&mut notices, AssignmentId(1), &selections(&ids, &[(2, &[0])])).unwrap();
	assert_eq!(sheet.store().dependencies().len(), 1);
	assert_eq!(res.layers.len(), 2);
	/* Deadlines already copied are kept */
	assert_eq!(res.deadlines_created, 0);
}

#[test]
fn cycle_is_saved_reported_and_drawn() {
	init_logging();
	let dir = tempfile::tempdir().unwrap();
	let (mut sheet, ids) = three_topics(&dir).unwrap();
	let mut notices = Notices::new();

	let selections = selections(&ids, &[(0, &[2]), (1, &[0]), (2, &[1])]);
	let err = sheet.save_topic_dependencies(&mut notices, AssignmentId(1), &selections).unwrap_err();

	assert!(matches!(err, signup_sheet::Error::CyclicDependency));
	assert_eq!(
		notices.error_message().as_deref(),
		Some("There may be one or more cycles in the dependencies. Please correct them")
	);
	assert_eq!(sheet.store().dependencies().len(), 3);
	assert!(sheet.store().deadlines().is_empty());

	let dot = std::fs::read_to_string(export::graph_path(sheet.config(), AssignmentId(1))).unwrap();
	assert!(dot.contains("Implementation"));
	assert_eq!(dot.matches("color = red").count(), 3);
}

#[test]
fn graph_export_can_be_disabled() {
	init_logging();
	let dir = tempfile::tempdir().unwrap();
	let (store, ids) = SheetFixture::new(1)
		.weekly_due_dates("2024-01-01 12:00")
		.unwrap()
		.topic("Design", 1)
		.topic("Implementation", 1)
		.build()
		.unwrap();
	let mut config = config_in(&dir);
	config.set_export_dependency_graph(false);
	let mut sheet = SignupSheet::new(store, config);
	let mut notices = Notices::new();

	let res = sheet.save_topic_dependencies(&mut notices, AssignmentId(1), &selections(&ids, &[(1, &[0])])).unwrap();
	assert_eq!(res.layers.len(), 2);
	assert!(!export::graph_path(sheet.config(), AssignmentId(1)).exists());
}

#[test]
fn unknown_dependency_is_refused() {
	init_logging();
	let dir = tempfile::tempdir().unwrap();
	let (mut sheet, ids) = three_topics(&dir).unwrap();
	let mut notices = Notices::new();

	let selections = vec![DependencySelection { topic_id: ids[0], depends_on: vec!["999".to_string()] }];
	let err = sheet.save_topic_dependencies(&mut notices, AssignmentId(1), &selections).unwrap_err();
	assert!(matches!(err, signup_sheet::Error::NotFound(signup_sheet::NotFound::Topic(TopicId(999)))));
	assert!(sheet.store().dependencies().is_empty());

	let selections = vec![DependencySelection { topic_id: ids[0], depends_on: vec!["first".to_string()] }];
	let err = sheet.save_topic_dependencies(&mut notices, AssignmentId(1), &selections).unwrap_err();
	assert!(matches!(err, signup_sheet::Error::Parse(_)));
}

#[test]
fn destroying_a_topic_removes_its_edges() {
	init_logging();
	let dir = tempfile::tempdir().unwrap();
	let (mut sheet, ids) = three_topics(&dir).unwrap();
	let mut notices = Notices::new();

	sheet.save_topic_dependencies(&mut notices, AssignmentId(1), &selections(&ids, &[(1, &[0]), (2, &[1])])).unwrap();
	assert!(!sheet.store().deadlines().is_empty());

	sheet.destroy_topic(&mut notices, ids[1]).unwrap();
	assert!(sheet.store().dependencies().is_empty());
	assert!(sheet.store().deadlines().iter().all(|d| d.topic_id != ids[1]));
	assert_eq!(sheet.topics(AssignmentId(1)).unwrap().len(), 2);
}
