use signup_sheet::sheet::*;
use signup_sheet::{MemoryStore, Notices, SignupSheet};

fn main() {
	env_logger::init();

	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",       "Show help");
		opts.optopt(  "c", "config",     "Config file to use", "PATH");
		opts.optopt(  "s", "sheet",      "Sheet file to read and write, defaults to sheet.json in the data directory", "PATH");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") || parsed_options.free.is_empty() {
			eprintln!("{}", opts.usage(USAGE));
			return;
		}

		parsed_options
	};

	let config = match parsed_options.opt_str("c") {
		Some(path) => signup_sheet::Config::load_from_file(path),
		None => signup_sheet::Config::load_from_disk(),
	};
	let config = config.unwrap_or_else(|e| {
		log::warn!("Failed to read config file: {}", e);
		log::warn!("Using default config.");
		signup_sheet::Config::default()
	});

	let sheet_path = parsed_options.opt_str("s")
		.map(std::path::PathBuf::from)
		.unwrap_or_else(|| config.data_dir().join("sheet.json"));

	let store = match MemoryStore::load_from_file(&sheet_path) {
		Ok(store) => store,
		Err(signup_sheet::Error::IO(e)) if e.kind() == std::io::ErrorKind::NotFound => {
			log::error!("No sheet at {}", sheet_path.display());
			return;
		},
		Err(e) => {
			log::error!("Failed to open sheet {}: {}", sheet_path.display(), e);
			return;
		},
	};

	let mut sheet = SignupSheet::new(store, config);
	let mut notices = Notices::new();

	let res = run(&mut sheet, &mut notices, &parsed_options.free);

	for notice in notices.iter() {
		println!("{}", notice.message);
	}

	match res {
		Ok(true) => {
			if let Err(e) = sheet.store().save_to_file(&sheet_path) {
				log::error!("Failed to save sheet {}: {}", sheet_path.display(), e);
			}
		},
		Ok(false) => {},
		Err(e) => log::error!("{}", e),
	}
}

const USAGE: &str = "Usage: signup-sheet-terminal [options] <command> [args]

Commands:
    topics <assignment>
    add-topic <assignment> <name> <max choosers>
    capacity <topic> <max choosers>
    signup <assignment> <team> <topic>
    withdraw <assignment> <team> <topic>
    dependencies <assignment> [<topic>=<topic>,<topic>...]
    deadlines <assignment>";

/// Runs one command, returning whether the sheet changed.
fn run(sheet: &mut SignupSheet<MemoryStore>, notices: &mut Notices, free: &[String]) -> Result<bool, Error> {
	let command = free.first().ok_or(Error::MissingArgument("command"))?;
	let arg = |i: usize, name: &'static str| free.get(i).map(String::as_str).ok_or(Error::MissingArgument(name));
	let id = |i: usize, name: &'static str| -> Result<u64, Error> {
		let raw = arg(i, name)?;
		raw.parse::<u64>().map_err(|_| Error::InvalidArgument(name, raw.to_string()))
	};

	match command.as_str() {
		"topics" => {
			let assignment_id = AssignmentId(id(1, "assignment")?);
			let topics = sheet.topics(assignment_id)?;
			let summary = sheet.slot_summary(assignment_id)?;
			for (topic, slots) in topics.iter().zip(summary.iter()) {
				println!("{}\t{}\t{}\t{} available, {} waitlisted", topic.id, topic.identifier, topic.name, slots.available(), slots.waitlisted);
			}
			Ok(false)
		},
		"add-topic" => {
			let assignment_id = AssignmentId(id(1, "assignment")?);
			let name = arg(2, "name")?.to_string();
			let max_choosers = id(3, "max choosers")? as u32;
			let topic_id = sheet.create_topic(notices, assignment_id, NewTopic { name, max_choosers, ..Default::default() })?;
			println!("{}", topic_id);
			Ok(true)
		},
		"capacity" => {
			let topic_id = TopicId(id(1, "topic")?);
			let requested = id(2, "max choosers")? as u32;
			match sheet.change_capacity(notices, topic_id, requested)? {
				Some(rec) => {
					for team in &rec.promoted {
						println!("Promoted team {}", team);
					}
					Ok(true)
				},
				None => Ok(false),
			}
		},
		"signup" => {
			let assignment_id = AssignmentId(id(1, "assignment")?);
			let team_id = TeamId(id(2, "team")?);
			let topic_id = TopicId(id(3, "topic")?);
			let status = sheet.sign_up_team(notices, assignment_id, team_id, topic_id)?;
			println!("{:?}", status);
			Ok(true)
		},
		"withdraw" => {
			let assignment_id = AssignmentId(id(1, "assignment")?);
			let team_id = TeamId(id(2, "team")?);
			let topic_id = TopicId(id(3, "topic")?);
			if let Some(promoted) = sheet.withdraw_signup(assignment_id, team_id, topic_id)? {
				println!("Promoted team {}", promoted);
			}
			Ok(true)
		},
		"dependencies" => {
			let assignment_id = AssignmentId(id(1, "assignment")?);
			let selections = free[2..].iter()
				.map(|s| parse_selection(s))
				.collect::<Result<Vec<_>, _>>()?;

			/* A cyclic set is still saved, keep it on disk for the next attempt */
			let resolution = match sheet.save_topic_dependencies(notices, assignment_id, &selections) {
				Ok(r) => r,
				Err(signup_sheet::Error::CyclicDependency) => return Ok(true),
				Err(e) => return Err(e.into()),
			};
			for (k, layer) in resolution.layers.iter().enumerate() {
				let ids: Vec<_> = layer.iter().map(|t| t.to_string()).collect();
				println!("Layer {}: {}", k, ids.join(", "));
			}
			let order: Vec<_> = resolution.topological_order.iter().map(|t| t.to_string()).collect();
			println!("Order: {}", order.join(" "));
			Ok(true)
		},
		"deadlines" => {
			let assignment_id = AssignmentId(id(1, "assignment")?);
			for row in sheet.staggered_deadline_table(assignment_id)? {
				println!("{} {}", row.identifier, row.name);
				for round in &row.rounds {
					println!("\tRound {}: submission {}, review {}", round.round, round.submission, round.review);
				}
				if let Some(metareview) = &row.metareview {
					println!("\tMeta review {}", metareview);
				}
			}
			/* Missing deadlines were copied from the assignment */
			Ok(true)
		},
		other => Err(Error::UnknownCommand(other.to_string())),
	}
}

/// Parses `<topic>=<topic>,<topic>`, an empty right side depends on nothing.
fn parse_selection(s: &str) -> Result<DependencySelection, Error> {
	let (topic, depends_on) = s.split_once('=').ok_or_else(|| Error::InvalidArgument("dependency", s.to_string()))?;
	let topic_id = topic.trim().parse::<u64>().map_err(|_| Error::InvalidArgument("dependency", s.to_string()))?;
	let depends_on = depends_on.split(',')
		.map(str::trim)
		.filter(|d| !d.is_empty())
		.map(str::to_string)
		.collect();
	Ok(DependencySelection { topic_id: TopicId(topic_id), depends_on })
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Sign-up sheet error: {0}")]
	SignupSheet(#[from] signup_sheet::Error),
	#[error("Missing argument: {0}")]
	MissingArgument(&'static str),
	#[error("Invalid {0}: \"{1}\"")]
	InvalidArgument(&'static str, String),
	#[error("Unknown command \"{0}\"")]
	UnknownCommand(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn selection_arguments() {
		let sel = parse_selection("3=1, 2").unwrap();
		assert_eq!(sel.topic_id, TopicId(3));
		assert_eq!(sel.depends_on, vec!["1".to_string(), "2".to_string()]);

		assert!(parse_selection("4=").unwrap().depends_on.is_empty());
		assert!(matches!(parse_selection("4"), Err(Error::InvalidArgument(..))));
		assert!(matches!(parse_selection("x=1"), Err(Error::InvalidArgument(..))));
	}
}
