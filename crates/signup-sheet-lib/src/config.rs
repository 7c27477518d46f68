//! Library settings, saved as JSON.

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	data_dir: std::path::PathBuf,
	graph_output_dir: std::path::PathBuf,
	timestamp_format: String,
	export_dependency_graph: bool,
}

impl Default for Config {
	fn default() -> Self {
		let data_dir = {
			let path = if let Ok(e) = std::env::var("XDG_DATA_HOME") {
				std::path::PathBuf::from(e)
			} else if let Ok(home) = std::env::var("HOME") {
				std::path::PathBuf::from(home).join(".local/share")
			} else {
				std::path::PathBuf::from(".")
			};
			path.join("signup-sheet")
		};

		Self {
			graph_output_dir: data_dir.join("public/assets/staggered_deadline_assignment_graph"),
			data_dir,
			timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
			export_dependency_graph: true,
		}
	}
}

impl Config {
	/// Where the config file is looked for, `$XDG_CONFIG_HOME/signup-sheet/config.json`.
	pub fn default_path() -> std::path::PathBuf {
		let path = if let Ok(e) = std::env::var("XDG_CONFIG_HOME") {
			std::path::PathBuf::from(e)
		} else if let Ok(home) = std::env::var("HOME") {
			std::path::PathBuf::from(home).join(".config")
		} else {
			std::path::PathBuf::from(".")
		};
		path.join("signup-sheet").join("config.json")
	}

	/// # Errors
	/// - [`IO`](crate::Error::IO) when the file is missing or unreadable.
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when the file is malformed.
	pub fn load_from_disk() -> crate::Result<Self> {
		Self::load_from_file(Self::default_path())
	}

	pub fn load_from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path)?;
		Ok(serde_json::from_reader(file)?)
	}

	pub fn save_to_disk(&self) -> crate::Result<()> {
		self.save_to_file(Self::default_path())
	}

	pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
		let path = path.as_ref();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		let file = std::fs::File::create(path)?;
		serde_json::to_writer_pretty(file, self)?;
		Ok(())
	}

	pub fn data_dir(&self) -> &std::path::Path {
		&self.data_dir
	}
	pub fn set_data_dir(&mut self, data_dir: std::path::PathBuf) {
		self.data_dir = data_dir;
	}

	/// Directory the dependency graph of each assignment is written to.
	pub fn graph_output_dir(&self) -> &std::path::Path {
		&self.graph_output_dir
	}
	pub fn set_graph_output_dir(&mut self, graph_output_dir: std::path::PathBuf) {
		self.graph_output_dir = graph_output_dir;
	}

	/// `chrono` format string deadlines are shown and entered in.
	pub fn timestamp_format(&self) -> &str {
		&self.timestamp_format
	}
	pub fn set_timestamp_format(&mut self, timestamp_format: impl Into<String>) {
		self.timestamp_format = timestamp_format.into();
	}

	pub fn export_dependency_graph(&self) -> bool {
		self.export_dependency_graph
	}
	pub fn set_export_dependency_graph(&mut self, export_dependency_graph: bool) {
		self.export_dependency_graph = export_dependency_graph;
	}
}
