//! Messages for the person making a change.
//!
//! Operations that recover from a bad value locally push a notice here instead of failing,
//! the caller decides how to show them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
	/// Something happened as asked.
	Info,
	/// Part of the request was refused or skipped.
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub level: NoticeLevel,
	pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Notices {
	entries: Vec<Notice>,
}

impl Notices {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn info(&mut self, message: impl Into<String>) {
		self.entries.push(Notice { level: NoticeLevel::Info, message: message.into() });
	}

	pub fn error(&mut self, message: impl Into<String>) {
		self.entries.push(Notice { level: NoticeLevel::Error, message: message.into() });
	}

	pub fn iter(&self) -> impl Iterator<Item = &Notice> {
		self.entries.iter()
	}

	pub fn errors(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().filter(|n| n.level == NoticeLevel::Error).map(|n| n.message.as_str())
	}

	pub fn has_errors(&self) -> bool {
		self.errors().next().is_some()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Every error joined into one message.
	pub fn error_message(&self) -> Option<String> {
		let errors: Vec<_> = self.errors().collect();
		if errors.is_empty() {
			None
		} else {
			Some(errors.join("\n"))
		}
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}
}
