pub mod error;
pub use error::Result;
pub use error::Error;
pub use error::NotFound;

pub mod config;
pub use config::Config;

pub mod notices;
pub use notices::Notices;

pub mod sheet;
pub mod store;
pub use store::MemoryStore;

pub mod waitlist;
pub mod signup;
pub mod dependency_resolver;
pub mod deadline;

pub mod manager;
pub use manager::SignupSheet;
