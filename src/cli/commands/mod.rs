pub mod config;
pub mod find;
pub mod grade;
pub mod inspect;

pub use config::ConfigCommands;
pub use find::FindArgs;
pub use grade::GradeArgs;
pub use inspect::InspectCommands;
