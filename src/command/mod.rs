pub mod spawn;
pub mod types;

pub use spawn::run_command;
pub use types::{CheckCommand, CommandStatus, SplitError};
