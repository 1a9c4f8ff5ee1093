// Logging
//
// Leveled logging for the CLI collaborators.

mod console_logger;
mod logger;

pub use console_logger::ConsoleLogger;
pub use logger::{LogLevel, Logger, NullLogger};
