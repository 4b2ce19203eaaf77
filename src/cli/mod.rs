pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DiscoverArgs, ListArgs, ShowArgs};
pub use output::{ConsoleProgress, OutputFormat, OutputFormatter};
