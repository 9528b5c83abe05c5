pub mod cli_args;
pub mod formatter;

pub use cli_args::{CliArgs, OutputFormat};
pub use formatter::OutputFormatter;
