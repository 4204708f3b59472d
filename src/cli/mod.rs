// CLI module - command line definitions

pub mod args;

pub use args::{Cli, Commands, OutputFormat};
