pub mod cli;
pub mod commands;
pub mod config;
pub mod filter;
pub mod host;
pub mod logging;
pub mod report;
pub mod runner;
pub mod sanitize;
pub mod state;
pub mod suite;
pub mod time;

pub use filter::{grep_option, ClientArgs, SpecFilter};
pub use host::{Host, ReplayHost};
pub use report::{LifecycleReporter, ResultReporter, Transport};
pub use runner::{create_spec_filter, start};
pub use sanitize::StackSanitizer;
pub use suite::{SpecNameIndex, SuitePathTracker};
