// Suite module - suite nesting during a run and the declared spec names

pub mod names;
pub mod tracker;

pub use names::SpecNameIndex;
pub use tracker::{SuiteLabel, SuiteNode, SuitePathTracker};
