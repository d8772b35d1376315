//! Storage capabilities injected into the scoring pipeline.

mod store;

pub use store::{AlertRuleStore, ScoreStore};
