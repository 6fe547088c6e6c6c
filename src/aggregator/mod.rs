//! Epoch aggregation
//!
//! The aggregator owns the single live [`Epoch`](crate::models::Epoch),
//! folds decoded sentences into it in arrival order, and on every offset
//! report hands the completed epoch out by value and starts a fresh one.
//!
//! - [`engine`] - [`EpochAggregator`], the per-sentence update rules
//! - [`unknown`] - once-per-type reporting of unsupported sentences

pub mod engine;
pub mod unknown;

#[cfg(test)]
pub mod tests;

pub use engine::EpochAggregator;
pub use unknown::UnknownSentenceLog;
