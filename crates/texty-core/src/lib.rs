//! texty-core — Problem-set tracking, ranking and weighted sampling.
//!
//! This crate holds the review data model ([`ProblemSet`]), the collection
//! that owns it ([`ProblemSetManager`]), the weighted sampler that drives
//! review sessions, and the text/blob persistence formats.

pub mod error;
pub mod manager;
pub mod problem_set;
pub mod sampling;
pub mod statistics;
pub mod storage;

pub use error::{Result, TextyError};
pub use manager::{ProblemSetManager, DISPLAY_HEADER};
pub use problem_set::{FieldKey, HistoryEntry, Outcome, ProblemFilter, ProblemSet, SampledProblem};
pub use sampling::SamplingConfig;
pub use statistics::AggregateStats;
pub use storage::StorageEncoding;
