//! passboard-agg library interface
//!
//! Turns a collection's paginated asset index into per-owner membership data:
//! - [`Aggregator::build_leaderboard`]: ranked owners with tier and level
//! - [`Aggregator::build_members`]: per-owner pass listings
//!
//! Pipeline: asset index walk → owner grouping → pass enrichment → assembly.

pub mod aggregator;
pub mod error;
pub mod grouping;
pub mod index;
pub mod leaderboard;
pub mod members;
pub mod pass_store;
pub mod tier;

pub use crate::aggregator::Aggregator;
pub use crate::error::{AggregationError, AggregationResult, IndexError, PassFetchError};
pub use crate::leaderboard::{LeaderboardResponse, MemberAggregate};
pub use crate::members::{Member, MemberAction, MemberPass};
