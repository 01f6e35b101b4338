//! # Passboard Common Library
//!
//! Shared code for the Passboard workspace:
//! - Error type used by configuration and input validation
//! - TOML configuration loading
//! - Data models exchanged with the asset index and the pass store

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{ActionRecord, ActionTimestamp, AssetRecord, PassState, ProgramMeta, RewardTier};
