//! # commitlens-core
//!
//! Core library for commitlens - commit analytics for a "year in review".
//!
//! This library provides:
//! - Domain types for commits and repositories
//! - The analytics engine (heatmaps, series, patterns, streaks, growth, badges)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! The engine is a pure transformation:
//! - **Input:** already-normalized [`CommitRecord`]s and [`RepositoryRecord`]s
//! - **Aggregation:** a mergeable [`analytics::PartialAggregate`], built in
//!   parallel chunks for large inputs
//! - **Output:** an [`analytics::AnalyticsBundle`] of derived statistics
//!
//! No network or disk I/O happens inside the engine; only [`config`] and
//! [`logging`] touch the filesystem.
//!
//! ## Example
//!
//! ```rust,no_run
//! use commitlens_core::analytics::{compute_analytics, AnalysisOptions};
//! use commitlens_core::{AnalyticsInput, Config};
//!
//! // Load configuration
//! let config = Config::load().expect("failed to load config");
//!
//! // Read a commit dump and analyze it
//! let json = std::fs::read_to_string("commits.json").expect("failed to read input");
//! let input = AnalyticsInput::from_json(&json).expect("failed to parse input");
//! let options = AnalysisOptions::from(&config.analytics);
//! let bundle = compute_analytics(&input.commits, &input.repositories, &options)
//!     .expect("failed to compute analytics");
//! println!("{} commits", bundle.totals.commits);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{compute_analytics, compute_analytics_at, AnalysisOptions, AnalyticsBundle};
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod types;
