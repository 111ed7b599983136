//! Commit analytics
//!
//! Turns a flat collection of [`CommitRecord`](crate::CommitRecord)s into
//! the statistics behind a "year in review":
//! - Contribution heatmap and frequency series
//! - Hour/weekday activity patterns and chronotype
//! - Streaks, productivity and year-over-year growth
//! - Superlatives and badges
//!
//! Every aggregator is a pure function of its input. The [`engine`]
//! module runs them all and assembles an [`AnalyticsBundle`]; the
//! [`partial`] module holds the mergeable per-chunk aggregate used for
//! large inputs.

pub mod badges;
pub mod calendar;
pub mod engine;
pub mod growth;
pub mod heatmap;
pub mod monthly;
pub mod partial;
pub mod patterns;
pub mod personality;
pub mod productivity;
pub mod series;
pub mod stats;
pub mod streaks;
pub mod superlatives;

#[cfg(test)]
mod testing;

// Engine exports
pub use engine::{
    compute_analytics, compute_analytics_at, AnalysisOptions, AnalyticsBundle, ReferenceTime,
    DEFAULT_CHUNK_SIZE,
};
pub use partial::{aggregate_chunked, PartialAggregate};

// Aggregator exports
pub use badges::{evaluate_badges, Badge, BadgeContext};
pub use growth::{year_over_year, yearly_stats, YearGrowth, YearStats};
pub use heatmap::{Heatmap, HeatmapCell};
pub use monthly::{monthly_breakdown, MonthStats};
pub use patterns::ActivityPatterns;
pub use personality::{Chronotype, WeekendType};
pub use productivity::{PeakMonth, ProductivityStats, SizeDistribution};
pub use series::{FrequencyPoint, TemporalSeries};
pub use stats::{ContributorStats, LanguageShare, LanguageStats, TotalStats};
pub use streaks::{BusiestDay, StreakInfo, StreakSummary};
pub use superlatives::{CommitMood, ConventionalCounts, SuperlativesData};
