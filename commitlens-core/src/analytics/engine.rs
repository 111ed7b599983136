//! Analytics orchestrator
//!
//! Runs every aggregator over one commit collection and assembles the
//! results into an [`AnalyticsBundle`].
//!
//! ## Pipeline
//!
//! ```text
//! commits ──validate──► PartialAggregate ──► heatmap, patterns, streaks,
//!    │                   (chunked via rayon     totals, contributors
//!    │                    for large inputs)
//!    └──────────────────────────────────────► series, productivity,
//!                                              yearly/growth, monthly,
//!                                              superlatives + badges
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use commitlens_core::analytics::{compute_analytics_at, AnalysisOptions, ReferenceTime};
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! let now = ReferenceTime::at(
//!     Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//! );
//! let bundle = compute_analytics_at(&[], &[], &AnalysisOptions::default(), now).unwrap();
//! assert_eq!(bundle.totals.commits, 0);
//! ```

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use std::time::Instant;

use super::growth::{year_over_year, yearly_stats, YearGrowth, YearStats};
use super::heatmap::Heatmap;
use super::monthly::{monthly_breakdown, MonthStats};
use super::partial::{aggregate_chunked, PartialAggregate};
use super::patterns::ActivityPatterns;
use super::productivity::ProductivityStats;
use super::series::TemporalSeries;
use super::stats::{
    rank_contributors, ContributorStats, LanguageStats, TotalStats, DEFAULT_CONTRIBUTOR_LIMIT,
};
use super::streaks::{StreakSummary, DEFAULT_TOP_STREAKS};
use super::superlatives::SuperlativesData;
use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::types::{CommitRecord, Granularity, RepositoryRecord};

/// Inputs above this many commits are aggregated in parallel chunks.
pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// Knobs for a single analytics run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Bucket size for the frequency series
    pub granularity: Granularity,
    /// Maximum contributors kept in the ranking
    pub contributor_limit: usize,
    /// Number of streaks kept in the top list
    pub top_streaks: usize,
    /// Commits per parallel chunk
    pub chunk_size: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            contributor_limit: DEFAULT_CONTRIBUTOR_LIMIT,
            top_streaks: DEFAULT_TOP_STREAKS,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl From<&AnalyticsConfig> for AnalysisOptions {
    fn from(config: &AnalyticsConfig) -> Self {
        Self {
            granularity: config.granularity,
            contributor_limit: config.contributor_limit,
            top_streaks: config.top_streaks,
            chunk_size: config.chunk_size,
        }
    }
}

/// The "now" a run is computed against.
///
/// `today` decides whether the latest streak is still current; `computed_at`
/// is stamped on the bundle. Fixing both makes a run fully reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceTime {
    pub computed_at: DateTime<Utc>,
    pub today: NaiveDate,
}

impl ReferenceTime {
    /// The wall clock, with `today` in the local timezone.
    pub fn now() -> Self {
        Self {
            computed_at: Utc::now(),
            today: Local::now().date_naive(),
        }
    }

    pub fn at(computed_at: DateTime<Utc>, today: NaiveDate) -> Self {
        Self { computed_at, today }
    }

    /// Override the calendar day, keeping `computed_at`.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

/// Everything derived from one commit collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsBundle {
    pub computed_at: DateTime<Utc>,
    pub granularity: Granularity,
    pub totals: TotalStats,
    pub contributors: Vec<ContributorStats>,
    pub languages: LanguageStats,
    pub heatmap: Heatmap,
    pub series: TemporalSeries,
    pub patterns: ActivityPatterns,
    pub streaks: StreakSummary,
    pub productivity: ProductivityStats,
    pub yearly: Vec<YearStats>,
    pub growth: Vec<YearGrowth>,
    pub monthly: Vec<MonthStats>,
    pub superlatives: SuperlativesData,
}

/// Compute the full bundle against the wall clock.
pub fn compute_analytics(
    commits: &[CommitRecord],
    repos: &[RepositoryRecord],
    options: &AnalysisOptions,
) -> Result<AnalyticsBundle> {
    compute_analytics_at(commits, repos, options, ReferenceTime::now())
}

/// Compute the full bundle against an explicit reference time.
///
/// Identical inputs and reference time always produce identical bundles.
/// Fails only when a commit is malformed; empty input yields zero values.
pub fn compute_analytics_at(
    commits: &[CommitRecord],
    repos: &[RepositoryRecord],
    options: &AnalysisOptions,
    now: ReferenceTime,
) -> Result<AnalyticsBundle> {
    let start = Instant::now();

    for commit in commits {
        commit.validate()?;
    }

    tracing::debug!(
        commits = commits.len(),
        repositories = repos.len(),
        granularity = %options.granularity,
        chunk_size = options.chunk_size,
        "Computing analytics"
    );

    let partial = if commits.len() > options.chunk_size {
        aggregate_chunked(commits, options.chunk_size)?
    } else {
        PartialAggregate::from_commits(commits)
    };

    let heatmap = Heatmap::from_partial(&partial);
    let patterns = ActivityPatterns::from_partial(&partial);
    let streaks = StreakSummary::from_partial(&partial, now.today, options.top_streaks);
    let totals = TotalStats::from_partial(&partial, repos);
    let contributors = rank_contributors(&partial, options.contributor_limit);
    tracing::debug!(
        active_days = totals.active_days,
        contributors = totals.contributors,
        "Aggregated daily activity"
    );

    let series = TemporalSeries::build(commits, options.granularity);
    let productivity = ProductivityStats::from_commits(commits);
    let yearly = yearly_stats(commits);
    let growth = year_over_year(&yearly);
    let monthly = monthly_breakdown(commits);
    let languages = LanguageStats::from_repositories(repos);
    tracing::debug!(
        buckets = series.overall.len(),
        years = yearly.len(),
        months = monthly.len(),
        languages = languages.language_count(),
        "Built time series and rollups"
    );

    let superlatives =
        SuperlativesData::derive(commits, repos, &patterns, &totals, &streaks, &languages);

    tracing::info!(
        commits = totals.commits,
        repositories = totals.repositories,
        longest_streak = streaks.longest.length,
        badges = superlatives.badges.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Analytics computed"
    );

    Ok(AnalyticsBundle {
        computed_at: now.computed_at,
        granularity: options.granularity,
        totals,
        contributors,
        languages,
        heatmap,
        series,
        patterns,
        streaks,
        productivity,
        yearly,
        growth,
        monthly,
        superlatives,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{commit, commit_by, commit_msg};
    use crate::error::Error;
    use chrono::TimeZone;

    fn fixed_now() -> ReferenceTime {
        ReferenceTime::at(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
    }

    fn sample() -> Vec<CommitRecord> {
        let mut commits = Vec::new();
        for day in 1..=5 {
            let date = format!("2024-01-0{}", day);
            commits.push(commit(&date, 9, "web").with_changes(10, 2, 1));
            commits.push(commit_by(&date, 22, "api", "bob", "Bob").with_changes(3, 3, 2));
        }
        commits.push(
            commit_msg("2023-12-30", 23, "web", "fix: late night").with_changes(1, 1, 1),
        );
        commits
    }

    #[test]
    fn test_empty_input_is_zero_bundle() {
        let bundle =
            compute_analytics_at(&[], &[], &AnalysisOptions::default(), fixed_now()).unwrap();
        assert_eq!(bundle.totals, TotalStats::default());
        assert!(bundle.contributors.is_empty());
        assert!(bundle.heatmap.cells.is_empty());
        assert!(bundle.series.overall.is_empty());
        assert!(bundle.streaks.longest.is_empty());
        assert!(bundle.yearly.is_empty());
        assert!(bundle.growth.is_empty());
        assert_eq!(bundle.superlatives, SuperlativesData::default());
        assert_eq!(bundle.computed_at, fixed_now().computed_at);
    }

    #[test]
    fn test_idempotent_with_fixed_time() {
        let commits = sample();
        let options = AnalysisOptions::default();
        let first = compute_analytics_at(&commits, &[], &options, fixed_now()).unwrap();
        let second = compute_analytics_at(&commits, &[], &options, fixed_now()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_chunked_matches_single_pass() {
        crate::logging::init_test();
        let commits = sample();
        let single = compute_analytics_at(&commits, &[], &AnalysisOptions::default(), fixed_now())
            .unwrap();
        for chunk_size in [1, 2, 3, 7] {
            let options = AnalysisOptions {
                chunk_size,
                ..Default::default()
            };
            let chunked = compute_analytics_at(&commits, &[], &options, fixed_now()).unwrap();
            assert_eq!(chunked, single, "chunk_size {}", chunk_size);
        }
    }

    #[test]
    fn test_bundle_sections_agree() {
        let commits = sample();
        let bundle =
            compute_analytics_at(&commits, &[], &AnalysisOptions::default(), fixed_now()).unwrap();

        assert_eq!(bundle.totals.commits, 11);
        assert_eq!(bundle.totals.repositories, 2);
        assert_eq!(bundle.totals.contributors, 2);
        assert_eq!(bundle.patterns.total(), 11);
        let series_total: u64 = bundle.series.overall.iter().map(|p| p.count).sum();
        assert_eq!(series_total, 11);
        let heatmap_total: u64 = bundle.heatmap.cells.values().map(|c| c.count).sum();
        assert_eq!(heatmap_total, 11);

        // Dec 30 stands alone; Jan 1-5 ends on `today`
        assert_eq!(bundle.streaks.longest.length, 5);
        assert_eq!(bundle.streaks.current.length, 5);
        assert_eq!(bundle.growth.len(), 1);
        assert_eq!(bundle.contributors[0].identity, "ada");
        assert!(bundle.patterns.is_night_owl);
    }

    #[test]
    fn test_invalid_commit_fails_fast() {
        let mut bad = commit("2024-01-01", 9, "r1");
        bad.hour_of_day = 24;
        let err = compute_analytics_at(&[bad], &[], &AnalysisOptions::default(), fixed_now())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCommit { .. }));
    }

    #[test]
    fn test_options_from_config() {
        let config = AnalyticsConfig {
            granularity: Granularity::Month,
            contributor_limit: 3,
            top_streaks: 2,
            chunk_size: 100,
        };
        let options = AnalysisOptions::from(&config);
        assert_eq!(options.granularity, Granularity::Month);
        assert_eq!(options.contributor_limit, 3);
        assert_eq!(options.top_streaks, 2);
        assert_eq!(options.chunk_size, 100);
    }
}
