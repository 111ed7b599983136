//! Frequency series at day, week, month or year granularity.
//!
//! Commits are bucketed once; the aggregate series and every per-repository
//! series come out of the same pass, so for any bucket the aggregate count
//! is exactly the sum of the per-repository counts.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use super::calendar;
use crate::types::{CommitRecord, Granularity};

/// One bucket of a frequency series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyPoint {
    /// Sort key (`YYYY-MM-DD`, `YYYY-MM` or `YYYY`)
    pub key: String,
    /// Human-readable bucket label
    pub label: String,
    /// First calendar day of the bucket
    pub date: String,
    pub count: u64,
    pub additions: u64,
    pub deletions: u64,
}

/// Aggregate and per-repository series for one granularity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalSeries {
    pub granularity: Granularity,
    /// All repositories combined, ascending by key
    pub overall: Vec<FrequencyPoint>,
    /// One series per repository id, each ascending by key
    pub by_repo: BTreeMap<String, Vec<FrequencyPoint>>,
}

#[derive(Debug, Default, Clone, Copy)]
struct BucketTally {
    count: u64,
    additions: u64,
    deletions: u64,
}

impl BucketTally {
    fn add(&mut self, commit: &CommitRecord) {
        self.count += 1;
        self.additions += commit.additions;
        self.deletions += commit.deletions;
    }
}

/// The bucket a date falls into: `(key, first day of bucket)`.
pub fn bucket_for(date: NaiveDate, granularity: Granularity) -> (String, NaiveDate) {
    match granularity {
        Granularity::Day => (calendar::date_key(date), date),
        Granularity::Week => {
            let start = calendar::week_start(date);
            (calendar::date_key(start), start)
        }
        Granularity::Month => (
            format!("{:04}-{:02}", date.year(), date.month()),
            calendar::month_start(date),
        ),
        Granularity::Year => (
            format!("{:04}", date.year()),
            NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        ),
    }
}

/// Display label for a bucket starting at `start`.
pub fn bucket_label(start: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => format!(
            "{} {}",
            calendar::month_short_name(start.month()),
            start.day()
        ),
        Granularity::Week => format!(
            "Week of {} {}",
            calendar::month_short_name(start.month()),
            start.day()
        ),
        Granularity::Month => format!(
            "{} {}",
            calendar::month_short_name(start.month()),
            start.year()
        ),
        Granularity::Year => start.year().to_string(),
    }
}

impl TemporalSeries {
    /// Bucket `commits` at `granularity`.
    pub fn build(commits: &[CommitRecord], granularity: Granularity) -> Self {
        let mut overall: BTreeMap<String, (NaiveDate, BucketTally)> = BTreeMap::new();
        let mut by_repo: BTreeMap<String, BTreeMap<String, (NaiveDate, BucketTally)>> =
            BTreeMap::new();

        for commit in commits {
            let Some(date) = calendar::parse_date_key(&commit.date_key) else {
                tracing::warn!(
                    sha = %commit.sha,
                    date_key = %commit.date_key,
                    "Skipping commit with bad date key"
                );
                continue;
            };
            let (key, start) = bucket_for(date, granularity);

            overall
                .entry(key.clone())
                .or_insert_with(|| (start, BucketTally::default()))
                .1
                .add(commit);
            by_repo
                .entry(commit.repo_id.clone())
                .or_default()
                .entry(key)
                .or_insert_with(|| (start, BucketTally::default()))
                .1
                .add(commit);
        }

        let to_points = |buckets: BTreeMap<String, (NaiveDate, BucketTally)>| {
            buckets
                .into_iter()
                .map(|(key, (start, tally))| FrequencyPoint {
                    key,
                    label: bucket_label(start, granularity),
                    date: calendar::date_key(start),
                    count: tally.count,
                    additions: tally.additions,
                    deletions: tally.deletions,
                })
                .collect::<Vec<_>>()
        };

        Self {
            granularity,
            overall: to_points(overall),
            by_repo: by_repo
                .into_iter()
                .map(|(repo, buckets)| (repo, to_points(buckets)))
                .collect(),
        }
    }

    /// Series for a single repository (empty if it has no commits).
    pub fn for_repo(&self, repo_id: &str) -> &[FrequencyPoint] {
        self.by_repo.get(repo_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::commit;

    fn sample() -> Vec<CommitRecord> {
        vec![
            commit("2024-01-01", 9, "r1").with_changes(5, 1, 1),
            commit("2024-01-03", 9, "r2").with_changes(2, 2, 1),
            commit("2024-01-07", 9, "r1"),
            commit("2024-01-08", 9, "r1"),
            commit("2024-02-29", 9, "r2"),
            commit("2025-01-01", 9, "r3"),
        ]
    }

    #[test]
    fn test_week_buckets_start_on_monday() {
        let series = TemporalSeries::build(&sample(), Granularity::Week);
        let keys: Vec<_> = series.overall.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-01-01", "2024-01-08", "2024-02-26", "2024-12-30"]);
        assert_eq!(series.overall[0].count, 3);
        assert_eq!(series.overall[0].additions, 7);
        assert_eq!(series.overall[0].label, "Week of Jan 1");
    }

    #[test]
    fn test_month_and_year_keys() {
        let months = TemporalSeries::build(&sample(), Granularity::Month);
        let keys: Vec<_> = months.overall.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-01", "2024-02", "2025-01"]);
        assert_eq!(months.overall[1].date, "2024-02-01");
        assert_eq!(months.overall[1].label, "Feb 2024");

        let years = TemporalSeries::build(&sample(), Granularity::Year);
        assert_eq!(years.overall.len(), 2);
        assert_eq!(years.overall[0].count, 5);
        assert_eq!(years.overall[1].label, "2025");
    }

    #[test]
    fn test_conservation_across_repos() {
        for granularity in [
            Granularity::Day,
            Granularity::Week,
            Granularity::Month,
            Granularity::Year,
        ] {
            let series = TemporalSeries::build(&sample(), granularity);
            for point in &series.overall {
                let per_repo: u64 = series
                    .by_repo
                    .values()
                    .flat_map(|points| points.iter())
                    .filter(|p| p.key == point.key)
                    .map(|p| p.count)
                    .sum();
                assert_eq!(per_repo, point.count, "{} {}", granularity, point.key);
            }
        }
    }

    #[test]
    fn test_per_repo_series_sorted() {
        let series = TemporalSeries::build(&sample(), Granularity::Day);
        let r1: Vec<_> = series.for_repo("r1").iter().map(|p| p.key.as_str()).collect();
        assert_eq!(r1, vec!["2024-01-01", "2024-01-07", "2024-01-08"]);
        assert!(series.for_repo("missing").is_empty());
    }
}
