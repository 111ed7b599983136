//! Productivity metrics: peak month, normalized weekday output, commit sizes.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::calendar;
use crate::types::CommitRecord;

/// The calendar month with the most commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakMonth {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub commits: u64,
}

/// Commit counts by `total_changes` bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeDistribution {
    /// Fewer than 10 lines changed
    pub small: u64,
    /// 10 to 99 lines
    pub medium: u64,
    /// 100 to 499 lines
    pub large: u64,
    /// 500 lines or more
    pub huge: u64,
}

impl SizeDistribution {
    pub fn record(&mut self, total_changes: u64) {
        match total_changes {
            0..=9 => self.small += 1,
            10..=99 => self.medium += 1,
            100..=499 => self.large += 1,
            _ => self.huge += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.small + self.medium + self.large + self.huge
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityStats {
    pub most_productive_month: PeakMonth,
    /// Average commits per active week for each weekday (0=Sunday)
    pub weekday_averages: [f64; 7],
    /// Weekday with the highest normalized average, lowest index on ties
    pub most_productive_day: u8,
    pub avg_commits_per_active_day: f64,
    pub avg_lines_per_commit: f64,
    pub size_distribution: SizeDistribution,
}

impl Default for ProductivityStats {
    fn default() -> Self {
        Self {
            most_productive_month: PeakMonth::default(),
            weekday_averages: [0.0; 7],
            most_productive_day: 0,
            avg_commits_per_active_day: 0.0,
            avg_lines_per_commit: 0.0,
            size_distribution: SizeDistribution::default(),
        }
    }
}

impl ProductivityStats {
    pub fn from_commits(commits: &[CommitRecord]) -> Self {
        if commits.is_empty() {
            return Self::default();
        }

        let mut per_month: BTreeMap<(i32, u32), u64> = BTreeMap::new();
        let mut weekday_counts = [0u64; 7];
        // Distinct weeks (by Monday) in which each weekday saw activity
        let mut weekday_weeks: [BTreeSet<chrono::NaiveDate>; 7] = Default::default();
        let mut active_days = BTreeSet::new();
        let mut total_lines = 0u64;
        let mut size_distribution = SizeDistribution::default();

        for commit in commits {
            *per_month.entry((commit.year, commit.month)).or_insert(0) += 1;

            let weekday = commit.day_of_week as usize;
            weekday_counts[weekday] += 1;
            if let Some(date) = calendar::parse_date_key(&commit.date_key) {
                weekday_weeks[weekday].insert(calendar::week_start(date));
            }

            active_days.insert(commit.date_key.as_str());
            total_lines += commit.total_changes;
            size_distribution.record(commit.total_changes);
        }

        // BTreeMap iterates chronologically, so strict > keeps the earliest peak
        let mut most_productive_month = PeakMonth::default();
        for (&(year, month), &count) in &per_month {
            if count > most_productive_month.commits {
                most_productive_month = PeakMonth {
                    year,
                    month,
                    label: format!("{} {}", calendar::month_name(month), year),
                    commits: count,
                };
            }
        }

        let weekday_averages: [f64; 7] = std::array::from_fn(|day| {
            match weekday_weeks[day].len() {
                0 => 0.0,
                weeks => weekday_counts[day] as f64 / weeks as f64,
            }
        });
        let most_productive_day = weekday_averages
            .iter()
            .enumerate()
            .fold(0, |best, (day, &avg)| {
                if avg > weekday_averages[best] {
                    day
                } else {
                    best
                }
            });

        let total = commits.len() as f64;
        Self {
            most_productive_month,
            weekday_averages,
            most_productive_day: most_productive_day as u8,
            avg_commits_per_active_day: total / active_days.len() as f64,
            avg_lines_per_commit: total_lines as f64 / total,
            size_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::commit;

    #[test]
    fn test_size_buckets_are_half_open() {
        let mut dist = SizeDistribution::default();
        for size in [0, 9, 10, 99, 100, 499, 500, 10_000] {
            dist.record(size);
        }
        assert_eq!(
            dist,
            SizeDistribution {
                small: 2,
                medium: 2,
                large: 2,
                huge: 2
            }
        );
        assert_eq!(dist.total(), 8);
    }

    #[test]
    fn test_weekday_normalized_by_active_weeks() {
        // Mondays: one commit in each of 4 weeks -> avg 1.0
        // Fridays: 3 commits in a single week -> avg 3.0
        let commits = vec![
            commit("2024-01-01", 9, "r1"),
            commit("2024-01-08", 9, "r1"),
            commit("2024-01-15", 9, "r1"),
            commit("2024-01-22", 9, "r1"),
            commit("2024-01-05", 9, "r1"),
            commit("2024-01-05", 10, "r1"),
            commit("2024-01-05", 11, "r1"),
        ];
        let stats = ProductivityStats::from_commits(&commits);
        assert_eq!(stats.weekday_averages[1], 1.0);
        assert_eq!(stats.weekday_averages[5], 3.0);
        assert_eq!(stats.most_productive_day, 5);
        assert_eq!(stats.avg_commits_per_active_day, 7.0 / 5.0);
    }

    #[test]
    fn test_most_productive_month_and_line_average() {
        let commits = vec![
            commit("2024-01-10", 9, "r1").with_changes(10, 0, 1),
            commit("2024-02-10", 9, "r1").with_changes(20, 10, 1),
            commit("2024-02-11", 9, "r1").with_changes(0, 0, 0),
            commit("2024-03-10", 9, "r1").with_changes(0, 0, 0),
            commit("2024-03-11", 9, "r1").with_changes(0, 0, 0),
        ];
        let stats = ProductivityStats::from_commits(&commits);
        // February and March tie; earliest wins
        assert_eq!(stats.most_productive_month.month, 2);
        assert_eq!(stats.most_productive_month.label, "February 2024");
        assert_eq!(stats.avg_lines_per_commit, 8.0);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(ProductivityStats::from_commits(&[]), ProductivityStats::default());
    }
}
