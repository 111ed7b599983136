//! Year-over-year rollups and growth.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::calendar::percentage_growth;
use crate::types::CommitRecord;

/// Totals for one calendar year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStats {
    pub year: i32,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    pub active_days: u64,
    pub repo_count: u64,
}

impl YearStats {
    /// Lines changed (additions + deletions).
    pub fn lines_changed(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// Growth from one year to the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGrowth {
    pub from_year: i32,
    pub to_year: i32,
    pub commit_growth_pct: f64,
    pub active_days_growth_pct: f64,
    pub lines_growth_pct: f64,
}

impl YearGrowth {
    pub fn between(from: &YearStats, to: &YearStats) -> Self {
        Self {
            from_year: from.year,
            to_year: to.year,
            commit_growth_pct: percentage_growth(from.commits, to.commits),
            active_days_growth_pct: percentage_growth(from.active_days, to.active_days),
            lines_growth_pct: percentage_growth(from.lines_changed(), to.lines_changed()),
        }
    }
}

#[derive(Default)]
struct YearAccumulator<'a> {
    commits: u64,
    additions: u64,
    deletions: u64,
    days: BTreeSet<&'a str>,
    repos: BTreeSet<&'a str>,
}

/// Per-year totals, ascending by year.
pub fn yearly_stats(commits: &[CommitRecord]) -> Vec<YearStats> {
    let mut years: BTreeMap<i32, YearAccumulator> = BTreeMap::new();

    for commit in commits {
        let acc = years.entry(commit.year).or_default();
        acc.commits += 1;
        acc.additions += commit.additions;
        acc.deletions += commit.deletions;
        acc.days.insert(&commit.date_key);
        acc.repos.insert(&commit.repo_id);
    }

    years
        .into_iter()
        .map(|(year, acc)| YearStats {
            year,
            commits: acc.commits,
            additions: acc.additions,
            deletions: acc.deletions,
            active_days: acc.days.len() as u64,
            repo_count: acc.repos.len() as u64,
        })
        .collect()
}

/// Growth between each pair of adjacent years present in `years`.
///
/// A missing year is not bridged: 2022 and 2024 without 2023 yields nothing.
pub fn year_over_year(years: &[YearStats]) -> Vec<YearGrowth> {
    years
        .windows(2)
        .filter(|pair| pair[1].year == pair[0].year + 1)
        .map(|pair| YearGrowth::between(&pair[0], &pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::commit;

    #[test]
    fn test_yearly_rollup() {
        let commits = vec![
            commit("2023-05-01", 9, "r1").with_changes(10, 0, 1),
            commit("2023-05-01", 10, "r2").with_changes(5, 5, 1),
            commit("2024-01-01", 9, "r1").with_changes(40, 0, 1),
        ];
        let years = yearly_stats(&commits);
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2023);
        assert_eq!(years[0].commits, 2);
        assert_eq!(years[0].active_days, 1);
        assert_eq!(years[0].repo_count, 2);
        assert_eq!(years[0].lines_changed(), 20);

        let growth = year_over_year(&years);
        assert_eq!(growth.len(), 1);
        assert_eq!(growth[0].commit_growth_pct, -50.0);
        assert_eq!(growth[0].active_days_growth_pct, 0.0);
        assert_eq!(growth[0].lines_growth_pct, 100.0);
    }

    #[test]
    fn test_gap_years_are_not_bridged() {
        let commits = vec![
            commit("2022-03-01", 9, "r1"),
            commit("2024-03-01", 9, "r1"),
            commit("2025-03-01", 9, "r1"),
            commit("2025-03-02", 9, "r1"),
        ];
        let growth = year_over_year(&yearly_stats(&commits));
        assert_eq!(growth.len(), 1);
        assert_eq!((growth[0].from_year, growth[0].to_year), (2024, 2025));
        assert_eq!(growth[0].commit_growth_pct, 100.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(yearly_stats(&[]).is_empty());
        assert!(year_over_year(&[]).is_empty());
    }
}
