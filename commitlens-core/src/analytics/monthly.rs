//! Per-calendar-month breakdown.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::calendar;
use crate::types::CommitRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub year: i32,
    pub month: u32,
    /// e.g. "January 2024"
    pub label: String,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    /// Repository with the most commits this month (smallest id on ties)
    pub top_repo: String,
    pub active_days: u64,
}

#[derive(Default)]
struct MonthAccumulator<'a> {
    commits: u64,
    additions: u64,
    deletions: u64,
    days: BTreeSet<&'a str>,
    repos: BTreeMap<&'a str, u64>,
}

/// One entry per month with activity, ascending.
pub fn monthly_breakdown(commits: &[CommitRecord]) -> Vec<MonthStats> {
    let mut months: BTreeMap<(i32, u32), MonthAccumulator> = BTreeMap::new();

    for commit in commits {
        let acc = months.entry((commit.year, commit.month)).or_default();
        acc.commits += 1;
        acc.additions += commit.additions;
        acc.deletions += commit.deletions;
        acc.days.insert(&commit.date_key);
        *acc.repos.entry(&commit.repo_id).or_insert(0) += 1;
    }

    months
        .into_iter()
        .map(|((year, month), acc)| {
            let mut top_repo = ("", 0u64);
            for (&repo, &count) in &acc.repos {
                if count > top_repo.1 {
                    top_repo = (repo, count);
                }
            }
            MonthStats {
                year,
                month,
                label: format!("{} {}", calendar::month_name(month), year),
                commits: acc.commits,
                additions: acc.additions,
                deletions: acc.deletions,
                top_repo: top_repo.0.to_string(),
                active_days: acc.days.len() as u64,
            }
        })
        .collect()
}
