//! Consecutive-day streak detection.
//!
//! Works purely on calendar dates parsed from date keys, never on
//! timestamps, so the hour a commit landed cannot split or join a streak.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::calendar;
use super::partial::{DayTally, PartialAggregate};
use crate::types::CommitRecord;

/// Default number of streaks reported in [`StreakSummary::top`].
pub const DEFAULT_TOP_STREAKS: usize = 5;

/// A maximal run of consecutive active days.
///
/// The zero value (length 0, empty dates) stands for "no streak".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    /// Days in the streak, inclusive
    pub length: u32,
    pub start_date: String,
    pub end_date: String,
    pub total_commits: u64,
}

impl StreakInfo {
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// The single day with the most commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusiestDay {
    pub date: String,
    pub count: u64,
    pub repo_ids: Vec<String>,
}

/// Everything the streak detector reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub longest: StreakInfo,
    /// Streak ending today or yesterday, else the zero value
    pub current: StreakInfo,
    /// Longest streaks first; equal lengths keep chronological order
    pub top: Vec<StreakInfo>,
    /// Every streak, ascending by start date
    pub all: Vec<StreakInfo>,
    pub most_commits_in_day: BusiestDay,
    pub active_days: u64,
}

struct OpenStreak {
    start: NaiveDate,
    end: NaiveDate,
    commits: u64,
}

impl OpenStreak {
    fn close(self) -> StreakInfo {
        StreakInfo {
            length: ((self.end - self.start).num_days() + 1) as u32,
            start_date: calendar::date_key(self.start),
            end_date: calendar::date_key(self.end),
            total_commits: self.commits,
        }
    }
}

/// Split the active days into streaks, ascending by start date.
pub fn detect_streaks(days: &BTreeMap<String, DayTally>) -> Vec<StreakInfo> {
    let mut streaks = Vec::new();
    let mut open: Option<OpenStreak> = None;

    for (key, tally) in days {
        let Some(date) = calendar::parse_date_key(key) else {
            tracing::warn!(date_key = %key, "Skipping unparseable date key");
            continue;
        };

        open = match open {
            Some(mut streak) if (date - streak.end).num_days() == 1 => {
                streak.end = date;
                streak.commits += tally.commits;
                Some(streak)
            }
            previous => {
                if let Some(streak) = previous {
                    streaks.push(streak.close());
                }
                Some(OpenStreak {
                    start: date,
                    end: date,
                    commits: tally.commits,
                })
            }
        };
    }

    if let Some(streak) = open {
        streaks.push(streak.close());
    }

    streaks
}

impl StreakSummary {
    pub fn from_commits(commits: &[CommitRecord], today: NaiveDate, top_n: usize) -> Self {
        Self::from_partial(&PartialAggregate::from_commits(commits), today, top_n)
    }

    /// Detect streaks relative to `today` (the caller's local calendar day).
    pub fn from_partial(partial: &PartialAggregate, today: NaiveDate, top_n: usize) -> Self {
        let all = detect_streaks(&partial.days);

        let mut ranked = all.clone();
        // Stable sort keeps earlier streaks ahead of later ones of equal length
        ranked.sort_by(|a, b| b.length.cmp(&a.length));
        let longest = ranked.first().cloned().unwrap_or_default();
        ranked.truncate(top_n);

        let current = all
            .last()
            .filter(|streak| {
                calendar::parse_date_key(&streak.end_date)
                    .map(|end| {
                        let days_ago = (today - end).num_days();
                        days_ago == 0 || days_ago == 1
                    })
                    .unwrap_or(false)
            })
            .cloned()
            .unwrap_or_default();

        let mut most_commits_in_day = BusiestDay::default();
        for (date, tally) in &partial.days {
            if tally.commits > most_commits_in_day.count {
                most_commits_in_day = BusiestDay {
                    date: date.clone(),
                    count: tally.commits,
                    repo_ids: tally.repo_ids.iter().cloned().collect(),
                };
            }
        }

        Self {
            longest,
            current,
            top: ranked,
            all,
            most_commits_in_day,
            active_days: partial.active_days(),
        }
    }
}
