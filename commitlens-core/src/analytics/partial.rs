//! Partial aggregates and their merge.
//!
//! A [`PartialAggregate`] is the reduction of any contiguous slice of
//! commits: per-day tallies, hour/weekday histograms, running totals, and
//! distinct repository/contributor sets. [`PartialAggregate::merge`] sums
//! counts and unions sets, so it is associative and commutative with
//! `PartialAggregate::default()` as identity. Every container is ordered,
//! which makes a merged aggregate equal, field for field, to the one built
//! from the whole list in a single pass.
//!
//! ```rust
//! use commitlens_core::analytics::partial::{aggregate_chunked, PartialAggregate};
//!
//! let commits = Vec::new();
//! let whole = PartialAggregate::from_commits(&commits);
//! let chunked = aggregate_chunked(&commits, 1000).unwrap();
//! assert_eq!(whole, chunked);
//! ```

use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::types::CommitRecord;

/// Commits landing on one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayTally {
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    pub repo_ids: BTreeSet<String>,
}

impl DayTally {
    fn merge(&mut self, other: DayTally) {
        self.commits += other.commits;
        self.additions += other.additions;
        self.deletions += other.deletions;
        self.repo_ids.extend(other.repo_ids);
    }
}

/// Running totals for one contributor identity.
///
/// The display profile (name, email, avatar) comes from the identity's
/// earliest commit so the result does not depend on merge order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorTally {
    pub name: String,
    pub email: String,
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    pub first_seen_ms: i64,
}

impl ContributorTally {
    fn from_commit(commit: &CommitRecord) -> Self {
        Self {
            name: commit.author.name.clone(),
            email: commit.author.email.clone(),
            login: commit.author.login.clone(),
            avatar_url: commit.author.avatar_url.clone(),
            commits: 1,
            additions: commit.additions,
            deletions: commit.deletions,
            first_seen_ms: commit.timestamp_ms,
        }
    }

    fn profile_key(&self) -> (i64, &str, &str, Option<&str>) {
        (
            self.first_seen_ms,
            &self.name,
            &self.email,
            self.avatar_url.as_deref(),
        )
    }

    fn merge(&mut self, other: ContributorTally) {
        self.commits += other.commits;
        self.additions += other.additions;
        self.deletions += other.deletions;
        if other.profile_key() < self.profile_key() {
            self.name = other.name;
            self.email = other.email;
            self.avatar_url = other.avatar_url;
            self.first_seen_ms = other.first_seen_ms;
        }
        if self.login.is_none() {
            self.login = other.login;
        }
    }
}

/// Order-independent reduction of a slice of commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialAggregate {
    /// Per-day tallies keyed by date key
    pub days: BTreeMap<String, DayTally>,
    /// Commits by hour of day
    pub hourly: [u64; 24],
    /// Commits by day of week (0=Sunday)
    pub daily: [u64; 7],
    /// Commits by day of week, then hour
    pub matrix: [[u64; 24]; 7],
    pub commits: u64,
    pub merges: u64,
    pub additions: u64,
    pub deletions: u64,
    pub files_changed: u64,
    /// Distinct repository ids seen in commits
    pub repo_ids: BTreeSet<String>,
    /// Contributor tallies keyed by identity
    pub contributors: BTreeMap<String, ContributorTally>,
    pub first_timestamp_ms: Option<i64>,
    pub last_timestamp_ms: Option<i64>,
}

impl PartialAggregate {
    /// Reduce a slice of commits in a single pass.
    pub fn from_commits(commits: &[CommitRecord]) -> Self {
        let mut partial = Self::default();
        for commit in commits {
            partial.add(commit);
        }
        partial
    }

    /// Fold one commit into the aggregate.
    pub fn add(&mut self, commit: &CommitRecord) {
        let day = self.days.entry(commit.date_key.clone()).or_default();
        day.commits += 1;
        day.additions += commit.additions;
        day.deletions += commit.deletions;
        if !day.repo_ids.contains(&commit.repo_id) {
            day.repo_ids.insert(commit.repo_id.clone());
        }

        let hour = commit.hour_of_day as usize;
        let weekday = commit.day_of_week as usize;
        self.hourly[hour] += 1;
        self.daily[weekday] += 1;
        self.matrix[weekday][hour] += 1;

        self.commits += 1;
        if commit.is_merge {
            self.merges += 1;
        }
        self.additions += commit.additions;
        self.deletions += commit.deletions;
        self.files_changed += commit.files_changed;

        if !self.repo_ids.contains(&commit.repo_id) {
            self.repo_ids.insert(commit.repo_id.clone());
        }

        let tally = ContributorTally::from_commit(commit);
        match self.contributors.get_mut(commit.author.identity()) {
            Some(existing) => existing.merge(tally),
            None => {
                self.contributors
                    .insert(commit.author.identity().to_string(), tally);
            }
        }

        let ts = commit.timestamp_ms;
        self.first_timestamp_ms = Some(self.first_timestamp_ms.map_or(ts, |t| t.min(ts)));
        self.last_timestamp_ms = Some(self.last_timestamp_ms.map_or(ts, |t| t.max(ts)));
    }

    /// Combine two partial aggregates.
    pub fn merge(mut self, other: PartialAggregate) -> PartialAggregate {
        for (date, tally) in other.days {
            self.days.entry(date).or_default().merge(tally);
        }

        for (hour, count) in other.hourly.iter().enumerate() {
            self.hourly[hour] += count;
        }
        for (day, count) in other.daily.iter().enumerate() {
            self.daily[day] += count;
        }
        for (day, row) in other.matrix.iter().enumerate() {
            for (hour, count) in row.iter().enumerate() {
                self.matrix[day][hour] += count;
            }
        }

        self.commits += other.commits;
        self.merges += other.merges;
        self.additions += other.additions;
        self.deletions += other.deletions;
        self.files_changed += other.files_changed;
        self.repo_ids.extend(other.repo_ids);

        for (identity, tally) in other.contributors {
            match self.contributors.get_mut(&identity) {
                Some(existing) => existing.merge(tally),
                None => {
                    self.contributors.insert(identity, tally);
                }
            }
        }

        self.first_timestamp_ms = match (self.first_timestamp_ms, other.first_timestamp_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.last_timestamp_ms = match (self.last_timestamp_ms, other.last_timestamp_ms) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };

        self
    }

    /// Number of distinct active days.
    pub fn active_days(&self) -> u64 {
        self.days.len() as u64
    }

    /// Number of distinct contributor identities.
    pub fn contributor_count(&self) -> u64 {
        self.contributors.len() as u64
    }
}

/// Reduce `commits` in contiguous slices of `chunk_size`, in parallel.
///
/// The result equals [`PartialAggregate::from_commits`] over the whole list.
pub fn aggregate_chunked(commits: &[CommitRecord], chunk_size: usize) -> Result<PartialAggregate> {
    if chunk_size == 0 {
        return Err(Error::InvalidInput("chunk size must be at least 1".to_string()));
    }

    let chunks = commits.chunks(chunk_size).len();
    tracing::debug!(
        commits = commits.len(),
        chunk_size,
        chunks,
        "Reducing commits in parallel chunks"
    );

    Ok(commits
        .par_chunks(chunk_size)
        .map(PartialAggregate::from_commits)
        .reduce(PartialAggregate::default, PartialAggregate::merge))
}
