//! Totals, contributor ranking and language mix.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::partial::PartialAggregate;
use crate::types::RepositoryRecord;

/// Default cap on ranked contributors.
pub const DEFAULT_CONTRIBUTOR_LIMIT: usize = 20;

/// Colors assigned to contributors by rank, wrapping around.
pub const CONTRIBUTOR_PALETTE: [&str; 10] = [
    "#6366f1", "#22c55e", "#f59e0b", "#ef4444", "#06b6d4", "#a855f7", "#ec4899", "#84cc16",
    "#f97316", "#14b8a6",
];

const MS_PER_WEEK: i64 = 7 * 24 * 60 * 60 * 1000;

/// Aggregate totals for the whole input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalStats {
    pub commits: u64,
    /// Distinct repository ids across commits and repository records
    pub repositories: u64,
    pub additions: u64,
    pub deletions: u64,
    pub files_changed: u64,
    pub merges: u64,
    pub active_days: u64,
    /// Distinct identities (login, else email)
    pub contributors: u64,
    pub first_commit_ms: Option<i64>,
    pub last_commit_ms: Option<i64>,
    pub avg_commits_per_week: f64,
}

impl TotalStats {
    pub fn from_partial(partial: &PartialAggregate, repos: &[RepositoryRecord]) -> Self {
        let mut repo_ids: BTreeSet<&str> = partial.repo_ids.iter().map(String::as_str).collect();
        repo_ids.extend(repos.iter().map(|r| r.id.as_str()));

        Self {
            commits: partial.commits,
            repositories: repo_ids.len() as u64,
            additions: partial.additions,
            deletions: partial.deletions,
            files_changed: partial.files_changed,
            merges: partial.merges,
            active_days: partial.active_days(),
            contributors: partial.contributor_count(),
            first_commit_ms: partial.first_timestamp_ms,
            last_commit_ms: partial.last_timestamp_ms,
            avg_commits_per_week: avg_commits_per_week(
                partial.commits,
                partial.first_timestamp_ms,
                partial.last_timestamp_ms,
            ),
        }
    }

    /// Lines changed (additions + deletions).
    pub fn lines_changed(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// Commits divided by the whole weeks spanned (at least one).
pub fn avg_commits_per_week(commits: u64, first_ms: Option<i64>, last_ms: Option<i64>) -> f64 {
    let weeks = match (first_ms, last_ms) {
        (Some(first), Some(last)) => ((last - first) / MS_PER_WEEK).max(1),
        _ => 1,
    };
    commits as f64 / weeks as f64
}

/// One ranked contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorStats {
    pub identity: String,
    pub name: String,
    pub email: String,
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    /// Hex color from [`CONTRIBUTOR_PALETTE`] by rank
    pub color: String,
}

/// Contributors by commit count (identity breaks ties), capped at `limit`.
pub fn rank_contributors(partial: &PartialAggregate, limit: usize) -> Vec<ContributorStats> {
    let mut ranked: Vec<_> = partial.contributors.iter().collect();
    // Contributors iterate in identity order, so a stable sort settles ties
    ranked.sort_by(|a, b| b.1.commits.cmp(&a.1.commits));

    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(rank, (identity, tally))| ContributorStats {
            identity: identity.clone(),
            name: tally.name.clone(),
            email: tally.email.clone(),
            login: tally.login.clone(),
            avatar_url: tally.avatar_url.clone(),
            commits: tally.commits,
            additions: tally.additions,
            deletions: tally.deletions,
            color: CONTRIBUTOR_PALETTE[rank % CONTRIBUTOR_PALETTE.len()].to_string(),
        })
        .collect()
}

/// Share of code in one language across all repositories.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageShare {
    pub language: String,
    pub bytes: u64,
    pub percentage: f64,
    /// Repositories containing this language
    pub repo_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStats {
    /// Largest first; equal sizes in name order
    pub languages: Vec<LanguageShare>,
    pub total_bytes: u64,
}

impl LanguageStats {
    pub fn from_repositories(repos: &[RepositoryRecord]) -> Self {
        let mut totals: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
        for repo in repos {
            for (language, &bytes) in &repo.languages {
                if bytes == 0 {
                    continue;
                }
                let entry = totals.entry(language).or_insert((0, 0));
                entry.0 += bytes;
                entry.1 += 1;
            }
        }

        let total_bytes: u64 = totals.values().map(|(bytes, _)| bytes).sum();
        let mut languages: Vec<LanguageShare> = totals
            .into_iter()
            .map(|(language, (bytes, repo_count))| LanguageShare {
                language: language.to_string(),
                bytes,
                percentage: if total_bytes == 0 {
                    0.0
                } else {
                    bytes as f64 / total_bytes as f64 * 100.0
                },
                repo_count,
            })
            .collect();
        languages.sort_by(|a, b| b.bytes.cmp(&a.bytes));

        Self {
            languages,
            total_bytes,
        }
    }

    /// Number of distinct languages with any code.
    pub fn language_count(&self) -> usize {
        self.languages.len()
    }

    pub fn top(&self) -> Option<&LanguageShare> {
        self.languages.first()
    }
}
