//! Core domain types for commitlens
//!
//! These types are the engine's input contract. They arrive already
//! normalized by whatever fetched them: every commit carries its temporal
//! fields precomputed from one instant in one calendar convention, and the
//! engine only ever reads those fields.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Commit** | One version-control commit, attributed to one repository |
//! | **Repository** | A repository the commits belong to, with its language byte counts |
//! | **Date key** | Canonical `YYYY-MM-DD` string naming the commit's local calendar day |
//! | **Identity** | How contributors are told apart: login when known, else email |
//! | **Granularity** | Bucket width for frequency series (day, week, month, year) |

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::analytics::calendar;
use crate::error::{Error, Result};

// ============================================
// Commit
// ============================================

/// The person a commit is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl CommitAuthor {
    /// Create an author without a hosting-service login.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            login: None,
            avatar_url: None,
        }
    }

    /// Attach a hosting-service login.
    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    /// Identity used for contributor counting: login if present, else email.
    pub fn identity(&self) -> &str {
        match self.login.as_deref() {
            Some(login) if !login.is_empty() => login,
            _ => &self.email,
        }
    }
}

/// A single commit with precomputed temporal fields.
///
/// All temporal fields (`timestamp_ms` through `date_key`) describe the same
/// instant in the same calendar convention. Use [`CommitRecord::at`] to
/// derive them consistently, and [`CommitRecord::validate`] to check records
/// that came from elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    pub sha: String,
    pub repo_id: String,
    pub author: CommitAuthor,
    pub message: String,
    #[serde(default)]
    pub is_merge: bool,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub files_changed: u64,
    /// Always `additions + deletions`
    #[serde(default)]
    pub total_changes: u64,

    // Temporal fields
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    pub year: i32,
    /// Month of year (1-12)
    pub month: u32,
    /// Day of week (0=Sunday, 6=Saturday)
    pub day_of_week: u8,
    /// Hour of day (0-23)
    pub hour_of_day: u8,
    /// ISO-8601 week number
    pub week_of_year: u32,
    /// Local calendar day as `YYYY-MM-DD`
    pub date_key: String,
}

impl CommitRecord {
    /// Build a commit whose temporal fields all derive from `when`.
    ///
    /// Local calendar fields are read from `when` as-is; no timezone
    /// conversion happens.
    pub fn at(
        sha: impl Into<String>,
        repo_id: impl Into<String>,
        author: CommitAuthor,
        message: impl Into<String>,
        when: DateTime<FixedOffset>,
    ) -> Self {
        let date = when.date_naive();
        Self {
            sha: sha.into(),
            repo_id: repo_id.into(),
            author,
            message: message.into(),
            is_merge: false,
            additions: 0,
            deletions: 0,
            files_changed: 0,
            total_changes: 0,
            timestamp_ms: when.timestamp_millis(),
            year: date.year(),
            month: date.month(),
            day_of_week: date.weekday().num_days_from_sunday() as u8,
            hour_of_day: when.hour() as u8,
            week_of_year: calendar::iso_week_number(date),
            date_key: calendar::date_key(date),
        }
    }

    /// Set line and file counts, keeping `total_changes` in sync.
    ///
    /// A sum past `u64::MAX` saturates, which `validate` then rejects.
    pub fn with_changes(mut self, additions: u64, deletions: u64, files_changed: u64) -> Self {
        self.additions = additions;
        self.deletions = deletions;
        self.files_changed = files_changed;
        self.total_changes = additions.saturating_add(deletions);
        self
    }

    /// Mark this commit as a merge commit.
    pub fn merge_commit(mut self) -> Self {
        self.is_merge = true;
        self
    }

    /// Check that the precomputed fields agree with each other.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidCommit {
            sha: self.sha.clone(),
            reason,
        };

        let date = calendar::parse_date_key(&self.date_key)
            .ok_or_else(|| invalid(format!("unparseable date key {:?}", self.date_key)))?;

        if date.year() != self.year || date.month() != self.month {
            return Err(invalid(format!(
                "date key {} disagrees with year/month {}-{}",
                self.date_key, self.year, self.month
            )));
        }
        if date.weekday().num_days_from_sunday() as u8 != self.day_of_week {
            return Err(invalid(format!(
                "date key {} is not day of week {}",
                self.date_key, self.day_of_week
            )));
        }
        let week = calendar::iso_week_number(date);
        if week != self.week_of_year {
            return Err(invalid(format!(
                "date key {} is ISO week {}, not {}",
                self.date_key, week, self.week_of_year
            )));
        }
        if self.hour_of_day > 23 {
            return Err(invalid(format!("hour {} out of range", self.hour_of_day)));
        }
        let Some(sum) = self.additions.checked_add(self.deletions) else {
            return Err(invalid(format!(
                "{} additions + {} deletions overflows",
                self.additions, self.deletions
            )));
        };
        if self.total_changes != sum {
            return Err(invalid(format!(
                "total changes {} != {} additions + {} deletions",
                self.total_changes, self.additions, self.deletions
            )));
        }
        Ok(())
    }
}

// ============================================
// Repository
// ============================================

/// A repository with per-language byte counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    pub id: String,
    pub full_name: String,
    pub name: String,
    /// Language name -> bytes of code
    #[serde(default)]
    pub languages: BTreeMap<String, u64>,
}

impl RepositoryRecord {
    /// Create a repository with no language data.
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let name = full_name
            .rsplit('/')
            .next()
            .unwrap_or(full_name.as_str())
            .to_string();
        Self {
            id: id.into(),
            full_name,
            name,
            languages: BTreeMap::new(),
        }
    }

    /// Add a language byte count.
    pub fn with_language(mut self, language: impl Into<String>, bytes: u64) -> Self {
        self.languages.insert(language.into(), bytes);
        self
    }
}

/// Everything the engine consumes, in the shape of an exported JSON dump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsInput {
    #[serde(default)]
    pub commits: Vec<CommitRecord>,
    #[serde(default)]
    pub repositories: Vec<RepositoryRecord>,
}

impl AnalyticsInput {
    /// Parse a JSON dump.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append another dump. Repositories already present (by id) are kept.
    pub fn extend(&mut self, other: AnalyticsInput) {
        self.commits.extend(other.commits);
        for repo in other.repositories {
            if !self.repositories.iter().any(|r| r.id == repo.id) {
                self.repositories.push(repo);
            }
        }
    }
}

// ============================================
// Granularity
// ============================================

/// Bucket width for frequency series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            other => Err(Error::InvalidInput(format!(
                "unknown granularity {:?} (expected day, week, month or year)",
                other
            ))),
        }
    }
}
