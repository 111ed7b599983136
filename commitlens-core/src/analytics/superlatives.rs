//! Fun superlatives for the Wrapped view.
//!
//! Favorite commit word, extreme messages, busiest hour, churn leader,
//! commit mood, conventional-commit counts and badges. Everything here is
//! derived from the same commit slice as the rest of the bundle.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use super::badges::{evaluate_badges, Badge, BadgeContext};
use super::patterns::ActivityPatterns;
use super::personality::{Chronotype, WeekendType};
use super::stats::{LanguageStats, TotalStats};
use super::streaks::StreakSummary;
use crate::types::{CommitRecord, RepositoryRecord};

/// Words too common to count as a favorite.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "this", "that", "into", "are", "was", "were", "has",
    "have", "had", "not", "but", "all", "any", "can", "its", "our", "your", "you", "use", "via",
    "when", "then", "than", "also", "more", "some", "only", "just", "out", "now", "will", "should",
    "would", "could", "been", "being", "there", "their", "they", "which", "what", "where", "while",
    "about", "after", "before", "over", "under", "between", "other", "each", "make", "made",
    "merge", "merged", "pull", "request", "branch", "origin", "master", "main", "commit",
];

const POSITIVE_WORDS: &[&str] = &[
    "improve", "improved", "improves", "improvement", "enhance", "enhanced", "optimize",
    "optimized", "clean", "cleanup", "polish", "awesome", "great", "better", "faster", "simplify",
    "simplified", "success", "nice", "love", "happy", "finally", "works", "working", "feature",
];

const NEGATIVE_WORDS: &[&str] = &[
    "fix", "fixed", "fixes", "bug", "bugs", "broken", "break", "breaks", "revert", "reverted",
    "error", "errors", "fail", "failed", "failing", "failure", "crash", "crashes", "issue",
    "issues", "hack", "hacky", "wrong", "ugly", "oops", "typo", "workaround", "problem",
    "temporary",
];

/// One lexicon has to outnumber the other by this factor to set the mood.
const MOOD_DOMINANCE: f64 = 1.5;

static FIX_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^fix[\s(:]").unwrap());
static BUGFIX_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)bugfix|hotfix").unwrap());
static FEATURE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^feat(ure)?[\s(:]").unwrap());
static REFACTOR_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^refactor[\s(:]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// A notable commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageHighlight {
    pub sha: String,
    pub repo_id: String,
    pub message: String,
    /// Length in characters
    pub length: usize,
}

impl MessageHighlight {
    fn of(commit: &CommitRecord, length: usize) -> Self {
        Self {
            sha: commit.sha.clone(),
            repo_id: commit.repo_id.clone(),
            message: commit.message.clone(),
            length,
        }
    }
}

/// The single (date, hour) slot with the most commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusiestHour {
    pub date: String,
    pub hour: u8,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoChurn {
    pub repo_id: String,
    /// Present when a repository record matches the id
    pub full_name: Option<String>,
    pub total_changes: u64,
}

/// Overall tone of commit messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CommitMood {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl CommitMood {
    pub fn from_counts(positive: u64, negative: u64) -> Self {
        if positive as f64 > negative as f64 * MOOD_DOMINANCE {
            CommitMood::Positive
        } else if negative as f64 > positive as f64 * MOOD_DOMINANCE {
            CommitMood::Negative
        } else {
            CommitMood::Neutral
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommitMood::Positive => "Positive",
            CommitMood::Negative => "Battle-scarred",
            CommitMood::Neutral => "Neutral",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            CommitMood::Positive => "😄",
            CommitMood::Negative => "😤",
            CommitMood::Neutral => "😐",
        }
    }
}

/// Lexicon hits across all messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentTally {
    pub positive: u64,
    pub negative: u64,
}

/// Commits matching conventional-commit style prefixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConventionalCounts {
    pub fix_commits: u64,
    pub feature_commits: u64,
    pub refactor_commits: u64,
}

impl ConventionalCounts {
    pub fn record(&mut self, message: &str) {
        if is_fix(message) {
            self.fix_commits += 1;
        }
        if FEATURE_PREFIX.is_match(message) {
            self.feature_commits += 1;
        }
        if REFACTOR_PREFIX.is_match(message) {
            self.refactor_commits += 1;
        }
    }
}

fn is_fix(message: &str) -> bool {
    FIX_PREFIX.is_match(message) || BUGFIX_WORD.is_match(message)
}

/// Lowercased words with every non-letter removed.
pub fn tokenize(message: &str) -> impl Iterator<Item = String> + '_ {
    message.split_whitespace().filter_map(|raw| {
        let word: String = raw
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect();
        (!word.is_empty()).then_some(word)
    })
}

fn is_candidate_word(word: &str) -> bool {
    word.chars().count() > 2 && !STOP_WORDS.contains(&word)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperlativesData {
    pub chronotype: Chronotype,
    pub weekend_type: WeekendType,
    pub favorite_commit_word: Option<WordCount>,
    pub longest_message: Option<MessageHighlight>,
    /// Shortest non-blank message
    pub shortest_message: Option<MessageHighlight>,
    pub busiest_hour: Option<BusiestHour>,
    pub most_churned_repo: Option<RepoChurn>,
    pub commit_mood: CommitMood,
    pub sentiment: SentimentTally,
    pub conventional: ConventionalCounts,
    /// Merge commits as a share of all commits (0-100)
    pub merge_percentage: f64,
    pub badges: Vec<Badge>,
}

impl SuperlativesData {
    pub fn derive(
        commits: &[CommitRecord],
        repos: &[RepositoryRecord],
        patterns: &ActivityPatterns,
        totals: &TotalStats,
        streaks: &StreakSummary,
        languages: &LanguageStats,
    ) -> Self {
        let mut words: BTreeMap<String, u64> = BTreeMap::new();
        let mut sentiment = SentimentTally::default();
        let mut conventional = ConventionalCounts::default();
        let mut longest: Option<MessageHighlight> = None;
        let mut shortest: Option<MessageHighlight> = None;
        let mut hours: BTreeMap<(&str, u8), u64> = BTreeMap::new();
        let mut churn: BTreeMap<&str, u64> = BTreeMap::new();
        let mut merges = 0u64;

        for commit in commits {
            for word in tokenize(&commit.message) {
                if POSITIVE_WORDS.contains(&word.as_str()) {
                    sentiment.positive += 1;
                } else if NEGATIVE_WORDS.contains(&word.as_str()) {
                    sentiment.negative += 1;
                }
                if is_candidate_word(&word) {
                    *words.entry(word).or_insert(0) += 1;
                }
            }
            conventional.record(&commit.message);

            let length = commit.message.chars().count();
            if longest.as_ref().map_or(true, |m| length > m.length) {
                longest = Some(MessageHighlight::of(commit, length));
            }
            if length > 0 && shortest.as_ref().map_or(true, |m| length < m.length) {
                shortest = Some(MessageHighlight::of(commit, length));
            }

            *hours
                .entry((commit.date_key.as_str(), commit.hour_of_day))
                .or_insert(0) += 1;
            *churn.entry(commit.repo_id.as_str()).or_insert(0) += commit.total_changes;
            if commit.is_merge {
                merges += 1;
            }
        }

        let favorite_commit_word = words
            .into_iter()
            .fold(None, |best: Option<WordCount>, (word, count)| match best {
                Some(b) if b.count >= count => Some(b),
                _ => Some(WordCount { word, count }),
            });

        let mut busiest_hour: Option<BusiestHour> = None;
        for ((date, hour), count) in hours {
            if busiest_hour.as_ref().map_or(true, |b| count > b.count) {
                busiest_hour = Some(BusiestHour {
                    date: date.to_string(),
                    hour,
                    count,
                });
            }
        }

        let mut most_churned_repo: Option<RepoChurn> = None;
        for (repo_id, total_changes) in churn {
            if most_churned_repo
                .as_ref()
                .map_or(true, |r| total_changes > r.total_changes)
            {
                most_churned_repo = Some(RepoChurn {
                    repo_id: repo_id.to_string(),
                    full_name: repos
                        .iter()
                        .find(|r| r.id == repo_id)
                        .map(|r| r.full_name.clone()),
                    total_changes,
                });
            }
        }

        let total = commits.len() as u64;
        let badges = evaluate_badges(&BadgeContext {
            longest_streak_days: streaks.longest.length,
            total_commits: total,
            is_night_owl: patterns.is_night_owl,
            is_early_bird: patterns.is_early_bird,
            weekend_percentage: patterns.weekend_percentage,
            fix_commits: conventional.fix_commits,
            refactor_commits: conventional.refactor_commits,
            repository_count: totals.repositories,
            language_count: languages.language_count(),
        });

        Self {
            chronotype: patterns.chronotype(),
            weekend_type: patterns.weekend_type(),
            favorite_commit_word,
            longest_message: longest,
            shortest_message: shortest,
            busiest_hour,
            most_churned_repo,
            commit_mood: CommitMood::from_counts(sentiment.positive, sentiment.negative),
            sentiment,
            conventional,
            merge_percentage: if total == 0 {
                0.0
            } else {
                merges as f64 / total as f64 * 100.0
            },
            badges,
        }
    }
}
