//! Hour-of-day and day-of-week activity patterns.

use serde::Serialize;

use super::partial::PartialAggregate;
use super::personality::{Chronotype, WeekendType};
use crate::types::CommitRecord;

/// Night-owl threshold on the share of commits in 20:00-04:59.
pub const NIGHT_OWL_THRESHOLD: f64 = 0.30;
/// Early-bird threshold on the share of commits in 05:00-08:59.
pub const EARLY_BIRD_THRESHOLD: f64 = 0.20;

/// Histograms and derived classification flags for a commit set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPatterns {
    /// Commits by hour (0-23)
    pub hourly_distribution: [u64; 24],
    /// Commits by day of week (0=Sunday, 6=Saturday)
    pub daily_distribution: [u64; 7],
    /// Commits by day of week, then hour
    pub matrix: [[u64; 24]; 7],
    /// Peak hour (0-23), lowest hour on ties
    pub peak_hour: u8,
    /// Busiest day of week, lowest index on ties
    pub peak_day: u8,
    pub night_fraction: f64,
    pub morning_fraction: f64,
    pub is_night_owl: bool,
    pub is_early_bird: bool,
    /// Saturday + Sunday commits as a percentage of all commits
    pub weekend_percentage: f64,
}

impl Default for ActivityPatterns {
    fn default() -> Self {
        Self {
            hourly_distribution: [0; 24],
            daily_distribution: [0; 7],
            matrix: [[0; 24]; 7],
            peak_hour: 0,
            peak_day: 0,
            night_fraction: 0.0,
            morning_fraction: 0.0,
            is_night_owl: false,
            is_early_bird: false,
            weekend_percentage: 0.0,
        }
    }
}

/// Index of the first maximum; 0 for an all-zero slice.
pub fn first_arg_max(values: &[u64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

impl ActivityPatterns {
    pub fn from_commits(commits: &[CommitRecord]) -> Self {
        Self::from_partial(&PartialAggregate::from_commits(commits))
    }

    pub fn from_partial(partial: &PartialAggregate) -> Self {
        let hourly = partial.hourly;
        let daily = partial.daily;
        let total: u64 = hourly.iter().sum();

        if total == 0 {
            return Self::default();
        }

        let night: u64 = hourly[20..24].iter().sum::<u64>() + hourly[0..5].iter().sum::<u64>();
        let morning: u64 = hourly[5..9].iter().sum();
        let night_fraction = night as f64 / total as f64;
        let morning_fraction = morning as f64 / total as f64;

        Self {
            hourly_distribution: hourly,
            daily_distribution: daily,
            matrix: partial.matrix,
            peak_hour: first_arg_max(&hourly) as u8,
            peak_day: first_arg_max(&daily) as u8,
            night_fraction,
            morning_fraction,
            is_night_owl: night_fraction > NIGHT_OWL_THRESHOLD,
            is_early_bird: morning_fraction > EARLY_BIRD_THRESHOLD,
            weekend_percentage: (daily[0] + daily[6]) as f64 / total as f64 * 100.0,
        }
    }

    /// Total commits covered by the histograms.
    pub fn total(&self) -> u64 {
        self.hourly_distribution.iter().sum()
    }

    /// Single chronotype; night owl wins when both flags are set.
    pub fn chronotype(&self) -> Chronotype {
        Chronotype::classify(self.is_night_owl, self.is_early_bird)
    }

    pub fn weekend_type(&self) -> WeekendType {
        WeekendType::classify(self.weekend_percentage, self.total())
    }

    /// Quietest day among days with any activity.
    pub fn quietest_day(&self) -> Option<u8> {
        self.daily_distribution
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .min_by_key(|(_, &count)| count)
            .map(|(day, _)| day as u8)
    }
}
