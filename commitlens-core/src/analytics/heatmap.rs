//! Calendar heatmap: commits per day with a 0-4 intensity level.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::partial::PartialAggregate;
use crate::types::CommitRecord;

/// One calendar day in the heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub date: String,
    pub count: u64,
    /// Intensity bucket (0-4) relative to the busiest day
    pub level: u8,
    /// Repositories touched that day, sorted
    pub repo_ids: Vec<String>,
}

/// Per-day commit counts for the whole input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap {
    /// Cells keyed by date key, ascending
    pub cells: BTreeMap<String, HeatmapCell>,
    /// Highest single-day count
    pub max_count: u64,
    /// Calendar years with at least one commit, ascending
    pub years: Vec<i32>,
}

impl Heatmap {
    /// Build the heatmap from raw commits.
    pub fn from_commits(commits: &[CommitRecord]) -> Self {
        Self::from_partial(&PartialAggregate::from_commits(commits))
    }

    /// Build the heatmap from an already reduced aggregate.
    pub fn from_partial(partial: &PartialAggregate) -> Self {
        let max_count = partial.days.values().map(|d| d.commits).max().unwrap_or(0);

        let mut years = BTreeSet::new();
        let cells = partial
            .days
            .iter()
            .map(|(date, tally)| {
                if let Some(year) = date.get(..4).and_then(|y| y.parse::<i32>().ok()) {
                    years.insert(year);
                }
                let cell = HeatmapCell {
                    date: date.clone(),
                    count: tally.commits,
                    level: intensity_level(tally.commits, max_count),
                    repo_ids: tally.repo_ids.iter().cloned().collect(),
                };
                (date.clone(), cell)
            })
            .collect();

        Self {
            cells,
            max_count,
            years: years.into_iter().collect(),
        }
    }

    /// Look up a single day.
    pub fn cell(&self, date: &str) -> Option<&HeatmapCell> {
        self.cells.get(date)
    }

    /// Cells belonging to one calendar year, ascending.
    pub fn cells_for_year(&self, year: i32) -> impl Iterator<Item = &HeatmapCell> {
        let prefix = format!("{:04}-", year);
        self.cells
            .values()
            .filter(move |cell| cell.date.starts_with(&prefix))
    }
}

/// Quartile bucket of `count` relative to `max_count`.
///
/// `0` for an empty day, then `1..=4` for ratios up to 0.25, 0.5, 0.75 and
/// above.
pub fn intensity_level(count: u64, max_count: u64) -> u8 {
    if count == 0 || max_count == 0 {
        return 0;
    }
    let ratio = count as f64 / max_count as f64;
    if ratio <= 0.25 {
        1
    } else if ratio <= 0.5 {
        2
    } else if ratio <= 0.75 {
        3
    } else {
        4
    }
}
