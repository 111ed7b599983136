//! Integration tests for the commitlens analytics engine
//!
//! These tests load the fixture dump in `tests/fixtures/` and synthetic
//! commit sets to verify the end-to-end bundle and its cross-section
//! invariants.

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use commitlens_core::analytics::calendar::percentage_growth;
use commitlens_core::analytics::{
    aggregate_chunked, compute_analytics_at, AnalysisOptions, AnalyticsBundle, Chronotype,
    CommitMood, PartialAggregate, ReferenceTime, WeekendType,
};
use commitlens_core::{AnalyticsInput, CommitAuthor, CommitRecord, Granularity};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_fixture() -> AnalyticsInput {
    let json = std::fs::read_to_string(fixture_path("commits.json")).unwrap();
    AnalyticsInput::from_json(&json).expect("fixture should parse")
}

fn reference(today: &str) -> ReferenceTime {
    ReferenceTime::at(
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        NaiveDate::parse_from_str(today, "%Y-%m-%d").unwrap(),
    )
}

fn run(commits: &[CommitRecord], options: &AnalysisOptions) -> AnalyticsBundle {
    compute_analytics_at(commits, &[], options, reference("2030-01-01")).unwrap()
}

/// A commit at `hour` UTC on `date`.
fn commit(sha: &str, date: &str, hour: u32, repo: &str, message: &str) -> CommitRecord {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let when = FixedOffset::east_opt(0)
        .unwrap()
        .from_local_datetime(&day.and_hms_opt(hour, 0, 0).unwrap())
        .unwrap();
    let author = CommitAuthor::new("Ada", "ada@example.com").with_login("ada");
    CommitRecord::at(sha, repo, author, message, when)
}

/// Deterministic spread of commits over two years, several repos and authors.
fn synthetic_commits(count: usize) -> Vec<CommitRecord> {
    let offsets = [
        FixedOffset::east_opt(0).unwrap(),
        FixedOffset::west_opt(5 * 3600).unwrap(),
        FixedOffset::east_opt(9 * 3600).unwrap(),
    ];
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        state >> 33
    };

    (0..count)
        .map(|i| {
            let minutes = (next() % (730 * 24 * 60)) as i64;
            let offset = offsets[(next() % 3) as usize];
            let when = (base + chrono::Duration::minutes(minutes)).with_timezone(&offset);
            let login = ["ada", "bob", "cy", "dee"][(next() % 4) as usize];
            let author =
                CommitAuthor::new(login.to_uppercase(), format!("{}@example.com", login))
                    .with_login(login);
            let messages = ["fix: bug", "feat: thing", "refactor: tidy", "docs"];
            let message = messages[(next() % 4) as usize];
            CommitRecord::at(
                format!("sha-{}", i),
                format!("repo-{}", next() % 5),
                author,
                message,
                when,
            )
            .with_changes(next() % 300, next() % 100, next() % 10 + 1)
        })
        .collect()
}

// ============================================
// Fixture bundle
// ============================================

#[test]
fn test_fixture_bundle() {
    commitlens_core::logging::init_test();
    let input = load_fixture();
    assert_eq!(input.commits.len(), 5);
    assert_eq!(input.repositories.len(), 2);

    let bundle = compute_analytics_at(
        &input.commits,
        &input.repositories,
        &AnalysisOptions::default(),
        reference("2024-01-07"),
    )
    .expect("fixture is valid");

    let totals = &bundle.totals;
    assert_eq!(totals.commits, 5);
    assert_eq!(totals.repositories, 2);
    assert_eq!(totals.additions, 165);
    assert_eq!(totals.deletions, 72);
    assert_eq!(totals.merges, 1);
    assert_eq!(totals.active_days, 5);
    assert_eq!(totals.contributors, 2);

    // Dec 29 | Jan 1-3 | Jan 6, and Jan 6 was yesterday
    assert_eq!(bundle.streaks.all.len(), 3);
    assert_eq!(bundle.streaks.longest.length, 3);
    assert_eq!(bundle.streaks.longest.start_date, "2024-01-01");
    assert_eq!(bundle.streaks.current.length, 1);
    assert_eq!(bundle.streaks.current.end_date, "2024-01-06");

    let weeks: Vec<_> = bundle.series.overall.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(weeks, vec!["Week of Dec 25", "Week of Jan 1"]);

    assert_eq!(bundle.growth.len(), 1);
    assert_eq!(bundle.growth[0].commit_growth_pct, 300.0);

    assert_eq!(bundle.languages.language_count(), 3);
    assert_eq!(bundle.languages.top().unwrap().language, "Rust");

    let sup = &bundle.superlatives;
    assert_eq!(sup.chronotype, Chronotype::Balanced);
    assert_eq!(sup.weekend_type, WeekendType::Balanced);
    assert_eq!(sup.conventional.fix_commits, 1);
    assert_eq!(sup.conventional.feature_commits, 1);
    assert_eq!(sup.conventional.refactor_commits, 1);
    assert_eq!(sup.merge_percentage, 20.0);
    assert_eq!(sup.favorite_commit_word.as_ref().unwrap().word, "add");
    assert_eq!(sup.commit_mood, CommitMood::Negative);
    assert_eq!(sup.most_churned_repo.as_ref().unwrap().repo_id, "101");
    let badges: Vec<_> = sup.badges.iter().map(|b| b.id).collect();
    assert_eq!(badges, vec!["clean-coder"]);

    let json = serde_json::to_value(&bundle).unwrap();
    assert_eq!(json["totals"]["commits"], 5);
    assert_eq!(json["granularity"], "week");
    assert!(json["superlatives"]["favoriteCommitWord"].is_object());
}

// ============================================
// Scenarios
// ============================================

#[test]
fn test_scenario_two_streaks() {
    let commits = vec![
        commit("a", "2024-01-01", 10, "r1", "one"),
        commit("b", "2024-01-02", 10, "r1", "two"),
        commit("c", "2024-01-04", 10, "r1", "three"),
    ];
    let bundle = run(&commits, &AnalysisOptions::default());
    let all = &bundle.streaks.all;
    assert_eq!(all.len(), 2);
    assert_eq!(
        (all[0].length, all[0].start_date.as_str(), all[0].end_date.as_str(), all[0].total_commits),
        (2, "2024-01-01", "2024-01-02", 2)
    );
    assert_eq!((all[1].length, all[1].total_commits), (1, 1));
    assert_eq!(bundle.streaks.longest.length, 2);
}

#[test]
fn test_scenario_conventional_commits() {
    let commits: Vec<_> = ["fix: a", "feat: b", "refactor: c", "chore: d"]
        .iter()
        .enumerate()
        .map(|(i, msg)| commit(&i.to_string(), "2024-03-01", 10 + i as u32, "r1", msg))
        .collect();
    let conventional = run(&commits, &AnalysisOptions::default()).superlatives.conventional;
    assert_eq!(conventional.fix_commits, 1);
    assert_eq!(conventional.feature_commits, 1);
    assert_eq!(conventional.refactor_commits, 1);
}

#[test]
fn test_scenario_peak_hour_and_night_fraction() {
    let mut commits = Vec::new();
    for i in 0..5 {
        commits.push(commit(&format!("day{}", i), "2024-03-04", 14, "r1", "work"));
    }
    for i in 0..3 {
        commits.push(commit(&format!("night{}", i), "2024-03-05", 2, "r1", "work"));
    }
    let patterns = run(&commits, &AnalysisOptions::default()).patterns;
    assert_eq!(patterns.peak_hour, 14);
    assert_eq!(patterns.night_fraction, 3.0 / 8.0);
    // 37.5% is above the 30% threshold
    assert!(patterns.is_night_owl);

    let mut commits = commits;
    for i in 0..3 {
        commits.push(commit(&format!("more{}", i), "2024-03-06", 14, "r1", "work"));
    }
    let patterns = run(&commits, &AnalysisOptions::default()).patterns;
    // 3 of 11 is under 30%
    assert!(!patterns.is_night_owl);
}

// ============================================
// Properties
// ============================================

#[test]
fn test_conservation_across_granularities() {
    let commits = synthetic_commits(600);
    for granularity in [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ] {
        let options = AnalysisOptions {
            granularity,
            ..Default::default()
        };
        let series = run(&commits, &options).series;
        for point in &series.overall {
            let per_repo: u64 = series
                .by_repo
                .values()
                .flat_map(|points| points.iter().filter(|p| p.key == point.key))
                .map(|p| p.count)
                .sum();
            assert_eq!(per_repo, point.count, "{} bucket {}", granularity, point.key);
        }
        let total: u64 = series.overall.iter().map(|p| p.count).sum();
        assert_eq!(total, 600);
    }
}

#[test]
fn test_heatmap_max_and_streak_partition() {
    let commits = synthetic_commits(400);
    let bundle = run(&commits, &AnalysisOptions::default());

    let true_max = bundle.heatmap.cells.values().map(|c| c.count).max().unwrap();
    assert_eq!(bundle.heatmap.max_count, true_max);

    let active: BTreeSet<NaiveDate> = commits
        .iter()
        .map(|c| NaiveDate::parse_from_str(&c.date_key, "%Y-%m-%d").unwrap())
        .collect();
    let mut covered = BTreeSet::new();
    for streak in &bundle.streaks.all {
        let mut day = NaiveDate::parse_from_str(&streak.start_date, "%Y-%m-%d").unwrap();
        let end = NaiveDate::parse_from_str(&streak.end_date, "%Y-%m-%d").unwrap();
        while day <= end {
            assert!(covered.insert(day), "streaks overlap on {}", day);
            day = day.succ_opt().unwrap();
        }
    }
    assert_eq!(covered, active);
}

#[test]
fn test_zero_guarded_growth() {
    assert_eq!(percentage_growth(0, 0), 0.0);
    assert_eq!(percentage_growth(0, 42), 100.0);
    assert_eq!(percentage_growth(17, 17), 0.0);
}

#[test]
fn test_idempotence() {
    let commits = synthetic_commits(300);
    let options = AnalysisOptions::default();
    let first = run(&commits, &options);
    let second = run(&commits, &options);
    assert_eq!(first, second);
}

#[test]
fn test_chunk_merge_equivalence() {
    commitlens_core::logging::init_test();
    let commits = synthetic_commits(1000);
    let whole = PartialAggregate::from_commits(&commits);

    // Uneven contiguous splits
    let cuts = [0, 1, 137, 500, 501, 999, 1000];
    let merged = cuts
        .windows(2)
        .map(|w| PartialAggregate::from_commits(&commits[w[0]..w[1]]))
        .fold(PartialAggregate::default(), PartialAggregate::merge);
    assert_eq!(merged, whole);

    // Merge order does not matter
    let reversed = cuts
        .windows(2)
        .rev()
        .map(|w| PartialAggregate::from_commits(&commits[w[0]..w[1]]))
        .fold(PartialAggregate::default(), PartialAggregate::merge);
    assert_eq!(reversed, whole);

    assert_eq!(aggregate_chunked(&commits, 64).unwrap(), whole);

    let single = run(&commits, &AnalysisOptions::default());
    let chunked = run(
        &commits,
        &AnalysisOptions {
            chunk_size: 97,
            ..Default::default()
        },
    );
    assert_eq!(chunked, single);
}

#[test]
fn test_merged_dumps() {
    let mut input = load_fixture();
    input.extend(load_fixture());
    assert_eq!(input.commits.len(), 10);
    assert_eq!(input.repositories.len(), 2);
}
