//! commitlens-wrapped - Commit Year in Review CLI
//!
//! Generate Spotify Wrapped-style summaries from commit history dumps.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use commitlens_core::analytics::calendar;
use commitlens_core::analytics::{
    compute_analytics_at, AnalysisOptions, AnalyticsBundle, FrequencyPoint, HeatmapCell,
    ReferenceTime,
};
use commitlens_core::format::{
    format_count, format_date_key, format_delta, format_relative_ms, hour_display,
};
use commitlens_core::{AnalyticsInput, Config, Granularity, RepositoryRecord};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "commitlens-wrapped")]
#[command(about = "Commit Wrapped - Your Year in Review")]
#[command(version)]
struct Args {
    /// Commit dump to analyze (JSON file or glob pattern; repeatable)
    #[arg(long, short, required = true)]
    input: Vec<String>,

    /// Bucket size for the frequency series (day, week, month, year)
    #[arg(long)]
    granularity: Option<Granularity>,

    /// Number of contributors to rank
    #[arg(long)]
    contributors: Option<usize>,

    /// Treat this day as today when evaluating the current streak (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Only analyze commits from this calendar year
    #[arg(long)]
    year: Option<i32>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,
}

impl Args {
    /// Config values overridden by any flags given on the command line.
    fn options(&self, config: &Config) -> AnalysisOptions {
        let mut options = AnalysisOptions::from(&config.analytics);
        if let Some(granularity) = self.granularity {
            options.granularity = granularity;
        }
        if let Some(limit) = self.contributors {
            options.contributor_limit = limit;
        }
        options
    }

    fn title(&self) -> String {
        match self.year {
            Some(year) => year.to_string(),
            None => "ALL-TIME".to_string(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = match commitlens_core::logging::init(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!(
                "warning: not logging to {}: {}",
                commitlens_core::logging::log_file_path().display(),
                e
            );
            None
        }
    };

    // Read and merge every input dump
    let paths = expand_inputs(&args.input)?;
    let mut input = AnalyticsInput::default();
    for path in &paths {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let dump = AnalyticsInput::from_json(&json)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        input.extend(dump);
    }
    if let Some(year) = args.year {
        filter_year(&mut input, year);
    }

    let mut now = ReferenceTime::now();
    if let Some(today) = args.today {
        now = now.with_today(today);
    }

    let bundle = compute_analytics_at(
        &input.commits,
        &input.repositories,
        &args.options(&config),
        now,
    )
    .context("failed to compute analytics")?;

    // Output based on export format
    let title = args.title();
    match args.export.as_deref() {
        Some("json") => print_json(&bundle)?,
        Some("md") => print_markdown(&bundle, &input.repositories, &title),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&bundle, &input.repositories, &title),
    }

    Ok(())
}

/// Expand each argument as a glob, in sorted order without duplicates.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let mut matched = false;
        for entry in glob::glob(pattern).with_context(|| format!("invalid pattern {}", pattern))? {
            paths.push(entry.with_context(|| format!("failed to read match for {}", pattern))?);
            matched = true;
        }
        if !matched {
            anyhow::bail!("No input files match {}", pattern);
        }
    }
    paths.sort();
    paths.dedup();
    Ok(paths)
}

fn filter_year(input: &mut AnalyticsInput, year: i32) {
    input.commits.retain(|c| c.year == year);
}

/// A repository in the top list, with its busiest series bucket.
#[derive(Debug, PartialEq)]
struct RepoRank<'a> {
    name: &'a str,
    commits: u64,
    busiest: Option<&'a FrequencyPoint>,
}

/// Repositories by commit count, shown by full name when known.
fn top_repos<'a>(
    bundle: &'a AnalyticsBundle,
    repos: &'a [RepositoryRecord],
    n: usize,
) -> Vec<RepoRank<'a>> {
    let mut ranked: Vec<RepoRank> = bundle
        .series
        .by_repo
        .keys()
        .map(|id| {
            let points = bundle.series.for_repo(id);
            let name = repos
                .iter()
                .find(|r| &r.id == id)
                .map(|r| r.full_name.as_str())
                .unwrap_or(id.as_str());
            RepoRank {
                name,
                commits: points.iter().map(|p| p.count).sum(),
                busiest: busiest_point(points),
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.commits.cmp(&a.commits));
    ranked.truncate(n);
    ranked
}

/// Highest-count bucket, earliest on ties.
fn busiest_point(points: &[FrequencyPoint]) -> Option<&FrequencyPoint> {
    points.iter().fold(None, |best, p| match best {
        Some(b) if b.count >= p.count => Some(b),
        _ => Some(p),
    })
}

/// Active days and the busiest day (earliest on ties) for each year.
fn year_activity(bundle: &AnalyticsBundle) -> Vec<(i32, usize, Option<&HeatmapCell>)> {
    bundle
        .heatmap
        .years
        .iter()
        .map(|&year| {
            let mut active = 0;
            let mut peak: Option<&HeatmapCell> = None;
            for cell in bundle.heatmap.cells_for_year(year) {
                active += 1;
                if peak.map_or(true, |p| cell.count > p.count) {
                    peak = Some(cell);
                }
            }
            (year, active, peak)
        })
        .collect()
}

fn plural(n: impl Into<u64>) -> &'static str {
    if n.into() == 1 {
        ""
    } else {
        "s"
    }
}

fn print_terminal(bundle: &AnalyticsBundle, repos: &[RepositoryRecord], title: &str) {
    let title = format!("🎉 YOUR {} COMMIT WRAPPED 🎉", title);

    // Header
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    let totals = &bundle.totals;
    if totals.commits == 0 {
        println!("  No commits found.");
        println!();
        return;
    }

    // The Numbers
    println!("📊 THE NUMBERS");
    println!(
        "   Commits:  {:<12} Repositories: {}",
        format_count(totals.commits),
        totals.repositories
    );
    println!(
        "   Lines:    +{:<11} -{}",
        format_count(totals.additions),
        format_count(totals.deletions)
    );
    println!(
        "   Active:   {:<12} Contributors: {}",
        format!("{} days", totals.active_days),
        totals.contributors
    );
    println!(
        "   Per week: {:<12.1} Merges: {}",
        totals.avg_commits_per_week, totals.merges
    );
    if let Some(last) = totals.last_commit_ms {
        println!(
            "   Last commit: {}",
            format_relative_ms(last, bundle.computed_at)
        );
    }
    println!();

    // Time Patterns
    let patterns = &bundle.patterns;
    let sup = &bundle.superlatives;
    println!("⏰ TIME PATTERNS");
    println!("   Peak hour:    {}", hour_display(patterns.peak_hour));
    println!("   Busiest day:  {}", calendar::day_name(patterns.peak_day));
    if let Some(day) = patterns.quietest_day() {
        println!("   Quietest day: {}", calendar::day_name(day));
    }
    println!(
        "   Weekends:     {:.0}% of commits",
        patterns.weekend_percentage
    );
    println!(
        "   {} {} - \"{}\"",
        sup.chronotype.emoji(),
        sup.chronotype.name(),
        sup.chronotype.tagline()
    );
    println!(
        "   {} {} - \"{}\"",
        sup.weekend_type.emoji(),
        sup.weekend_type.name(),
        sup.weekend_type.tagline()
    );
    println!();

    // Streaks
    let streaks = &bundle.streaks;
    println!("🔥 STREAKS");
    println!(
        "   Current:  {} day{}",
        streaks.current.length,
        plural(streaks.current.length)
    );
    if !streaks.longest.is_empty() {
        println!(
            "   Longest:  {} day{} ({} - {})",
            streaks.longest.length,
            plural(streaks.longest.length),
            format_date_key(&streaks.longest.start_date),
            format_date_key(&streaks.longest.end_date)
        );
    }
    println!(
        "   Biggest day: {} commits on {}",
        streaks.most_commits_in_day.count,
        format_date_key(&streaks.most_commits_in_day.date)
    );
    println!();

    // Growth
    if !bundle.growth.is_empty() {
        println!("📈 YEAR OVER YEAR");
        for growth in &bundle.growth {
            println!(
                "   {} → {}:  Commits {}  │  Active days {}  │  Lines {}",
                growth.from_year,
                growth.to_year,
                format_delta(growth.commit_growth_pct),
                format_delta(growth.active_days_growth_pct),
                format_delta(growth.lines_growth_pct),
            );
        }
        println!();
    }

    // Repositories
    let top = top_repos(bundle, repos, 3);
    if !top.is_empty() {
        println!("📁 TOP REPOSITORIES");
        for (i, repo) in top.iter().enumerate() {
            let rank = match i {
                0 => "🥇",
                1 => "🥈",
                _ => "🥉",
            };
            println!("   {} {} - {} commits", rank, repo.name, repo.commits);
            if let Some(point) = repo.busiest {
                println!("      busiest: {} ({} commits)", point.label, point.count);
            }
        }
        println!();
    }

    // Years
    let years = year_activity(bundle);
    if years.len() > 1 {
        println!("📅 BY YEAR");
        for (year, active, peak) in &years {
            match peak {
                Some(cell) => println!(
                    "   {}: {} active day{}, peak {} on {}",
                    year,
                    active,
                    plural(*active as u64),
                    cell.count,
                    format_date_key(&cell.date)
                ),
                None => println!("   {}: no activity", year),
            }
        }
        println!();
    }

    // Contributors
    if bundle.contributors.len() > 1 {
        println!("👥 TOP CONTRIBUTORS");
        for (i, c) in bundle.contributors.iter().take(5).enumerate() {
            println!(
                "   {}. {:<20} {:>6} commits  +{} -{}",
                i + 1,
                c.name,
                c.commits,
                format_count(c.additions),
                format_count(c.deletions)
            );
        }
        println!();
    }

    // Superlatives
    println!("🏅 SUPERLATIVES");
    if let Some(word) = &sup.favorite_commit_word {
        println!("   Favorite word:  \"{}\" ({} times)", word.word, word.count);
    }
    if let Some(hour) = &sup.busiest_hour {
        println!(
            "   Busiest hour:   {} at {} ({} commits)",
            format_date_key(&hour.date),
            hour_display(hour.hour),
            hour.count
        );
    }
    if let Some(repo) = &sup.most_churned_repo {
        println!(
            "   Most churn:     {} ({} lines)",
            repo.full_name.as_deref().unwrap_or(&repo.repo_id),
            format_count(repo.total_changes)
        );
    }
    let month = &bundle.productivity.most_productive_month;
    if month.commits > 0 {
        println!(
            "   Best month:     {} ({} commits)",
            month.label, month.commits
        );
    }
    if let Some(lang) = bundle.languages.top() {
        println!(
            "   Top language:   {} ({:.0}%)",
            lang.language, lang.percentage
        );
    }
    println!(
        "   Commit mood:    {} {}",
        sup.commit_mood.emoji(),
        sup.commit_mood.name()
    );
    println!(
        "   Fixes / features / refactors: {} / {} / {}",
        sup.conventional.fix_commits,
        sup.conventional.feature_commits,
        sup.conventional.refactor_commits
    );
    println!();

    // Badges
    if !sup.badges.is_empty() {
        println!("🎖️  BADGES");
        for badge in &sup.badges {
            println!("   {} {} - {}", badge.icon, badge.name, badge.description);
        }
        println!();
    }
}

fn print_markdown(bundle: &AnalyticsBundle, repos: &[RepositoryRecord], title: &str) {
    println!("# 🎉 {} Commit Wrapped 🎉", title);
    println!();

    let totals = &bundle.totals;
    if totals.commits == 0 {
        println!("*No commits found.*");
        return;
    }

    // Summary table
    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Commits | {} |", totals.commits);
    println!("| Repositories | {} |", totals.repositories);
    println!("| Lines added | {} |", totals.additions);
    println!("| Lines deleted | {} |", totals.deletions);
    println!("| Files changed | {} |", totals.files_changed);
    println!("| Active days | {} |", totals.active_days);
    println!("| Contributors | {} |", totals.contributors);
    println!("| Commits per week | {:.1} |", totals.avg_commits_per_week);
    println!();

    // Time Patterns
    let patterns = &bundle.patterns;
    let sup = &bundle.superlatives;
    println!("## Time Patterns");
    println!();
    println!("- **Peak hour:** {}", hour_display(patterns.peak_hour));
    println!(
        "- **Busiest day:** {}",
        calendar::day_name(patterns.peak_day)
    );
    println!(
        "- **Most productive weekday:** {}",
        calendar::day_name(bundle.productivity.most_productive_day)
    );
    if let Some(day) = patterns.quietest_day() {
        println!("- **Quietest day:** {}", calendar::day_name(day));
    }
    println!(
        "- **Chronotype:** {} {}",
        sup.chronotype.emoji(),
        sup.chronotype.name()
    );
    println!(
        "- **Weekends:** {:.0}% ({})",
        patterns.weekend_percentage,
        sup.weekend_type.name()
    );
    println!();

    // Streaks
    let streaks = &bundle.streaks;
    println!("## Streaks");
    println!();
    println!("- **Current streak:** {} days", streaks.current.length);
    println!(
        "- **Longest streak:** {} days ({} - {})",
        streaks.longest.length,
        format_date_key(&streaks.longest.start_date),
        format_date_key(&streaks.longest.end_date)
    );
    println!(
        "- **Most commits in a day:** {} on {}",
        streaks.most_commits_in_day.count,
        format_date_key(&streaks.most_commits_in_day.date)
    );
    println!();

    // Growth
    if !bundle.growth.is_empty() {
        println!("## Year over Year");
        println!();
        println!("| Years | Commits | Active days | Lines |");
        println!("|-------|---------|-------------|-------|");
        for growth in &bundle.growth {
            println!(
                "| {} → {} | {} | {} | {} |",
                growth.from_year,
                growth.to_year,
                format_delta(growth.commit_growth_pct),
                format_delta(growth.active_days_growth_pct),
                format_delta(growth.lines_growth_pct)
            );
        }
        println!();
    }

    // Repositories
    let top = top_repos(bundle, repos, 5);
    if !top.is_empty() {
        println!("## Top Repositories");
        println!();
        for (i, repo) in top.iter().enumerate() {
            match repo.busiest {
                Some(point) => println!(
                    "{}. **{}** - {} commits (busiest: {})",
                    i + 1,
                    repo.name,
                    repo.commits,
                    point.label
                ),
                None => println!("{}. **{}** - {} commits", i + 1, repo.name, repo.commits),
            }
        }
        println!();
    }

    // Years
    let years = year_activity(bundle);
    if years.len() > 1 {
        println!("## By Year");
        println!();
        println!("| Year | Active days | Peak day |");
        println!("|------|-------------|----------|");
        for (year, active, peak) in &years {
            let peak = peak
                .map(|cell| format!("{} ({})", format_date_key(&cell.date), cell.count))
                .unwrap_or_else(|| "-".to_string());
            println!("| {} | {} | {} |", year, active, peak);
        }
        println!();
    }

    // Contributors
    if !bundle.contributors.is_empty() {
        println!("## Contributors");
        println!();
        for (i, c) in bundle.contributors.iter().enumerate() {
            println!("{}. **{}** - {} commits", i + 1, c.name, c.commits);
        }
        println!();
    }

    // Superlatives
    println!("## Superlatives");
    println!();
    if let Some(word) = &sup.favorite_commit_word {
        println!(
            "- **Favorite commit word:** \"{}\" ({} times)",
            word.word, word.count
        );
    }
    if let Some(msg) = &sup.longest_message {
        println!("- **Longest message:** {} characters", msg.length);
    }
    if let Some(msg) = &sup.shortest_message {
        println!(
            "- **Shortest message:** {:?} ({} characters)",
            msg.message, msg.length
        );
    }
    println!(
        "- **Commit mood:** {} {}",
        sup.commit_mood.emoji(),
        sup.commit_mood.name()
    );
    println!("- **Merge commits:** {:.0}%", sup.merge_percentage);
    println!();

    // Badges
    if !sup.badges.is_empty() {
        println!("## Badges");
        println!();
        for badge in &sup.badges {
            println!(
                "{} **{}** - {} *({})*",
                badge.icon, badge.name, badge.description, badge.criteria
            );
        }
        println!();
    }

    println!("---");
    println!("*Generated by commitlens-wrapped*");
}

fn print_json(bundle: &AnalyticsBundle) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(bundle)?);
    Ok(())
}
