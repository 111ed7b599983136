//! Badge rules.
//!
//! Badges are plain values recomputed on every run: each rule in
//! [`BADGE_RULES`] whose threshold is met contributes one [`Badge`], in
//! declaration order.

use serde::Serialize;

/// A met threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Human-readable threshold
    pub criteria: &'static str,
}

/// Figures the badge rules are evaluated against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadgeContext {
    pub longest_streak_days: u32,
    pub total_commits: u64,
    pub is_night_owl: bool,
    pub is_early_bird: bool,
    pub weekend_percentage: f64,
    pub fix_commits: u64,
    pub refactor_commits: u64,
    pub repository_count: u64,
    pub language_count: usize,
}

impl BadgeContext {
    fn ratio(&self, count: u64) -> f64 {
        if self.total_commits == 0 {
            0.0
        } else {
            count as f64 / self.total_commits as f64
        }
    }

    /// Share of commits classified as fixes (0.0-1.0).
    pub fn fix_ratio(&self) -> f64 {
        self.ratio(self.fix_commits)
    }

    /// Share of commits classified as refactors (0.0-1.0).
    pub fn refactor_ratio(&self) -> f64 {
        self.ratio(self.refactor_commits)
    }
}

/// A badge and the predicate that awards it.
pub struct BadgeRule {
    pub badge: Badge,
    pub earned: fn(&BadgeContext) -> bool,
}

pub const BADGE_RULES: &[BadgeRule] = &[
    BadgeRule {
        badge: Badge {
            id: "streak-master",
            name: "Streak Master",
            description: "Committed every day for a month straight",
            icon: "🔥",
            criteria: "Longest streak of 30 days or more",
        },
        earned: |ctx| ctx.longest_streak_days >= 30,
    },
    BadgeRule {
        badge: Badge {
            id: "commit-machine",
            name: "Commit Machine",
            description: "Four digits of commits",
            icon: "🤖",
            criteria: "1000 or more commits",
        },
        earned: |ctx| ctx.total_commits >= 1000,
    },
    BadgeRule {
        badge: Badge {
            id: "night-owl",
            name: "Night Owl",
            description: "Does their best work after dark",
            icon: "🦉",
            criteria: "More than 30% of commits between 8pm and 5am",
        },
        earned: |ctx| ctx.is_night_owl,
    },
    BadgeRule {
        badge: Badge {
            id: "early-bird",
            name: "Early Bird",
            description: "Ships before breakfast",
            icon: "🐦",
            criteria: "More than 20% of commits between 5am and 9am",
        },
        earned: |ctx| ctx.is_early_bird,
    },
    BadgeRule {
        badge: Badge {
            id: "weekend-warrior",
            name: "Weekend Warrior",
            description: "Saturdays are for shipping",
            icon: "⚔️",
            criteria: "35% or more of commits on weekends",
        },
        earned: |ctx| ctx.weekend_percentage >= 35.0,
    },
    BadgeRule {
        badge: Badge {
            id: "bug-squasher",
            name: "Bug Squasher",
            description: "Leaves the code better than they found it",
            icon: "🐛",
            criteria: "More than 30% of commits are fixes",
        },
        earned: |ctx| ctx.fix_ratio() > 0.30,
    },
    BadgeRule {
        badge: Badge {
            id: "repo-collector",
            name: "Repo Collector",
            description: "Spreads the love across many projects",
            icon: "📚",
            criteria: "10 or more repositories",
        },
        earned: |ctx| ctx.repository_count >= 10,
    },
    BadgeRule {
        badge: Badge {
            id: "polyglot",
            name: "Polyglot",
            description: "Speaks many programming languages",
            icon: "🌍",
            criteria: "5 or more languages",
        },
        earned: |ctx| ctx.language_count >= 5,
    },
    BadgeRule {
        badge: Badge {
            id: "clean-coder",
            name: "Clean Coder",
            description: "Refactors without being asked",
            icon: "🧹",
            criteria: "More than 10% of commits are refactors",
        },
        earned: |ctx| ctx.refactor_ratio() > 0.10,
    },
];

/// Every earned badge, in rule order.
pub fn evaluate_badges(ctx: &BadgeContext) -> Vec<Badge> {
    BADGE_RULES
        .iter()
        .filter(|rule| (rule.earned)(ctx))
        .map(|rule| rule.badge)
        .collect()
}
