//! Chronotype and weekend-habit classification for Wrapped
//!
//! Turns the hour and weekday histograms into fun, single-label archetypes.

use serde::Serialize;

/// Weekend share at or above which someone is a weekend warrior.
pub const WEEKEND_WARRIOR_PCT: f64 = 35.0;
/// Weekend share at or below which someone sticks to weekdays.
pub const WEEKDAY_LOYALIST_PCT: f64 = 10.0;

/// When in the day someone commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Chronotype {
    /// More than 30% of commits between 8pm and 5am
    NightOwl,
    /// More than 20% of commits between 5am and 9am
    EarlyBird,
    #[default]
    Balanced,
}

impl Chronotype {
    /// Collapse the two independent flags into one label.
    ///
    /// Night owl takes priority when both flags hold.
    pub fn classify(is_night_owl: bool, is_early_bird: bool) -> Self {
        if is_night_owl {
            Chronotype::NightOwl
        } else if is_early_bird {
            Chronotype::EarlyBird
        } else {
            Chronotype::Balanced
        }
    }

    /// Get the display name for this chronotype.
    pub fn name(&self) -> &'static str {
        match self {
            Chronotype::NightOwl => "The Night Owl",
            Chronotype::EarlyBird => "The Early Bird",
            Chronotype::Balanced => "The Daytime Coder",
        }
    }

    /// Get the tagline for this chronotype.
    pub fn tagline(&self) -> &'static str {
        match self {
            Chronotype::NightOwl => "Your best code happens after dark",
            Chronotype::EarlyBird => "Dawn is your productive time",
            Chronotype::Balanced => "Business hours, business as usual",
        }
    }

    /// Get an emoji for this chronotype.
    pub fn emoji(&self) -> &'static str {
        match self {
            Chronotype::NightOwl => "🦉",
            Chronotype::EarlyBird => "🐦",
            Chronotype::Balanced => "☀️",
        }
    }
}

/// How much of someone's work lands on weekends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WeekendType {
    WeekendWarrior,
    WeekdayLoyalist,
    #[default]
    Balanced,
}

impl WeekendType {
    /// Classify from the weekend percentage; no commits means balanced.
    pub fn classify(weekend_percentage: f64, total_commits: u64) -> Self {
        if total_commits == 0 {
            WeekendType::Balanced
        } else if weekend_percentage >= WEEKEND_WARRIOR_PCT {
            WeekendType::WeekendWarrior
        } else if weekend_percentage <= WEEKDAY_LOYALIST_PCT {
            WeekendType::WeekdayLoyalist
        } else {
            WeekendType::Balanced
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeekendType::WeekendWarrior => "Weekend Warrior",
            WeekendType::WeekdayLoyalist => "Weekday Loyalist",
            WeekendType::Balanced => "Balanced",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            WeekendType::WeekendWarrior => "Saturdays are for shipping",
            WeekendType::WeekdayLoyalist => "Weekends are sacred",
            WeekendType::Balanced => "Code happens when it happens",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            WeekendType::WeekendWarrior => "⚔️",
            WeekendType::WeekdayLoyalist => "🏖️",
            WeekendType::Balanced => "⚖️",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_owl_wins_tie_break() {
        assert_eq!(Chronotype::classify(true, true), Chronotype::NightOwl);
        assert_eq!(Chronotype::classify(false, true), Chronotype::EarlyBird);
        assert_eq!(Chronotype::classify(false, false), Chronotype::Balanced);
    }

    #[test]
    fn test_weekend_type_thresholds() {
        assert_eq!(WeekendType::classify(35.0, 10), WeekendType::WeekendWarrior);
        assert_eq!(WeekendType::classify(34.9, 10), WeekendType::Balanced);
        assert_eq!(WeekendType::classify(10.0, 10), WeekendType::WeekdayLoyalist);
        assert_eq!(WeekendType::classify(0.0, 0), WeekendType::Balanced);
    }

    #[test]
    fn test_display() {
        assert_eq!(Chronotype::NightOwl.name(), "The Night Owl");
        assert_eq!(Chronotype::NightOwl.emoji(), "🦉");
        assert_eq!(WeekendType::WeekendWarrior.name(), "Weekend Warrior");
    }
}
