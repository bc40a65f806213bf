//! Milestone evaluator.
//!
//! A fixed, closed set of unlock predicates over the full habit/log
//! collection. Milestones are never persisted: each is re-evaluated on
//! every display, so one can re-lock if its condition later becomes false
//! (e.g. deleting habits drops category diversity below three).

use crate::locale::Language;
use crate::store::CompletionLog;
use crate::types::{Category, Habit};
use std::collections::HashSet;

/// The fixed milestone set, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    /// First-ever completion recorded
    FirstStep,
    /// Any habit reaches a 7-day streak
    WeekWarrior,
    /// Any habit reaches a 30-day streak
    MonthMaster,
    /// 100 lifetime completions
    CenturyClub,
    /// Habits span at least 3 categories
    Diversity,
}

impl Milestone {
    /// All milestones, in display order.
    pub const ALL: [Milestone; 5] = [
        Milestone::FirstStep,
        Milestone::WeekWarrior,
        Milestone::MonthMaster,
        Milestone::CenturyClub,
        Milestone::Diversity,
    ];

    /// Stable string key.
    pub fn key(&self) -> &'static str {
        match self {
            Milestone::FirstStep => "first_step",
            Milestone::WeekWarrior => "week_warrior",
            Milestone::MonthMaster => "month_master",
            Milestone::CenturyClub => "century_club",
            Milestone::Diversity => "diversity",
        }
    }

    /// Evaluate this milestone's unlock predicate.
    pub fn is_unlocked(&self, habits: &[Habit], log: &CompletionLog) -> bool {
        match self {
            Milestone::FirstStep => !log.is_empty(),
            Milestone::WeekWarrior => habits.iter().any(|h| h.streak >= 7),
            Milestone::MonthMaster => habits.iter().any(|h| h.streak >= 30),
            Milestone::CenturyClub => log.len() >= 100,
            Milestone::Diversity => {
                let categories: HashSet<Category> =
                    habits.iter().map(|h| h.category).collect();
                categories.len() >= 3
            }
        }
    }

    /// Display title.
    pub fn title(&self, lang: Language) -> &'static str {
        match (self, lang) {
            (Milestone::FirstStep, Language::En) => "First Step",
            (Milestone::FirstStep, Language::Pt) => "Primeiro Passo",
            (Milestone::WeekWarrior, Language::En) => "Week Warrior",
            (Milestone::WeekWarrior, Language::Pt) => "Guerreiro da Semana",
            (Milestone::MonthMaster, Language::En) => "Month Master",
            (Milestone::MonthMaster, Language::Pt) => "Mestre do Mês",
            (Milestone::CenturyClub, Language::En) => "Century Club",
            (Milestone::CenturyClub, Language::Pt) => "Clube dos Cem",
            (Milestone::Diversity, Language::En) => "Well Rounded",
            (Milestone::Diversity, Language::Pt) => "Versátil",
        }
    }

    /// Display description.
    pub fn description(&self, lang: Language) -> &'static str {
        match (self, lang) {
            (Milestone::FirstStep, Language::En) => "Log your first completion",
            (Milestone::FirstStep, Language::Pt) => "Registre sua primeira conclusão",
            (Milestone::WeekWarrior, Language::En) => "Reach a 7-day streak on any habit",
            (Milestone::WeekWarrior, Language::Pt) => {
                "Alcance uma sequência de 7 dias em qualquer hábito"
            }
            (Milestone::MonthMaster, Language::En) => "Reach a 30-day streak on any habit",
            (Milestone::MonthMaster, Language::Pt) => {
                "Alcance uma sequência de 30 dias em qualquer hábito"
            }
            (Milestone::CenturyClub, Language::En) => "Log 100 completions in total",
            (Milestone::CenturyClub, Language::Pt) => "Registre 100 conclusões no total",
            (Milestone::Diversity, Language::En) => "Keep habits in 3 different categories",
            (Milestone::Diversity, Language::Pt) => {
                "Mantenha hábitos em 3 categorias diferentes"
            }
        }
    }
}

/// Evaluate every milestone against the current state, in display order.
pub fn evaluate(habits: &[Habit], log: &CompletionLog) -> Vec<(Milestone, bool)> {
    Milestone::ALL
        .iter()
        .map(|m| (*m, m.is_unlocked(habits, log)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn habit_with_streak(category: Category, streak: u32) -> Habit {
        let mut habit = Habit::new("h", category, Utc::now());
        habit.streak = streak;
        habit.best_streak = streak;
        habit
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_first_step_needs_one_record() {
        let mut log = CompletionLog::new();
        assert!(!Milestone::FirstStep.is_unlocked(&[], &log));

        log.toggle("a", day(1));
        assert!(Milestone::FirstStep.is_unlocked(&[], &log));
    }

    #[test]
    fn test_week_warrior_unlocks_exactly_at_seven() {
        let log = CompletionLog::new();

        let below = [habit_with_streak(Category::Health, 6)];
        assert!(!Milestone::WeekWarrior.is_unlocked(&below, &log));

        let at = [habit_with_streak(Category::Health, 7)];
        assert!(Milestone::WeekWarrior.is_unlocked(&at, &log));
    }

    #[test]
    fn test_month_master_at_thirty() {
        let log = CompletionLog::new();
        let habits = [
            habit_with_streak(Category::Work, 29),
            habit_with_streak(Category::Mind, 30),
        ];
        assert!(Milestone::MonthMaster.is_unlocked(&habits, &log));
    }

    #[test]
    fn test_century_club_counts_all_habits() {
        let mut log = CompletionLog::new();
        for i in 0..50u64 {
            log.toggle("a", day(1) + chrono::Days::new(i));
            log.toggle("b", day(1) + chrono::Days::new(i));
        }
        assert!(Milestone::CenturyClub.is_unlocked(&[], &log));
    }

    #[test]
    fn test_diversity_counts_distinct_categories() {
        let log = CompletionLog::new();
        let two = [
            habit_with_streak(Category::Health, 0),
            habit_with_streak(Category::Health, 0),
            habit_with_streak(Category::Work, 0),
        ];
        assert!(!Milestone::Diversity.is_unlocked(&two, &log));

        let three = [
            habit_with_streak(Category::Health, 0),
            habit_with_streak(Category::Work, 0),
            habit_with_streak(Category::Mind, 0),
        ];
        assert!(Milestone::Diversity.is_unlocked(&three, &log));
    }

    #[test]
    fn test_milestones_can_relock() {
        let log = CompletionLog::new();
        let mut habits = vec![
            habit_with_streak(Category::Health, 0),
            habit_with_streak(Category::Work, 0),
            habit_with_streak(Category::Mind, 0),
        ];
        assert!(Milestone::Diversity.is_unlocked(&habits, &log));

        // Deleting a habit drops diversity back below the bar
        habits.pop();
        assert!(!Milestone::Diversity.is_unlocked(&habits, &log));
    }

    #[test]
    fn test_evaluate_preserves_display_order() {
        let results = evaluate(&[], &CompletionLog::new());
        let keys: Vec<&str> = results.iter().map(|(m, _)| m.key()).collect();
        assert_eq!(
            keys,
            ["first_step", "week_warrior", "month_master", "century_club", "diversity"]
        );
        assert!(results.iter().all(|(_, unlocked)| !unlocked));
    }
}
