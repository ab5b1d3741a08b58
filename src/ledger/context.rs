//! Completion context for streak decisions

use chrono::NaiveDate;

use crate::domain::{Habit, TransitionEvent};

/// What the user had completed around the day of a transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionContext {
    /// At least one habit dated the day before was completed
    pub completed_yesterday: bool,
    /// Completed habits dated today, including the one being transitioned
    pub completed_today_count: usize,
}

impl CompletionContext {
    pub fn new(completed_yesterday: bool, completed_today_count: usize) -> Self {
        Self {
            completed_yesterday,
            completed_today_count,
        }
    }

    /// Derive the context from the user's completed habits for yesterday and
    /// today.
    ///
    /// The transitioned habit counts as completed on its own date whether or
    /// not the store already reflects its new status.
    pub fn from_completed(event: &TransitionEvent, yesterday: &[Habit], today: &[Habit]) -> Self {
        let habit = &event.habit;
        let yesterday_date = event.yesterday();

        let completed_yesterday = yesterday_date.is_some_and(|date| {
            habit.date == date || yesterday.iter().any(|h| h.id != habit.id && counts_on(h, date))
        });

        let others_today = today
            .iter()
            .filter(|h| h.id != habit.id && counts_on(h, event.today))
            .count();
        let own_today = usize::from(habit.date == event.today);

        Self {
            completed_yesterday,
            completed_today_count: others_today + own_today,
        }
    }
}

fn counts_on(habit: &Habit, day: NaiveDate) -> bool {
    habit.is_completed() && habit.date == day
}
