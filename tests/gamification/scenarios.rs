//! Completion and undo scenarios through the facade

use habitcore::achievements::AchievementId;
use habitcore::ledger::{LedgerSettings, StreakChange};
use habitcore::{HabitStatus, Profile, TransitionEdge, TransitionEvent};

use crate::common::{completed_habit, day, memory_engine, pending_habit, store_with_profiles};

/// Mark `habit` completed in the store, then apply the transition
macro_rules! complete {
    ($engine:expr, $store:expr, $user:expr, $habit:expr, $today:expr) => {{
        $store.set_habit_status($habit.id, HabitStatus::Completed);
        $engine
            .apply_transition($user, &TransitionEvent::complete($habit.clone(), $today))
            .unwrap()
    }};
}

#[test]
fn test_first_completion_without_yesterday_starts_streak() {
    let store = store_with_profiles(&[1]);
    let engine = memory_engine(&store, LedgerSettings::default());
    let habit = pending_habit(&store, 1, 10, 10, day(12));

    let report = complete!(engine, store, 1, habit, day(12));

    assert_eq!(report.edge, TransitionEdge::Complete);
    assert_eq!(report.streak_change, StreakChange::Restarted);
    assert_eq!(report.points_delta, 10);
    assert_eq!(
        report.profile,
        Profile {
            points_total: 10,
            streak_current: 1,
            streak_max: 1,
            habits_completed: 1,
            ..Profile::new(1)
        }
    );
}

#[test]
fn test_completion_after_yesterday_extends_every_time() {
    let store = store_with_profiles(&[]);
    store.insert_profile(Profile {
        points_total: 40,
        streak_current: 3,
        streak_max: 3,
        habits_completed: 4,
        ..Profile::new(1)
    });
    let engine = memory_engine(&store, LedgerSettings::default());
    completed_habit(&store, 1, 1, 10, day(11));
    let first = pending_habit(&store, 1, 2, 10, day(12));
    let second = pending_habit(&store, 1, 3, 10, day(12));

    let report = complete!(engine, store, 1, first, day(12));
    assert_eq!(report.streak_change, StreakChange::Extended);
    assert_eq!(report.profile.streak_current, 4);

    // Extends regardless of how many habits were already completed today
    let report = complete!(engine, store, 1, second, day(12));
    assert_eq!(report.streak_change, StreakChange::Extended);
    assert_eq!(report.profile.streak_current, 5);
    assert_eq!(report.profile.streak_max, 5);
    assert_eq!(report.profile.points_total, 60);
}

#[test]
fn test_second_completion_same_day_without_yesterday_keeps_streak() {
    let store = store_with_profiles(&[1]);
    let engine = memory_engine(&store, LedgerSettings::default());
    let first = pending_habit(&store, 1, 1, 10, day(12));
    let second = pending_habit(&store, 1, 2, 5, day(12));

    complete!(engine, store, 1, first, day(12));
    let report = complete!(engine, store, 1, second, day(12));

    assert_eq!(report.streak_change, StreakChange::Kept);
    assert_eq!(report.profile.streak_current, 1);
    assert_eq!(report.profile.points_total, 15);
    assert_eq!(report.profile.habits_completed, 2);
}

#[test]
fn test_stale_streak_is_left_alone() {
    let store = store_with_profiles(&[]);
    store.insert_profile(Profile {
        streak_current: 5,
        streak_max: 5,
        ..Profile::new(1)
    });
    let engine = memory_engine(&store, LedgerSettings::default());
    completed_habit(&store, 1, 1, 10, day(12));
    let habit = pending_habit(&store, 1, 2, 10, day(12));

    let report = complete!(engine, store, 1, habit, day(12));

    assert_eq!(report.streak_change, StreakChange::Kept);
    assert_eq!(report.profile.streak_current, 5);
}

#[test]
fn test_broken_streak_restarts_and_keeps_max() {
    let store = store_with_profiles(&[]);
    store.insert_profile(Profile {
        points_total: 80,
        streak_current: 5,
        streak_max: 8,
        habits_completed: 8,
        ..Profile::new(1)
    });
    let engine = memory_engine(&store, LedgerSettings::default());
    // Last completion was two days ago
    completed_habit(&store, 1, 1, 10, day(10));
    let habit = pending_habit(&store, 1, 2, 10, day(12));

    let report = complete!(engine, store, 1, habit, day(12));

    assert_eq!(report.streak_change, StreakChange::Restarted);
    assert_eq!(report.profile.streak_current, 1);
    assert_eq!(report.profile.streak_max, 8);
    assert_eq!(report.profile.points_total, 90);
}

#[test]
fn test_other_users_habits_do_not_count() {
    let store = store_with_profiles(&[1, 2]);
    let engine = memory_engine(&store, LedgerSettings::default());
    completed_habit(&store, 2, 1, 10, day(11));
    let habit = pending_habit(&store, 1, 2, 10, day(12));

    let report = complete!(engine, store, 1, habit, day(12));

    assert_eq!(report.streak_change, StreakChange::Restarted);
    assert_eq!(report.profile.streak_current, 1);
}

#[test]
fn test_backdated_habit_counts_as_yesterday() {
    let store = store_with_profiles(&[]);
    store.insert_profile(Profile {
        streak_current: 2,
        streak_max: 2,
        ..Profile::new(1)
    });
    let engine = memory_engine(&store, LedgerSettings::default());
    let habit = pending_habit(&store, 1, 1, 10, day(11));

    let report = complete!(engine, store, 1, habit, day(12));

    assert_eq!(report.streak_change, StreakChange::Extended);
    assert_eq!(report.profile.streak_current, 3);
}

#[test]
fn test_undo_restores_points_but_not_streak() {
    let store = store_with_profiles(&[1]);
    let engine = memory_engine(&store, LedgerSettings::default());
    let habit = pending_habit(&store, 1, 1, 25, day(12));

    complete!(engine, store, 1, habit, day(12));
    store.set_habit_status(habit.id, HabitStatus::Pending);
    let report = engine
        .apply_transition(1, &TransitionEvent::undo(habit.clone(), day(12)))
        .unwrap();

    assert_eq!(report.edge, TransitionEdge::Undo);
    assert_eq!(report.points_delta, -25);
    assert_eq!(report.profile.points_total, 0);
    assert_eq!(report.profile.habits_completed, 0);
    assert_eq!(report.profile.streak_current, 1);
    assert_eq!(report.profile.streak_max, 1);
}

#[test]
fn test_streak_bonus_when_enabled() {
    let store = store_with_profiles(&[]);
    store.insert_profile(Profile {
        streak_current: 9,
        streak_max: 9,
        ..Profile::new(1)
    });
    let engine = memory_engine(
        &store,
        LedgerSettings {
            award_streak_bonus: true,
        },
    );
    completed_habit(&store, 1, 1, 10, day(11));
    let habit = pending_habit(&store, 1, 2, 10, day(12));

    let report = complete!(engine, store, 1, habit, day(12));

    assert_eq!(report.profile.streak_current, 10);
    assert_eq!(report.bonus_awarded, 50);
    assert_eq!(report.points_delta, 60);
    assert_eq!(report.profile.points_total, 60);
}

#[test]
fn test_streak_bonus_off_by_default() {
    let store = store_with_profiles(&[]);
    store.insert_profile(Profile {
        streak_current: 9,
        streak_max: 9,
        ..Profile::new(1)
    });
    let engine = memory_engine(&store, LedgerSettings::default());
    completed_habit(&store, 1, 1, 10, day(11));
    let habit = pending_habit(&store, 1, 2, 10, day(12));

    let report = complete!(engine, store, 1, habit, day(12));

    assert_eq!(report.bonus_awarded, 0);
    assert_eq!(report.profile.points_total, 10);
}

#[test]
fn test_report_lists_new_achievements() {
    let store = store_with_profiles(&[]);
    store.insert_profile(Profile {
        points_total: 95,
        habits_completed: 9,
        ..Profile::new(1)
    });
    let engine = memory_engine(&store, LedgerSettings::default());
    let habit = pending_habit(&store, 1, 1, 10, day(12));

    let report = complete!(engine, store, 1, habit, day(12));

    let ids: Vec<AchievementId> = report.new_achievements.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![AchievementId::FirstSteps, AchievementId::Rookie]);
    // Achievement bonuses are reported, never added
    assert_eq!(report.profile.points_total, 105);

    let held: Vec<AchievementId> = engine.achievements_for(1).unwrap().iter().map(|a| a.id).collect();
    assert_eq!(held, ids);
}

#[test]
fn test_seven_day_run_unlocks_first_week() {
    let store = store_with_profiles(&[1]);
    let engine = memory_engine(&store, LedgerSettings::default());

    let mut unlocked = Vec::new();
    for d in 1..=7 {
        let habit = pending_habit(&store, 1, u64::from(d), 10, day(d));
        let report = complete!(engine, store, 1, habit, day(d));
        unlocked.extend(report.new_achievements.iter().map(|a| a.id));
    }

    let summary = engine.profile_summary(1).unwrap();
    assert_eq!(summary.profile.streak_current, 7);
    assert!(summary.consistent);
    assert!(unlocked.contains(&AchievementId::FirstWeek));
}
