//! Error reporting without mutation

use habitcore::ledger::LedgerSettings;
use habitcore::rules::{RuleEvaluator, Suggestions};
use habitcore::store::{ProfileStore, StoreError};
use habitcore::{Gamification, GamificationError, HabitStatus, Profile, TransitionEvent};

use crate::common::{day, default_evaluator, memory_engine, pending_habit, store_with_profiles, FailingSaveStore};

#[test]
fn test_missing_profile_is_reported() {
    let store = store_with_profiles(&[]);
    let engine = memory_engine(&store, LedgerSettings::default());
    let habit = pending_habit(&store, 9, 1, 10, day(3));

    let err = engine
        .apply_transition(9, &TransitionEvent::complete(habit, day(3)))
        .unwrap_err();

    assert!(matches!(err, GamificationError::ProfileNotFound(9)));
    assert!(matches!(
        engine.profile_summary(9),
        Err(GamificationError::ProfileNotFound(9))
    ));
    assert!(matches!(
        engine.achievements_for(9),
        Err(GamificationError::ProfileNotFound(9))
    ));
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_failing_save_leaves_profile_untouched() {
    let store = store_with_profiles(&[1]);
    let habit = pending_habit(&store, 1, 1, 10, day(3));
    let engine = Gamification::new(
        FailingSaveStore { inner: store.clone() },
        store.clone(),
        default_evaluator(),
        LedgerSettings::default(),
    );

    let err = engine
        .apply_transition(1, &TransitionEvent::complete(habit, day(3)))
        .unwrap_err();

    assert!(matches!(err, GamificationError::Store(StoreError::Unavailable(_))));
    assert_eq!(store.get(1).unwrap(), Some(Profile::new(1)));
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_unknown_status_marker_is_invalid_transition() {
    let store = store_with_profiles(&[1]);
    let habit = pending_habit(&store, 1, 1, 10, day(3));

    let err = TransitionEvent::parse(habit.clone(), "pending", "archived", day(3)).unwrap_err();
    assert!(matches!(err, GamificationError::InvalidTransition { .. }));

    // Legacy markers still parse
    let event = TransitionEvent::parse(habit, "pendiente", "completado", day(3)).unwrap();
    assert_eq!(event.new_status, HabitStatus::Completed);
}

#[test]
fn test_points_and_streaks_survive_missing_rule_base() {
    let store = store_with_profiles(&[1]);
    let engine = Gamification::new(
        store.clone(),
        store.clone(),
        RuleEvaluator::unavailable(),
        LedgerSettings {
            award_streak_bonus: true,
        },
    );
    let habit = pending_habit(&store, 1, 1, 10, day(3));

    let report = engine
        .apply_transition(1, &TransitionEvent::complete(habit, day(3)))
        .unwrap();

    assert_eq!(report.profile.points_total, 10);
    assert_eq!(report.profile.streak_current, 1);
    assert_eq!(report.bonus_awarded, 0);
    assert_eq!(engine.suggest_by_category("Health"), Suggestions::Unavailable);
    assert_eq!(engine.classify_level(600).as_str(), "Unknown");
    assert!(!engine.check_consistency(30));
}
