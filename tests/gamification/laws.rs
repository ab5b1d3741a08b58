//! Laws that hold over any sequence of transitions

use habitcore::ledger::LedgerSettings;
use habitcore::{HabitId, HabitStatus, Profile, TransitionEvent};

use crate::common::{completed_habit, day, default_evaluator, memory_engine, pending_habit, store_with_profiles};

/// Small xorshift generator so sequences are reproducible per seed
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

#[test]
fn test_complete_then_undo_restores_points_not_streak() {
    let starts = [
        Profile::new(1),
        Profile {
            points_total: 300,
            streak_current: 4,
            streak_max: 9,
            habits_completed: 30,
            ..Profile::new(1)
        },
    ];

    for start in starts {
        for yesterday in [false, true] {
            let store = store_with_profiles(&[]);
            store.insert_profile(start);
            let engine = memory_engine(&store, LedgerSettings::default());
            if yesterday {
                completed_habit(&store, 1, 100, 10, day(9));
            }
            let habit = pending_habit(&store, 1, 1, 15, day(10));

            store.set_habit_status(habit.id, HabitStatus::Completed);
            let after_complete = engine
                .apply_transition(1, &TransitionEvent::complete(habit.clone(), day(10)))
                .unwrap()
                .profile;
            store.set_habit_status(habit.id, HabitStatus::Pending);
            let after_undo = engine
                .apply_transition(1, &TransitionEvent::undo(habit.clone(), day(10)))
                .unwrap()
                .profile;

            assert_eq!(after_undo.points_total, start.points_total);
            assert_eq!(after_undo.habits_completed, start.habits_completed);
            assert_eq!(after_undo.streak_current, after_complete.streak_current);
            assert_eq!(after_undo.streak_max, after_complete.streak_max);
        }
    }
}

#[test]
fn test_undo_never_goes_negative() {
    let store = store_with_profiles(&[]);
    store.insert_profile(Profile {
        points_total: 5,
        ..Profile::new(1)
    });
    let engine = memory_engine(&store, LedgerSettings::default());
    let habit = completed_habit(&store, 1, 1, 10, day(10));

    store.set_habit_status(habit.id, HabitStatus::Pending);
    let report = engine
        .apply_transition(1, &TransitionEvent::undo(habit, day(10)))
        .unwrap();

    assert_eq!(report.profile.points_total, 0);
    assert_eq!(report.profile.habits_completed, 0);
    assert_eq!(report.points_delta, -5);
}

#[test]
fn test_random_sequences_keep_counters_consistent() {
    for seed in 1..=40u64 {
        let mut rng = Rng(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let store = store_with_profiles(&[1]);
        let engine = memory_engine(&store, LedgerSettings::default());

        let mut habits = Vec::new();
        let mut next_id: HabitId = 1;
        let mut last_max = 0;

        for step in 0..60 {
            let today = day(1 + (step / 3) as u32);

            // Each day gets a couple of fresh habits
            if step % 3 == 0 {
                for _ in 0..2 {
                    let points = 1 + rng.below(20) as u32;
                    habits.push(pending_habit(&store, 1, next_id, points, today));
                    next_id += 1;
                }
            }

            let idx = rng.below(habits.len() as u64) as usize;
            let id = habits[idx].id;
            let current = store.habit(id).unwrap();
            let event = match current.status {
                HabitStatus::Pending => {
                    store.set_habit_status(id, HabitStatus::Completed);
                    TransitionEvent::complete(current, today)
                }
                HabitStatus::Completed => {
                    store.set_habit_status(id, HabitStatus::Pending);
                    TransitionEvent::undo(current, today)
                }
            };
            let profile = engine.apply_transition(1, &event).unwrap().profile;

            let completed: Vec<_> = habits
                .iter()
                .filter_map(|h| store.habit(h.id))
                .filter(|h| h.is_completed())
                .collect();
            let expected_points: u32 = completed.iter().map(|h| h.points).sum();

            assert_eq!(profile.points_total, expected_points, "seed {seed} step {step}");
            assert_eq!(profile.habits_completed as usize, completed.len(), "seed {seed} step {step}");
            assert!(profile.streak_max >= profile.streak_current, "seed {seed} step {step}");
            assert!(profile.streak_max >= last_max, "seed {seed} step {step}");
            last_max = profile.streak_max;
        }
    }
}

#[test]
fn test_rule_queries_are_pure() {
    let evaluator = default_evaluator();
    for n in [0, 1, 5, 10, 29, 30, 99, 100, 600, 2000, u32::MAX] {
        assert_eq!(evaluator.bonus_for_streak(n), evaluator.bonus_for_streak(n));
        assert_eq!(evaluator.level_for_points(n), evaluator.level_for_points(n));
        assert_eq!(evaluator.is_streak_consistent(n), evaluator.is_streak_consistent(n));
    }
}
