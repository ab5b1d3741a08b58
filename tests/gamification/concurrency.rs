//! Per-user serialization of profile updates

use std::sync::Arc;
use std::thread;

use habitcore::ledger::LedgerSettings;
use habitcore::TransitionEvent;

use crate::common::{day, memory_engine, pending_habit, store_with_profiles};

#[test]
fn test_concurrent_completions_lose_no_update() {
    let store = store_with_profiles(&[1]);
    let engine = Arc::new(memory_engine(&store, LedgerSettings::default()));

    let habits: Vec<_> = (1..=64)
        .map(|id| pending_habit(&store, 1, id, 10, day(20)))
        .collect();

    let handles: Vec<_> = habits
        .into_iter()
        .map(|habit| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .apply_transition(1, &TransitionEvent::complete(habit, day(20)))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let summary = engine.profile_summary(1).unwrap();
    assert_eq!(summary.profile.points_total, 640);
    assert_eq!(summary.profile.habits_completed, 64);
    assert_eq!(store.save_count(), 64);
}

#[test]
fn test_users_progress_independently() {
    let users: Vec<u64> = (1..=8).collect();
    let store = store_with_profiles(&users);
    let engine = memory_engine(&store, LedgerSettings::default());

    thread::scope(|s| {
        for &user in &users {
            let engine = &engine;
            let store = &store;
            s.spawn(move || {
                for i in 0..10 {
                    let habit = pending_habit(store, user, user * 100 + i, 3, day(5));
                    engine
                        .apply_transition(user, &TransitionEvent::complete(habit, day(5)))
                        .unwrap();
                }
            });
        }
    });

    for user in users {
        let profile = engine.profile_summary(user).unwrap().profile;
        assert_eq!(profile.points_total, 30);
        assert_eq!(profile.habits_completed, 10);
    }
}
