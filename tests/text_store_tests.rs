//! Text store tests
//!
//! Concurrency and expiry behaviour of the public store and sweeper API.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use textcopy::errors::TextCopyError;
use textcopy::storage::{DEFAULT_TTL, ExpirySweeper, SweepReport, TextStore};

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_parallel_creates_yield_distinct_slots() {
    let store = Arc::new(TextStore::new(DEFAULT_TTL));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || (0..125).map(|_| store.create()).collect::<Vec<_>>())
        })
        .collect();

    let codes: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(codes.len(), 1000);

    // 1000 draws out of 57^6 codes: a collision is vanishingly unlikely
    let unique: HashSet<&String> = codes.iter().collect();
    assert_eq!(unique.len(), 1000);
    assert_eq!(store.len(), 1000);

    for code in &codes {
        assert_eq!(store.get(code).unwrap().as_ref(), "");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_on_distinct_codes() {
    let store = Arc::new(TextStore::new(DEFAULT_TTL));
    let codes: Vec<String> = (0..200).map(|_| store.create()).collect();

    let mut tasks = Vec::new();
    for (i, code) in codes.iter().cloned().enumerate() {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            let text = if i % 2 == 0 { "ZXZlbg==" } else { "b2Rk" };
            store.update(&code, text).map(|_| (code, text))
        }));
    }

    for task in tasks {
        let (code, text) = task.await.unwrap().unwrap();
        assert_eq!(store.get(&code).unwrap().as_ref(), text);
    }
}

#[test]
fn test_racing_updates_on_one_code_leave_one_whole_value() {
    let store = Arc::new(TextStore::new(DEFAULT_TTL));
    let code = store.create();
    let candidates = ["QUFBQUFBQUE=", "QkJCQkJCQkI=", "Q0NDQ0NDQ0M="];

    thread::scope(|s| {
        for text in candidates {
            let store = &store;
            let code = &code;
            s.spawn(move || {
                for _ in 0..200 {
                    store.update(code, text).unwrap();
                    let seen = store.get(code).unwrap();
                    assert!(candidates.contains(&seen.as_ref()));
                }
            });
        }
    });

    let last = store.get(&code).unwrap();
    assert!(candidates.contains(&last.as_ref()));
}

// =============================================================================
// Expiry
// =============================================================================

#[test]
fn test_slot_expires_after_ttl() {
    let store = TextStore::new(Duration::from_millis(20));
    let code = store.create();
    store.update(&code, "aGVsbG8=").unwrap();
    assert!(store.get(&code).is_ok());

    thread::sleep(Duration::from_millis(50));

    assert_eq!(
        store.get(&code),
        Err(TextCopyError::not_found("not found"))
    );
    assert!(!store.contains(&code));
}

#[test]
fn test_sweep_only_reclaims_expired() {
    let store = Arc::new(TextStore::new(Duration::from_millis(40)));
    let old: Vec<String> = (0..10).map(|_| store.create()).collect();

    thread::sleep(Duration::from_millis(80));
    let fresh: Vec<String> = (0..5).map(|_| store.create()).collect();

    let report = ExpirySweeper::new(store.clone(), Duration::from_secs(60)).run_once();
    assert_eq!(
        report,
        SweepReport {
            removed: 10,
            remaining: 5
        }
    );

    for code in &old {
        assert!(!store.contains(code));
    }
    for code in &fresh {
        assert!(store.get(code).is_ok());
    }
}

#[tokio::test]
async fn test_background_sweeper_reclaims_unread_slots() {
    let store = Arc::new(TextStore::new(Duration::from_millis(10)));
    for _ in 0..20 {
        store.create();
    }

    let handle = ExpirySweeper::new(store.clone(), Duration::from_millis(25)).spawn();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !store.is_empty() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(store.is_empty());

    handle.shutdown().await;
}
