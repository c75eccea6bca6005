// Tests for the TTL cache

use marquee_core::cache::DEFAULT_TTL;
use marquee_core::{ManualClock, TtlCache};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, PartialEq)]
struct Standings {
    league: String,
    rows: Vec<u32>,
}

async fn fetch(calls: &AtomicUsize, league: &str) -> Result<Standings, String> {
    calls.fetch_add(1, Ordering::SeqCst);
    Ok(Standings {
        league: league.to_string(),
        rows: vec![3, 1, 0],
    })
}

fn cache_with_clock() -> (TtlCache<(String, String), Standings>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    (TtlCache::with_clock(DEFAULT_TTL, clock.clone()), clock)
}

#[tokio::test]
async fn test_hit_within_ttl_returns_same_arc() {
    let (cache, clock) = cache_with_clock();
    let calls = AtomicUsize::new(0);
    let key = ("premier".to_string(), "2025".to_string());

    let first = cache
        .get_or_try_insert_with(key.clone(), || fetch(&calls, "premier"))
        .await
        .unwrap();
    clock.advance(Duration::from_secs(299));
    let second = cache
        .get_or_try_insert_with(key.clone(), || fetch(&calls, "premier"))
        .await
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_expiry_triggers_exactly_one_refetch() {
    let (cache, clock) = cache_with_clock();
    let calls = AtomicUsize::new(0);
    let key = ("premier".to_string(), "2025".to_string());

    let first = cache
        .get_or_try_insert_with(key.clone(), || fetch(&calls, "premier"))
        .await
        .unwrap();
    clock.advance(Duration::from_secs(300));

    let refreshed = cache
        .get_or_try_insert_with(key.clone(), || fetch(&calls, "premier"))
        .await
        .unwrap();
    let again = cache
        .get_or_try_insert_with(key.clone(), || fetch(&calls, "premier"))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(!Arc::ptr_eq(&first, &refreshed));
    assert!(Arc::ptr_eq(&refreshed, &again));
    assert_eq!(*refreshed, *first);
}

#[tokio::test]
async fn test_composite_keys_are_independent() {
    let (cache, _clock) = cache_with_clock();
    let calls = AtomicUsize::new(0);

    for season in ["2024", "2025"] {
        cache
            .get_or_try_insert_with(("premier".to_string(), season.to_string()), || {
                fetch(&calls, "premier")
            })
            .await
            .unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn test_errors_are_not_cached() {
    let (cache, _clock) = cache_with_clock();
    let key = ("premier".to_string(), "2025".to_string());

    let failed = cache
        .get_or_try_insert_with(key.clone(), || async { Err::<Standings, _>("upstream down".to_string()) })
        .await;
    assert_eq!(failed.unwrap_err(), "upstream down");
    assert!(cache.is_empty());

    let calls = AtomicUsize::new(0);
    let ok = cache
        .get_or_try_insert_with(key, || fetch(&calls, "premier"))
        .await
        .unwrap();
    assert_eq!(ok.league, "premier");
}
