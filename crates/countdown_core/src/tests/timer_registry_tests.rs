use super::*;

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

fn ticking(registry: &TimerRegistry, counter: Arc<AtomicUsize>) -> TimerId {
    registry.spawn("ticker", move |_id| async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            counter.fetch_add(1, Ordering::SeqCst);
        }
    })
}

#[tokio::test(start_paused = true)]
async fn spawned_timer_is_registered_before_it_runs() {
    let registry = TimerRegistry::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let id = ticking(&registry, Arc::clone(&counter));

    assert!(registry.contains(id));
    assert_eq!(registry.len(), 1);
    assert_eq!(counter.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn clear_all_stops_every_timer() {
    let registry = TimerRegistry::new();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    ticking(&registry, Arc::clone(&first));
    ticking(&registry, Arc::clone(&second));

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    registry.clear_all();
    assert!(registry.is_empty());

    let first_seen = first.load(Ordering::SeqCst);
    let second_seen = second.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(first.load(Ordering::SeqCst), first_seen);
    assert_eq!(second.load(Ordering::SeqCst), second_seen);
}

#[tokio::test(start_paused = true)]
async fn clear_all_twice_is_same_as_once() {
    let registry = TimerRegistry::new();
    ticking(&registry, Arc::new(AtomicUsize::new(0)));

    registry.clear_all();
    assert!(registry.is_empty());
    registry.clear_all();
    assert!(registry.is_empty());
}

#[tokio::test]
async fn clear_all_on_empty_registry_is_noop() {
    let registry = TimerRegistry::new();
    registry.clear_all();
    assert_eq!(registry.len(), 0);
}

#[tokio::test(start_paused = true)]
async fn timer_can_release_itself() {
    let registry = TimerRegistry::new();
    let handle = registry.clone();
    let id = registry.spawn("one-shot", move |id| async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.release(id);
    });

    assert!(registry.contains(id));
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!registry.contains(id));
    assert!(registry.is_empty());
}

#[tokio::test(start_paused = true)]
async fn register_tracks_external_handles() {
    let registry = TimerRegistry::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&counter);
    let handle = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        seen.fetch_add(1, Ordering::SeqCst);
    });
    let id = registry.register("external", handle);
    assert_eq!(registry.labels(), vec!["external"]);

    registry.clear_all();
    assert!(!registry.contains(id));
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ids_are_unique_across_clears() {
    let registry = TimerRegistry::new();
    let first = registry.spawn("a", |_| async {});
    registry.clear_all();
    let second = registry.spawn("b", |_| async {});
    assert_ne!(first, second);
}
