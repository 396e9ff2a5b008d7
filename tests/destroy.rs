use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use taskmill::{Error, PoolBuilder};

fn wait_for(counter: &AtomicUsize, target: usize) {
    for _ in 0..500 {
        if counter.load(Ordering::SeqCst) == target {
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!(
        "expected {target} executed items, got {}",
        counter.load(Ordering::SeqCst)
    );
}

#[test]
fn test_destroy_discards_pending_items() {
    let pool = PoolBuilder::new()
        .worker_threads(1)
        .paused(true)
        .build()
        .unwrap();

    let doomed = pool.create_queue().unwrap();
    let executed = Arc::new(AtomicUsize::new(0));

    for _ in 0..10 {
        let executed = executed.clone();
        pool.submit_to(doomed, move || {
            executed.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }

    pool.destroy_queue(doomed).unwrap();

    // A sentinel on the default queue proves the workers got a chance
    // to run before we assert nothing from the doomed queue did.
    let sentinel = Arc::new(AtomicUsize::new(0));
    let s = sentinel.clone();
    pool.submit(move || {
        s.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    pool.resume();
    wait_for(&sentinel, 1);
    pool.shutdown();

    assert_eq!(executed.load(Ordering::SeqCst), 0);
}

#[test]
fn test_submit_after_destroy_is_invalid() {
    let pool = PoolBuilder::new().worker_threads(1).build().unwrap();

    let queue = pool.create_queue().unwrap();
    pool.destroy_queue(queue).unwrap();

    let result = pool.submit_to(queue, || ());
    assert!(matches!(result, Err(Error::InvalidHandle)));
}

#[test]
fn test_double_destroy_is_invalid() {
    let pool = PoolBuilder::new().worker_threads(1).build().unwrap();

    let queue = pool.create_queue().unwrap();
    pool.destroy_queue(queue).unwrap();

    assert!(matches!(
        pool.destroy_queue(queue),
        Err(Error::InvalidHandle)
    ));
}

#[test]
fn test_stale_handle_never_aliases_a_new_queue() {
    let pool = PoolBuilder::new().worker_threads(1).build().unwrap();

    let old = pool.create_queue().unwrap();
    pool.destroy_queue(old).unwrap();

    // Ids are monotonic; the replacement queue gets a fresh one.
    let replacement = pool.create_queue().unwrap();
    assert_ne!(old, replacement);

    assert!(matches!(pool.submit_to(old, || ()), Err(Error::InvalidHandle)));
    pool.submit_to(replacement, || ()).unwrap();
}

#[test]
fn test_destroy_while_workers_are_busy() {
    let pool = PoolBuilder::new().worker_threads(2).build().unwrap();

    let busy = pool.create_queue().unwrap();
    let done = Arc::new(AtomicUsize::new(0));

    for _ in 0..4 {
        let done = done.clone();
        pool.submit_to(busy, move || {
            thread::sleep(Duration::from_millis(20));
            done.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }

    // Destroying mid-flight is fine: in-flight items finish, the rest
    // are discarded, and the handle goes invalid atomically.
    thread::sleep(Duration::from_millis(10));
    pool.destroy_queue(busy).unwrap();
    assert!(matches!(pool.submit_to(busy, || ()), Err(Error::InvalidHandle)));

    pool.shutdown();
    assert!(done.load(Ordering::SeqCst) <= 4);
}
