use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use taskmill::PoolBuilder;

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
fn test_rotation_interleaves_two_queues() {
    // Queue A holds {a1, a2}, queue B holds {b1}. The rotation yields
    // a1 (advancing past A), then b1 (B empties), then wraps back to
    // A for a2.
    let pool = PoolBuilder::new()
        .worker_threads(1)
        .paused(true)
        .build()
        .unwrap();

    let a = pool.create_queue().unwrap();
    let b = pool.create_queue().unwrap();

    let order = Arc::new(Mutex::new(Vec::new()));
    let done = Arc::new(AtomicUsize::new(0));

    for label in ["a1", "a2"] {
        let order = order.clone();
        let done = done.clone();
        pool.submit_to(a, move || {
            order.lock().unwrap().push(label);
            done.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }

    let order_b = order.clone();
    let done_b = done.clone();
    pool.submit_to(b, move || {
        order_b.lock().unwrap().push("b1");
        done_b.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    pool.resume();
    wait_for(&done, 3);
    pool.shutdown();

    assert_eq!(*order.lock().unwrap(), vec!["a1", "b1", "a2"]);
}

#[test]
fn test_each_queue_visited_once_before_any_revisit() {
    // Five queues with two items each: the first five dispatches hit
    // every queue exactly once, in creation order, before any queue
    // is visited a second time.
    let pool = PoolBuilder::new()
        .worker_threads(1)
        .paused(true)
        .build()
        .unwrap();

    let queues: Vec<_> = (0..5).map(|_| pool.create_queue().unwrap()).collect();

    let order = Arc::new(Mutex::new(Vec::new()));
    let done = Arc::new(AtomicUsize::new(0));

    for _round in 0..2 {
        for (idx, &queue) in queues.iter().enumerate() {
            let order = order.clone();
            let done = done.clone();
            pool.submit_to(queue, move || {
                order.lock().unwrap().push(idx);
                done.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }
    }

    pool.resume();
    wait_for(&done, 10);
    pool.shutdown();

    assert_eq!(
        *order.lock().unwrap(),
        vec![0, 1, 2, 3, 4, 0, 1, 2, 3, 4]
    );
}

#[test]
fn test_loaded_queue_does_not_starve_others() {
    // A queue with many items and a queue with one item: the single
    // item must run before the loaded queue drains completely.
    let pool = PoolBuilder::new()
        .worker_threads(1)
        .paused(true)
        .build()
        .unwrap();

    let loaded = pool.create_queue().unwrap();
    let light = pool.create_queue().unwrap();

    let order = Arc::new(Mutex::new(Vec::new()));
    let done = Arc::new(AtomicUsize::new(0));

    for i in 0..20 {
        let order = order.clone();
        let done = done.clone();
        pool.submit_to(loaded, move || {
            order.lock().unwrap().push(format!("loaded{i}"));
            done.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }

    let order_l = order.clone();
    let done_l = done.clone();
    pool.submit_to(light, move || {
        order_l.lock().unwrap().push("light".to_string());
        done_l.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    pool.resume();
    wait_for(&done, 21);
    pool.shutdown();

    let order = order.lock().unwrap();
    let light_pos = order.iter().position(|s| s == "light").unwrap();
    assert!(light_pos <= 1, "light item ran at position {light_pos}");
}
