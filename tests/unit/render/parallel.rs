use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

#[test]
fn zero_jobs_succeed_without_running_anything() {
    let pool = build_thread_pool(Some(2)).unwrap();
    let out: Vec<u32> = run_indexed(&pool, 0, |_| panic!("must not run")).unwrap();
    assert!(out.is_empty());
}

#[test]
fn results_land_in_index_order() {
    let pool = build_thread_pool(Some(4)).unwrap();
    let out = run_indexed(&pool, 64, |i| {
        if i % 3 == 0 {
            std::thread::yield_now();
        }
        Ok(i * 10)
    })
    .unwrap();
    assert_eq!(out, (0..64).map(|i| i * 10).collect::<Vec<_>>());
}

#[test]
fn failure_stops_new_dispatch_on_single_worker() {
    let pool = build_thread_pool(Some(1)).unwrap();
    let ran = AtomicUsize::new(0);
    let res: BoardResult<Vec<usize>> = run_indexed(&pool, 10, |i| {
        ran.fetch_add(1, Ordering::SeqCst);
        if i == 3 {
            return Err(BoardError::decode("item 3 is corrupt"));
        }
        Ok(i)
    });

    let err = res.unwrap_err();
    assert!(matches!(err, BoardError::Decode(ref m) if m.contains("item 3")));
    assert_eq!(ran.load(Ordering::SeqCst), 4);
}

#[test]
fn exactly_one_of_several_failures_is_returned() {
    let pool = build_thread_pool(Some(4)).unwrap();
    let res: BoardResult<Vec<()>> = run_indexed(&pool, 50, |i| {
        if i % 7 == 2 {
            Err(BoardError::decode(format!("job {i}")))
        } else {
            Ok(())
        }
    });
    match res {
        Err(BoardError::Decode(msg)) => {
            let idx: usize = msg.trim_start_matches("job ").parse().unwrap();
            assert_eq!(idx % 7, 2);
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn zero_threads_is_rejected() {
    assert!(matches!(
        build_thread_pool(Some(0)),
        Err(BoardError::Validation(_))
    ));
}
