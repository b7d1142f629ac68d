use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

use crate::foundation::error::{BoardError, BoardResult};

/// Build the rayon pool used for per-item decode work.
///
/// `None` sizes the pool to the available processing units.
pub fn build_thread_pool(threads: Option<usize>) -> BoardResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BoardError::validation(
            "decode worker count must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("board-decode-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BoardError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

/// Run `job(i)` for every `i` in `0..n` on `pool` and collect the results in index order.
///
/// One worker loop per pool thread pulls indices from a shared counter. The first failing
/// job wins the error slot and raises the abort flag; workers stop taking new indices once
/// they see it, while jobs already running finish normally.
pub fn run_indexed<T, F>(pool: &rayon::ThreadPool, n: usize, job: F) -> BoardResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> BoardResult<T> + Sync,
{
    if n == 0 {
        return Ok(Vec::new());
    }

    let slots: Vec<Mutex<Option<T>>> = (0..n).map(|_| Mutex::new(None)).collect();
    let next = AtomicUsize::new(0);
    let abort = AtomicBool::new(false);
    let first_err = OnceLock::<BoardError>::new();
    let workers = pool.current_num_threads().clamp(1, n);

    {
        let (slots, next, abort, first_err, job) = (&slots, &next, &abort, &first_err, &job);
        pool.scope(|s| {
            for _ in 0..workers {
                s.spawn(move |_| {
                    while !abort.load(Ordering::Acquire) {
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        if i >= n {
                            break;
                        }
                        match job(i) {
                            Ok(value) => {
                                let mut slot = slots[i].lock().unwrap_or_else(|p| p.into_inner());
                                *slot = Some(value);
                            }
                            Err(err) => {
                                let _ = first_err.set(err);
                                abort.store(true, Ordering::Release);
                            }
                        }
                    }
                });
            }
        });
    }

    if let Some(err) = first_err.into_inner() {
        return Err(err);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.into_inner()
                .unwrap_or_else(|p| p.into_inner())
                .ok_or_else(|| {
                    BoardError::Other(anyhow::anyhow!("internal error: job {i} left no result"))
                })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/parallel.rs"]
mod tests;
