//! Fixed-size worker pool over contiguous index ranges
//!
//! Work is split into `workers` contiguous chunks. Each chunk owns a disjoint
//! slice of a pre-sized output buffer, so results land at their original
//! offsets and no synchronization is needed beyond the scope join.

use crate::error::Result;
use std::ops::Range;
use std::thread;

/// Resolve a requested worker count against the amount of work.
///
/// `0` means one worker per available hardware thread. The result is always
/// in `1..=max(items, 1)`.
pub fn resolve_workers(requested: usize, items: usize) -> usize {
    let workers = if requested == 0 {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        requested
    };
    workers.min(items).max(1)
}

/// Split `0..len` into `workers` contiguous ranges of `len / workers` items,
/// with the remainder appended to the last range.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, len);
    let chunk = len / workers;

    (0..workers)
        .map(|i| {
            let start = i * chunk;
            let end = if i + 1 == workers { len } else { start + chunk };
            start..end
        })
        .collect()
}

/// Run `job` over `items` work items split across `workers` chunks.
///
/// `out` holds `stride` output elements per item. Each invocation of `job`
/// receives its item range and the matching sub-slice of `out`. A single
/// chunk runs on the calling thread. If any chunk fails, the first error in
/// chunk order is returned.
pub fn run_chunked<T, F>(items: usize, stride: usize, workers: usize, out: &mut [T], job: F) -> Result<()>
where
    T: Send,
    F: Fn(Range<usize>, &mut [T]) -> Result<()> + Sync,
{
    debug_assert_eq!(out.len(), items * stride, "output buffer size mismatch");

    let ranges = partition(items, workers);
    if ranges.len() <= 1 {
        return match ranges.into_iter().next() {
            Some(range) => job(range, out),
            None => Ok(()),
        };
    }

    log::trace!("dispatching {} items over {} workers", items, ranges.len());

    let job = &job;
    thread::scope(|scope| {
        let mut rest = out;
        let mut handles = Vec::with_capacity(ranges.len());
        for range in ranges {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * stride);
            rest = tail;
            handles.push(scope.spawn(move || job(range, head)));
        }

        let mut first_err = None;
        for handle in handles {
            let outcome = match handle.join() {
                Ok(outcome) => outcome,
                Err(panic) => std::panic::resume_unwind(panic),
            };
            if let Err(e) = outcome {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    })
}
