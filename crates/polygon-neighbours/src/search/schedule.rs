//! Fan-out of neighbour tasks over a fixed-size worker pool.

use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use rayon::prelude::*;

use super::context::SearchContext;
use super::error::SearchError;
use super::task::{neighbours_of, NeighbourResult};

/// Scheduler configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScheduleCfg {
    /// Requested worker threads; `None` means hardware concurrency. Values
    /// above the hardware concurrency are capped. `Some(1)` runs every task
    /// on a single worker.
    pub workers: Option<NonZeroUsize>,
}

impl ScheduleCfg {
    /// `0` falls back to hardware concurrency.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: NonZeroUsize::new(workers),
        }
    }

    pub fn sequential() -> Self {
        Self::with_workers(1)
    }
}

/// Everything a finished run hands back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// One result per test index, in test-index order.
    pub results: Vec<NeighbourResult>,
    /// Pool size used for the run.
    pub workers: usize,
    /// Distinct pool threads that executed at least one task.
    pub threads_used: usize,
}

pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// `min(hardware, configured, n_tasks)`; the configured count only lowers the
/// hardware bound. Zero only when there are no tasks.
pub fn worker_count(cfg: &ScheduleCfg, n_tasks: usize) -> usize {
    let hw = hardware_concurrency();
    let limit = cfg.workers.map_or(hw, |w| w.get().min(hw));
    limit.min(n_tasks)
}

/// Run one `neighbours_of` task per test index and wait for all of them.
///
/// The pool is built for this run and dropped before returning. Results are
/// gathered by position in `ctx.test_indices()`; completion order does not
/// leak into the outcome. Any failing task fails the whole run.
pub fn run_search(ctx: &SearchContext, cfg: &ScheduleCfg) -> Result<SearchOutcome, SearchError> {
    let n_tasks = ctx.n_tests();
    let workers = worker_count(cfg, n_tasks);
    if workers == 0 {
        tracing::debug!(polygons = ctx.n_polygons(), "no test indices, nothing to schedule");
        return Ok(SearchOutcome {
            results: Vec::new(),
            workers: 0,
            threads_used: 0,
        });
    }

    let started = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("neighbours-{i}"))
        .build()
        .map_err(|err| SearchError::WorkerPool {
            reason: err.to_string(),
        })?;
    tracing::debug!(
        workers,
        tasks = n_tasks,
        polygons = ctx.n_polygons(),
        "search_start"
    );

    let joined = catch_unwind(AssertUnwindSafe(|| {
        pool.install(|| {
            ctx.test_indices()
                .par_iter()
                .with_max_len(1)
                .map(|&index| (rayon::current_thread_index(), neighbours_of(ctx, index)))
                .collect::<Vec<_>>()
        })
    }))
    .map_err(|payload| SearchError::WorkerPanicked {
        reason: panic_message(payload.as_ref()),
    })?;
    drop(pool);

    let mut seen = vec![false; workers];
    let mut results = Vec::with_capacity(n_tasks);
    for (thread, result) in joined {
        if let Some(flag) = thread.and_then(|t| seen.get_mut(t)) {
            *flag = true;
        }
        results.push(result?);
    }
    let threads_used = seen.iter().filter(|&&used| used).count();
    tracing::info!(
        workers,
        threads_used,
        tasks = n_tasks,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search_done"
    );
    Ok(SearchOutcome {
        results,
        workers,
        threads_used,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
