//! Utility module: core counting and worker-pool construction.
//!
//! - [`cores`]: logical core count (`num_cpus`)
//! - [`build_pool`]: a rayon pool sized from a `-T#` / `BDELTA_NBWORKERS` value

pub mod cores;

pub use cores::count_cores;

use crate::config::NB_WORKERS_MAX;

/// Resolve a requested worker count: 0 means one per core, anything above
/// [`NB_WORKERS_MAX`] is clamped.
pub fn resolve_workers(requested: usize) -> usize {
    let n = if requested == 0 { count_cores() } else { requested };
    n.min(NB_WORKERS_MAX)
}

/// Build a dedicated rayon pool with [`resolve_workers`]`(requested)` threads.
pub fn build_pool(requested: usize) -> anyhow::Result<rayon::ThreadPool> {
    let n = resolve_workers(requested);
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .thread_name(|i| format!("bdelta-worker-{}", i))
        .build()
        .map_err(|e| anyhow::anyhow!("cannot create a pool of {} workers: {}", n, e))
}
