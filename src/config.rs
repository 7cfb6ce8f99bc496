// config.rs: compile-time configuration constants.
//
// Alignment behaviour is a single `cfg!`-derived constant evaluated once per
// build target.

/// Whether the target must avoid multi-byte unaligned accesses.
///
/// False on x86 and x86_64, true everywhere else (ARM included).  When false
/// the decoder copies back-references two bytes per step.
pub const STRICT_ALIGN: bool = !cfg!(any(target_arch = "x86", target_arch = "x86_64"));

/// Whether the decoder checks every token against input/output bounds.
///
/// Always on: the checks in `codec::decompress` turn what would otherwise be
/// a slice-index panic into `DecompressError::MalformedInput`.
pub const SAFE_DECOMPRESS: bool = true;

// Default number of worker threads. 0 = one per logical core.
// Can be overridden by the BDELTA_NBWORKERS environment variable,
// or by the -T# command-line flag.
pub const NB_WORKERS_DEFAULT: usize = 0;

// Upper bound on worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

// Default chunk size used by the file layer (4 MiB). Each chunk is an
// independent bdelta stream, so chunks can be compressed in parallel.
pub const CHUNK_SIZE_DEFAULT: usize = 4 << 20;

// Smallest chunk size accepted on the command line (the -B flag).
pub const CHUNK_SIZE_MIN: usize = 1 << 10;

/// Read the worker count from the `BDELTA_NBWORKERS` environment variable.
///
/// Falls back to [`NB_WORKERS_DEFAULT`] when unset or not numeric.
pub fn init_nb_workers() -> usize {
    init_nb_workers_from(std::env::var("BDELTA_NBWORKERS").ok().as_deref())
}

/// Testable core of [`init_nb_workers`]: parse an optional `BDELTA_NBWORKERS`
/// value without touching the process environment.
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    if let Some(env) = env_val {
        match env.trim().parse::<usize>() {
            Ok(n) => return n.min(NB_WORKERS_MAX),
            Err(_) => {
                crate::displaylevel!(
                    2,
                    "Ignore environment variable setting BDELTA_NBWORKERS={}: not a valid unsigned value \n",
                    env
                );
            }
        }
    }
    NB_WORKERS_DEFAULT
}
