//! Tunable constants shared by the batcher, retry policy, and engines.

mod private
{
  /// Maximum number of prompts sent in a single `POST /generate` sub-batch.
  pub const MAX_PROMPTS : usize = 20;

  /// Maximum number of `429` retries the sync/async engines will absorb per
  /// sub-batch before surfacing `GenAiError::RateLimited`.
  pub const MAX_RETRIES_GENERATE : u32 = 3;

  /// Maximum number of `429` retries `tokenize_as_completed` will absorb.
  pub const MAX_RETRIES_TOKENIZE : u32 = 3;

  /// Default worker concurrency for `AsyncEngine` when the caller does not
  /// specify `max_concurrency_limit`.
  pub const DEFAULT_CONCURRENCY_LIMIT : usize = 5;

  /// Cadence of the capacity gate's busy-wait loop while `remaining == 0`.
  pub const CAPACITY_POLL_INTERVAL_SECS : u64 = 1;
}

crate::mod_interface!
{
  exposed use
  {
    MAX_PROMPTS,
    MAX_RETRIES_GENERATE,
    MAX_RETRIES_TOKENIZE,
    DEFAULT_CONCURRENCY_LIMIT,
    CAPACITY_POLL_INTERVAL_SECS,
  };
}
