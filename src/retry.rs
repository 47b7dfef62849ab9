//! Retry classification and backoff timing for `429` responses.
//!
//! Only `429 Too Many Requests` is retried; every other status is fatal and
//! surfaces immediately as [`crate::GenAiError::Server`].

mod private
{
  use reqwest::StatusCode;

  /// Whether a given status code should be retried, and how long to wait
  /// before the next attempt.
  #[ derive( Debug, Clone, Copy, Default ) ]
  pub struct RetryPolicy
  {
    _private : (),
  }

  impl RetryPolicy
  {
    /// Returns the default retry policy (retries only `429`).
    #[ inline ]
    #[ must_use ]
    pub fn new() -> Self
    {
      Self::default()
    }

    /// `true` only for `429 Too Many Requests`.
    #[ inline ]
    #[ must_use ]
    pub fn is_retryable( self, status : StatusCode ) -> bool
    {
      status == StatusCode::TOO_MANY_REQUESTS
    }

    /// Exponential backoff for the given zero-based attempt number:
    /// `2^(attempt + 1)` seconds.
    #[ inline ]
    #[ must_use ]
    pub fn backoff( self, attempt : u32 ) -> core::time::Duration
    {
      core::time::Duration::from_secs( 2_u64.saturating_pow( attempt + 1 ) )
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    RetryPolicy,
  };
}
