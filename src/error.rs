//! Error type and result alias for generation-engine operations.

mod private
{
  use error_tools::dependency::thiserror;

  /// Error variants produced by the generation engine.
  ///
  /// Covers transport failures, rate limiting, server-side errors, decode
  /// failures, cooperative cancellation, and local validation problems.
  /// Convert from `reqwest::Error`, `serde_json::Error`, and
  /// `reqwest::header::InvalidHeaderValue` via `From` impls.
  #[ derive( Debug, Clone, PartialEq, thiserror::Error ) ]
  #[ non_exhaustive ]
  pub enum GenAiError
  {
    /// Network/connect/timeout failure reaching the service.
    #[ error( "transport error : {0}" ) ]
    Transport( String ),

    /// Service responded `429` and the caller's retry budget is exhausted.
    #[ error( "rate limited after {attempts} attempt(s) : {message}" ) ]
    RateLimited
    {
      /// Number of attempts made before giving up.
      attempts : u32,
      /// Body or status text returned with the final `429`.
      message : String,
    },

    /// Service responded with a non-`429` error status.
    #[ error( "server error {status} : {body}" ) ]
    Server
    {
      /// HTTP status code.
      status : u16,
      /// Response body, or the status text if the body could not be read.
      body : String,
    },

    /// Response body could not be decoded into the expected shape.
    #[ error( "decode error : {0}" ) ]
    Decode( String ),

    /// Operation was cancelled before it completed.
    #[ error( "cancelled" ) ]
    Cancelled,

    /// Caller-supplied arguments failed local validation.
    #[ error( "validation error : {0}" ) ]
    Validation( String ),
  }

  /// Crate-level result type backed by a boxed dynamic error.
  pub type Result< T > = error_tools::untyped::Result< T >;

  impl From< reqwest::Error > for GenAiError
  {
    #[ inline ]
    fn from( e : reqwest::Error ) -> Self
    {
      Self::Transport( e.to_string() )
    }
  }

  impl From< serde_json::Error > for GenAiError
  {
    #[ inline ]
    fn from( e : serde_json::Error ) -> Self
    {
      Self::Decode( e.to_string() )
    }
  }

  impl From< reqwest::header::InvalidHeaderValue > for GenAiError
  {
    #[ inline ]
    fn from( e : reqwest::header::InvalidHeaderValue ) -> Self
    {
      Self::Validation( format!( "invalid API key : {e}" ) )
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    GenAiError,
    Result,
  };
}
