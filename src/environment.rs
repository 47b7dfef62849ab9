//! Environment configuration trait and default implementation.
//!
//! The [`Environment`] trait abstracts over credential source and endpoint
//! configuration so the same [`crate::HttpTransport`] can target any
//! deployment of the service (hosted, on-prem, local test server).

mod private
{
  use crate::error::{ GenAiError, Result };
  use core::time::Duration;
  use reqwest::header;
  use secrecy::{ ExposeSecret, SecretString };

  /// Configuration contract for a generation-service environment.
  ///
  /// Implementors supply the three required values (API key, base URL,
  /// timeout) and receive a default `headers()` implementation that builds
  /// the standard HTTP headers. Override `headers()` if custom header logic
  /// is required.
  ///
  /// `Send + Sync + 'static` are required for use across async task
  /// boundaries.
  pub trait Environment : Send + Sync + 'static
  {
    /// Returns the raw API key.
    fn api_key( &self ) -> &str;

    /// Returns the base URL, including the trailing slash.
    ///
    /// Example: `"https://api.example.com/v2/"`. The transport appends
    /// endpoint paths (e.g. `"generate"`) to produce the full request URL.
    fn base_url( &self ) -> &str;

    /// Returns the per-request timeout duration.
    fn timeout( &self ) -> Duration;

    /// Constructs the HTTP headers required for every request.
    ///
    /// Default implementation adds:
    /// - `Authorization: Bearer <api_key>`
    /// - `Content-Type: application/json`
    ///
    /// # Errors
    ///
    /// Returns an error if header value construction fails (e.g. key
    /// contains non-ASCII characters that reqwest rejects).
    #[ inline ]
    fn headers( &self ) -> Result< header::HeaderMap >
    {
      let mut map = header::HeaderMap::new();
      let auth_value = format!( "Bearer {}", self.api_key() )
        .parse::< header::HeaderValue >()
        .map_err( GenAiError::from )?;
      map.insert( header::AUTHORIZATION, auth_value );
      map.insert
      (
        header::CONTENT_TYPE,
        header::HeaderValue::from_static( "application/json" ),
      );
      Ok( map )
    }
  }

  /// Default environment backed by in-memory values.
  ///
  /// Construct with [`new()`][EnvironmentImpl::new], then chain builder
  /// methods to override defaults.
  #[ derive( Clone ) ]
  pub struct EnvironmentImpl
  {
    /// API authentication key, held off the heap in plaintext as long as
    /// possible.
    api_key : SecretString,
    /// Base URL including trailing slash.
    base_url : String,
    /// Per-request timeout.
    timeout : Duration,
  }

  impl core::fmt::Debug for EnvironmentImpl
  {
    fn fmt( &self, f : &mut core::fmt::Formatter< '_ > ) -> core::fmt::Result
    {
      f.debug_struct( "EnvironmentImpl" )
        .field( "api_key", &"[redacted]" )
        .field( "base_url", &self.base_url )
        .field( "timeout", &self.timeout )
        .finish()
    }
  }

  impl EnvironmentImpl
  {
    /// Default base URL for the hosted service.
    pub const DEFAULT_BASE_URL : &'static str = "https://api.genai.example.com/v2/";

    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS : u64 = 30;

    /// Creates a new environment with default base URL and 30-second
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_key` is empty.
    #[ inline ]
    pub fn new( api_key : impl Into< String > ) -> Result< Self >
    {
      let api_key = api_key.into();
      if api_key.is_empty()
      {
        return Err( GenAiError::Validation( "API key must not be empty".to_owned() ).into() );
      }
      Ok( Self
      {
        api_key : SecretString::from( api_key ),
        base_url : Self::DEFAULT_BASE_URL.to_owned(),
        timeout : Duration::from_secs( Self::DEFAULT_TIMEOUT_SECS ),
      })
    }

    /// Overrides the base URL, returning the modified environment.
    #[ must_use ]
    #[ inline ]
    pub fn with_base_url( mut self, base_url : impl Into< String > ) -> Self
    {
      self.base_url = base_url.into();
      self
    }

    /// Overrides the request timeout, returning the modified environment.
    #[ must_use ]
    #[ inline ]
    pub fn with_timeout( mut self, timeout : Duration ) -> Self
    {
      self.timeout = timeout;
      self
    }
  }

  impl Environment for EnvironmentImpl
  {
    #[ inline ]
    fn api_key( &self ) -> &str
    {
      self.api_key.expose_secret()
    }

    #[ inline ]
    fn base_url( &self ) -> &str
    {
      &self.base_url
    }

    #[ inline ]
    fn timeout( &self ) -> Duration
    {
      self.timeout
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    Environment,
    EnvironmentImpl,
  };
}
