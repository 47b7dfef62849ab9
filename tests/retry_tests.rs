//! Tests for `429`-only retry classification and exponential backoff.

#![ cfg( feature = "enabled" ) ]

use api_genai::RetryPolicy;
use reqwest::StatusCode;

#[ test ]
fn only_429_is_retryable()
{
  let retry = RetryPolicy::new();

  assert!( retry.is_retryable( StatusCode::TOO_MANY_REQUESTS ) );
  assert!( !retry.is_retryable( StatusCode::INTERNAL_SERVER_ERROR ) );
  assert!( !retry.is_retryable( StatusCode::BAD_REQUEST ) );
  assert!( !retry.is_retryable( StatusCode::OK ) );
  assert!( !retry.is_retryable( StatusCode::GATEWAY_TIMEOUT ) );
}

#[ test ]
fn backoff_doubles_each_attempt()
{
  let retry = RetryPolicy::new();

  assert_eq!( retry.backoff( 0 ), core::time::Duration::from_secs( 2 ) );
  assert_eq!( retry.backoff( 1 ), core::time::Duration::from_secs( 4 ) );
  assert_eq!( retry.backoff( 2 ), core::time::Duration::from_secs( 8 ) );
}

#[ test ]
fn backoff_saturates_instead_of_overflowing()
{
  let retry = RetryPolicy::new();
  assert_eq!( retry.backoff( u32::MAX ), core::time::Duration::from_secs( u64::MAX ) );
}
