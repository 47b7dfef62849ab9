//! Tests for `TextGenerator`'s stop-sequence handling: passed to the
//! service via `stop_sequences` *and* enforced again client-side.

#![ cfg( feature = "enabled" ) ]

mod common;

use api_genai::{ enforce_stop_sequences, CapacitySnapshot, Model, TextGenerator };
use common::{ FakeTransport, GenerateStep };
use std::sync::Arc;

#[ test ]
fn enforce_stop_sequences_truncates_at_the_earliest_match()
{
  let stop = vec![ "STOP".to_owned(), "END".to_owned() ];
  assert_eq!( enforce_stop_sequences( "hello END world STOP", &stop ), "hello " );
}

#[ test ]
fn enforce_stop_sequences_ignores_empty_entries()
{
  let stop = vec![ String::new(), "X".to_owned() ];
  assert_eq!( enforce_stop_sequences( "abXcd", &stop ), "ab" );
}

#[ test ]
fn enforce_stop_sequences_returns_the_whole_text_when_nothing_matches()
{
  let stop = vec![ "nope".to_owned() ];
  assert_eq!( enforce_stop_sequences( "unchanged", &stop ), "unchanged" );
}

/// The service is asked to stop at `STOP` (`stop_sequences` is set on the
/// request) and the client also truncates defensively in case the service
/// does not honour it.
#[ tokio::test ]
async fn generate_one_truncates_client_side_even_though_the_service_already_stopped()
{
  let transport = Arc::new
  (
    FakeTransport::new()
      .with_generate_steps( [ GenerateStep::ok( &[ "answer STOP leaked continuation" ] ) ] )
      .with_capacity_steps( [ CapacitySnapshot { token_capacity : u32::MAX, tokens_used : 0 } ] ),
  );
  let model = Model::from_transport( "m", transport );

  let text = model.generate_one( "prompt".to_owned(), &[ "STOP".to_owned() ] ).await.unwrap();

  assert_eq!( text, "answer " );
}

#[ tokio::test ]
async fn generate_many_preserves_prompt_order()
{
  let transport = Arc::new
  (
    FakeTransport::new()
      .with_generate_steps( [ GenerateStep::ok( &[ "first", "second" ] ) ] )
      .with_capacity_steps( [ CapacitySnapshot { token_capacity : u32::MAX, tokens_used : 0 } ] ),
  );
  let model = Model::from_transport( "m", transport );

  let texts = model.generate_many( vec![ "a".to_owned(), "b".to_owned() ], &[] ).await.unwrap();

  assert_eq!( texts, vec![ "first".to_owned(), "second".to_owned() ] );
}
