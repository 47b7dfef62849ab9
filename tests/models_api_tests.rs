//! Tests for catalogue lookups (`ModelsApi`).

#![ cfg( feature = "enabled" ) ]

mod common;

use api_genai::{ ModelCard, ModelsApi };
use common::FakeTransport;
use std::sync::Arc;

fn card( id : &str ) -> ModelCard
{
  ModelCard { id : id.to_owned(), name : id.to_owned(), size : None, token_limit : None }
}

#[ tokio::test ]
async fn is_available_true_when_the_model_is_in_the_catalogue()
{
  let transport = FakeTransport::new();
  *transport.models_script.lock().unwrap() = vec![ Ok( vec![ card( "a" ), card( "b" ) ] ) ].into();

  assert!( transport.is_available( "a" ).await.unwrap() );
  assert!( !transport.is_available( "missing" ).await.unwrap() );
}

#[ tokio::test ]
async fn model_info_returns_none_for_an_unknown_model()
{
  let transport = FakeTransport::new();
  *transport.models_script.lock().unwrap() = vec![ Ok( vec![ card( "a" ) ] ) ].into();

  assert_eq!( transport.model_info( "a" ).await.unwrap(), Some( card( "a" ) ) );
}

#[ tokio::test ]
async fn model_info_returns_none_when_missing()
{
  let transport = FakeTransport::new();
  *transport.models_script.lock().unwrap() = vec![ Ok( vec![ card( "a" ) ] ) ].into();

  assert_eq!( transport.model_info( "other" ).await.unwrap(), None );
}

#[ tokio::test ]
async fn model_via_facade_lists_models_too()
{
  let transport = Arc::new( FakeTransport::new() );
  *transport.models_script.lock().unwrap() = vec![ Ok( vec![ card( "a" ) ] ) ].into();
  let model = api_genai::Model::from_transport( "a", Arc::clone( &transport ) );

  let cards = model.list_models().await.unwrap();

  assert_eq!( cards, vec![ card( "a" ) ] );
}

