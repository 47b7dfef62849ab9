//! Tests for the wire-level component types: serde shape, not behaviour.

#![ cfg( feature = "enabled" ) ]

use api_genai::{ CapacitySnapshot, GenerateParams, Message, ModerationSwitch, ModerationTypeOptions, ModerationsOptions };

#[ test ]
fn generate_params_omits_absent_fields_entirely()
{
  let params = GenerateParams::former().temperature( 0.7 ).form();
  let json = serde_json::to_value( &params ).unwrap();

  assert_eq!( json, serde_json::json!( { "temperature" : 0.7 } ) );
}

#[ test ]
fn generate_params_includes_every_field_once_set()
{
  let params = GenerateParams::former()
    .decoding_method( "sample".to_owned() )
    .max_new_tokens( 200u32 )
    .min_new_tokens( 10u32 )
    .form();
  let json = serde_json::to_value( &params ).unwrap();

  assert_eq!( json[ "decoding_method" ], "sample" );
  assert_eq!( json[ "max_new_tokens" ], 200 );
  assert_eq!( json[ "min_new_tokens" ], 10 );
}

#[ test ]
fn moderation_switch_enabled_serializes_as_a_bare_bool()
{
  let switch = ModerationSwitch::Enabled( true );
  assert_eq!( serde_json::to_value( &switch ).unwrap(), serde_json::json!( true ) );

  let switch : ModerationSwitch = serde_json::from_value( serde_json::json!( false ) ).unwrap();
  assert_eq!( switch, ModerationSwitch::Enabled( false ) );
}

#[ test ]
fn moderation_switch_configured_serializes_as_an_object()
{
  let switch = ModerationSwitch::Configured( ModerationTypeOptions { input : false, output : true, threshold : 0.9 } );
  let json = serde_json::to_value( &switch ).unwrap();

  assert_eq!( json, serde_json::json!( { "input" : false, "output" : true, "threshold" : 0.9 } ) );
}

#[ test ]
fn moderation_switch_defaults_to_disabled()
{
  assert_eq!( ModerationSwitch::default(), ModerationSwitch::Enabled( false ) );
}

#[ test ]
fn moderations_options_default_disables_every_detector()
{
  let options = ModerationsOptions::default();

  assert_eq!( options.hap, ModerationSwitch::Enabled( false ) );
  assert_eq!( options.stigma, ModerationSwitch::Enabled( false ) );
  assert_eq!( options.implicit_hate, ModerationSwitch::Enabled( false ) );
}

#[ test ]
fn capacity_snapshot_deserializes_the_camel_case_wire_shape()
{
  let snapshot : CapacitySnapshot = serde_json::from_value
  (
    serde_json::json!( { "tokenCapacity" : 100, "tokensUsed" : 40 } ),
  ).unwrap();

  assert_eq!( snapshot.token_capacity, 100 );
  assert_eq!( snapshot.tokens_used, 40 );
  assert_eq!( snapshot.remaining(), 60 );
}

#[ test ]
fn capacity_snapshot_remaining_saturates_when_used_exceeds_capacity()
{
  let snapshot = CapacitySnapshot { token_capacity : 10, tokens_used : 15 };
  assert_eq!( snapshot.remaining(), 0 );
}

#[ test ]
fn message_constructors_tag_the_role_and_serialize_it_lowercase()
{
  let messages = vec!
  [
    Message::system( "be terse" ),
    Message::user( "hi" ),
    Message::assistant( "hello" ),
  ];
  let json = serde_json::to_value( &messages ).unwrap();

  assert_eq!( json, serde_json::json!(
  [
    { "role" : "system", "content" : "be terse" },
    { "role" : "user", "content" : "hi" },
    { "role" : "assistant", "content" : "hello" },
  ] ) );
}
