//! Tests for projecting raw SSE frames into caller-facing streaming
//! results (invariant 10: moderation-first, then one result per frame).

#![ cfg( feature = "streaming" ) ]

use api_genai::{ ApiGenerateStreamEvent, ChatStreamEvent, GenerateStreamChunk, GenerateStreamResult, ModerationsOptions };

fn chunk( text : &str, stop_reason : Option< &str > ) -> GenerateStreamChunk
{
  GenerateStreamChunk { generated_text : text.to_owned(), stop_reason : stop_reason.map( str::to_owned ) }
}

#[ test ]
fn a_plain_frame_yields_one_result_per_chunk()
{
  let event = ApiGenerateStreamEvent { moderations : None, results : vec![ chunk( "he", None ) ] };

  let projected = api_genai::project_generate_event( event );

  assert_eq!( projected, vec![ GenerateStreamResult::Chunk( chunk( "he", None ) ) ] );
}

#[ test ]
fn a_frame_carrying_moderations_yields_the_moderation_result_first()
{
  let moderations = ModerationsOptions::default();
  let event = ApiGenerateStreamEvent
  {
    moderations : Some( moderations ),
    results : vec![ chunk( "llo", None ) ],
  };

  let projected = api_genai::project_generate_event( event );

  assert_eq!( projected.len(), 2 );
  assert_eq!( projected[ 0 ], GenerateStreamResult::Moderation( moderations ) );
  assert_eq!( projected[ 1 ], GenerateStreamResult::Chunk( chunk( "llo", None ) ) );
}

#[ test ]
fn a_moderation_only_frame_with_no_results_yields_a_single_result()
{
  let moderations = ModerationsOptions::default();
  let event = ApiGenerateStreamEvent { moderations : Some( moderations ), results : Vec::new() };

  let projected = api_genai::project_generate_event( event );

  assert_eq!( projected, vec![ GenerateStreamResult::Moderation( moderations ) ] );
}

#[ test ]
fn a_body_of_k_frames_yields_exactly_k_results_in_frame_order()
{
  let frames = vec!
  [
    ApiGenerateStreamEvent { moderations : None, results : vec![ chunk( "he", None ) ] },
    ApiGenerateStreamEvent { moderations : None, results : vec![ chunk( "llo", None ) ] },
    ApiGenerateStreamEvent { moderations : None, results : vec![ chunk( "!", Some( "eos_token" ) ) ] },
  ];

  let projected : Vec< _ > = frames.into_iter().flat_map( api_genai::project_generate_event ).collect();

  assert_eq!( projected.len(), 3 );
  assert_eq!
  (
    projected,
    vec!
    [
      GenerateStreamResult::Chunk( chunk( "he", None ) ),
      GenerateStreamResult::Chunk( chunk( "llo", None ) ),
      GenerateStreamResult::Chunk( chunk( "!", Some( "eos_token" ) ) ),
    ],
  );
}

#[ test ]
fn chat_frame_projects_field_for_field()
{
  let event = ChatStreamEvent
  {
    conversation_id : "conv-1".to_owned(),
    generated_text : "hi".to_owned(),
    stop_reason : Some( "eos_token".to_owned() ),
  };

  let projected = api_genai::project_chat_event( event );

  assert_eq!( projected.conversation_id, "conv-1" );
  assert_eq!( projected.generated_text, "hi" );
  assert_eq!( projected.stop_reason.as_deref(), Some( "eos_token" ) );
}
