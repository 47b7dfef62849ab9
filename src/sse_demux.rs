//! Projects raw SSE frames into caller-facing streaming results.
//!
//! The service multiplexes a moderation-only frame ahead of per-result
//! frames onto one event stream (spec'd behaviour, mirrored from
//! `Model.generate_stream` in the reference client: it yields the
//! moderation result first, then each of `response.results`).

#[ cfg( feature = "streaming" ) ]
mod private
{
  use crate::components::streaming::{ ApiGenerateStreamEvent, ChatStreamEvent, ChatStreamResult, GenerateStreamResult };

  /// Projects one raw `generate` SSE frame into zero or more caller-facing
  /// results: the moderation result (if present on this frame) followed by
  /// one entry per chunk.
  #[ must_use ]
  pub fn project_generate_event( event : ApiGenerateStreamEvent ) -> Vec< GenerateStreamResult >
  {
    let mut out = Vec::with_capacity( 1 + event.results.len() );
    if let Some( moderations ) = event.moderations
    {
      out.push( GenerateStreamResult::Moderation( moderations ) );
    }
    out.extend( event.results.into_iter().map( GenerateStreamResult::Chunk ) );
    out
  }

  /// Projects one raw `chat` SSE frame into a caller-facing result.
  #[ must_use ]
  #[ inline ]
  pub fn project_chat_event( event : ChatStreamEvent ) -> ChatStreamResult
  {
    ChatStreamResult
    {
      conversation_id : event.conversation_id,
      generated_text : event.generated_text,
      stop_reason : event.stop_reason,
    }
  }
}

#[ cfg( feature = "streaming" ) ]
crate::mod_interface!
{
  exposed use
  {
    project_generate_event,
    project_chat_event,
  };
}
