//! Server-Sent Events frame shapes for `generate_stream` / `chat_stream`.
//!
//! The service multiplexes two kinds of frame onto one event stream: a
//! moderation-only frame (emitted once, ahead of any result frames) and
//! per-result frames carrying the fields of [`crate::GenerateResult`] /
//! [`crate::ChatResult`] incrementally. [`crate::sse_demux`] projects both
//! into [`GenerateStreamResult`] / [`ChatStreamResult`].

mod private
{
  use crate::components::generate::ModerationsOptions;
  use serde::Deserialize;

  /// One decoded SSE frame from `POST /generate` with `stream=true`.
  #[ derive( Debug, Clone, PartialEq, Deserialize ) ]
  pub struct ApiGenerateStreamEvent
  {
    /// Present only on the moderation-only frame.
    #[ serde( default ) ]
    pub moderations : Option< ModerationsOptions >,
    /// Present on per-result frames; empty/absent on the moderation frame.
    #[ serde( default ) ]
    pub results : Vec< GenerateStreamChunk >,
  }

  /// One incremental piece of a streamed generation result.
  #[ derive( Debug, Clone, PartialEq, Deserialize ) ]
  pub struct GenerateStreamChunk
  {
    /// Text generated since the previous frame.
    #[ serde( default ) ]
    pub generated_text : String,
    /// Present on the final frame for this prompt.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub stop_reason : Option< String >,
  }

  /// A demultiplexed, caller-facing streaming result.
  ///
  /// One value is yielded per SSE frame: either the moderation-only result
  /// (always first, at most once) or one incremental chunk.
  #[ derive( Debug, Clone, PartialEq ) ]
  pub enum GenerateStreamResult
  {
    /// The moderation-only frame, surfaced ahead of any generated text.
    Moderation( ModerationsOptions ),
    /// An incremental chunk of generated text.
    Chunk( GenerateStreamChunk ),
  }

  /// One decoded SSE frame from `POST /chat` with streaming enabled.
  #[ derive( Debug, Clone, PartialEq, Deserialize ) ]
  pub struct ChatStreamEvent
  {
    /// Conversation this frame belongs to.
    pub conversation_id : String,
    /// Text generated since the previous frame.
    #[ serde( default ) ]
    pub generated_text : String,
    /// Present on the final frame.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub stop_reason : Option< String >,
  }

  /// A demultiplexed, caller-facing chat streaming result.
  #[ derive( Debug, Clone, PartialEq ) ]
  pub struct ChatStreamResult
  {
    /// Conversation this frame belongs to.
    pub conversation_id : String,
    /// Text generated since the previous frame.
    pub generated_text : String,
    /// Present on the final frame.
    pub stop_reason : Option< String >,
  }
}

crate::mod_interface!
{
  exposed use
  {
    GenerateStreamResult,
    GenerateStreamChunk,
    ChatStreamResult,
    ApiGenerateStreamEvent,
    ChatStreamEvent,
  };
}
