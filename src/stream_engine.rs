//! Serial SSE-backed streaming for `generate_stream` / `chat_stream`.
//!
//! Sub-batches are still processed one at a time (streaming a sub-batch
//! while a second one waits would interleave two prompts' partial text on
//! one logical stream), but each sub-batch's frames are forwarded to the
//! caller as they arrive rather than buffered, mirroring
//! `Model.generate_stream` / `Model.chat_stream` in the reference client.

#[ cfg( feature = "streaming" ) ]
mod private
{
  use crate::batcher::Batcher;
  use crate::client::Transport;
  use crate::components::chat::{ ChatOptions, Message };
  use crate::components::generate::{ GenerateParams, Prompt };
  use crate::components::streaming::{ ChatStreamResult, GenerateStreamResult };
  use crate::error::Result;
  use crate::sse_demux::{ project_chat_event, project_generate_event };
  use futures_core::stream::Stream;
  use futures_util::StreamExt;

  /// Streams `generate` over every prompt, one sub-batch's SSE frames at a
  /// time, each frame projected into zero or more caller-facing results.
  #[ must_use ]
  pub fn generate_stream< 'a, T >
  (
    transport : &'a T,
    model_id : &'a str,
    prompts : Vec< Prompt >,
    parameters : Option< &'a GenerateParams >,
  ) -> impl Stream< Item = Result< GenerateStreamResult > > + 'a
  where
    T : Transport + ?Sized,
  {
    async_stream::try_stream!
    {
      for batch in Batcher::new().batch_owned( prompts )
      {
        let mut frames = transport.generate_stream( model_id, &batch, parameters ).await?;
        while let Some( frame ) = frames.next().await
        {
          for item in project_generate_event( frame? )
          {
            yield item;
          }
        }
      }
    }
  }

  /// Streams a multi-turn conversation, forwarding each frame as it arrives.
  #[ must_use ]
  pub fn chat_stream< 'a, T >
  (
    transport : &'a T,
    model_id : &'a str,
    messages : &'a [ Message ],
    parameters : Option< &'a GenerateParams >,
    options : Option< &'a ChatOptions >,
  ) -> impl Stream< Item = Result< ChatStreamResult > > + 'a
  where
    T : Transport + ?Sized,
  {
    async_stream::try_stream!
    {
      let mut frames = transport.chat_stream( model_id, messages, parameters, options ).await?;
      while let Some( frame ) = frames.next().await
      {
        yield project_chat_event( frame? );
      }
    }
  }
}

#[ cfg( feature = "streaming" ) ]
crate::mod_interface!
{
  exposed use
  {
    generate_stream,
    chat_stream,
  };
}
