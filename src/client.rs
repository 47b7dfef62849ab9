//! `Transport` capability trait and its `reqwest`-backed implementation.
//!
//! Unlike a single concrete HTTP client, `Transport` is a capability trait so
//! the engines (`sync_engine`, `async_engine`, `stream_engine`) can be driven
//! by a scripted fake in tests without touching the network.

mod private
{
  use crate::components::capacity::CapacitySnapshot;
  use crate::components::chat::{ ChatOptions, ChatResult, Message };
  use crate::components::generate::
  {
    GenerateParams, GenerateResult, Prompt, TokenParams, TokenizeResult,
  };
  use crate::components::models::ModelCard;
  use crate::environment::Environment;
  use crate::error::{ GenAiError, Result };
  use async_trait::async_trait;
  use core::time::Duration;
  use reqwest::{ Client as HttpClient, StatusCode };
  use serde::{ Deserialize, Serialize };

  /// Wire body for `POST /generate`.
  #[ derive( Serialize ) ]
  struct GenerateRequestBody< 'a >
  {
    model_id : &'a str,
    inputs : &'a [ Prompt ],
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    parameters : Option< &'a GenerateParams >,
  }

  /// Wire body for the response to `POST /generate`.
  #[ derive( Deserialize ) ]
  struct GenerateResponseBody
  {
    results : Vec< GenerateResult >,
  }

  /// Wire body for `POST /tokenize`.
  #[ derive( Serialize ) ]
  struct TokenizeRequestBody< 'a >
  {
    model_id : &'a str,
    inputs : &'a [ Prompt ],
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    parameters : Option< &'a TokenParams >,
  }

  /// Wire body for the response to `POST /tokenize`.
  #[ derive( Deserialize ) ]
  struct TokenizeResponseBody
  {
    results : Vec< TokenizeResult >,
  }

  /// Wire body for `POST /chat`.
  #[ derive( Serialize ) ]
  struct ChatRequestBody< 'a >
  {
    model_id : &'a str,
    messages : &'a [ Message ],
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    parameters : Option< &'a GenerateParams >,
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    options : Option< &'a ChatOptions >,
  }

  /// Wire body for the response to `POST /chat`.
  #[ derive( Deserialize ) ]
  struct ChatResponseBody
  {
    results : Vec< ChatResult >,
  }

  /// Wire body for the response to `GET /models`.
  #[ derive( Deserialize ) ]
  struct ListModelsBody
  {
    results : Vec< ModelCard >,
  }

  #[ cfg( feature = "streaming" ) ]
  use crate::components::streaming::ApiGenerateStreamEvent;
  #[ cfg( feature = "streaming" ) ]
  use crate::components::streaming::ChatStreamEvent;
  #[ cfg( feature = "streaming" ) ]
  use eventsource_stream::Eventsource;
  #[ cfg( feature = "streaming" ) ]
  use futures_util::{ Stream, StreamExt };
  #[ cfg( feature = "streaming" ) ]
  use std::pin::Pin;

  /// One non-2xx HTTP response, carried up from [`Transport`] to the
  /// engines so they can classify it (retryable `429` vs. fatal) without
  /// re-parsing the body.
  #[ derive( Debug, Clone, PartialEq ) ]
  pub struct ApiStatusError
  {
    /// HTTP status code.
    pub status : StatusCode,
    /// Response body, or the status text if the body could not be read.
    pub body : String,
  }

  /// A stream item from a streamed `generate`/`chat` call: either the
  /// boxed async_trait error type the engines expect, or the raw error
  /// body for non-2xx framing.
  #[ cfg( feature = "streaming" ) ]
  pub type StreamItem< O > = Result< O >;

  /// Thin boundary between the generation engines and the network.
  ///
  /// Production code drives the engines with [`HttpTransport`]; tests drive
  /// them with a fake that returns scripted responses, delays, and `429`s
  /// (see `tests/` for the fakes used against invariants 1-10 and scenarios
  /// S1-S6).
  #[ async_trait ]
  pub trait Transport : Send + Sync
  {
    /// `POST /generate` for one sub-batch, returning one result per prompt
    /// in order, or an [`ApiStatusError`] for a non-2xx response.
    async fn generate
    (
      &self,
      model_id : &str,
      inputs : &[ Prompt ],
      parameters : Option< &GenerateParams >,
    ) -> core::result::Result< Vec< GenerateResult >, ApiStatusError >;

    /// `POST /tokenize` for one sub-batch.
    async fn tokenize
    (
      &self,
      model_id : &str,
      inputs : &[ Prompt ],
      parameters : Option< &TokenParams >,
    ) -> core::result::Result< Vec< TokenizeResult >, ApiStatusError >;

    /// `POST /chat` over the full conversation so far.
    async fn chat
    (
      &self,
      model_id : &str,
      messages : &[ Message ],
      parameters : Option< &GenerateParams >,
      options : Option< &ChatOptions >,
    ) -> core::result::Result< Vec< ChatResult >, ApiStatusError >;

    /// `GET /generate/limits`.
    async fn capacity( &self ) -> core::result::Result< CapacitySnapshot, ApiStatusError >;

    /// `GET /models`.
    async fn models( &self ) -> core::result::Result< Vec< ModelCard >, ApiStatusError >;

    /// `POST /generate` with `stream=true`, demultiplexed at the transport
    /// boundary into raw per-frame events.
    #[ cfg( feature = "streaming" ) ]
    async fn generate_stream
    (
      &self,
      model_id : &str,
      inputs : &[ Prompt ],
      parameters : Option< &GenerateParams >,
    ) -> Result< Pin< Box< dyn Stream< Item = StreamItem< ApiGenerateStreamEvent > > + Send > > >;

    /// `POST /chat` with streaming enabled.
    #[ cfg( feature = "streaming" ) ]
    async fn chat_stream
    (
      &self,
      model_id : &str,
      messages : &[ Message ],
      parameters : Option< &GenerateParams >,
      options : Option< &ChatOptions >,
    ) -> Result< Pin< Box< dyn Stream< Item = StreamItem< ChatStreamEvent > > + Send > > >;
  }

  /// Production [`Transport`] backed by `reqwest`.
  ///
  /// Generic over an [`Environment`] so the same transport code targets the
  /// hosted service, an on-prem deployment, or a local test server.
  #[ derive( Debug ) ]
  pub struct HttpTransport< Env >
  where
    Env : Environment,
  {
    http_client : HttpClient,
    environment : Env,
  }

  impl< Env > HttpTransport< Env >
  where
    Env : Environment,
  {
    /// Builds an HTTP transport configured from the given environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `reqwest::Client` cannot be built.
    #[ inline ]
    pub fn build( environment : Env ) -> Result< Self >
    {
      let http_client = HttpClient::builder()
        .timeout( environment.timeout() )
        .connect_timeout( Duration::from_secs( 15 ) )
        .build()
        .map_err( | e | GenAiError::Transport( e.to_string() ) )?;
      Ok( Self { http_client, environment } )
    }

    fn url( &self, path : &str ) -> Result< url::Url >
    {
      let base = url::Url::parse( self.environment.base_url() )
        .map_err( | e | GenAiError::Validation( format!( "invalid base url : {e}" ) ) )?;
      base.join( path ).map_err( | e | GenAiError::Validation( format!( "invalid request path : {e}" ) ).into() )
    }

    async fn post_json< I, O >( &self, path : &str, body : &I ) -> core::result::Result< O, ApiStatusError >
    where
      I : serde::Serialize + Sync,
      O : serde::de::DeserializeOwned,
    {
      let url = self.url( path ).map_err( | e | ApiStatusError { status : StatusCode::BAD_REQUEST, body : e.to_string() } )?;
      let headers = self.environment.headers().map_err( | e | ApiStatusError
      {
        status : StatusCode::BAD_REQUEST,
        body : e.to_string(),
      } )?;
      let response = self.http_client
        .post( url )
        .headers( headers )
        .json( body )
        .send()
        .await
        .map_err( | e | ApiStatusError { status : StatusCode::BAD_GATEWAY, body : e.to_string() } )?;
      Self::handle_response( response ).await
    }

    async fn get_json< O >( &self, path : &str ) -> core::result::Result< O, ApiStatusError >
    where
      O : serde::de::DeserializeOwned,
    {
      let url = self.url( path ).map_err( | e | ApiStatusError { status : StatusCode::BAD_REQUEST, body : e.to_string() } )?;
      let headers = self.environment.headers().map_err( | e | ApiStatusError
      {
        status : StatusCode::BAD_REQUEST,
        body : e.to_string(),
      } )?;
      let response = self.http_client
        .get( url )
        .headers( headers )
        .send()
        .await
        .map_err( | e | ApiStatusError { status : StatusCode::BAD_GATEWAY, body : e.to_string() } )?;
      Self::handle_response( response ).await
    }

    async fn handle_response< O >( response : reqwest::Response ) -> core::result::Result< O, ApiStatusError >
    where
      O : serde::de::DeserializeOwned,
    {
      let status = response.status();
      if status.is_success()
      {
        response
          .json::< O >()
          .await
          .map_err( | e | ApiStatusError { status, body : e.to_string() } )
      }
      else
      {
        let body = response.text().await.unwrap_or_else( | _ | status.to_string() );
        Err( ApiStatusError { status, body } )
      }
    }

    #[ cfg( feature = "streaming" ) ]
    async fn post_stream< I, O >
    (
      &self,
      path : &str,
      body : &I,
    ) -> Result< Pin< Box< dyn Stream< Item = StreamItem< O > > + Send > > >
    where
      I : serde::Serialize + Sync,
      O : serde::de::DeserializeOwned + Send + 'static,
    {
      let url = self.url( path )?;
      let headers = self.environment.headers()?;
      let response = self.http_client
        .post( url )
        .headers( headers )
        .json( body )
        .send()
        .await
        .map_err( GenAiError::from )?;

      let status = response.status();
      if !status.is_success()
      {
        let body = response.text().await.unwrap_or_else( | _ | status.to_string() );
        return Err( GenAiError::Server { status : status.as_u16(), body }.into() );
      }

      let event_stream = response
        .bytes_stream()
        .map( | r : reqwest::Result< bytes::Bytes > | r.map_err( std::io::Error::other ) )
        .eventsource();

      let mapped = event_stream.map( | event_result |
      {
        match event_result
        {
          Ok( event ) if event.data == "[DONE]" => Err( GenAiError::Cancelled.into() ),
          Ok( event ) => serde_json::from_str::< O >( &event.data )
            .map_err( GenAiError::from )
            .map_err( Into::into ),
          Err( e ) => Err( GenAiError::Transport( format!( "SSE error : {e}" ) ).into() ),
        }
      } );

      let filtered = mapped.take_while( | result : &Result< O > |
      {
        futures_util::future::ready( !matches!( result, Err( e ) if is_done_sentinel( e ) ) )
      } );

      Ok( Box::pin( filtered ) )
    }
  }

  #[ cfg( feature = "streaming" ) ]
  fn is_done_sentinel( e : &error_tools::untyped::Error ) -> bool
  {
    e.downcast_ref::< GenAiError >().is_some_and( | g | matches!( g, GenAiError::Cancelled ) )
  }

  #[ async_trait ]
  impl< Env > Transport for HttpTransport< Env >
  where
    Env : Environment,
  {
    async fn generate
    (
      &self,
      model_id : &str,
      inputs : &[ Prompt ],
      parameters : Option< &GenerateParams >,
    ) -> core::result::Result< Vec< GenerateResult >, ApiStatusError >
    {
      let body = GenerateRequestBody { model_id, inputs, parameters };
      let resp : GenerateResponseBody = self.post_json( "generate", &body ).await?;
      Ok( resp.results )
    }

    async fn tokenize
    (
      &self,
      model_id : &str,
      inputs : &[ Prompt ],
      parameters : Option< &TokenParams >,
    ) -> core::result::Result< Vec< TokenizeResult >, ApiStatusError >
    {
      let body = TokenizeRequestBody { model_id, inputs, parameters };
      let resp : TokenizeResponseBody = self.post_json( "tokenize", &body ).await?;
      Ok( resp.results )
    }

    async fn chat
    (
      &self,
      model_id : &str,
      messages : &[ Message ],
      parameters : Option< &GenerateParams >,
      options : Option< &ChatOptions >,
    ) -> core::result::Result< Vec< ChatResult >, ApiStatusError >
    {
      let body = ChatRequestBody { model_id, messages, parameters, options };
      let resp : ChatResponseBody = self.post_json( "chat", &body ).await?;
      Ok( resp.results )
    }

    async fn capacity( &self ) -> core::result::Result< CapacitySnapshot, ApiStatusError >
    {
      self.get_json( "generate/limits" ).await
    }

    async fn models( &self ) -> core::result::Result< Vec< ModelCard >, ApiStatusError >
    {
      let resp : ListModelsBody = self.get_json( "models" ).await?;
      Ok( resp.results )
    }

    #[ cfg( feature = "streaming" ) ]
    async fn generate_stream
    (
      &self,
      model_id : &str,
      inputs : &[ Prompt ],
      parameters : Option< &GenerateParams >,
    ) -> Result< Pin< Box< dyn Stream< Item = StreamItem< ApiGenerateStreamEvent > > + Send > > >
    {
      let body = GenerateRequestBody { model_id, inputs, parameters };
      self.post_stream( "generate", &body ).await
    }

    #[ cfg( feature = "streaming" ) ]
    async fn chat_stream
    (
      &self,
      model_id : &str,
      messages : &[ Message ],
      parameters : Option< &GenerateParams >,
      options : Option< &ChatOptions >,
    ) -> Result< Pin< Box< dyn Stream< Item = StreamItem< ChatStreamEvent > > + Send > > >
    {
      let body = ChatRequestBody { model_id, messages, parameters, options };
      self.post_stream( "chat", &body ).await
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    Transport,
    HttpTransport,
    ApiStatusError,
  };

  #[ cfg( feature = "streaming" ) ]
  exposed use
  {
    StreamItem,
  };
}
