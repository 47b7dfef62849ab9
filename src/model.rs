//! `Model`: the crate's public entry point, tying a model id, default
//! parameters, and a transport together.
//!
//! Grounded on the `Model` class in the reference client: one object
//! wrapping a service connection and a model id, exposing generation,
//! tokenization, chat, and catalogue lookups.

mod private
{
  use crate::client::{ HttpTransport, Transport };
  use crate::components::chat::{ ChatOptions, ChatResult, Message };
  use crate::components::generate::{ GenerateParams, GenerateResult, Prompt, TokenParams, TokenizeResult };
  use crate::components::models::ModelCard;
  use crate::environment::Environment;
  use crate::error::{ GenAiError, Result };
  use crate::generator::{ enforce_stop_sequences, TextGenerator };
  use crate::models_api::ModelsApi;
  use async_trait::async_trait;
  use futures_util::{ pin_mut, StreamExt };
  use std::sync::Arc;

  #[ cfg( feature = "streaming" ) ]
  use crate::components::streaming::{ ChatStreamResult, GenerateStreamResult };
  #[ cfg( feature = "streaming" ) ]
  use futures_core::stream::Stream;

  /// A model id bound to a transport and a set of default generation
  /// parameters.
  ///
  /// Construct with [`Model::new`] for the default HTTP transport, or
  /// [`Model::from_transport`] to drive it with any [`Transport`]
  /// implementation (e.g. a fake in tests).
  #[ derive( Debug ) ]
  pub struct Model< T >
  where
    T : Transport,
  {
    transport : Arc< T >,
    model_id : String,
    default_params : GenerateParams,
  }

  impl< Env > Model< HttpTransport< Env > >
  where
    Env : Environment,
  {
    /// Builds a model bound to the default HTTP transport for `environment`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    #[ inline ]
    pub fn new( model_id : impl Into< String >, environment : Env ) -> Result< Self >
    {
      Ok( Self::from_transport( model_id, Arc::new( HttpTransport::build( environment )? ) ) )
    }
  }

  impl< T > Model< T >
  where
    T : Transport,
  {
    /// Builds a model bound to an arbitrary transport.
    #[ inline ]
    pub fn from_transport( model_id : impl Into< String >, transport : Arc< T > ) -> Self
    {
      Self { transport, model_id : model_id.into(), default_params : GenerateParams::default() }
    }

    /// Overrides the default generation parameters applied when a call site
    /// passes `None`.
    #[ must_use ]
    #[ inline ]
    pub fn with_default_params( mut self, params : GenerateParams ) -> Self
    {
      self.default_params = params;
      self
    }

    fn params< 'a >( &'a self, override_params : Option< &'a GenerateParams > ) -> &'a GenerateParams
    {
      override_params.unwrap_or( &self.default_params )
    }
  }

  impl< T > Model< T >
  where
    T : Transport + 'static,
  {
    /// Generates text for every prompt, capacity-gated and retrying `429`s
    /// serially, one sub-batch at a time.
    pub async fn generate( &self, prompts : Vec< Prompt >, params : Option< GenerateParams > ) -> Result< Vec< GenerateResult > >
    {
      let params = params.unwrap_or_else( || self.default_params.clone() );
      let stream = crate::sync_engine::generate_as_completed( self.transport.as_ref(), &self.model_id, prompts, Some( &params ) );
      pin_mut!( stream );
      let mut out = Vec::new();
      while let Some( item ) = stream.next().await
      {
        out.push( item? );
      }
      Ok( out )
    }

    /// Counts tokens for every prompt.
    pub async fn tokenize( &self, prompts : Vec< Prompt >, params : Option< TokenParams > ) -> Result< Vec< TokenizeResult > >
    {
      let stream = crate::sync_engine::tokenize_as_completed( self.transport.as_ref(), &self.model_id, prompts, params.as_ref() );
      pin_mut!( stream );
      let mut out = Vec::new();
      while let Some( item ) = stream.next().await
      {
        out.push( item? );
      }
      Ok( out )
    }

    /// Sends a multi-turn conversation.
    pub async fn chat( &self, messages : &[ Message ], params : Option< &GenerateParams >, options : Option< &ChatOptions > ) -> Result< Vec< ChatResult > >
    {
      self.transport
        .chat( &self.model_id, messages, Some( self.params( params ) ), options )
        .await
        .map_err( | e | GenAiError::Server { status : e.status.as_u16(), body : e.body }.into() )
    }

    /// Dispatches `generate` over every prompt with bounded concurrency; see
    /// [`crate::async_engine::generate_async`] for delivery-order and
    /// error-handling semantics.
    pub fn generate_async
    (
      &self,
      prompts : Vec< Prompt >,
      params : Option< GenerateParams >,
      options : crate::async_engine::AsyncOptions,
    ) -> impl futures_core::stream::Stream< Item = Result< Option< GenerateResult > > >
    {
      let params = params.unwrap_or_else( || self.default_params.clone() );
      crate::async_engine::generate_async( Arc::clone( &self.transport ), self.model_id.clone(), prompts, Some( params ), options )
    }

    /// Dispatches `tokenize` over every prompt with bounded concurrency; see
    /// [`crate::async_engine::tokenize_async`] for delivery-order and
    /// error-handling semantics.
    pub fn tokenize_async
    (
      &self,
      prompts : Vec< Prompt >,
      params : Option< TokenParams >,
      options : crate::async_engine::TokenizeAsyncOptions,
    ) -> impl futures_core::stream::Stream< Item = Result< Option< TokenizeResult > > >
    {
      crate::async_engine::tokenize_async( Arc::clone( &self.transport ), self.model_id.clone(), prompts, params, options )
    }

    /// Streams `generate` over every prompt; see
    /// [`crate::stream_engine::generate_stream`].
    #[ cfg( feature = "streaming" ) ]
    pub fn generate_stream< 'a >
    (
      &'a self,
      prompts : Vec< Prompt >,
      params : Option< &'a GenerateParams >,
    ) -> impl Stream< Item = Result< GenerateStreamResult > > + 'a
    {
      crate::stream_engine::generate_stream( self.transport.as_ref(), &self.model_id, prompts, Some( self.params( params ) ) )
    }

    /// Streams a multi-turn conversation; see [`crate::stream_engine::chat_stream`].
    #[ cfg( feature = "streaming" ) ]
    pub fn chat_stream< 'a >
    (
      &'a self,
      messages : &'a [ Message ],
      params : Option< &'a GenerateParams >,
      options : Option< &'a ChatOptions >,
    ) -> impl Stream< Item = Result< ChatStreamResult > > + 'a
    {
      crate::stream_engine::chat_stream( self.transport.as_ref(), &self.model_id, messages, Some( self.params( params ) ), options )
    }
  }

  #[ async_trait ]
  impl< T > TextGenerator for Model< T >
  where
    T : Transport + 'static,
  {
    async fn generate_one( &self, prompt : Prompt, stop : &[ String ] ) -> Result< String >
    {
      Ok( self.generate_many( vec![ prompt ], stop ).await?.remove( 0 ) )
    }

    async fn generate_many( &self, prompts : Vec< Prompt >, stop : &[ String ] ) -> Result< Vec< String > >
    {
      let mut params = self.default_params.clone();
      if !stop.is_empty()
      {
        params.stop_sequences = Some( stop.to_vec() );
      }
      let results = self.generate( prompts, Some( params ) ).await?;
      Ok( results.into_iter().map( | r | enforce_stop_sequences( &r.generated_text, stop ) ).collect() )
    }
  }

  #[ async_trait ]
  impl< T > ModelsApi for Model< T >
  where
    T : Transport + 'static,
  {
    async fn list_models( &self ) -> Result< Vec< ModelCard > >
    {
      self.transport.models().await.map_err( | e | GenAiError::Server { status : e.status.as_u16(), body : e.body }.into() )
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    Model,
  };
}
