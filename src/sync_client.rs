//! Blocking wrapper around [`Model`], for callers that have no async
//! runtime of their own.

mod private
{
  use crate::client::Transport;
  use crate::components::chat::{ ChatOptions, ChatResult, Message };
  use crate::components::generate::{ GenerateParams, GenerateResult, Prompt, TokenParams, TokenizeResult };
  use crate::error::{ GenAiError, Result };
  use crate::model::Model;
  use tokio::runtime::Runtime;

  /// Synchronous façade over [`Model`], running every call on a private
  /// single-purpose Tokio runtime.
  ///
  /// Do not construct one of these inside an existing async context:
  /// blocking the executor thread this way risks deadlock. It exists for
  /// callers with no async runtime at all.
  #[ derive( Debug ) ]
  pub struct SyncModel< T >
  where
    T : Transport,
  {
    runtime : Runtime,
    model : Model< T >,
  }

  impl< T > SyncModel< T >
  where
    T : Transport + 'static,
  {
    /// Wraps `model` with a dedicated runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be created.
    #[ inline ]
    pub fn new( model : Model< T > ) -> Result< Self >
    {
      let runtime = Runtime::new().map_err( | e | GenAiError::Transport( format!( "runtime error : {e}" ) ) )?;
      Ok( Self { runtime, model } )
    }

    /// Blocking equivalent of [`Model::generate`].
    pub fn generate( &self, prompts : Vec< Prompt >, params : Option< GenerateParams > ) -> Result< Vec< GenerateResult > >
    {
      self.runtime.block_on( self.model.generate( prompts, params ) )
    }

    /// Blocking equivalent of [`Model::tokenize`].
    pub fn tokenize( &self, prompts : Vec< Prompt >, params : Option< TokenParams > ) -> Result< Vec< TokenizeResult > >
    {
      self.runtime.block_on( self.model.tokenize( prompts, params ) )
    }

    /// Blocking equivalent of [`Model::chat`].
    pub fn chat( &self, messages : &[ Message ], params : Option< &GenerateParams >, options : Option< &ChatOptions > ) -> Result< Vec< ChatResult > >
    {
      self.runtime.block_on( self.model.chat( messages, params, options ) )
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    SyncModel,
  };
}
