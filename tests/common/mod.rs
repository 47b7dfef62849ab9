//! A scripted [`Transport`] fake shared by the engine test suites.
//!
//! Each method pops its next outcome off a queue the test populates up
//! front, recording the inputs it was called with so assertions can check
//! batching/ordering without a real network.

#![ allow( dead_code ) ]

use api_genai::{ ApiStatusError, CapacitySnapshot, ChatOptions, ChatResult, GenerateParams, GenerateResult, Message, ModelCard, Prompt, TokenParams, Transport, TokenizeResult };
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

#[ cfg( feature = "streaming" ) ]
use api_genai::{ ApiGenerateStreamEvent, ChatStreamEvent };

/// One scripted response to a `generate` call, with an optional delay
/// applied (via `tokio::time::sleep`) before it resolves.
pub struct GenerateStep
{
  pub delay : Duration,
  pub outcome : core::result::Result< Vec< GenerateResult >, ApiStatusError >,
}

impl GenerateStep
{
  pub fn ok( texts : &[ &str ] ) -> Self
  {
    Self
    {
      delay : Duration::ZERO,
      outcome : Ok( texts.iter().map( | t | GenerateResult
      {
        input_text : String::new(),
        generated_text : ( *t ).to_owned(),
        generated_token_count : 0,
        input_token_count : 0,
        stop_reason : None,
        seed : None,
        moderation : None,
      } ).collect() ),
    }
  }

  pub fn err( status : StatusCode, body : impl Into< String > ) -> Self
  {
    Self { delay : Duration::ZERO, outcome : Err( ApiStatusError { status, body : body.into() } ) }
  }

  #[ must_use ]
  pub fn with_delay( mut self, delay : Duration ) -> Self
  {
    self.delay = delay;
    self
  }
}

/// A [`Transport`] driven entirely by pre-scripted outcomes.
#[ derive( Default ) ]
pub struct FakeTransport
{
  pub generate_script : Mutex< VecDeque< GenerateStep > >,
  pub tokenize_script : Mutex< VecDeque< core::result::Result< Vec< TokenizeResult >, ApiStatusError > > >,
  pub chat_script : Mutex< VecDeque< core::result::Result< Vec< ChatResult >, ApiStatusError > > >,
  pub capacity_script : Mutex< VecDeque< core::result::Result< CapacitySnapshot, ApiStatusError > > >,
  pub models_script : Mutex< VecDeque< core::result::Result< Vec< ModelCard >, ApiStatusError > > >,
  /// Every `generate` call's input batch, in call order.
  pub generate_calls : Mutex< Vec< Vec< Prompt > > >,
  /// Every `capacity` call, counted.
  pub capacity_calls : Mutex< usize >,
  /// Number of `generate` calls currently in flight.
  pub in_flight : Mutex< usize >,
  /// Highest value `in_flight` has ever reached.
  pub max_in_flight : Mutex< usize >,
  /// Frames returned by the next `generate_stream` call.
  #[ cfg( feature = "streaming" ) ]
  pub stream_frames : Mutex< Option< Vec< ApiGenerateStreamEvent > > >,
  /// Frames returned by the next `chat_stream` call.
  #[ cfg( feature = "streaming" ) ]
  pub chat_stream_frames : Mutex< Option< Vec< ChatStreamEvent > > >,
}

impl FakeTransport
{
  pub fn new() -> Self
  {
    Self::default()
  }

  #[ must_use ]
  pub fn with_generate_steps( self, steps : impl IntoIterator< Item = GenerateStep > ) -> Self
  {
    *self.generate_script.lock().unwrap() = steps.into_iter().collect();
    self
  }

  #[ must_use ]
  pub fn with_capacity_steps( self, steps : impl IntoIterator< Item = CapacitySnapshot > ) -> Self
  {
    *self.capacity_script.lock().unwrap() = steps.into_iter().map( Ok ).collect();
    self
  }

  pub fn generate_call_batches( &self ) -> Vec< Vec< Prompt > >
  {
    self.generate_calls.lock().unwrap().clone()
  }

  pub fn capacity_call_count( &self ) -> usize
  {
    *self.capacity_calls.lock().unwrap()
  }

  pub fn max_in_flight( &self ) -> usize
  {
    *self.max_in_flight.lock().unwrap()
  }

  #[ cfg( feature = "streaming" ) ]
  #[ must_use ]
  pub fn with_stream_frames( self, frames : Vec< ApiGenerateStreamEvent > ) -> Self
  {
    *self.stream_frames.lock().unwrap() = Some( frames );
    self
  }
}

#[ async_trait ]
impl Transport for FakeTransport
{
  async fn generate
  (
    &self,
    _model_id : &str,
    inputs : &[ Prompt ],
    _parameters : Option< &GenerateParams >,
  ) -> core::result::Result< Vec< GenerateResult >, ApiStatusError >
  {
    self.generate_calls.lock().unwrap().push( inputs.to_vec() );
    {
      let mut in_flight = self.in_flight.lock().unwrap();
      *in_flight += 1;
      let mut max_in_flight = self.max_in_flight.lock().unwrap();
      *max_in_flight = ( *max_in_flight ).max( *in_flight );
    }
    let step = self.generate_script.lock().unwrap().pop_front()
      .unwrap_or_else( || GenerateStep::err( StatusCode::INTERNAL_SERVER_ERROR, "no scripted response left" ) );
    if step.delay > Duration::ZERO
    {
      tokio::time::sleep( step.delay ).await;
    }
    *self.in_flight.lock().unwrap() -= 1;
    step.outcome
  }

  async fn tokenize
  (
    &self,
    _model_id : &str,
    _inputs : &[ Prompt ],
    _parameters : Option< &TokenParams >,
  ) -> core::result::Result< Vec< TokenizeResult >, ApiStatusError >
  {
    self.tokenize_script.lock().unwrap().pop_front()
      .unwrap_or_else( || Err( ApiStatusError { status : StatusCode::INTERNAL_SERVER_ERROR, body : "no scripted response left".to_owned() } ) )
  }

  async fn chat
  (
    &self,
    _model_id : &str,
    _messages : &[ Message ],
    _parameters : Option< &GenerateParams >,
    _options : Option< &ChatOptions >,
  ) -> core::result::Result< Vec< ChatResult >, ApiStatusError >
  {
    self.chat_script.lock().unwrap().pop_front()
      .unwrap_or_else( || Err( ApiStatusError { status : StatusCode::INTERNAL_SERVER_ERROR, body : "no scripted response left".to_owned() } ) )
  }

  async fn capacity( &self ) -> core::result::Result< CapacitySnapshot, ApiStatusError >
  {
    *self.capacity_calls.lock().unwrap() += 1;
    self.capacity_script.lock().unwrap().pop_front()
      .unwrap_or_else( || Ok( CapacitySnapshot { token_capacity : u32::MAX, tokens_used : 0 } ) )
  }

  async fn models( &self ) -> core::result::Result< Vec< ModelCard >, ApiStatusError >
  {
    self.models_script.lock().unwrap().pop_front()
      .unwrap_or_else( || Ok( Vec::new() ) )
  }

  #[ cfg( feature = "streaming" ) ]
  async fn generate_stream
  (
    &self,
    _model_id : &str,
    _inputs : &[ Prompt ],
    _parameters : Option< &GenerateParams >,
  ) -> api_genai::Result< std::pin::Pin< Box< dyn futures_util::Stream< Item = api_genai::StreamItem< api_genai::ApiGenerateStreamEvent > > + Send > > >
  {
    let frames = self.stream_frames.lock().unwrap().take().unwrap_or_default();
    Ok( Box::pin( futures_util::stream::iter( frames.into_iter().map( Ok ) ) ) )
  }

  #[ cfg( feature = "streaming" ) ]
  async fn chat_stream
  (
    &self,
    _model_id : &str,
    _messages : &[ Message ],
    _parameters : Option< &GenerateParams >,
    _options : Option< &ChatOptions >,
  ) -> api_genai::Result< std::pin::Pin< Box< dyn futures_util::Stream< Item = api_genai::StreamItem< api_genai::ChatStreamEvent > > + Send > > >
  {
    let frames = self.chat_stream_frames.lock().unwrap().take().unwrap_or_default();
    Ok( Box::pin( futures_util::stream::iter( frames.into_iter().map( Ok ) ) ) )
  }
}
