//! Concurrency-limited, capacity-gated, retrying generation dispatch.
//!
//! Grounded on `BatchProcessor::process_batch_with_progress` in the
//! teacher's `api_xai::batch_operations`: a `Semaphore` bounds in-flight
//! sub-batches, one task per sub-batch, a callback observes every result.
//! Generalized here with ordered/unordered delivery and a capacity gate,
//! matching `Model.generate_async` / `AsyncResponseGenerator` in the
//! reference client.

mod private
{
  use crate::batcher::Batcher;
  use crate::capacity_gate::CapacityGate;
  use crate::client::Transport;
  use crate::components::generate::{ GenerateParams, GenerateResult, Prompt, TokenParams, TokenizeResult };
  use crate::constants::{ DEFAULT_CONCURRENCY_LIMIT, MAX_RETRIES_GENERATE, MAX_RETRIES_TOKENIZE };
  use crate::error::{ GenAiError, Result };
  use crate::retry::RetryPolicy;
  use futures_core::stream::Stream;
  use std::collections::HashMap;
  use std::sync::Arc;
  use tokio::sync::Semaphore;
  use tokio::task::JoinSet;

  /// Per-result callback invoked synchronously before the engine yields
  /// (or, for a failed prompt under `throw_on_error == false`, in place of
  /// yielding it).
  pub type AsyncCallback = Arc< dyn Fn( usize, &Result< GenerateResult > ) + Send + Sync >;

  /// Per-result callback for [`tokenize_async`]; same contract as
  /// [`AsyncCallback`].
  pub type TokenizeAsyncCallback = Arc< dyn Fn( usize, &Result< TokenizeResult > ) + Send + Sync >;

  /// Tuning knobs for [`generate_async`].
  #[ derive( Clone ) ]
  pub struct AsyncOptions
  {
    /// Maximum number of sub-batches dispatched concurrently.
    pub max_concurrency_limit : usize,
    /// `true` delivers results in prompt order; `false` delivers as each
    /// sub-batch completes.
    pub ordered : bool,
    /// `true` aborts all outstanding work and propagates the first error;
    /// `false` omits failed prompts from the output (the "absent
    /// sentinel") and continues with the remaining sub-batches.
    pub throw_on_error : bool,
    /// Observes every result (success or failure) before it is yielded or
    /// dropped.
    pub callback : Option< AsyncCallback >,
  }

  impl Default for AsyncOptions
  {
    #[ inline ]
    fn default() -> Self
    {
      Self
      {
        max_concurrency_limit : DEFAULT_CONCURRENCY_LIMIT,
        ordered : true,
        throw_on_error : true,
        callback : None,
      }
    }
  }

  /// Tuning knobs for [`tokenize_async`]; same contract as [`AsyncOptions`]
  /// but tokenization is not capacity-gated in the reference client.
  #[ derive( Clone ) ]
  pub struct TokenizeAsyncOptions
  {
    /// Maximum number of sub-batches dispatched concurrently.
    pub max_concurrency_limit : usize,
    /// `true` delivers results in prompt order; `false` delivers as each
    /// sub-batch completes.
    pub ordered : bool,
    /// `true` aborts all outstanding work and propagates the first error;
    /// `false` omits failed prompts from the output (the "absent
    /// sentinel") and continues with the remaining sub-batches.
    pub throw_on_error : bool,
    /// Observes every result (success or failure) before it is yielded or
    /// dropped.
    pub callback : Option< TokenizeAsyncCallback >,
  }

  impl Default for TokenizeAsyncOptions
  {
    #[ inline ]
    fn default() -> Self
    {
      Self
      {
        max_concurrency_limit : DEFAULT_CONCURRENCY_LIMIT,
        ordered : true,
        throw_on_error : true,
        callback : None,
      }
    }
  }

  type BatchOutcome = ( usize, Vec< Prompt >, core::result::Result< Vec< GenerateResult >, GenAiError > );
  type TokenizeBatchOutcome = ( usize, usize, core::result::Result< Vec< TokenizeResult >, GenAiError > );

  /// Dispatches `generate` over every prompt with up to
  /// `options.max_concurrency_limit` sub-batches in flight at once.
  ///
  /// Dropping the returned stream before it is exhausted drops the
  /// [`JoinSet`] driving the dispatch, cancelling every outstanding
  /// sub-batch: pending sleeps are interrupted, in-flight requests are
  /// aborted, and semaphore permits are released as the aborted tasks
  /// unwind.
  pub fn generate_async< T >
  (
    transport : Arc< T >,
    model_id : impl Into< String >,
    prompts : Vec< Prompt >,
    parameters : Option< GenerateParams >,
    options : AsyncOptions,
  ) -> impl Stream< Item = Result< Option< GenerateResult > > >
  where
    T : Transport + 'static,
  {
    let model_id = Arc::< str >::from( model_id.into() );
    let parameters = parameters.map( Arc::new );

    async_stream::try_stream!
    {
      let batches = Batcher::new().batch_owned( prompts );
      let total_batches = batches.len();
      let semaphore = Arc::new( Semaphore::new( options.max_concurrency_limit.max( 1 ) ) );
      let gate = Arc::new( CapacityGate::new() );
      let ( tx, mut rx ) = tokio::sync::mpsc::unbounded_channel::< BatchOutcome >();
      let mut join_set = JoinSet::new();

      for ( batch_idx, batch ) in batches.into_iter().enumerate()
      {
        let transport = Arc::clone( &transport );
        let model_id = Arc::clone( &model_id );
        let parameters = parameters.clone();
        let semaphore = Arc::clone( &semaphore );
        let gate = Arc::clone( &gate );
        let tx = tx.clone();

        join_set.spawn( async move
        {
          let Ok( _permit ) = semaphore.acquire().await else { return };
          let retry = RetryPolicy::new();
          let want = u32::try_from( batch.len() ).unwrap_or( u32::MAX );
          if gate.take( transport.as_ref(), want ).await.is_err()
          {
            return;
          }

          let mut attempt = 0_u32;
          let outcome = loop
          {
            match transport.generate( &model_id, &batch, parameters.as_deref() ).await
            {
              Ok( results ) => break Ok( results ),
              Err( e ) if retry.is_retryable( e.status ) && attempt < MAX_RETRIES_GENERATE =>
              {
                gate.force_exhausted();
                tokio::time::sleep( retry.backoff( attempt ) ).await;
                attempt += 1;
              }
              Err( e ) if retry.is_retryable( e.status ) =>
              {
                break Err( GenAiError::RateLimited { attempts : attempt, message : e.body } );
              }
              Err( e ) =>
              {
                break Err( GenAiError::Server { status : e.status.as_u16(), body : e.body } );
              }
            }
          };

          let _ = tx.send( ( batch_idx, batch, outcome ) );
        } );
      }
      drop( tx );

      let mut pending : HashMap< usize, BatchOutcome > = HashMap::new();
      let mut next_batch = 0_usize;
      let mut next_prompt_index = 0_usize;
      let _ = total_batches;

      while let Some( outcome ) = rx.recv().await
      {
        let mut ready_batches = Vec::new();
        if options.ordered
        {
          let batch_idx = outcome.0;
          pending.insert( batch_idx, outcome );
          while let Some( ready ) = pending.remove( &next_batch )
          {
            next_batch += 1;
            ready_batches.push( ready );
          }
        }
        else
        {
          ready_batches.push( outcome );
        }

        for ( _batch_idx, prompts, result ) in ready_batches
        {
          match result
          {
            Ok( mut results ) =>
            {
              for ( input, result ) in prompts.into_iter().zip( results.iter_mut() )
              {
                result.input_text = input;
              }
              for result in results
              {
                let idx = next_prompt_index;
                next_prompt_index += 1;
                if let Some( cb ) = &options.callback
                {
                  cb( idx, &Ok( result.clone() ) );
                }
                yield Some( result );
              }
            }
            Err( e ) =>
            {
              for _ in &prompts
              {
                let idx = next_prompt_index;
                next_prompt_index += 1;
                if let Some( cb ) = &options.callback
                {
                  cb( idx, &Err( e.clone().into() ) );
                }
                if !options.throw_on_error
                {
                  tracing::warn!( prompt_index = idx, error = %e, "prompt failed, omitted from output" );
                  yield None;
                }
              }
              if options.throw_on_error
              {
                join_set.abort_all();
                Err( e )?;
              }
            }
          }
        }
      }
    }
  }

  /// Dispatches `tokenize` over every prompt with up to
  /// `options.max_concurrency_limit` sub-batches in flight at once.
  ///
  /// Not capacity-gated: the reference client does not count tokenization
  /// against the generation token budget. Dropping the returned stream
  /// before it is exhausted cancels every outstanding sub-batch, as in
  /// [`generate_async`].
  pub fn tokenize_async< T >
  (
    transport : Arc< T >,
    model_id : impl Into< String >,
    prompts : Vec< Prompt >,
    parameters : Option< TokenParams >,
    options : TokenizeAsyncOptions,
  ) -> impl Stream< Item = Result< Option< TokenizeResult > > >
  where
    T : Transport + 'static,
  {
    let model_id = Arc::< str >::from( model_id.into() );
    let parameters = parameters.map( Arc::new );

    async_stream::try_stream!
    {
      let batches = Batcher::new().batch_owned( prompts );
      let semaphore = Arc::new( Semaphore::new( options.max_concurrency_limit.max( 1 ) ) );
      let ( tx, mut rx ) = tokio::sync::mpsc::unbounded_channel::< TokenizeBatchOutcome >();
      let mut join_set = JoinSet::new();

      for ( batch_idx, batch ) in batches.into_iter().enumerate()
      {
        let transport = Arc::clone( &transport );
        let model_id = Arc::clone( &model_id );
        let parameters = parameters.clone();
        let semaphore = Arc::clone( &semaphore );
        let tx = tx.clone();
        let batch_len = batch.len();

        join_set.spawn( async move
        {
          let Ok( _permit ) = semaphore.acquire().await else { return };
          let retry = RetryPolicy::new();

          let mut attempt = 0_u32;
          let outcome = loop
          {
            match transport.tokenize( &model_id, &batch, parameters.as_deref() ).await
            {
              Ok( results ) => break Ok( results ),
              Err( e ) if retry.is_retryable( e.status ) && attempt < MAX_RETRIES_TOKENIZE =>
              {
                tokio::time::sleep( retry.backoff( attempt ) ).await;
                attempt += 1;
              }
              Err( e ) if retry.is_retryable( e.status ) =>
              {
                break Err( GenAiError::RateLimited { attempts : attempt, message : e.body } );
              }
              Err( e ) =>
              {
                break Err( GenAiError::Server { status : e.status.as_u16(), body : e.body } );
              }
            }
          };

          let _ = tx.send( ( batch_idx, batch_len, outcome ) );
        } );
      }
      drop( tx );

      let mut pending : HashMap< usize, TokenizeBatchOutcome > = HashMap::new();
      let mut next_batch = 0_usize;
      let mut next_prompt_index = 0_usize;

      while let Some( outcome ) = rx.recv().await
      {
        let mut ready_batches = Vec::new();
        if options.ordered
        {
          let batch_idx = outcome.0;
          pending.insert( batch_idx, outcome );
          while let Some( ready ) = pending.remove( &next_batch )
          {
            next_batch += 1;
            ready_batches.push( ready );
          }
        }
        else
        {
          ready_batches.push( outcome );
        }

        for ( _batch_idx, batch_len, result ) in ready_batches
        {
          match result
          {
            Ok( results ) =>
            {
              for result in results
              {
                let idx = next_prompt_index;
                next_prompt_index += 1;
                if let Some( cb ) = &options.callback
                {
                  cb( idx, &Ok( result.clone() ) );
                }
                yield Some( result );
              }
            }
            Err( e ) =>
            {
              for _ in 0 .. batch_len
              {
                let idx = next_prompt_index;
                next_prompt_index += 1;
                if let Some( cb ) = &options.callback
                {
                  cb( idx, &Err( e.clone().into() ) );
                }
                if !options.throw_on_error
                {
                  tracing::warn!( prompt_index = idx, error = %e, "prompt failed, omitted from output" );
                  yield None;
                }
              }
              if options.throw_on_error
              {
                join_set.abort_all();
                Err( e )?;
              }
            }
          }
        }
      }
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    AsyncCallback,
    AsyncOptions,
    generate_async,
    TokenizeAsyncCallback,
    TokenizeAsyncOptions,
    tokenize_async,
  };
}
