//! Serial, capacity-gated, retrying generation and tokenization.
//!
//! One sub-batch in flight at a time; the caller receives results as each
//! sub-batch completes rather than waiting for the whole prompt list,
//! mirroring `Model.generate_as_completed` in the reference client.

mod private
{
  use crate::batcher::Batcher;
  use crate::capacity_gate::CapacityGate;
  use crate::client::Transport;
  use crate::components::generate::{ GenerateParams, GenerateResult, Prompt, TokenParams, TokenizeResult };
  use crate::constants::{ MAX_RETRIES_GENERATE, MAX_RETRIES_TOKENIZE };
  use crate::error::{ GenAiError, Result };
  use crate::retry::RetryPolicy;
  use futures_core::stream::Stream;

  /// Runs `generate` over every prompt, capacity-gated and retrying `429`s,
  /// yielding one [`GenerateResult`] at a time in prompt order.
  #[ must_use ]
  pub fn generate_as_completed< 'a, T >
  (
    transport : &'a T,
    model_id : &'a str,
    prompts : Vec< Prompt >,
    parameters : Option< &'a GenerateParams >,
  ) -> impl Stream< Item = Result< GenerateResult > > + 'a
  where
    T : Transport + ?Sized,
  {
    async_stream::try_stream!
    {
      let gate = CapacityGate::new();
      let retry = RetryPolicy::new();
      let batches = Batcher::new().batch_owned( prompts );

      for batch in batches
      {
        let want = u32::try_from( batch.len() ).unwrap_or( u32::MAX );
        gate.take( transport, want ).await?;

        let mut attempt = 0_u32;
        loop
        {
          match transport.generate( model_id, &batch, parameters ).await
          {
            Ok( results ) =>
            {
              for ( input, mut result ) in batch.iter().cloned().zip( results )
              {
                result.input_text = input;
                yield result;
              }
              break;
            }
            Err( e ) if retry.is_retryable( e.status ) && attempt < MAX_RETRIES_GENERATE =>
            {
              gate.force_exhausted();
              tokio::time::sleep( retry.backoff( attempt ) ).await;
              attempt += 1;
            }
            Err( e ) if retry.is_retryable( e.status ) =>
            {
              Err( GenAiError::RateLimited { attempts : attempt, message : e.body } )?;
            }
            Err( e ) =>
            {
              Err( GenAiError::Server { status : e.status.as_u16(), body : e.body } )?;
            }
          }
        }
      }
    }
  }

  /// Runs `tokenize` over every prompt, retrying `429`s (tokenization is
  /// not capacity-gated in the reference client).
  #[ must_use ]
  pub fn tokenize_as_completed< 'a, T >
  (
    transport : &'a T,
    model_id : &'a str,
    prompts : Vec< Prompt >,
    parameters : Option< &'a TokenParams >,
  ) -> impl Stream< Item = Result< TokenizeResult > > + 'a
  where
    T : Transport + ?Sized,
  {
    async_stream::try_stream!
    {
      let retry = RetryPolicy::new();
      let batches = crate::batcher::Batcher::new().batch_owned( prompts );

      for batch in batches
      {
        let mut attempt = 0_u32;
        loop
        {
          match transport.tokenize( model_id, &batch, parameters ).await
          {
            Ok( results ) =>
            {
              for result in results
              {
                yield result;
              }
              break;
            }
            Err( e ) if retry.is_retryable( e.status ) && attempt < MAX_RETRIES_TOKENIZE =>
            {
              tokio::time::sleep( retry.backoff( attempt ) ).await;
              attempt += 1;
            }
            Err( e ) if retry.is_retryable( e.status ) =>
            {
              Err( GenAiError::RateLimited { attempts : attempt, message : e.body } )?;
            }
            Err( e ) =>
            {
              Err( GenAiError::Server { status : e.status.as_u16(), body : e.body } )?;
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
    generate_as_completed,
    tokenize_as_completed,
  };
}
