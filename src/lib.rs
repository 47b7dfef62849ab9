//! Generation-execution client for large language model services.
//!
//! Provides the capacity-gated, batched, retrying engine underneath
//! synchronous, concurrency-limited asynchronous, and Server-Sent-Events
//! streaming generation, alongside tokenization, chat, and model-catalogue
//! access. Follows the "Thin Client, Rich API" principle used across this
//! workspace: every public method maps to one remote operation, with
//! explicit caller control over batching, concurrency, and delivery order.
//!
//! # Features
//!
//! - `enabled` — activates all public types and the HTTP transport
//! - `streaming` — Server-Sent Events demultiplexing for `generate_stream`
//!   / `chat_stream`
//! - `sync_api` — blocking wrapper around the async engines
//! - `integration` — runs tests against a live hosted service (requires
//!   credentials)
//! - `full` — enables `enabled`, `streaming`, and `sync_api` (default)
//!
//! # Example
//!
//! ```no_run
//! # #[ cfg( feature = "enabled" ) ]
//! # {
//! use api_genai::{ EnvironmentImpl, GenerateParams, Model };
//!
//! # async fn example() -> Result< (), Box< dyn std::error::Error > > {
//! let env = EnvironmentImpl::new( "api-key" )?;
//! let model = Model::new( "my-model", env )?;
//! let results = model.generate( vec![ "Hello".to_owned() ], None ).await?;
//! for result in results
//! {
//!   println!( "{}", result.generated_text );
//! }
//! # Ok( () )
//! # }
//! # }
//! ```

#[ cfg( feature = "enabled" ) ]
use mod_interface::mod_interface;

mod private {}

#[ cfg( feature = "enabled" ) ]
crate::mod_interface!
{
  /// Error type and result alias.
  layer error;

  /// Environment configuration trait and default implementation.
  layer environment;

  /// Tunable constants shared by the batcher, retry policy, and engines.
  layer constants;

  /// Wire types exchanged with the generation service.
  layer components;

  /// `Transport` capability trait and its `reqwest`-backed implementation.
  layer client;

  /// Retry classification and backoff timing for `429` responses.
  layer retry;

  /// Local token-budget accounting.
  layer capacity_gate;

  /// Order-preserving sub-batch slicing.
  layer batcher;

  /// Projects raw SSE frames into caller-facing streaming results.
  #[ cfg( feature = "streaming" ) ]
  layer sse_demux;

  /// Serial, capacity-gated, retrying generation and tokenization.
  layer sync_engine;

  /// Concurrency-limited, capacity-gated, retrying generation dispatch.
  layer async_engine;

  /// Serial SSE-backed streaming for `generate_stream` / `chat_stream`.
  #[ cfg( feature = "streaming" ) ]
  layer stream_engine;

  /// Capability trait for one-shot and batch text generation.
  layer generator;

  /// Model-catalogue access and the tune-lifecycle seam.
  layer models_api;

  /// The crate's public entry point.
  layer model;

  /// Blocking wrapper around the async engines.
  #[ cfg( feature = "sync_api" ) ]
  layer sync_client;
}
