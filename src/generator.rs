//! `TextGenerator`: a small capability surface for callers that just want
//! text back, without constructing `GenerateParams` themselves.
//!
//! Grounded on `GenaiAgent._generate` in the reference client
//! (`genai.extensions.huggingface.agent`): a stop sequence is applied
//! **both** ways — passed to the service via `stop_sequences` *and*
//! enforced again client-side by truncating the returned text at the first
//! matching sequence, since the service does not guarantee it honours
//! `stop_sequences` exactly.

mod private
{
  use crate::components::generate::Prompt;
  use crate::error::Result;
  use async_trait::async_trait;

  /// One-shot and batch text generation with client-side stop-sequence
  /// enforcement.
  ///
  /// Implemented by [`crate::Model`], which supplies the model id and
  /// transport this trait's default-free methods need.
  #[ async_trait ]
  pub trait TextGenerator
  {
    /// Generates text for a single prompt, truncating at the first
    /// matching entry of `stop` if any is found in the output.
    async fn generate_one( &self, prompt : Prompt, stop : &[ String ] ) -> Result< String >;

    /// Generates text for every prompt, in order, each truncated the same
    /// way as [`generate_one`][TextGenerator::generate_one].
    async fn generate_many( &self, prompts : Vec< Prompt >, stop : &[ String ] ) -> Result< Vec< String > >;
  }

  /// Truncates `text` at the earliest occurrence of any sequence in
  /// `stop`, matching `enforce_stop_tokens` in the reference client.
  #[ must_use ]
  pub fn enforce_stop_sequences( text : &str, stop : &[ String ] ) -> String
  {
    stop
      .iter()
      .filter( | seq | !seq.is_empty() )
      .filter_map( | seq | text.find( seq.as_str() ) )
      .min()
      .map_or_else( || text.to_owned(), | at | text[ ..at ].to_owned() )
  }
}

crate::mod_interface!
{
  exposed use
  {
    TextGenerator,
    enforce_stop_sequences,
  };
}
