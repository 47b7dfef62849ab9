//! Request/response wire types for `POST /generate` and `POST /tokenize`.

mod private
{
  use serde::{ Deserialize, Serialize };
  use serde_with::skip_serializing_none;

  /// A single prompt submitted for generation.
  ///
  /// Opaque to the engine: batching, retry, and capacity accounting never
  /// inspect its contents.
  pub type Prompt = String;

  /// Decay applied to the penalty for repeated or long sequences.
  #[ derive( Debug, Clone, Copy, PartialEq, Serialize, Deserialize, former::Former ) ]
  pub struct LengthPenalty
  {
    /// Must be greater than `1.00` when present.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub decay_factor : Option< f64 >,
    /// Token index at which the penalty begins to apply.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub start_index : Option< u32 >,
  }

  /// Selects which optional fields the service should echo back per result.
  #[ derive( Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, former::Former ) ]
  pub struct ReturnOptions
  {
    /// Echo the original prompt text back in the result.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub input_text : Option< bool >,
    /// Return the generated token list, not just the concatenated text.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub generated_tokens : Option< bool >,
    /// Return the tokenized input.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub input_tokens : Option< bool >,
    /// Return per-token log probabilities.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub token_logprobs : Option< bool >,
    /// Return per-token rank among candidates.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub token_ranks : Option< bool >,
    /// Number of top alternative tokens to return per position.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub top_n_tokens : Option< u32 >,
  }

  /// One moderation detector's threshold/input/output configuration.
  #[ derive( Debug, Clone, Copy, PartialEq, Serialize, Deserialize, former::Former ) ]
  pub struct ModerationTypeOptions
  {
    /// Run the detector against the input prompt.
    pub input : bool,
    /// Run the detector against the generated output.
    pub output : bool,
    /// Score threshold in `[0, 1]`, quantized to `0.01`.
    pub threshold : f64,
  }

  impl Default for ModerationTypeOptions
  {
    #[ inline ]
    fn default() -> Self
    {
      Self { input : true, output : true, threshold : 0.75 }
    }
  }

  /// Either "use the detector's defaults" or a full configuration.
  #[ derive( Debug, Clone, Copy, PartialEq, Serialize, Deserialize ) ]
  #[ serde( untagged ) ]
  pub enum ModerationSwitch
  {
    /// `false` disables the detector, `true` enables it with defaults.
    Enabled( bool ),
    /// Full per-field configuration.
    Configured( ModerationTypeOptions ),
  }

  impl Default for ModerationSwitch
  {
    #[ inline ]
    fn default() -> Self
    {
      Self::Enabled( false )
    }
  }

  /// Hate/abuse/profanity, stigma, and implicit-hate detector configuration.
  #[ derive( Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, former::Former ) ]
  pub struct ModerationsOptions
  {
    /// Hate/abuse/profanity detector.
    #[ serde( default ) ]
    pub hap : ModerationSwitch,
    /// Stigmatizing-language detector.
    #[ serde( default ) ]
    pub stigma : ModerationSwitch,
    /// Implicit-hate detector.
    #[ serde( default ) ]
    pub implicit_hate : ModerationSwitch,
  }

  /// Generation parameters sent alongside prompts to `POST /generate`.
  ///
  /// Every field is optional; omitted fields fall back to the service's or
  /// model's defaults. Constructed with [`former`][GenerateParams::former],
  /// e.g. `GenerateParams::former().temperature( 0.7 ).max_new_tokens( 200 ).form()`.
  #[ skip_serializing_none ]
  #[ derive( Debug, Clone, Default, PartialEq, Serialize, Deserialize, former::Former ) ]
  pub struct GenerateParams
  {
    /// `"greedy"` or `"sample"`.
    pub decoding_method : Option< String >,
    /// Penalty applied to repeated/long sequences.
    pub length_penalty : Option< LengthPenalty >,
    /// Must be `>= 1` when present.
    pub max_new_tokens : Option< u32 >,
    /// Must be `>= 0` when present.
    pub min_new_tokens : Option< u32 >,
    /// Must be `>= 1` when present.
    pub random_seed : Option< u64 >,
    /// Non-empty list of sequences that terminate generation.
    pub stop_sequences : Option< Vec< String > >,
    /// Requests a streamed response from the service.
    pub stream : Option< bool >,
    /// Must be in `[0.05, 2.00]` when present.
    pub temperature : Option< f64 >,
    /// Wall-clock time limit for the request, in milliseconds.
    pub time_limit : Option< u64 >,
    /// Must be `>= 1` when present.
    pub top_k : Option< u32 >,
    /// Must be in `[0.00, 1.00]` when present.
    pub top_p : Option< f64 >,
    /// Must be in `(0.00, 1.00]` when present.
    pub typical_p : Option< f64 >,
    /// Must be in `[1.00, 2.00]`, quantized to `0.01`, when present.
    pub repetition_penalty : Option< f64 >,
    /// Must be `>= 0` when present.
    pub truncate_input_tokens : Option< u32 >,
    /// Must be `>= 0` when present.
    pub beam_width : Option< u32 >,
    /// Fields the service should echo back per result.
    ///
    /// The service's deprecated `return` alias is never emitted on the wire;
    /// set this field directly, or via the deprecated
    /// [`with_deprecated_return`][GenerateParams::with_deprecated_return]
    /// shim kept for callers migrating off the old name.
    pub return_options : Option< ReturnOptions >,
    /// Moderation detector configuration.
    pub moderations : Option< ModerationsOptions >,
    /// Include the matched stop sequence in the generated text.
    pub include_stop_sequence : Option< bool >,
  }

  impl GenerateParams
  {
    /// Sets `return_options` from the service's deprecated `return` name.
    #[ deprecated( note = "use `return_options` (or `.return_options(..)` on the former builder)" ) ]
    #[ must_use ]
    #[ inline ]
    pub fn with_deprecated_return( mut self, options : ReturnOptions ) -> Self
    {
      self.return_options = Some( options );
      self
    }
  }

  /// Parameters for `POST /tokenize`.
  #[ skip_serializing_none ]
  #[ derive( Debug, Clone, Default, PartialEq, Serialize, Deserialize, former::Former ) ]
  pub struct TokenParams
  {
    /// Return the tokenized input alongside the count.
    pub return_tokens : Option< bool >,
    /// Truncate the input to at most this many tokens before counting.
    pub truncate_input_tokens : Option< u32 >,
  }

  /// One prompt's generation result.
  #[ derive( Debug, Clone, PartialEq, Serialize, Deserialize ) ]
  pub struct GenerateResult
  {
    /// Echo of the prompt that produced this result, injected by the engine
    /// (the service itself does not echo it back unless requested).
    pub input_text : String,
    /// Concatenated generated text.
    pub generated_text : String,
    /// Number of tokens generated.
    #[ serde( default ) ]
    pub generated_token_count : u32,
    /// Number of tokens in the input.
    #[ serde( default ) ]
    pub input_token_count : u32,
    /// Why generation stopped (e.g. `"max_tokens"`, `"stop_sequence"`, `"eos_token"`).
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub stop_reason : Option< String >,
    /// Seed actually used for sampling, echoed back when the service reports one.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub seed : Option< u64 >,
    /// Moderation verdict, present when `moderations` was requested.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub moderation : Option< ModerationsOptions >,
  }

  /// Count of tokens in one tokenized prompt.
  #[ derive( Debug, Clone, PartialEq, Serialize, Deserialize ) ]
  pub struct TokenizeResult
  {
    /// Token count.
    pub token_count : u32,
    /// Tokenized input, present only if `return_tokens` was requested.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub tokens : Option< Vec< String > >,
  }

}

crate::mod_interface!
{
  exposed use
  {
    Prompt,
    LengthPenalty,
    ReturnOptions,
    ModerationTypeOptions,
    ModerationSwitch,
    ModerationsOptions,
    GenerateParams,
    TokenParams,
    GenerateResult,
    TokenizeResult,
  };
}
