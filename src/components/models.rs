//! `GET /models` wire shapes.

mod private
{
  use serde::Deserialize;

  /// Metadata about one model the service can generate with.
  #[ derive( Debug, Clone, PartialEq, Deserialize ) ]
  pub struct ModelCard
  {
    /// Model identifier, as passed to `model_id` on generate/chat requests.
    pub id : String,
    /// Human-readable display name.
    pub name : String,
    /// Parameter count or size class, as reported by the service.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub size : Option< String >,
    /// Maximum context window, in tokens.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub token_limit : Option< u32 >,
  }

}

crate::mod_interface!
{
  exposed use
  {
    ModelCard,
  };
}
