//! `GET /generate/limits` wire shape.

mod private
{
  use serde::Deserialize;

  /// A point-in-time snapshot of the caller's generation token budget.
  #[ derive( Debug, Clone, Copy, PartialEq, Deserialize ) ]
  #[ serde( rename_all = "camelCase" ) ]
  pub struct CapacitySnapshot
  {
    /// Total token budget for the current window.
    pub token_capacity : u32,
    /// Tokens already consumed within the current window.
    pub tokens_used : u32,
  }

  impl CapacitySnapshot
  {
    /// Tokens still available in the current window.
    #[ inline ]
    #[ must_use ]
    pub fn remaining( &self ) -> u32
    {
      self.token_capacity.saturating_sub( self.tokens_used )
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    CapacitySnapshot,
  };
}
