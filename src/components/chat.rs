//! Request/response wire types for `POST /chat`.

mod private
{
  use serde::{ Deserialize, Serialize };

  /// Who a chat message's `content` is attributed to.
  #[ derive( Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize ) ]
  #[ serde( rename_all = "lowercase" ) ]
  pub enum Role
  {
    /// System-level instruction shaping the assistant's behavior.
    System,
    /// A turn authored by the caller.
    User,
    /// A turn authored by the model.
    Assistant,
  }

  /// One role-tagged turn in a multi-turn conversation sent to `POST /chat`.
  #[ derive( Debug, Clone, PartialEq, Serialize, Deserialize ) ]
  pub struct Message
  {
    /// Who this turn is attributed to.
    pub role : Role,
    /// Turn text.
    pub content : String,
  }

  impl Message
  {
    /// Builds a `system` turn.
    #[ inline ]
    #[ must_use ]
    pub fn system( content : impl Into< String > ) -> Self
    {
      Self { role : Role::System, content : content.into() }
    }

    /// Builds a `user` turn.
    #[ inline ]
    #[ must_use ]
    pub fn user( content : impl Into< String > ) -> Self
    {
      Self { role : Role::User, content : content.into() }
    }

    /// Builds an `assistant` turn.
    #[ inline ]
    #[ must_use ]
    pub fn assistant( content : impl Into< String > ) -> Self
    {
      Self { role : Role::Assistant, content : content.into() }
    }
  }

  /// Conversation-threading options for `POST /chat`.
  #[ derive( Debug, Clone, Default, PartialEq, Serialize, Deserialize, former::Former ) ]
  pub struct ChatOptions
  {
    /// Continues an existing conversation when present.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub conversation_id : Option< String >,
    /// Parent turn within the conversation this message replies to.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub parent_id : Option< String >,
    /// Identifier of a server-side stored prompt template.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub prompt_id : Option< String >,
    /// Identifier of a server-side stored prompt-building template.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub template_id : Option< String >,
    /// Re-applies the generation parameters stored on the conversation.
    #[ serde( default ) ]
    pub use_conversation_parameters : bool,
  }

  /// One turn of a chat result.
  #[ derive( Debug, Clone, PartialEq, Serialize, Deserialize ) ]
  pub struct ChatResult
  {
    /// Conversation this turn belongs to.
    pub conversation_id : String,
    /// Generated text for this turn.
    pub generated_text : String,
    /// Why generation stopped.
    #[ serde( skip_serializing_if = "Option::is_none" ) ]
    pub stop_reason : Option< String >,
  }
}

crate::mod_interface!
{
  exposed use
  {
    Role,
    Message,
    ChatOptions,
    ChatResult,
  };
}
