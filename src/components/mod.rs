//! Wire types exchanged with the generation service.

mod private {}

crate::mod_interface!
{
  /// Request/response shapes for `POST /generate` and `POST /tokenize`.
  layer generate;

  /// Request/response shapes for `POST /chat`.
  layer chat;

  /// Capacity-gate snapshot shape (`GET /generate/limits`).
  layer capacity;

  /// `GET /models` shapes.
  layer models;

  /// Server-Sent Events frame shapes for streaming endpoints.
  #[ cfg( feature = "streaming" ) ]
  layer streaming;
}
