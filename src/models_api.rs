//! Thin `GET /models` façade, plus the declared (unimplemented) tune
//! lifecycle seam.
//!
//! Grounded on `Model.models` / `Model.available` / `Model.info` in the
//! reference client: none of these need batching, retry, or capacity
//! accounting, so they bypass the engines entirely.

mod private
{
  use crate::client::Transport;
  use crate::components::models::ModelCard;
  use crate::error::Result;
  use async_trait::async_trait;

  /// Read-only access to the service's model catalogue.
  #[ async_trait ]
  pub trait ModelsApi
  {
    /// Lists every model card the service currently exposes.
    async fn list_models( &self ) -> Result< Vec< ModelCard > >;

    /// `true` if `model_id` appears in the catalogue.
    async fn is_available( &self, model_id : &str ) -> Result< bool >
    {
      Ok( self.list_models().await?.iter().any( | m | m.id == model_id ) )
    }

    /// Looks up one model's card by id.
    async fn model_info( &self, model_id : &str ) -> Result< Option< ModelCard > >
    {
      Ok( self.list_models().await?.into_iter().find( | m | m.id == model_id ) )
    }
  }

  #[ async_trait ]
  impl< T > ModelsApi for T
  where
    T : Transport + Sync,
  {
    async fn list_models( &self ) -> Result< Vec< ModelCard > >
    {
      self.models().await.map_err( | e | crate::error::GenAiError::Server
      {
        status : e.status.as_u16(),
        body : e.body,
      }.into() )
    }
  }

  /// Seam for the tune-lifecycle collaborator (`tune`/`status`/`delete`/
  /// `download` in the reference client). The generation-execution core
  /// names this boundary but does not implement it — tune management is an
  /// external collaborator, out of scope here.
  #[ async_trait ]
  pub trait TuneManager
  {
    /// Starts a fine-tuning job and returns its identifier.
    async fn tune( &self, base_model_id : &str, training_data : &str ) -> Result< String >;

    /// Fetches the current status of a tune job.
    async fn status( &self, tune_id : &str ) -> Result< String >;

    /// Deletes a tune job and its artifacts.
    async fn delete( &self, tune_id : &str ) -> Result< () >;
  }
}

crate::mod_interface!
{
  exposed use
  {
    ModelsApi,
    TuneManager,
  };
}
