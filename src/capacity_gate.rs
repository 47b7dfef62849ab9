//! Local token-budget accounting backed by periodic refresh from the
//! service.

mod private
{
  use crate::client::Transport;
  use crate::constants::CAPACITY_POLL_INTERVAL_SECS;
  use crate::error::Result;
  use core::sync::atomic::{ AtomicU32, Ordering };

  /// Tracks a local estimate of the caller's remaining generation budget.
  ///
  /// The estimate is decremented optimistically before each sub-batch is
  /// dispatched and refreshed from `GET /generate/limits` whenever it hits
  /// zero or a `429` is observed, matching the reference client's
  /// `remaining_limit` bookkeeping.
  #[ derive( Debug ) ]
  pub struct CapacityGate
  {
    remaining : AtomicU32,
  }

  impl CapacityGate
  {
    /// Starts the gate already exhausted, forcing an initial refresh.
    #[ inline ]
    #[ must_use ]
    pub fn new() -> Self
    {
      Self { remaining : AtomicU32::new( 0 ) }
    }

    /// Current local estimate, without refreshing.
    #[ inline ]
    pub fn remaining( &self ) -> u32
    {
      self.remaining.load( Ordering::Acquire )
    }

    /// Marks the budget exhausted, e.g. after observing a `429`.
    #[ inline ]
    pub fn force_exhausted( &self )
    {
      self.remaining.store( 0, Ordering::Release );
    }

    /// Reserves up to `want` units of budget, refreshing from the service
    /// first if the local estimate is zero, busy-waiting at
    /// `CAPACITY_POLL_INTERVAL_SECS` cadence while the service itself
    /// reports zero remaining.
    ///
    /// Returns the number of units actually reserved, which is `<= want`.
    pub async fn take< T : Transport + ?Sized >( &self, transport : &T, want : u32 ) -> Result< u32 >
    {
      loop
      {
        if self.remaining.load( Ordering::Acquire ) == 0
        {
          let snapshot = transport.capacity().await.map_err( | e | crate::error::GenAiError::Server
          {
            status : e.status.as_u16(),
            body : e.body,
          } )?;
          if snapshot.remaining() == 0
          {
            tokio::time::sleep( core::time::Duration::from_secs( CAPACITY_POLL_INTERVAL_SECS ) ).await;
            continue;
          }
          self.remaining.store( snapshot.remaining(), Ordering::Release );
        }

        let reserved = self.remaining.fetch_update
        (
          Ordering::AcqRel,
          Ordering::Acquire,
          | current | Some( current.saturating_sub( current.min( want ) ) ),
        );
        if let Ok( previous ) = reserved
        {
          return Ok( previous.min( want ) );
        }
      }
    }
  }

  impl Default for CapacityGate
  {
    #[ inline ]
    fn default() -> Self
    {
      Self::new()
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    CapacityGate,
  };
}
