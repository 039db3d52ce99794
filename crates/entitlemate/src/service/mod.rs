//! Shared catalog for the web surface.
//!
//! The fetch runs with no lock held: a reload takes the write lock only to
//! start a generation and again to fold the outcome in, so readers keep
//! rendering the previous state while the request is in flight.

mod router;

pub use router::catalog_router;

use crate::loader::EntitlementSource;
use crate::session::{CatalogState, Transition};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::info;

pub struct CatalogService<S> {
    source: S,
    state: RwLock<CatalogState>,
}

impl<S> CatalogService<S>
where
    S: EntitlementSource,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RwLock::new(CatalogState::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs one load and applies it unless a newer reload started meanwhile.
    pub async fn reload(&self) -> Transition {
        let generation = self.state.write().await.begin_load();
        info!(source = %self.source.describe(), generation, "loading entitlements");

        let outcome = self.source.fetch().await;
        let records = outcome.as_ref().map(Vec::len).ok();

        let transition = self.state.write().await.complete_load(generation, outcome);
        if transition == Transition::Applied {
            if let Some(records) = records {
                info!(generation, records, "entitlement catalog refreshed");
            }
        }
        transition
    }

    pub async fn state(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().await
    }
}
