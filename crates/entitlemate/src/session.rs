//! Catalog state for one viewing session.
//!
//! All mutation goes through [`CatalogState::apply`]. Every load carries the
//! generation handed out when it started; completions from an older
//! generation are discarded so an overlapping reload can never be overwritten
//! by a slower, staler response.

use crate::catalog::EntitlementRecord;
use crate::filters::{filter_records, Facet, FacetOptions, FilterSelection};
use crate::loader::{EntitlementSource, FetchError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
pub enum CatalogEvent {
    LoadStarted,
    LoadSucceeded {
        generation: u64,
        records: Vec<EntitlementRecord>,
    },
    LoadFailed {
        generation: u64,
        message: String,
    },
    FacetToggled {
        facet: Facet,
        value: String,
    },
    FacetSet {
        facet: Facet,
        value: Option<String>,
    },
    FacetCleared(Facet),
    SelectionCleared,
    SelectionReplaced(FilterSelection),
}

/// Result of applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// A load completion whose generation has been superseded.
    Stale,
}

#[derive(Debug, Clone)]
pub struct CatalogState {
    records: Vec<EntitlementRecord>,
    load_status: LoadStatus,
    error_message: Option<String>,
    selection: FilterSelection,
    generation: u64,
    loaded_at: Option<DateTime<Utc>>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            load_status: LoadStatus::Idle,
            error_message: None,
            selection: FilterSelection::default(),
            generation: 0,
            loaded_at: None,
        }
    }
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: CatalogEvent) -> Transition {
        match event {
            CatalogEvent::LoadStarted => {
                self.generation += 1;
                self.load_status = LoadStatus::Loading;
                self.error_message = None;
            }
            CatalogEvent::LoadSucceeded {
                generation,
                records,
            } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "discarding stale load");
                    return Transition::Stale;
                }
                self.records = records;
                self.load_status = LoadStatus::Loaded;
                self.error_message = None;
                self.loaded_at = Some(Utc::now());
            }
            CatalogEvent::LoadFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "discarding stale failure");
                    return Transition::Stale;
                }
                self.records.clear();
                self.load_status = LoadStatus::Failed;
                self.error_message = Some(message);
                self.loaded_at = None;
            }
            CatalogEvent::FacetToggled { facet, value } => self.selection.toggle(facet, &value),
            CatalogEvent::FacetSet { facet, value } => self.selection.set(facet, value.as_deref()),
            CatalogEvent::FacetCleared(facet) => self.selection.clear(facet),
            CatalogEvent::SelectionCleared => self.selection.clear_all(),
            CatalogEvent::SelectionReplaced(selection) => self.selection = selection,
        }

        Transition::Applied
    }

    /// Marks a load as in flight and returns the generation it must report back with.
    pub fn begin_load(&mut self) -> u64 {
        self.apply(CatalogEvent::LoadStarted);
        self.generation
    }

    /// Folds a loader outcome into the state.
    pub fn complete_load(
        &mut self,
        generation: u64,
        outcome: Result<Vec<EntitlementRecord>, FetchError>,
    ) -> Transition {
        let event = match outcome {
            Ok(records) => CatalogEvent::LoadSucceeded {
                generation,
                records,
            },
            Err(err) => {
                warn!(error = %err, generation, "entitlement load failed");
                CatalogEvent::LoadFailed {
                    generation,
                    message: err.to_string(),
                }
            }
        };
        self.apply(event)
    }

    pub fn records(&self) -> &[EntitlementRecord] {
        &self.records
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Records matching the session's own selection.
    pub fn filtered(&self) -> Vec<&EntitlementRecord> {
        filter_records(&self.records, &self.selection)
    }

    pub fn options(&self) -> FacetOptions {
        FacetOptions::derive(&self.records)
    }

    /// Everything presentation needs, against an explicit selection.
    pub fn view<'a>(&'a self, selection: &'a FilterSelection) -> CatalogView<'a> {
        CatalogView {
            status: self.load_status,
            error: self.error_message.as_deref(),
            selection,
            options: self.options(),
            total: self.records.len(),
            records: filter_records(&self.records, selection),
            loaded_at: self.loaded_at,
        }
    }

    /// View over the session's own selection.
    pub fn current_view(&self) -> CatalogView<'_> {
        self.view(&self.selection)
    }
}

/// Derived snapshot handed to renderers and the JSON endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView<'a> {
    pub status: LoadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    pub selection: &'a FilterSelection,
    pub options: FacetOptions,
    pub total: usize,
    pub records: Vec<&'a EntitlementRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Runs one complete load against `source` for a single-owner state.
pub async fn load<S: EntitlementSource>(state: &mut CatalogState, source: &S) -> Transition {
    let generation = state.begin_load();
    let outcome = source.fetch().await;
    state.complete_load(generation, outcome)
}
