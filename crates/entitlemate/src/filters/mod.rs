//! Facet selection and the predicate engine that narrows the catalog.

mod facet;
mod options;
mod predicate;
mod selection;

pub use facet::{Facet, FacetKind};
pub use options::{derive_options, FacetOptions};
pub use predicate::{filter_records, matches, ALL_STATES_SENTINEL};
pub use selection::{FacetFilter, FilterSelection, ListFilter, ScalarFilter};
