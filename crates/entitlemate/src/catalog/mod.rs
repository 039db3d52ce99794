mod mapping;
mod normalizer;
mod record;

pub use normalizer::{normalize_record, normalize_records};
pub use record::{EntitlementRecord, FacetValues, VALUE_DELIMITER};

pub(crate) use normalizer::json_kind;
