use super::facet::Facet;
use crate::catalog::EntitlementRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct values available for one facet, sorted ascending.
pub fn derive_options(records: &[EntitlementRecord], facet: Facet) -> Vec<String> {
    records
        .iter()
        .flat_map(|record| record.facet(facet).iter())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Option sets for every facet, derived from the same record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacetOptions(BTreeMap<Facet, Vec<String>>);

impl FacetOptions {
    pub fn derive(records: &[EntitlementRecord]) -> Self {
        Self(
            Facet::ordered()
                .into_iter()
                .map(|facet| (facet, derive_options(records, facet)))
                .collect(),
        )
    }

    pub fn get(&self, facet: Facet) -> &[String] {
        self.0.get(&facet).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FacetValues;

    fn records() -> Vec<EntitlementRecord> {
        vec![
            EntitlementRecord {
                states: FacetValues::from_tokens(["VIC, NSW"]),
                payment_types: FacetValues::from_tokens(["PAP", "AP"]),
                ..EntitlementRecord::default()
            },
            EntitlementRecord {
                states: FacetValues::from_tokens(["All", "NSW"]),
                payment_types: FacetValues::from_tokens(["CSHC, AP"]),
                ..EntitlementRecord::default()
            },
        ]
    }

    #[test]
    fn options_are_sorted_and_unique() {
        let records = records();
        assert_eq!(derive_options(&records, Facet::State), ["All", "NSW", "VIC"]);
        assert_eq!(
            derive_options(&records, Facet::PaymentType),
            ["AP", "CSHC", "PAP"]
        );
    }

    #[test]
    fn deriving_twice_is_stable() {
        let records = records();
        for facet in Facet::ordered() {
            let first = derive_options(&records, facet);
            let second = derive_options(&records, facet);
            assert_eq!(first, second);
            let unique: BTreeSet<_> = first.iter().collect();
            assert_eq!(unique.len(), first.len());
        }
    }

    #[test]
    fn empty_records_yield_empty_options() {
        let options = FacetOptions::derive(&[]);
        assert!(options.is_empty());
        for facet in Facet::ordered() {
            assert!(options.get(facet).is_empty());
        }
    }
}
