use super::facet::Facet;
use super::selection::{FacetFilter, FilterSelection};
use crate::catalog::EntitlementRecord;

/// State value meaning "available in every state".
pub const ALL_STATES_SENTINEL: &str = "All";

/// True when the record satisfies every facet of the selection.
pub fn matches(record: &EntitlementRecord, selection: &FilterSelection) -> bool {
    Facet::ordered()
        .into_iter()
        .all(|facet| facet_matches(record, facet, selection.filter(facet)))
}

/// Records satisfying the selection, in their original order.
pub fn filter_records<'a>(
    records: &'a [EntitlementRecord],
    selection: &FilterSelection,
) -> Vec<&'a EntitlementRecord> {
    records
        .iter()
        .filter(|record| matches(record, selection))
        .collect()
}

fn facet_matches(record: &EntitlementRecord, facet: Facet, filter: FacetFilter<'_>) -> bool {
    let values = record.facet(facet);

    match filter {
        FacetFilter::List(filter) => {
            if !filter.is_active() {
                return true;
            }
            filter
                .values()
                .any(|selected| values.contains_folded(&selected.trim().to_lowercase()))
        }
        FacetFilter::Scalar(filter) => {
            let Some(selected) = filter.value() else {
                return true;
            };
            if values.contains_folded(&selected.trim().to_lowercase()) {
                return true;
            }
            facet == Facet::State
                && values.contains_folded(&ALL_STATES_SENTINEL.to_lowercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FacetValues;

    fn record(name: &str, states: &[&str], age_groups: &[&str]) -> EntitlementRecord {
        EntitlementRecord {
            name: name.to_string(),
            states: FacetValues::from_tokens(states),
            age_groups: FacetValues::from_tokens(age_groups),
            ..EntitlementRecord::default()
        }
    }

    fn sample() -> Vec<EntitlementRecord> {
        vec![
            record("Age Pension", &["NSW"], &["65-67"]),
            record("Rebate X", &["All"], &["<55"]),
        ]
    }

    fn names(records: &[&EntitlementRecord]) -> Vec<String> {
        records.iter().map(|record| record.name.clone()).collect()
    }

    #[test]
    fn empty_selection_matches_everything() {
        let selection = FilterSelection::new();
        let mut records = sample();
        records.push(EntitlementRecord::default());

        assert!(records.iter().all(|record| matches(record, &selection)));
    }

    #[test]
    fn state_filter_includes_all_sentinel_records() {
        let mut selection = FilterSelection::new();
        selection.set(Facet::State, Some("NSW"));

        let records = sample();
        assert_eq!(
            names(&filter_records(&records, &selection)),
            ["Age Pension", "Rebate X"]
        );
    }

    #[test]
    fn all_sentinel_matches_any_state_and_ignores_case() {
        let records = vec![record("Everywhere", &["aLL"], &[])];
        for state in ["NSW", "VIC", "QLD", "TAS"] {
            let selection = FilterSelection::new().with_set(Facet::State, Some(state));
            assert!(matches(&records[0], &selection), "{state} should match");
        }
    }

    #[test]
    fn age_group_filter_uses_set_intersection() {
        let selection = FilterSelection::new().with_toggled(Facet::AgeGroup, "<55");

        let records = sample();
        assert_eq!(names(&filter_records(&records, &selection)), ["Rebate X"]);
    }

    #[test]
    fn selection_is_case_insensitive() {
        let selection = FilterSelection::new().with_set(Facet::State, Some("nsw"));
        let records = vec![record("NSW only", &["NSW"], &[])];
        assert!(matches(&records[0], &selection));
    }

    #[test]
    fn substrings_do_not_match() {
        let selection = FilterSelection::new().with_toggled(Facet::AgeGroup, "65");
        let records = sample();
        assert!(filter_records(&records, &selection).is_empty());
    }

    #[test]
    fn sentinel_only_applies_to_state() {
        let selection =
            FilterSelection::new().with_set(Facet::HomeOwnership, Some("Homeowner"));
        let record = EntitlementRecord {
            home_ownership: FacetValues::from_tokens(["All"]),
            ..EntitlementRecord::default()
        };
        assert!(!matches(&record, &selection));
    }

    #[test]
    fn any_as_data_value_selects_only_its_records() {
        let records = vec![
            EntitlementRecord {
                name: "Open to anyone".to_string(),
                relationship_status: FacetValues::from_tokens(["Any"]),
                ..EntitlementRecord::default()
            },
            EntitlementRecord {
                name: "Singles".to_string(),
                relationship_status: FacetValues::from_tokens(["Single"]),
                ..EntitlementRecord::default()
            },
        ];

        let selection = FilterSelection::from_query_pairs([("relationship_status", "Any")]);
        assert!(!selection.is_empty());
        assert_eq!(names(&filter_records(&records, &selection)), ["Open to anyone"]);
    }

    #[test]
    fn widening_a_list_selection_never_drops_matches() {
        let records = vec![
            record("A", &["NSW"], &["<55", "55–60"]),
            record("B", &["VIC"], &["75+"]),
            record("C", &["All"], &[]),
        ];

        let narrow = FilterSelection::new().with_toggled(Facet::AgeGroup, "75+");
        let wide = narrow.with_toggled(Facet::AgeGroup, "<55");

        for record in &records {
            if matches(record, &narrow) {
                assert!(matches(record, &wide), "{} dropped when widening", record.name);
            }
        }
        assert_eq!(filter_records(&records, &wide).len(), 2);
    }

    #[test]
    fn facets_combine_with_and() {
        let mut selection = FilterSelection::new();
        selection.set(Facet::State, Some("NSW"));
        selection.toggle(Facet::AgeGroup, "<55");

        let records = sample();
        assert_eq!(names(&filter_records(&records, &selection)), ["Rebate X"]);
    }
}
