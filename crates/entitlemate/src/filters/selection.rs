use super::facet::{Facet, FacetKind};
use serde::Serialize;
use std::collections::BTreeSet;

/// Filter applied to a multi-valued facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "values", rename_all = "snake_case")]
pub enum ListFilter {
    #[default]
    NoFilter,
    OneOf(BTreeSet<String>),
}

/// Filter applied to a single-choice facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum ScalarFilter {
    #[default]
    NoFilter,
    Equals(String),
}

/// Borrowed view of whichever filter a facet carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetFilter<'a> {
    List(&'a ListFilter),
    Scalar(&'a ScalarFilter),
}

impl ListFilter {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::OneOf(_))
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::NoFilter => false,
            Self::OneOf(values) => values.iter().any(|selected| same_value(selected, value)),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        let values = match self {
            Self::NoFilter => None,
            Self::OneOf(values) => Some(values.iter().map(String::as_str)),
        };
        values.into_iter().flatten()
    }

    fn toggle(&mut self, value: &str) {
        let mut values = match std::mem::take(self) {
            Self::NoFilter => BTreeSet::new(),
            Self::OneOf(values) => values,
        };

        let before = values.len();
        values.retain(|selected| !same_value(selected, value));
        if values.len() == before {
            values.insert(value.to_string());
        }

        *self = Self::from_set(values);
    }

    fn from_set(values: BTreeSet<String>) -> Self {
        if values.is_empty() {
            Self::NoFilter
        } else {
            Self::OneOf(values)
        }
    }
}

impl ScalarFilter {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Equals(_))
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::NoFilter => None,
            Self::Equals(value) => Some(value),
        }
    }

    pub fn is(&self, value: &str) -> bool {
        self.value()
            .map(|selected| same_value(selected, value))
            .unwrap_or(false)
    }
}

impl FacetFilter<'_> {
    pub fn is_active(&self) -> bool {
        match self {
            Self::List(filter) => filter.is_active(),
            Self::Scalar(filter) => filter.is_active(),
        }
    }

    pub fn is_selected(&self, value: &str) -> bool {
        match self {
            Self::List(filter) => filter.contains(value),
            Self::Scalar(filter) => filter.is(value),
        }
    }
}

/// User-chosen facet values. Starts empty; only the toggle/set/clear
/// operations mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    age_group: ListFilter,
    payment_type: ListFilter,
    card_type: ListFilter,
    state: ScalarFilter,
    home_ownership: ScalarFilter,
    relationship_status: ScalarFilter,
    life_stage_moment: ScalarFilter,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self, facet: Facet) -> FacetFilter<'_> {
        match facet {
            Facet::AgeGroup => FacetFilter::List(&self.age_group),
            Facet::PaymentType => FacetFilter::List(&self.payment_type),
            Facet::CardType => FacetFilter::List(&self.card_type),
            Facet::State => FacetFilter::Scalar(&self.state),
            Facet::HomeOwnership => FacetFilter::Scalar(&self.home_ownership),
            Facet::RelationshipStatus => FacetFilter::Scalar(&self.relationship_status),
            Facet::LifeStageMoment => FacetFilter::Scalar(&self.life_stage_moment),
        }
    }

    pub fn is_empty(&self) -> bool {
        Facet::ordered()
            .into_iter()
            .all(|facet| !self.filter(facet).is_active())
    }

    /// Adds the value when absent and removes it when present. Single-choice
    /// facets treat re-selecting the current value as clearing it.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }

        match facet.kind() {
            FacetKind::List => self.list_mut(facet).toggle(value),
            FacetKind::Scalar => {
                if self.scalar_mut(facet).is(value) {
                    self.clear(facet);
                } else {
                    self.set(facet, Some(value));
                }
            }
        }
    }

    /// Replaces the facet's filter. `None` or a blank value means "no filter".
    pub fn set(&mut self, facet: Facet, value: Option<&str>) {
        let value = value.map(str::trim).filter(|value| !value.is_empty());

        match facet.kind() {
            FacetKind::List => {
                let values = value.into_iter().map(String::from).collect();
                *self.list_mut(facet) = ListFilter::from_set(values);
            }
            FacetKind::Scalar => {
                *self.scalar_mut(facet) = match value {
                    Some(value) => ScalarFilter::Equals(value.to_string()),
                    None => ScalarFilter::NoFilter,
                };
            }
        }
    }

    pub fn clear(&mut self, facet: Facet) {
        self.set(facet, None);
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Copy of this selection with one facet toggled, used for link targets.
    pub fn with_toggled(&self, facet: Facet, value: &str) -> Self {
        let mut next = self.clone();
        next.toggle(facet, value);
        next
    }

    pub fn with_set(&self, facet: Facet, value: Option<&str>) -> Self {
        let mut next = self.clone();
        next.set(facet, value);
        next
    }

    /// Rebuilds a selection from decoded query pairs. Unknown keys are
    /// ignored, list facets accumulate repeated keys, and the last value wins
    /// for single-choice facets.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut selection = Self::default();

        for (key, value) in pairs {
            let Some(facet) = Facet::from_key(key.as_ref()) else {
                continue;
            };
            let value = value.as_ref();

            match facet.kind() {
                FacetKind::List => {
                    if !selection.filter(facet).is_selected(value.trim()) {
                        selection.toggle(facet, value);
                    }
                }
                FacetKind::Scalar => selection.set(facet, Some(value)),
            }
        }

        selection
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        for facet in Facet::ordered() {
            match self.filter(facet) {
                FacetFilter::List(filter) => {
                    pairs.extend(filter.values().map(|value| (facet.key(), value.to_string())));
                }
                FacetFilter::Scalar(filter) => {
                    if let Some(value) = filter.value() {
                        pairs.push((facet.key(), value.to_string()));
                    }
                }
            }
        }

        pairs
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn list_mut(&mut self, facet: Facet) -> &mut ListFilter {
        match facet {
            Facet::AgeGroup => &mut self.age_group,
            Facet::PaymentType => &mut self.payment_type,
            Facet::CardType => &mut self.card_type,
            other => unreachable!("{other:?} is not a list facet"),
        }
    }

    fn scalar_mut(&mut self, facet: Facet) -> &mut ScalarFilter {
        match facet {
            Facet::State => &mut self.state,
            Facet::HomeOwnership => &mut self.home_ownership,
            Facet::RelationshipStatus => &mut self.relationship_status,
            Facet::LifeStageMoment => &mut self.life_stage_moment,
            other => unreachable!("{other:?} is not a single-choice facet"),
        }
    }
}

fn same_value(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_list_facet_adds_then_removes() {
        let mut selection = FilterSelection::new();
        selection.toggle(Facet::AgeGroup, "<55");
        selection.toggle(Facet::AgeGroup, "75+");
        assert!(selection.filter(Facet::AgeGroup).is_selected("<55"));
        assert!(selection.filter(Facet::AgeGroup).is_selected("75+"));

        selection.toggle(Facet::AgeGroup, "<55");
        selection.toggle(Facet::AgeGroup, "75+");
        assert_eq!(
            selection.filter(Facet::AgeGroup),
            FacetFilter::List(&ListFilter::NoFilter)
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_removal_ignores_case() {
        let mut selection = FilterSelection::new();
        selection.toggle(Facet::PaymentType, "PAP");
        selection.toggle(Facet::PaymentType, "pap");
        assert!(selection.is_empty());
    }

    #[test]
    fn scalar_set_replaces_and_blank_clears() {
        let mut selection = FilterSelection::new();
        selection.set(Facet::State, Some("NSW"));
        selection.set(Facet::State, Some("VIC"));
        assert!(selection.filter(Facet::State).is_selected("VIC"));
        assert!(!selection.filter(Facet::State).is_selected("NSW"));

        selection.set(Facet::State, Some("  "));
        assert!(selection.is_empty());
    }

    #[test]
    fn caption_text_is_an_ordinary_value() {
        let mut selection = FilterSelection::from_query_pairs([("relationship_status", "Any")]);
        assert!(selection.filter(Facet::RelationshipStatus).is_selected("any"));
        assert_eq!(selection.to_query_string(), "relationship_status=Any");

        selection.set(Facet::State, Some("All"));
        assert!(selection.filter(Facet::State).is_selected("All"));

        selection.set(Facet::State, Some(""));
        assert!(!selection.filter(Facet::State).is_active());
    }

    #[test]
    fn scalar_toggle_acts_as_single_choice() {
        let mut selection = FilterSelection::new();
        selection.toggle(Facet::HomeOwnership, "Homeowner");
        selection.toggle(Facet::HomeOwnership, "Non-homeowner");
        assert!(selection
            .filter(Facet::HomeOwnership)
            .is_selected("Non-homeowner"));

        selection.toggle(Facet::HomeOwnership, "Non-homeowner");
        assert!(selection.is_empty());
    }

    #[test]
    fn clear_all_drops_every_facet() {
        let mut selection = FilterSelection::new()
            .with_toggled(Facet::CardType, "CSHC")
            .with_toggled(Facet::PaymentType, "AP")
            .with_set(Facet::State, Some("QLD"));
        assert!(!selection.is_empty());

        selection.clear_all();
        assert!(selection.is_empty());
        assert_eq!(selection.to_query_string(), "");
    }

    #[test]
    fn query_pairs_round_trip() {
        let mut selection = FilterSelection::new();
        selection.toggle(Facet::AgeGroup, "65–67");
        selection.toggle(Facet::AgeGroup, "<55");
        selection.set(Facet::State, Some("NSW"));
        selection.set(Facet::LifeStageMoment, Some("Turning67"));

        let rebuilt = FilterSelection::from_query_pairs(selection.to_query_pairs());
        assert_eq!(rebuilt, selection);
    }

    #[test]
    fn query_string_is_percent_encoded() {
        let selection = FilterSelection::new().with_toggled(Facet::AgeGroup, "<55");
        assert_eq!(selection.to_query_string(), "age_group=%3C55");
    }

    #[test]
    fn unknown_query_keys_are_ignored() {
        let selection = FilterSelection::from_query_pairs([("page", "2"), ("state", "QLD")]);
        assert!(selection.filter(Facet::State).is_selected("qld"));
        assert_eq!(selection.to_query_pairs().len(), 1);
    }
}
