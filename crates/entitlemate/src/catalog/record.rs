use crate::filters::Facet;
use serde::Serialize;

/// Delimiter used by spreadsheet-backed payloads for multi-valued cells.
pub const VALUE_DELIMITER: char = ',';

/// Ordered, duplicate-free set of trimmed facet tokens for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacetValues(Vec<String>);

impl FacetValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a value set from raw fragments, splitting each on the delimiter.
    pub fn from_tokens<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Self::new();
        for fragment in fragments {
            values.push_delimited(fragment.as_ref());
        }
        values
    }

    pub fn push_delimited(&mut self, raw: &str) {
        for token in raw.split(VALUE_DELIMITER) {
            let token = token.trim();
            if token.is_empty() || self.0.iter().any(|existing| existing == token) {
                continue;
            }
            self.0.push(token.to_string());
        }
    }

    pub fn extend(&mut self, other: FacetValues) {
        for token in other.0 {
            if !self.0.contains(&token) {
                self.0.push(token);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive membership test; `needle` is expected to be lower-cased.
    pub(crate) fn contains_folded(&self, needle: &str) -> bool {
        self.0.iter().any(|token| token.to_lowercase() == needle)
    }
}

/// Canonical entitlement program entry, independent of the wire shape it arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementRecord {
    pub name: String,
    pub headline: String,
    pub description: String,
    pub apply_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explainer_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_estimate: Option<String>,
    pub states: FacetValues,
    pub age_groups: FacetValues,
    pub payment_types: FacetValues,
    pub home_ownership: FacetValues,
    pub relationship_status: FacetValues,
    pub life_stage_moments: FacetValues,
    pub card_types: FacetValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl EntitlementRecord {
    pub fn facet(&self, facet: Facet) -> &FacetValues {
        match facet {
            Facet::AgeGroup => &self.age_groups,
            Facet::PaymentType => &self.payment_types,
            Facet::CardType => &self.card_types,
            Facet::State => &self.states,
            Facet::HomeOwnership => &self.home_ownership,
            Facet::RelationshipStatus => &self.relationship_status,
            Facet::LifeStageMoment => &self.life_stage_moments,
        }
    }

    pub(crate) fn facet_mut(&mut self, facet: Facet) -> &mut FacetValues {
        match facet {
            Facet::AgeGroup => &mut self.age_groups,
            Facet::PaymentType => &mut self.payment_types,
            Facet::CardType => &mut self.card_types,
            Facet::State => &mut self.states,
            Facet::HomeOwnership => &mut self.home_ownership,
            Facet::RelationshipStatus => &mut self.relationship_status,
            Facet::LifeStageMoment => &mut self.life_stage_moments,
        }
    }
}
