use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute a user can narrow the catalog by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    AgeGroup,
    PaymentType,
    State,
    HomeOwnership,
    RelationshipStatus,
    LifeStageMoment,
    CardType,
}

/// Whether a facet accepts several selected values or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    List,
    Scalar,
}

impl Facet {
    /// Presentation order of the control groups.
    pub const fn ordered() -> [Self; 7] {
        [
            Self::AgeGroup,
            Self::PaymentType,
            Self::State,
            Self::HomeOwnership,
            Self::RelationshipStatus,
            Self::LifeStageMoment,
            Self::CardType,
        ]
    }

    pub const fn kind(self) -> FacetKind {
        match self {
            Self::AgeGroup | Self::PaymentType | Self::CardType => FacetKind::List,
            Self::State
            | Self::HomeOwnership
            | Self::RelationshipStatus
            | Self::LifeStageMoment => FacetKind::Scalar,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AgeGroup => "Age Group",
            Self::PaymentType => "Pension Type",
            Self::State => "State",
            Self::HomeOwnership => "Home Ownership",
            Self::RelationshipStatus => "Relationship Status",
            Self::LifeStageMoment => "Life Stage Moment",
            Self::CardType => "Card Type",
        }
    }

    /// Query-string key used when a selection is carried in a URL.
    pub const fn key(self) -> &'static str {
        match self {
            Self::AgeGroup => "age_group",
            Self::PaymentType => "payment_type",
            Self::State => "state",
            Self::HomeOwnership => "home_ownership",
            Self::RelationshipStatus => "relationship_status",
            Self::LifeStageMoment => "life_stage_moment",
            Self::CardType => "card_type",
        }
    }

    /// Caption of the "no filter" choice on single-choice controls.
    pub const fn unfiltered_label(self) -> &'static str {
        match self {
            Self::State => "All",
            _ => "Any",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|facet| facet.key() == normalized)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
