use crate::filters::Facet;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical record attribute a wire key resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordField {
    Name,
    Headline,
    Description,
    ApplyLink,
    ExplainerLink,
    ValueEstimate,
    Category,
    Kind,
    Status,
    Facet(Facet),
}

static FIELD_MAP: OnceLock<HashMap<&'static str, RecordField>> = OnceLock::new();

pub(crate) fn field_for_key(raw_key: &str) -> Option<RecordField> {
    field_map().get(fold_key(raw_key).as_str()).copied()
}

/// Reduces `AgeGroup`, `ageGroups`, `age_group` and `Age Group` to one lookup key.
pub(crate) fn fold_key(raw_key: &str) -> String {
    raw_key
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn field_map() -> &'static HashMap<&'static str, RecordField> {
    FIELD_MAP.get_or_init(|| {
        const KEY_TO_FIELD: &[(&str, RecordField)] = &[
            ("name", RecordField::Name),
            ("title", RecordField::Name),
            ("entitlement", RecordField::Name),
            ("entitlementname", RecordField::Name),
            ("headline", RecordField::Headline),
            ("summary", RecordField::Headline),
            ("description", RecordField::Description),
            ("details", RecordField::Description),
            ("govlink", RecordField::ApplyLink),
            ("link", RecordField::ApplyLink),
            ("applylink", RecordField::ApplyLink),
            ("applicationlink", RecordField::ApplyLink),
            ("url", RecordField::ApplyLink),
            ("explainerlink", RecordField::ExplainerLink),
            ("explainer", RecordField::ExplainerLink),
            ("learnmorelink", RecordField::ExplainerLink),
            ("valueestimate", RecordField::ValueEstimate),
            ("estimatedvalue", RecordField::ValueEstimate),
            ("value", RecordField::ValueEstimate),
            ("category", RecordField::Category),
            ("categories", RecordField::Category),
            ("type", RecordField::Kind),
            ("kind", RecordField::Kind),
            ("status", RecordField::Status),
            ("publishstatus", RecordField::Status),
            // Facets
            ("state", RecordField::Facet(Facet::State)),
            ("states", RecordField::Facet(Facet::State)),
            ("agegroup", RecordField::Facet(Facet::AgeGroup)),
            ("agegroups", RecordField::Facet(Facet::AgeGroup)),
            ("age", RecordField::Facet(Facet::AgeGroup)),
            ("paymenttype", RecordField::Facet(Facet::PaymentType)),
            ("paymenttypes", RecordField::Facet(Facet::PaymentType)),
            ("pensiontype", RecordField::Facet(Facet::PaymentType)),
            ("pensiontypes", RecordField::Facet(Facet::PaymentType)),
            ("homeownership", RecordField::Facet(Facet::HomeOwnership)),
            ("homeownershipstatus", RecordField::Facet(Facet::HomeOwnership)),
            ("homeownershipstatuses", RecordField::Facet(Facet::HomeOwnership)),
            ("relationshipstatus", RecordField::Facet(Facet::RelationshipStatus)),
            ("relationshipstatuses", RecordField::Facet(Facet::RelationshipStatus)),
            ("relationship", RecordField::Facet(Facet::RelationshipStatus)),
            ("lifestagemoment", RecordField::Facet(Facet::LifeStageMoment)),
            ("lifestagemoments", RecordField::Facet(Facet::LifeStageMoment)),
            ("lifestage", RecordField::Facet(Facet::LifeStageMoment)),
            ("lifestages", RecordField::Facet(Facet::LifeStageMoment)),
            ("card", RecordField::Facet(Facet::CardType)),
            ("cards", RecordField::Facet(Facet::CardType)),
            ("cardtype", RecordField::Facet(Facet::CardType)),
            ("cardtypes", RecordField::Facet(Facet::CardType)),
        ];

        KEY_TO_FIELD.iter().copied().collect()
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(raw_key: &str) -> Option<RecordField> {
    field_for_key(raw_key)
}
