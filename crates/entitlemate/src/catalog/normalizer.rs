use super::mapping::{field_for_key, RecordField};
use super::record::{EntitlementRecord, FacetValues};
use serde_json::{Map, Value};
use tracing::warn;

/// Maps every element of a decoded payload array onto the canonical record shape.
///
/// Elements that are not JSON objects cannot describe an entitlement and are
/// skipped; the remaining records keep their relative order.
pub fn normalize_records(items: Vec<Value>) -> Vec<EntitlementRecord> {
    let mut records = Vec::with_capacity(items.len());

    for (position, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(object) => records.push(normalize_record(&object)),
            other => warn!(
                position,
                found = json_kind(&other),
                "skipping entitlement entry that is not an object"
            ),
        }
    }

    records
}

/// Accepts PascalCase, camelCase, snake_case or spaced keys, and string,
/// array, number or boolean values. Unknown keys are ignored.
pub fn normalize_record(object: &Map<String, Value>) -> EntitlementRecord {
    let mut record = EntitlementRecord::default();

    for (key, value) in object {
        let Some(field) = field_for_key(key) else {
            continue;
        };

        match field {
            RecordField::Facet(facet) => record.facet_mut(facet).extend(facet_values(value)),
            RecordField::Name => fill_text(&mut record.name, value),
            RecordField::Headline => fill_text(&mut record.headline, value),
            RecordField::Description => fill_text(&mut record.description, value),
            RecordField::ApplyLink => fill_text(&mut record.apply_link, value),
            RecordField::ExplainerLink => fill_optional(&mut record.explainer_link, value),
            RecordField::ValueEstimate => fill_optional(&mut record.value_estimate, value),
            RecordField::Category => fill_optional(&mut record.category, value),
            RecordField::Kind => fill_optional(&mut record.kind, value),
            RecordField::Status => fill_optional(&mut record.status, value),
        }
    }

    record
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn fill_text(slot: &mut String, value: &Value) {
    if slot.is_empty() {
        if let Some(text) = text_value(value) {
            *slot = text;
        }
    }
}

fn fill_optional(slot: &mut Option<String>, value: &Value) {
    if slot.is_none() {
        *slot = text_value(value);
    }
}

fn text_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(raw) => clean_text(raw),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(text_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn facet_values(value: &Value) -> FacetValues {
    match value {
        Value::Array(items) => FacetValues::from_tokens(items.iter().filter_map(text_value)),
        other => FacetValues::from_tokens(text_value(other)),
    }
}

fn clean_text(raw: &str) -> String {
    raw.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}
