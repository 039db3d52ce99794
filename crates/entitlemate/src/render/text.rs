use super::{CardView, EMPTY_STATE_HINT, EMPTY_STATE_MESSAGE, ERROR_HEADING, LOADING_MESSAGE};
use crate::filters::{Facet, FacetFilter, FacetOptions, FilterSelection};
use crate::session::{CatalogView, LoadStatus};
use std::fmt::Write as _;

/// Terminal listing for `entitlemate list`.
pub fn render_listing(view: &CatalogView<'_>) -> String {
    let mut text = String::new();

    match view.status {
        LoadStatus::Idle | LoadStatus::Loading => {
            writeln!(text, "{LOADING_MESSAGE}").expect("write loading state");
        }
        LoadStatus::Failed => {
            writeln!(
                text,
                "{ERROR_HEADING}: {}",
                view.error.unwrap_or("Failed to fetch data")
            )
            .expect("write error state");
        }
        LoadStatus::Loaded => {
            writeln!(
                text,
                "Showing {} of {} entitlements",
                view.records.len(),
                view.total
            )
            .expect("write summary");
            for line in describe_selection(view.selection) {
                writeln!(text, "  {line}").expect("write active filter");
            }
            text.push('\n');

            if view.records.is_empty() {
                writeln!(text, "{EMPTY_STATE_MESSAGE}\n{EMPTY_STATE_HINT}")
                    .expect("write empty state");
            }
            for (index, record) in view.records.iter().enumerate() {
                if index > 0 {
                    text.push('\n');
                }
                text.push_str(&CardView::from_record(record).to_text());
            }
        }
    }

    text
}

/// One `Label: a, b` line per active facet.
pub fn describe_selection(selection: &FilterSelection) -> Vec<String> {
    Facet::ordered()
        .into_iter()
        .filter_map(|facet| {
            let values: Vec<&str> = match selection.filter(facet) {
                FacetFilter::List(list) => list.values().collect(),
                FacetFilter::Scalar(scalar) => scalar.value().into_iter().collect(),
            };
            if values.is_empty() {
                None
            } else {
                Some(format!("{}: {}", facet.label(), values.join(", ")))
            }
        })
        .collect()
}

/// Option sets for `entitlemate options`, one facet per line.
pub fn render_options(options: &FacetOptions) -> String {
    let mut text = String::new();
    for facet in Facet::ordered() {
        let values = options.get(facet);
        let listed = if values.is_empty() {
            "(none)".to_string()
        } else {
            values.join(", ")
        };
        writeln!(text, "{} (--{}): {listed}", facet.label(), flag_name(facet))
            .expect("write facet options");
    }
    text
}

fn flag_name(facet: Facet) -> String {
    facet.key().replace('_', "-")
}
