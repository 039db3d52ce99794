use super::{
    escape_html, CardView, EMPTY_STATE_HINT, EMPTY_STATE_MESSAGE, ERROR_HEADING, LOADING_MESSAGE,
};
use crate::filters::{Facet, FacetFilter, FacetKind, FilterSelection};
use crate::session::{CatalogView, LoadStatus};
use std::fmt::Write as _;

/// Where the page is mounted and where the retry form posts to.
#[derive(Debug, Clone, Copy)]
pub struct PageLinks<'a> {
    pub listing_path: &'a str,
    pub reload_path: &'a str,
}

impl Default for PageLinks<'_> {
    fn default() -> Self {
        Self {
            listing_path: "/",
            reload_path: "/reload",
        }
    }
}

pub fn render_page(view: &CatalogView<'_>, links: PageLinks<'_>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>EntitleMate</title>\n</head>\n<body>\n<main>\n");
    html.push_str("<h1>EntitleMate</h1>\n");

    match view.status {
        LoadStatus::Idle | LoadStatus::Loading => render_loading(&mut html),
        LoadStatus::Failed => render_error(&mut html, view.error, links),
        LoadStatus::Loaded => {
            render_filters(&mut html, view, links);
            render_results(&mut html, view);
        }
    }

    if let Some(loaded_at) = view.loaded_at {
        writeln!(
            html,
            "<footer>Updated {}</footer>",
            loaded_at.format("%Y-%m-%d %H:%M UTC")
        )
        .expect("write footer");
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_loading(html: &mut String) {
    writeln!(
        html,
        "<div role=\"status\" aria-label=\"Loading entitlements data\">\n<p>{LOADING_MESSAGE}</p>\n</div>"
    )
    .expect("write loading state");
}

fn render_error(html: &mut String, error: Option<&str>, links: PageLinks<'_>) {
    let message = error.unwrap_or("Failed to fetch data");
    writeln!(
        html,
        "<section class=\"error\" role=\"alert\">\n<h2>{ERROR_HEADING}</h2>\n<p>{}</p>\n\
<form method=\"post\" action=\"{}\"><button type=\"submit\">Retry</button></form>\n</section>",
        escape_html(message),
        escape_html(links.reload_path)
    )
    .expect("write error state");
}

fn render_filters(html: &mut String, view: &CatalogView<'_>, links: PageLinks<'_>) {
    html.push_str("<nav class=\"filters\" aria-label=\"Filters\">\n");

    for facet in Facet::ordered() {
        let filter = view.selection.filter(facet);
        writeln!(
            html,
            "<fieldset class=\"facet\" data-facet=\"{}\">\n<legend>{}</legend>",
            facet.key(),
            facet.label()
        )
        .expect("write facet group");

        if facet.kind() == FacetKind::Scalar {
            let target = view.selection.with_set(facet, None);
            option_link(
                html,
                &href(links.listing_path, &target),
                facet.unfiltered_label(),
                !filter.is_active(),
            );
        }

        for option in choices(view, facet) {
            let target = match facet.kind() {
                FacetKind::List => view.selection.with_toggled(facet, &option),
                FacetKind::Scalar => view.selection.with_set(facet, Some(&option)),
            };
            option_link(
                html,
                &href(links.listing_path, &target),
                &option,
                filter.is_selected(&option),
            );
        }

        html.push_str("</fieldset>\n");
    }

    if !view.selection.is_empty() {
        writeln!(
            html,
            "<a class=\"clear\" href=\"{}\">Clear all filters</a>",
            escape_html(links.listing_path)
        )
        .expect("write clear link");
    }

    html.push_str("</nav>\n");
}

fn render_results(html: &mut String, view: &CatalogView<'_>) {
    writeln!(
        html,
        "<p class=\"summary\">Showing {} of {} entitlements</p>",
        view.records.len(),
        view.total
    )
    .expect("write summary");

    if view.records.is_empty() {
        writeln!(
            html,
            "<div class=\"empty-state\">\n<p>{EMPTY_STATE_MESSAGE}</p>\n<p>{EMPTY_STATE_HINT}</p>\n</div>"
        )
        .expect("write empty state");
        return;
    }

    html.push_str("<section class=\"grid\">\n");
    for record in &view.records {
        html.push_str(&CardView::from_record(record).to_html());
    }
    html.push_str("</section>\n");
}

/// Derived options plus any selected value the data no longer offers, so a
/// stale selection can still be switched off.
fn choices(view: &CatalogView<'_>, facet: Facet) -> Vec<String> {
    let mut choices: Vec<String> = view.options.get(facet).to_vec();
    let selected: Vec<String> = match view.selection.filter(facet) {
        FacetFilter::List(list) => list.values().map(String::from).collect(),
        FacetFilter::Scalar(scalar) => scalar.value().map(String::from).into_iter().collect(),
    };
    for value in selected {
        let offered = choices
            .iter()
            .any(|choice| choice.to_lowercase() == value.to_lowercase());
        if !offered {
            choices.push(value);
        }
    }

    choices
}

fn option_link(html: &mut String, href: &str, label: &str, pressed: bool) {
    writeln!(
        html,
        "<a class=\"option\" href=\"{}\" aria-pressed=\"{}\">{}</a>",
        escape_html(href),
        pressed,
        escape_html(label)
    )
    .expect("write option link");
}

fn href(listing_path: &str, selection: &FilterSelection) -> String {
    let query = selection.to_query_string();
    if query.is_empty() {
        listing_path.to_string()
    } else {
        format!("{listing_path}?{query}")
    }
}
