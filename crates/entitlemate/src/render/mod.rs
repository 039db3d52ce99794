//! Presentation of a [`CatalogView`](crate::session::CatalogView) as an HTML
//! page or as plain terminal text.

mod card;
pub mod html;
pub mod text;

pub use card::CardView;

pub const EMPTY_STATE_MESSAGE: &str = "No entitlements found matching your filters.";
pub const EMPTY_STATE_HINT: &str = "Try adjusting your filter criteria.";
pub const LOADING_MESSAGE: &str = "Loading entitlements data...";
pub const ERROR_HEADING: &str = "Error Loading Data";

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
