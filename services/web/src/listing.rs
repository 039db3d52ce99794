use crate::cli::SourceArgs;
use crate::infra::load_catalog;
use clap::{Args, ValueEnum};
use entitlemate::error::AppError;
use entitlemate::filters::{Facet, FilterSelection};
use entitlemate::render::text::{render_listing, render_options};
use entitlemate::session::CatalogEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Age group to include (repeatable)
    #[arg(long, value_name = "GROUP")]
    pub(crate) age_group: Vec<String>,
    /// Pension or payment type to include (repeatable)
    #[arg(long, value_name = "TYPE")]
    pub(crate) payment_type: Vec<String>,
    /// Concession card to include (repeatable)
    #[arg(long, value_name = "CARD")]
    pub(crate) card_type: Vec<String>,
    /// State or territory; entitlements available in all states always match
    #[arg(long)]
    pub(crate) state: Option<String>,
    #[arg(long)]
    pub(crate) home_ownership: Option<String>,
    #[arg(long)]
    pub(crate) relationship_status: Option<String>,
    #[arg(long)]
    pub(crate) life_stage_moment: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

impl ListArgs {
    pub(crate) fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::new();
        for (facet, values) in [
            (Facet::AgeGroup, &self.age_group),
            (Facet::PaymentType, &self.payment_type),
            (Facet::CardType, &self.card_type),
        ] {
            for value in values {
                if !selection.filter(facet).is_selected(value.trim()) {
                    selection.toggle(facet, value);
                }
            }
        }
        for (facet, value) in [
            (Facet::State, &self.state),
            (Facet::HomeOwnership, &self.home_ownership),
            (Facet::RelationshipStatus, &self.relationship_status),
            (Facet::LifeStageMoment, &self.life_stage_moment),
        ] {
            selection.set(facet, value.as_deref());
        }
        selection
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct OptionsArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) async fn run_list(args: ListArgs) -> Result<(), AppError> {
    let mut state = load_catalog(&args.source).await?;
    state.apply(CatalogEvent::SelectionReplaced(args.selection()));

    let view = state.current_view();
    match args.format {
        OutputFormat::Text => print!("{}", render_listing(&view)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

pub(crate) async fn run_options(args: OptionsArgs) -> Result<(), AppError> {
    let state = load_catalog(&args.source).await?;
    let options = state.options();

    match args.format {
        OutputFormat::Text => print!("{}", render_options(&options)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_build_the_same_selection_as_query_pairs() {
        let args = ListArgs {
            age_group: vec!["<55".to_string(), "<55".to_string(), "75+".to_string()],
            state: Some("VIC".to_string()),
            home_ownership: Some(" ".to_string()),
            ..ListArgs::default()
        };

        let expected = FilterSelection::from_query_pairs([
            ("age_group", "<55"),
            ("age_group", "75+"),
            ("state", "VIC"),
        ]);
        assert_eq!(args.selection(), expected);
    }

    #[test]
    fn no_flags_means_no_filter() {
        assert!(ListArgs::default().selection().is_empty());
    }
}
