use crate::listing::{run_list, run_options, ListArgs, OptionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use entitlemate::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "entitlemate",
    about = "Browse and filter government entitlement programs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print entitlements matching the given filters
    List(ListArgs),
    /// Print the selectable values for every filter
    Options(OptionsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
}

/// Local exports that replace the configured data API.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct SourceArgs {
    /// Read entitlements from a spreadsheet CSV export
    #[arg(long, value_name = "PATH", conflicts_with = "json")]
    pub(crate) csv: Option<PathBuf>,
    /// Read entitlements from a JSON array file
    #[arg(long, value_name = "PATH")]
    pub(crate) json: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::List(args) => run_list(args).await,
        Command::Options(args) => run_options(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["entitlemate"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn csv_and_json_exports_are_exclusive() {
        let parsed = Cli::try_parse_from([
            "entitlemate",
            "list",
            "--csv",
            "export.csv",
            "--json",
            "export.json",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn list_flags_collect_repeated_values() {
        let cli = Cli::try_parse_from([
            "entitlemate",
            "list",
            "--age-group",
            "<55",
            "--age-group",
            "75+",
            "--state",
            "NSW",
        ])
        .expect("parses");

        let Some(Command::List(args)) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.age_group, ["<55", "75+"]);
        assert_eq!(args.state.as_deref(), Some("NSW"));
    }
}
