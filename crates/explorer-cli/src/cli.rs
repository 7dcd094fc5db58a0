//! CLI argument definitions for the settings explorer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use explorer_cli::FilterOverrides;
use explorer_core::Facet;
use explorer_model::{Scope, SpecialFlag, Tier};

#[derive(Parser)]
#[command(
    name = "settings-explorer",
    version,
    about = "Browse, filter and share database settings from a generated dataset",
    long_about = "Browse, filter and share database settings from a generated dataset.\n\n\
                  Filters use the same parameters as the explorer page URL, so a\n\
                  shared link can be pasted with --url and refined with flags."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Preferences file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the settings that pass the current filters.
    List(ListArgs),

    /// Show facet options with their counts.
    Facets(ViewArgs),

    /// Show every detail of one setting.
    Show(SettingArgs),

    /// Render the explorer page as a standalone HTML document.
    Render(RenderArgs),

    /// Print (and copy) a shareable link to one setting.
    Link(LinkArgs),

    /// Show or change the persisted color theme.
    Theme(ThemeArgs),

    /// List the page keyboard shortcuts.
    Shortcuts,
}

/// Dataset source plus filters.
#[derive(Args)]
pub struct ViewArgs {
    /// Dataset JSON document, or `-` for stdin.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Show at most this many rows.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct SettingArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Setting name; `--scope` picks between same-named settings.
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Leave out a facet group; may be repeated.
    #[arg(long = "hide-facet", value_enum, value_name = "FACET")]
    pub hide_facets: Vec<FacetArg>,

    /// Page title.
    #[arg(long = "title", value_name = "TITLE")]
    pub title: Option<String>,

    /// Override the persisted theme for this page.
    #[arg(long = "theme", value_enum)]
    pub theme: Option<ThemeChoice>,
}

#[derive(Args)]
pub struct LinkArgs {
    #[command(flatten)]
    pub setting: SettingArgs,

    /// Only print the link; do not touch the clipboard.
    #[arg(long = "no-copy")]
    pub no_copy: bool,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// New theme; omit to show the current one.
    #[arg(value_enum)]
    pub action: Option<ThemeAction>,
}

/// Filter flags, mirroring the page URL parameters.
#[derive(Args)]
pub struct FilterArgs {
    /// Shared page URL or query string to start from.
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Free-text query; quote phrases ("join algorithm").
    #[arg(long = "query", value_name = "TEXT")]
    pub query: Option<String>,

    /// Version to inspect (default: latest).
    #[arg(long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Restrict scopes (session, mergetree, format).
    #[arg(long = "scope", value_delimiter = ',', value_name = "SCOPE")]
    pub scopes: Vec<Scope>,

    /// Restrict topics.
    #[arg(long = "topic", value_delimiter = ',', value_name = "TOPIC")]
    pub topics: Vec<String>,

    /// Restrict tiers (production, beta, experimental, obsolete).
    #[arg(long = "tier", value_delimiter = ',', value_name = "TIER")]
    pub tiers: Vec<Tier>,

    /// Require special flags (cloud, cited).
    #[arg(long = "flag", value_delimiter = ',', value_name = "FLAG")]
    pub flags: Vec<SpecialFlag>,

    /// Only settings whose default changed in the selected version.
    #[arg(long = "changed-only")]
    pub changed_only: bool,
}

impl FilterArgs {
    pub fn overrides(&self) -> FilterOverrides {
        FilterOverrides {
            query: self.query.clone(),
            version: self.version.clone(),
            scopes: self.scopes.clone(),
            topics: self.topics.clone(),
            tiers: self.tiers.clone(),
            flags: self.flags.clone(),
            changed_only: self.changed_only,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FacetArg {
    Scope,
    Topic,
    Tier,
    Flags,
}

impl From<FacetArg> for Facet {
    fn from(value: FacetArg) -> Self {
        match value {
            FacetArg::Scope => Facet::Scope,
            FacetArg::Topic => Facet::Topic,
            FacetArg::Tier => Facet::Tier,
            FacetArg::Flags => Facet::Flag,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn filter_flags_accept_comma_lists() {
        let cli = Cli::try_parse_from([
            "settings-explorer",
            "list",
            "settings.json",
            "--scope",
            "session,format",
            "--tier",
            "beta",
            "--version",
            "25.7",
            "--changed-only",
        ])
        .unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected the list command");
        };
        let overrides = args.view.filters.overrides();
        assert_eq!(overrides.scopes, vec![Scope::Session, Scope::Format]);
        assert_eq!(overrides.tiers, vec![Tier::Beta]);
        assert_eq!(overrides.version.as_deref(), Some("25.7"));
        assert!(overrides.changed_only);
    }

    #[test]
    fn show_takes_dataset_then_name() {
        let cli =
            Cli::try_parse_from(["settings-explorer", "show", "-", "max_threads"]).unwrap();
        let Command::Show(args) = cli.command else {
            panic!("expected the show command");
        };
        assert_eq!(args.view.dataset, PathBuf::from("-"));
        assert_eq!(args.name, "max_threads");
    }
}
