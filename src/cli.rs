// Command-line argument definitions.

use clap::{Parser, ValueEnum};

/// View a GitHub user's recent public activity, profile, and repo stats.
#[derive(Parser, Debug)]
#[command(name = "octofeed", version, about)]
pub struct Cli {
    /// GitHub username to look up
    pub username: Option<String>,

    /// Only include activity newer than this many days
    #[arg(long, default_value_t = 30, value_name = "N")]
    pub days: i64,

    /// Maximum number of events to fetch
    #[arg(long, default_value_t = 100, value_name = "N")]
    pub max_events: usize,

    /// Only show events of this exact type (e.g. PushEvent)
    #[arg(long = "type", value_name = "TAG")]
    pub event_type: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Skip the cache lookup and fetch fresh (still updates the cache)
    #[arg(long)]
    pub no_cache: bool,
}

/// How the activity list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary header plus a grid table
    Table,
    /// One annotated line per event
    Lines,
}
