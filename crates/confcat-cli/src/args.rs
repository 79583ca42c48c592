use crate::types::{LogLevel, OutputFormat};
use clap::{Args, Parser, Subcommand};
use confcat_types::Category;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "confcat")]
#[command(about = "Harvest conference catalog sessions and report attribute distributions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to $CONFCAT_PATH, then the XDG data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where raw catalog items come from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// JSON file with an array of raw catalog items
    #[arg(long)]
    pub raw: Option<PathBuf>,

    /// Directory of captured catalog API responses
    #[arg(long)]
    pub captures: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    #[arg(long, default_value = "20")]
    pub limit: usize,

    #[arg(long)]
    pub cursor: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize and dedupe raw sessions into the sessions store
    Collect {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Write distribution and cross-reference reports
    Report {
        /// Only this category (default: all nine)
        #[arg(long)]
        category: Option<Category>,
    },

    /// Re-encode sessions.json as sessions.msgpack
    Encode,

    /// Collect, then report every category
    Run {
        #[command(flatten)]
        source: SourceArgs,
    },

    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },

    Speaker {
        #[command(subcommand)]
        command: SpeakerCommand,
    },

    Service {
        #[command(subcommand)]
        command: ServiceCommand,
    },

    /// Serve session queries as MCP tools over stdin/stdout
    Serve,

    /// Write a default confcat.toml into the data directory
    Init {
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Search titles, abstracts and speaker names
    Search {
        #[arg(default_value = "")]
        query: String,

        #[command(flatten)]
        page: PageArgs,
    },

    Show {
        code: String,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// Distinct values of a category (topics, services, industries, roles,
    /// levels, segments, areas_of_interest, features, types)
    List {
        key: String,
    },

    /// Sessions carrying a category value
    Sessions {
        category: Category,

        value: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Sessions at a level given as 100, 200, 300, 400 or 500
    Level {
        level: String,

        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand)]
pub enum SpeakerCommand {
    Search {
        #[arg(default_value = "")]
        name: String,

        #[arg(long, default_value = "5")]
        limit: usize,

        #[arg(long)]
        cursor: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ServiceCommand {
    Search {
        query: String,

        #[command(flatten)]
        page: PageArgs,
    },
}
