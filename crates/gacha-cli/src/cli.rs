use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gacha_core::genre::MatchMode;
use gacha_core::theme::Theme;

#[derive(Debug, Parser)]
#[command(name = "gacha", version, about = "Pull a random anime or browse the season")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Wrap the fragment in a full HTML document.
    #[arg(long, global = true)]
    pub page: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Draw random anime until one matches the filters.
    Random {
        /// Only accept anime with this genre (e.g. "Horror").
        #[arg(long, short)]
        genre: Option<String>,

        /// Genre comparison: exact or substring.
        #[arg(long = "match")]
        match_mode: Option<MatchMode>,

        /// Give up after this many requests.
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Keep the synopsis in its original language.
        #[arg(long)]
        no_translate: bool,
    },
    /// Render the currently airing and upcoming lists.
    Seasons {
        /// Items per list.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show or change the theme preference.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// List the quick-pick genres.
    Genres,
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ThemeAction {
    Show,
    Toggle,
    Set { theme: Theme },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Print the user config file location.
    Path,
    /// Print the effective configuration.
    Show,
}
