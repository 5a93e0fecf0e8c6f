//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dict-translate")]
#[command(about = "Translation dictionary for text-search normalization")]
#[command(version)]
pub struct Cli {
    /// Custom configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory that bare dictionary names are resolved against
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Translate tokens and print their variants
    Lexize {
        /// Tokens to translate (read from stdin if none are given)
        tokens: Vec<String>,

        /// Dictionary file reference (bare name or path)
        #[arg(short, long, conflicts_with = "options")]
        dict_file: Option<String>,

        /// Upstream normalizer name
        #[arg(short, long, conflicts_with = "options")]
        input_dict: Option<String>,

        /// Full option list, e.g. "DictFile = animals, InputDict = simple"
        #[arg(short, long)]
        options: Option<String>,

        /// Stopword file for the built-in simple normalizer
        #[arg(long)]
        stopwords: Option<PathBuf>,

        /// Make the simple normalizer reject words it does not know
        #[arg(long)]
        reject_unknown: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a dictionary file and report what was parsed
    Info {
        /// Dictionary file reference (bare name or path)
        dict_file: String,

        /// List every entry
        #[arg(short, long)]
        entries: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or update user settings
    Settings {
        /// Set default data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default upstream normalizer
        #[arg(long)]
        set_input_dict: Option<String>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}
