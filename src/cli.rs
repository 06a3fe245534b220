//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for chatmask.

use clap::{Parser, Subcommand};

/// chatmask - chat mask registry and toolkit
///
/// Inspects the built-in mask presets, validates user-authored mask files
/// against the same contract, and queries the bundled model catalog.
#[derive(Parser, Debug)]
#[command(name = "chatmask")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CHATMASK_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mask presets (built-in registry and user mask files)
    Mask {
        #[command(subcommand)]
        subcommand: MaskSubcommand,
    },

    /// Bundled model catalog
    Models {
        #[command(subcommand)]
        subcommand: ModelsSubcommand,
    },

    /// Render a prompt template with session variables
    Prompt {
        /// User input substituted for {{input}}
        input: String,

        /// Template to render (defaults to the input template)
        #[arg(short, long)]
        template: Option<String>,

        /// Model substituted for {{model}}
        #[arg(short, long)]
        model: Option<String>,

        /// Print the default system prompt first
        #[arg(long)]
        system: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Display version and build information
    Version,
}

/// Mask subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum MaskSubcommand {
    /// List built-in masks for a language
    List {
        /// Language partition (defaults to the configured default_lang)
        #[arg(short, long)]
        lang: Option<String>,

        /// Print as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one built-in mask in full
    Show {
        /// Mask name (exact match)
        name: String,

        /// Language partition (defaults to the configured default_lang)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Validate user mask files (all files in the mask dir if none given)
    Check {
        /// Mask files to check
        files: Vec<String>,
    },

    /// Write a starter mask file for authoring
    Init {
        /// Path of the mask file to create (.toml or .json)
        path: String,

        /// Display name of the new mask
        #[arg(short, long, default_value = "New Mask")]
        name: String,

        /// Language partition (defaults to the configured default_lang)
        #[arg(short, long)]
        lang: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Model catalog subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ModelsSubcommand {
    /// List the bundled model catalog
    List,

    /// Show one catalog entry
    Show {
        /// Model identifier
        model: String,
    },

    /// Print the knowledge cutoff for a model
    Cutoff {
        /// Model identifier
        model: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration file
    Validate,
}
