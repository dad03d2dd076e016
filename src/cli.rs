//! CLI definition and parsing.
//! Defines Args/Command and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Store/copy flags map onto StoreOptions; unset flags fall back to config or source values.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::options::StoreOptions;
use crate::record::{Owner, RecordId};

/// CLI wrapper for the files_manager library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Attach, copy and fetch owner files on named storage disks"
)]
pub struct Args {
    /// Config file to use instead of FILES_MANAGER_CONFIG / the OS default.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override the catalog file holding file records.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where/how to store a file. Shared by store and copy commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OptionFlags {
    /// Target disk
    #[arg(long)]
    pub disk: Option<String>,
    /// Target folder inside the disk
    #[arg(long)]
    pub folder: Option<String>,
    /// Base name (slugified; extension is kept)
    #[arg(long)]
    pub name: Option<String>,
    /// Group tag
    #[arg(long)]
    pub group: Option<String>,
    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,
}

impl OptionFlags {
    pub fn to_options(&self) -> StoreOptions {
        StoreOptions {
            disk: self.disk.clone(),
            folder: self.folder.clone(),
            name: self.name.clone(),
            group: self.group.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Store a local file for an owner
    Add {
        /// Owner as KIND:ID (e.g. user:1)
        owner: Owner,
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
        #[command(flatten)]
        options: OptionFlags,
    },
    /// Store literal text content with an explicit extension
    AddContent {
        owner: Owner,
        extension: String,
        content: String,
        #[command(flatten)]
        options: OptionFlags,
    },
    /// Replace the owner's avatar
    Avatar {
        owner: Owner,
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
        #[command(flatten)]
        options: OptionFlags,
    },
    /// List an owner's files
    List {
        owner: Owner,
        /// Only files in this group
        #[arg(long)]
        group: Option<String>,
    },
    /// Write a file's content to stdout
    Cat { id: RecordId },
    /// Copy one file
    Copy {
        id: RecordId,
        /// Attach the copy to another owner
        #[arg(long)]
        to_owner: Option<Owner>,
        #[command(flatten)]
        options: OptionFlags,
    },
    /// Copy all of an owner's files (optionally one group) in one batch
    CopyAll {
        owner: Owner,
        /// Only copy files in this group
        #[arg(long)]
        only_group: Option<String>,
        /// Attach the copies to another owner
        #[arg(long)]
        to_owner: Option<Owner>,
        #[command(flatten)]
        options: OptionFlags,
    },
    /// Delete a file and its content
    Delete { id: RecordId },
    /// Print the config file location and effective disks, then exit
    PrintConfig,
    /// Write a commented template config (to --config, or the default location)
    InitConfig,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(catalog) = &self.catalog {
            cfg.catalog_path = catalog.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
