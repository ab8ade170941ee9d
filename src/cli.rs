//! Command-line interface.
//!
//! Parse failures exit with code 2 and `--help`/`--version`
//! short-circuit before any escalation logic runs, both courtesy of
//! clap.

use clap::Parser;
use std::path::PathBuf;

/// Runtime configuration, parsed from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "prsu",
    version,
    about = "Switch user after proving key possession to the kernel access-control module"
)]
pub struct Config {
    /// Pass a command to the shell with -c
    #[arg(short = 'c', long, value_name = "COMMAND")]
    pub command: Option<String>,

    /// Run this shell instead of the target user's shell
    #[arg(short = 's', long, value_name = "SHELL")]
    pub shell: Option<PathBuf>,

    /// Keep the caller's environment instead of rebuilding it
    #[arg(short = 'p', long = "preserve-environment")]
    pub preserve_env: bool,

    /// Start a login shell
    #[arg(short = 'l', long)]
    pub login: bool,

    /// PEM credential file holding the escalation signing key
    #[arg(long = "key-file", value_name = "PATH")]
    pub key_file: Option<PathBuf>,

    /// Non-zero time-step code arming the escalation attempt
    #[arg(long, value_name = "CODE")]
    pub code: Option<u32>,

    /// Log to stderr instead of syslog
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Target user
    #[arg(default_value = "root")]
    pub user: String,

    /// Extra arguments appended to the shell invocation
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}
