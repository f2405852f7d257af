//! CLI argument parsing

use clap::{Parser, Subcommand, ValueEnum};

use crate::backend::docker::DEFAULT_RUNTIME;
use crate::backend::BackendKind;

#[derive(Parser, Debug)]
#[command(name = "dockyter")]
#[command(author, version, about = "Run shell commands inside containers", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Execution backend
    #[arg(long, global = true, value_enum, env = "DOCKYTER_BACKEND", default_value_t = BackendKind::Docker)]
    pub backend: BackendKind,

    /// Base URL of the execution API (required with --backend api)
    #[arg(long, global = true, env = "DOCKYTER_API_URL")]
    pub api_url: Option<String>,

    /// Container runtime binary for the docker backend
    #[arg(long, global = true, env = "DOCKYTER_RUNTIME", default_value = DEFAULT_RUNTIME)]
    pub runtime: String,

    /// HTTP timeout in seconds for the api backend
    #[arg(long, global = true, env = "DOCKYTER_TIMEOUT", default_value_t = 300)]
    pub timeout: u64,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level (falls back to DOCKYTER_LOG, then warn)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Run a command inside a container
    Exec {
        /// Runtime arguments, e.g. "-v /data:/data ubuntu:22.04"
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        args: String,

        /// Check the backend status first and fail if it is unavailable
        #[arg(long)]
        require_healthy: bool,

        /// The command to run. A single word is used as a shell script
        /// as-is; several words are quoted so each stays one argument.
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Show backend status
    Status {
        /// Runtime arguments to display alongside the status
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        args: String,
    },

    /// Serve the execution API backed by the local container runtime
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port to listen on (0 picks a free port)
        #[arg(long, short, default_value = "8000")]
        port: u16,
    },

    /// Start an interactive shell with container redirection
    Repl {
        /// Connect with these runtime arguments on startup
        #[arg(long, allow_hyphen_values = true)]
        args: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Build the shell line for `exec`. One word is passed through untouched
/// so `dockyter exec 'ls | wc -l'` keeps its pipe; several words are
/// shell-quoted so argv boundaries survive `bash -lc`.
pub fn command_line(words: &[String]) -> String {
    match words {
        [single] => single.clone(),
        words => shell_words::join(words),
    }
}
