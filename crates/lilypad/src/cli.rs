//! Command-line interface for lilypad.

use clap::{Parser, Subcommand};
use lilypad_oracle::{ConfigError, LilypadConfig};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// LilyPad - word-ladder puzzles one edit at a time
#[derive(Parser, Debug)]
#[command(name = "lilypad")]
#[command(about = "Play, solve, or serve word-ladder puzzles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it is missing)
    #[arg(long, global = true, default_value = "lilypad.toml")]
    pub config: PathBuf,

    /// Oracle service base URL, overriding config and environment
    #[arg(long, global = true)]
    pub oracle_url: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Start word; a puzzle is generated when omitted
        #[arg(long, requires = "end")]
        start: Option<String>,

        /// End word
        #[arg(long, requires = "start")]
        end: Option<String>,
    },

    /// Print a shortest ladder between two words
    Solve {
        /// Start word
        #[arg(long)]
        start: String,

        /// End word
        #[arg(long)]
        end: String,
    },

    /// Run the REST session service
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Loads the config file, then applies environment and flag overrides.
    #[instrument(skip(self), fields(config = %self.config.display()))]
    pub fn resolve_config(&self) -> Result<LilypadConfig, ConfigError> {
        let config = LilypadConfig::load_or_default(&self.config)?.with_env_overrides();
        Ok(self.apply_flags(config))
    }

    /// Applies command-line overrides, which win over everything else.
    pub fn apply_flags(&self, mut config: LilypadConfig) -> LilypadConfig {
        if let Some(url) = &self.oracle_url {
            debug!(url = %url, "Oracle URL overridden by flag");
            let oracle = config.oracle().clone().with_base_url(url.as_str());
            config = config.with_oracle(oracle);
        }
        if let Command::Serve { host, port } = &self.command {
            let mut server = config.server().clone();
            if let Some(host) = host {
                server = server.with_host(host.as_str());
            }
            if let Some(port) = port {
                server = server.with_port(*port);
            }
            config = config.with_server(server);
        }
        config
    }
}
