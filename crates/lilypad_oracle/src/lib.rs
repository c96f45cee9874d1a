//! Oracle client and configuration for LilyPad.
//!
//! [`HttpOracle`] answers the four oracle capabilities of `lilypad_core` by
//! calling the word-ladder HTTP service. [`LilypadConfig`] holds the settings
//! shared by the CLI and the REST service.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod http;
pub mod wire;

pub use config::{ConfigError, LilypadConfig, ORACLE_URL_ENV, OracleConfig, ServerConfig};
pub use http::HttpOracle;
