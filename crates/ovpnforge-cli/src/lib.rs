//! OvpnForge CLI library.
#![forbid(unsafe_code)]
//!
//! Argument parsing, command handlers, and the PEM/file I/O collaborator
//! layer around the core [`ovpnforge_pki`] and [`ovpnforge_config`]
//! crates.

pub mod cli;
pub mod commands;
pub mod error;
pub mod pemio;

pub use error::CliError;
