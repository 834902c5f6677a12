#![forbid(unsafe_code)]

//! Command-line front end: load a storage snapshot and print it as a table.

pub mod cli;
pub mod error;
pub mod logging;
pub mod show;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{CliError, Result};
