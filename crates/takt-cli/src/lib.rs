//! takt CLI library.
//!
//! This crate provides the command line interface for takt.

mod cli;
pub mod commands;
mod config;
pub mod style;
mod table;

pub use cli::{Cli, Commands};
pub use config::{Config, expand_home};
