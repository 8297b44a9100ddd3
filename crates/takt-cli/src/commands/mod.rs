//! CLI subcommand implementations.

pub mod cat;
pub mod check;
pub mod clear;
pub mod commit;
pub mod edit;
pub mod import;
pub mod summary;
