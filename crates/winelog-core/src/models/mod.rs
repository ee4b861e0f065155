//! Data models shared by the parsers, the import boundary and the CLI.

pub mod config;
pub mod wine;
