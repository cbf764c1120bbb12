//! CLI subcommands

pub mod block;
pub mod clean;
pub mod delete;
pub mod generate;
pub mod import;
pub mod init;
pub mod list;
pub mod new;
pub mod parse;
pub mod reset;
pub mod show;
pub mod write;
