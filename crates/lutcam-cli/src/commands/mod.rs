//! Subcommand implementations.

pub mod add;
pub mod apply;
pub mod info;
pub mod list;
pub mod preview;
pub mod remove;
