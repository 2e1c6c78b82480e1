//! CLI commands

pub mod config;
pub mod render;
pub mod simulate;
