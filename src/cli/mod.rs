//! CLI commands module for pushwrap.

pub mod app;
pub mod commands;

pub use app::{Cli, Commands, ConfigAction};
