//! BuildingHub terminal client.
//!
//! Provides the interactive TUI and one-shot CLI commands for browsing
//! building rules, regulations, residents and issues.

pub mod cli;
pub mod commands;
pub mod tui;
