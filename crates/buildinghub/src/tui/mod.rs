//! Terminal User Interface for BuildingHub.
//!
//! Provides:
//! - Login, sign-up and forgot-password screens
//! - A role-scoped sidebar over the signed-in pages
//! - Pages for residents, issues, rules, regulations and campaigns
//! - Transient notices and blocking alerts

mod app;
mod events;
mod input;
mod pages;
mod ui;
mod views;

pub use app::{Alert, App, Screen, Session};
pub use events::{run, Result};
pub use views::{Backend, View};
