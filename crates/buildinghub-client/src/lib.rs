//! BuildingHub Client - typed access to the backend REST API.
//!
//! - **client**: [`ApiClient`] with one method per endpoint
//! - **fetch**: [`ViewFetch`], a request that is aborted when its view goes away

pub mod client;
pub mod error;
pub mod fetch;

pub use client::{ApiClient, ISSUES_PATH, RESIDENTS_PATH};
pub use error::{ClientError, Result};
pub use fetch::{FetchPoll, ViewFetch};
