//! Jira API client and types.
//!
//! `client` holds the transport; each resource family adds its operations
//! to [`JiraClient`] from its own module.

pub mod adf;
mod auth;
mod boards;
mod client;
mod comments;
pub mod error;
mod issues;
pub mod paginate;
mod query;
pub mod search;
mod sprints;
#[cfg(test)]
pub(crate) mod test_server;
mod transitions;
pub mod types;

pub use adf::AtlassianDoc;
pub use client::JiraClient;
pub use error::{ApiError, ErrorKind};
pub use issues::{build_create_request, build_update_request};
