//! GitHub REST API client.
//!
//! Provides [`GitHubClient`] for issue and comment operations, with
//! credentials resolved by [`resolve_auth`].

mod auth;
mod client;
mod comment;
pub(crate) mod error;
mod issue;
#[cfg(test)]
pub mod mock;
mod models;
#[cfg(test)]
pub mod testing;

pub use auth::resolve_auth;
pub use client::{DEFAULT_API_URL, GitHubClient};
pub use issue::ListFilters;
pub use models::{Comment, Issue, WithAuthor};
