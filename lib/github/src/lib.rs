//! GitHub GraphQL transport for stargraph.
//!
//! [`GithubClient`] implements [`stargraph_core::GraphSource`] over HTTPS;
//! [`Credential`] turns the token file into an `Authorization` header.

pub mod client;
pub mod credential;

pub use client::{GithubClient, GITHUB_GRAPHQL_URL};
pub use credential::Credential;
