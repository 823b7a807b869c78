//! Clients for the GitLab GraphQL API.
//!
//! - [`executor`]: The query/mutation execution traits and the response shapes they return
//! - [`gitlab`]: GraphQL executor implementation talking to a GitLab instance
//! - [`gitlab_curl`]: Curl-based HTTP client for posting to the GraphQL endpoint
//!
//! The service only depends on the traits in [`executor`], which are mocked in tests.

pub mod executor;
pub mod gitlab;
pub mod gitlab_curl;
