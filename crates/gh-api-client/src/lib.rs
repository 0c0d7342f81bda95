//! # GH API Client
//!
//! Read-only access to the GitHub REST API for the pieces `ghex` explores:
//! an owner's profile counters, a single repository, and the owner's full
//! repository and gist listings.
//!
//! The client owns request headers, authentication, `Link`-header pagination
//! and error normalization. Listings are returned as raw JSON objects so
//! callers can serialize exactly what the server sent.

mod client;
mod error;
mod pagination;
mod types;

pub use client::{ClientConfig, GitHubClient, DEFAULT_API_URL, MAX_PER_PAGE};
pub use error::{GhApiError, GhApiResult};
pub use pagination::next_page_url;
pub use types::{RawObject, UserProfile};
