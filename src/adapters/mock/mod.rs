//! Mock implementations for testing.
//!
//! Enables exercising the session and API client without network access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
