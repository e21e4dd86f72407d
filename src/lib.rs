//! postboard - client-side data layer for a small blog
//!
//! Posts and users are fetched from a REST backend into normalized
//! in-memory stores; derived views over them are memoized.

pub mod adapters;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod selectors;
pub mod session;
pub mod store;
pub mod traits;

pub use config::{BoardConfig, UpdateFallback};
pub use error::{BoardError, BoardResult};
pub use session::{Session, UpdateOutcome};
