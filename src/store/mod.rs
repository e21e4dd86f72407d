//! In-memory stores and the lifecycle transitions that drive them.

pub mod lifecycle;
pub mod posts;
pub mod table;
pub mod users;

pub use lifecycle::{Lifecycle, RequestStatus};
pub use posts::PostStore;
pub use table::{Entity, EntityTable};
pub use users::UserStore;
