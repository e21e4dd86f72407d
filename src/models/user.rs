use serde::{Deserialize, Serialize};

use super::deserialize_user_id;

/// Identifier of a post author.
pub type UserId = u64;

/// A post author from the remote user service. Read-only.
///
/// The service sends more fields (email, address, ...); only the ones
/// the blog shows are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(deserialize_with = "deserialize_user_id")]
    pub id: UserId,
    pub name: String,
}
