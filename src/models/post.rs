use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use super::{deserialize_id, deserialize_user_id, Reactions, UserId};
use crate::error::ValidationError;

/// Identifier of a post.
///
/// Server posts keep the id in the form the server sent it (usually a
/// number); locally created posts carry a UUID. The id goes back on the
/// wire in the same form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PostId {
    Num(u64),
    Text(String),
}

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        PostId::Text(id.into())
    }

    /// Fresh locally-unique id for a post that has not been to the server.
    pub fn generate() -> Self {
        PostId::Text(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Num(id) => write!(f, "{}", id),
            PostId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        PostId::Num(id)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        PostId::Text(id.to_string())
    }
}

impl From<String> for PostId {
    fn from(id: String) -> Self {
        PostId::Text(id)
    }
}

impl Serialize for PostId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PostId::Num(id) => serializer.serialize_u64(*id),
            PostId::Text(id) => serializer.serialize_str(id),
        }
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_id(deserializer)
    }
}

/// A post as held in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    /// Author (API sends as "userId", sometimes as a numeric string)
    #[serde(deserialize_with = "deserialize_user_id")]
    pub user_id: UserId,
    /// Only used for ordering; newest first
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub reactions: Reactions,
}

impl Post {
    /// Build a post from a server payload. Returns `None` when the payload
    /// has no id; missing text fields become empty.
    pub fn from_remote(remote: RemotePost, date: DateTime<Utc>, reactions: Reactions) -> Option<Self> {
        let id = remote.id?;
        Some(Self {
            id,
            title: remote.title.unwrap_or_default(),
            body: remote.body.unwrap_or_default(),
            user_id: remote.user_id,
            date,
            reactions,
        })
    }

    /// Check that the edited fields are still savable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        PostDraft::new(&self.title, &self.body, Some(self.user_id))
            .validate()
            .map(|_| ())
    }
}

/// A post as served by the remote post service.
///
/// The service knows nothing about dates or reactions; update echoes may
/// carry them back if they were sent. Any field but `userId` may be
/// missing from a malformed echo.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    #[serde(default)]
    pub id: Option<PostId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(deserialize_with = "deserialize_user_id")]
    pub user_id: UserId,
    #[serde(default)]
    pub reactions: Option<Reactions>,
}

impl From<&Post> for RemotePost {
    fn from(post: &Post) -> Self {
        Self {
            id: Some(post.id.clone()),
            title: Some(post.title.clone()),
            body: Some(post.body.clone()),
            user_id: post.user_id,
            reactions: Some(post.reactions),
        }
    }
}

/// Unvalidated form input for a new post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    /// `None` until an author is picked
    pub user_id: Option<UserId>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>, user_id: Option<UserId>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            user_id,
        }
    }

    /// Reject empty fields before anything touches the network.
    pub fn validate(self) -> Result<NewPost, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        let user_id = self.user_id.ok_or(ValidationError::MissingAuthor)?;

        Ok(NewPost {
            title: self.title,
            body: self.body,
            user_id,
        })
    }
}

/// Validated create request body (POST /posts).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: UserId,
}
