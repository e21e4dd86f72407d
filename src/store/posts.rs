//! Post store: the normalized post table plus fetch status.
//!
//! Each `apply_*` method is the transition function for one async
//! operation; the session feeds it the operation's [`Lifecycle`] phases.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::lifecycle::{Lifecycle, RequestStatus};
use super::table::{Entity, EntityTable};
use crate::error::ValidationError;
use crate::models::{Post, PostDraft, PostId, ReactionKind, Reactions, RemotePost};

impl Entity for Post {
    type Id = PostId;

    fn id(&self) -> &PostId {
        &self.id
    }
}

/// Newest first.
fn newest_first(a: &Post, b: &Post) -> Ordering {
    b.date.cmp(&a.date)
}

/// Posts plus the state of the bulk fetch.
#[derive(Debug, Clone)]
pub struct PostStore {
    table: EntityTable<Post>,
    status: RequestStatus,
    /// Only set while `status` is `Failed`
    error: Option<String>,
    count: u64,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore {
    pub fn new() -> Self {
        Self {
            table: EntityTable::sorted_by(newest_first),
            status: RequestStatus::Idle,
            error: None,
            count: 0,
        }
    }

    pub fn table(&self) -> &EntityTable<Post> {
        &self.table
    }

    /// Identity of the current post table.
    pub fn revision(&self) -> u64 {
        self.table.revision()
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.table.get(id)
    }

    pub fn contains(&self, id: &PostId) -> bool {
        self.table.contains(id)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Bulk fetch. Each arrival gets a date one minute older than the one
    /// before it, starting one minute before `now`.
    pub fn apply_fetch_posts(&mut self, phase: Lifecycle<Vec<RemotePost>>, now: DateTime<Utc>) {
        match phase {
            Lifecycle::Pending => {
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            Lifecycle::Fulfilled(remote_posts) => {
                let received = remote_posts.len();
                let posts: Vec<Post> = remote_posts
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, remote)| {
                        let date = now - Duration::minutes(index as i64 + 1);
                        let post = Post::from_remote(remote, date, Reactions::default());
                        if post.is_none() {
                            warn!(index, "skipping fetched post without id");
                        }
                        post
                    })
                    .collect();

                let kept = posts.len();
                let inserted = self.table.upsert_many(posts);
                self.status = RequestStatus::Succeeded;
                self.error = None;
                info!(received, kept, inserted, total = self.table.len(), "posts loaded");
            }
            Lifecycle::Rejected(reason) => {
                warn!(error = %reason, "fetching posts failed");
                self.status = RequestStatus::Failed;
                self.error = Some(reason);
            }
        }
    }

    /// Server echo of a create. Returns the id of the stored post.
    pub fn apply_add_post(&mut self, phase: Lifecycle<RemotePost>, now: DateTime<Utc>) -> Option<PostId> {
        match phase {
            Lifecycle::Pending => None,
            Lifecycle::Fulfilled(remote) => {
                let Some(post) = Post::from_remote(remote, now, Reactions::default()) else {
                    warn!("create response carried no id; post not stored");
                    return None;
                };
                let id = post.id.clone();
                if !self.table.upsert(post) {
                    debug!(post_id = %id, "create response overwrote an existing post");
                }
                info!(post_id = %id, "post added");
                Some(id)
            }
            Lifecycle::Rejected(reason) => {
                warn!(error = %reason, "adding post failed");
                None
            }
        }
    }

    /// Server echo of an update. Fields missing from the echo (title, body,
    /// reactions) are kept from the stored post.
    pub fn apply_update_post(
        &mut self,
        phase: Lifecycle<RemotePost>,
        now: DateTime<Utc>,
    ) -> Option<PostId> {
        match phase {
            Lifecycle::Pending => None,
            Lifecycle::Fulfilled(mut remote) => {
                let Some(id) = remote.id.clone() else {
                    warn!("update response carried no id; post left unchanged");
                    return None;
                };
                if let Some(existing) = self.table.get(&id) {
                    if remote.title.is_none() || remote.body.is_none() {
                        warn!(post_id = %id, "update response is partial; keeping stored fields");
                    }
                    remote.title.get_or_insert_with(|| existing.title.clone());
                    remote.body.get_or_insert_with(|| existing.body.clone());
                    remote.reactions.get_or_insert(existing.reactions);
                }
                let reactions = remote.reactions.unwrap_or_default();
                let post = Post::from_remote(remote, now, reactions)?;
                self.table.upsert(post);
                info!(post_id = %id, "post updated");
                Some(id)
            }
            Lifecycle::Rejected(reason) => {
                warn!(error = %reason, "updating post failed");
                None
            }
        }
    }

    /// Confirmed delete. Returns the removed post.
    pub fn apply_delete_post(&mut self, phase: Lifecycle<PostId>) -> Option<Post> {
        match phase {
            Lifecycle::Pending => None,
            Lifecycle::Fulfilled(id) => {
                let removed = self.table.remove(&id);
                match &removed {
                    Some(_) => info!(post_id = %id, "post deleted"),
                    None => debug!(post_id = %id, "deleted post was not in the table"),
                }
                removed
            }
            Lifecycle::Rejected(reason) => {
                warn!(error = %reason, "deleting post failed");
                None
            }
        }
    }

    /// Commit a post immediately under a fresh id, without the network.
    pub fn add_local_post(&mut self, draft: PostDraft, now: DateTime<Utc>) -> Result<PostId, ValidationError> {
        let new_post = draft.validate()?;
        let id = PostId::generate();
        self.table.upsert(Post {
            id: id.clone(),
            title: new_post.title,
            body: new_post.body,
            user_id: new_post.user_id,
            date: now,
            reactions: Reactions::default(),
        });
        debug!(post_id = %id, "local post added");
        Ok(id)
    }

    /// Bump one reaction counter. Returns false (and changes nothing) if the
    /// post is not in the table.
    pub fn add_reaction(&mut self, id: &PostId, kind: ReactionKind) -> bool {
        let applied = self
            .table
            .update(id, |post| post.reactions.increment(kind));
        if !applied {
            debug!(post_id = %id, reaction = %kind, "reaction for unknown post ignored");
        }
        applied
    }

    /// Bump the session counter. The post table is not touched.
    pub fn increase_count(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.count
    }
}
