//! Session: the entry point the presentation layer talks to.
//!
//! A [`Session`] owns the stores and the API client. Each remote operation
//! validates its input, records `Pending`, awaits the call and then applies
//! the terminal [`Lifecycle`] phase to the store.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::adapters::ReqwestHttpClient;
use crate::api::BlogApiClient;
use crate::config::{BoardConfig, UpdateFallback};
use crate::error::{BoardError, BoardResult, ErrorContext, NetworkError, ResultExt, ValidationError};
use crate::models::{Post, PostDraft, PostId, ReactionKind, RemotePost, User, UserId};
use crate::selectors::{self, Selectors};
use crate::store::{Lifecycle, PostStore, RequestStatus, UserStore};
use crate::traits::HttpClient;

/// Result of [`Session::update_post`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The server accepted the update and its echo was stored.
    Applied(PostId),
    /// The server call failed and the caller's input was stored instead
    /// ([`UpdateFallback::EchoInput`]).
    Fallback(PostId),
    /// The server answered without an id; nothing changed.
    Skipped,
}

impl UpdateOutcome {
    pub fn post_id(&self) -> Option<&PostId> {
        match self {
            UpdateOutcome::Applied(id) | UpdateOutcome::Fallback(id) => Some(id),
            UpdateOutcome::Skipped => None,
        }
    }
}

pub struct Session<C: HttpClient> {
    api: BlogApiClient<C>,
    config: BoardConfig,
    posts: PostStore,
    users: UserStore,
    selectors: Selectors,
}

impl Session<ReqwestHttpClient> {
    /// Build a session over the production HTTP client.
    pub fn connect(config: BoardConfig) -> BoardResult<Self> {
        let http = match config.request_timeout {
            Some(timeout) => ReqwestHttpClient::with_timeout(timeout)
                .context(ErrorContext::new("connect").with_component("session"))?,
            None => ReqwestHttpClient::new(),
        };
        Ok(Self::new(http, config))
    }
}

impl<C: HttpClient> Session<C> {
    pub fn new(http: C, config: BoardConfig) -> Self {
        let api = BlogApiClient::new(http, config.api_url.as_str());
        info!(
            api_url = %api.base_url(),
            update_fallback = %config.update_fallback,
            "session created"
        );
        Self {
            api,
            config,
            posts: PostStore::new(),
            users: UserStore::new(),
            selectors: Selectors::new(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn api(&self) -> &BlogApiClient<C> {
        &self.api
    }

    pub fn posts(&self) -> &PostStore {
        &self.posts
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    // ---- remote operations ----

    /// Load every post. On failure the post status becomes `failed` and the
    /// error is returned as well.
    pub async fn fetch_posts(&mut self) -> BoardResult<()> {
        self.posts.apply_fetch_posts(Lifecycle::Pending, Utc::now());
        let result = self.api.fetch_posts().await;
        self.finish_fetch_posts(result)
    }

    /// Replace the user list. On failure the previous list is kept.
    pub async fn fetch_users(&mut self) -> BoardResult<()> {
        self.users.apply_fetch_users(Lifecycle::Pending);
        let result = self.api.fetch_users().await;
        self.finish_fetch_users(result)
    }

    /// Fetch users and posts concurrently. Both results are applied before
    /// an error (posts first) is returned.
    pub async fn bootstrap(&mut self) -> BoardResult<()> {
        self.users.apply_fetch_users(Lifecycle::Pending);
        self.posts.apply_fetch_posts(Lifecycle::Pending, Utc::now());

        let (users, posts) = futures::join!(self.api.fetch_users(), self.api.fetch_posts());

        let users = self.finish_fetch_users(users);
        let posts = self.finish_fetch_posts(posts);
        posts.and(users)
    }

    fn finish_fetch_posts(&mut self, result: Result<Vec<RemotePost>, NetworkError>) -> BoardResult<()> {
        match result {
            Ok(remote_posts) => {
                self.posts
                    .apply_fetch_posts(Lifecycle::Fulfilled(remote_posts), Utc::now());
                Ok(())
            }
            Err(err) => {
                self.posts
                    .apply_fetch_posts(Lifecycle::Rejected(err.to_string()), Utc::now());
                Err(err).context(ErrorContext::new("fetch_posts").with_component("session"))
            }
        }
    }

    fn finish_fetch_users(&mut self, result: Result<Vec<User>, NetworkError>) -> BoardResult<()> {
        match result {
            Ok(users) => {
                self.users.apply_fetch_users(Lifecycle::Fulfilled(users));
                Ok(())
            }
            Err(err) => {
                self.users
                    .apply_fetch_users(Lifecycle::Rejected(err.to_string()));
                Err(err).context(ErrorContext::new("fetch_users").with_component("session"))
            }
        }
    }

    /// Validate a draft, create it remotely and store the server's echo.
    pub async fn add_new_post(&mut self, draft: PostDraft) -> BoardResult<PostId> {
        let ctx = || ErrorContext::new("add_post").with_component("session");
        let new_post = draft.validate().with_context(ctx)?;

        let result = self.api.create_post(&new_post).await;
        match result {
            Ok(echo) => self
                .posts
                .apply_add_post(Lifecycle::Fulfilled(echo), Utc::now())
                .ok_or_else(|| NetworkError::InvalidResponse {
                    message: "create response carried no id".to_string(),
                })
                .with_context(ctx),
            Err(err) => {
                self.posts
                    .apply_add_post(Lifecycle::Rejected(err.to_string()), Utc::now());
                Err(err).with_context(ctx)
            }
        }
    }

    /// Send an edited post and store the result.
    ///
    /// The post must already be in the store. What happens when the remote
    /// call fails depends on [`BoardConfig::update_fallback`].
    pub async fn update_post(&mut self, post: Post) -> BoardResult<UpdateOutcome> {
        let ctx = ErrorContext::new("update_post")
            .with_post_id(&post.id)
            .with_component("session");

        post.validate().context(ctx.clone())?;
        if !self.posts.contains(&post.id) {
            return Err(BoardError::from(ValidationError::UnknownPost { id: post.id.clone() })
                .with_context(ctx));
        }

        match self.api.update_post(&post).await {
            Ok(echo) => {
                let outcome = match self
                    .posts
                    .apply_update_post(Lifecycle::Fulfilled(echo), Utc::now())
                {
                    Some(id) => UpdateOutcome::Applied(id),
                    None => UpdateOutcome::Skipped,
                };
                Ok(outcome)
            }
            Err(err) => match self.config.update_fallback {
                UpdateFallback::Strict => {
                    self.posts
                        .apply_update_post(Lifecycle::Rejected(err.to_string()), Utc::now());
                    Err(err).context(ctx)
                }
                UpdateFallback::EchoInput => {
                    warn!(
                        post_id = %post.id,
                        error = %err,
                        "update failed remotely; storing local edit"
                    );
                    let echo = RemotePost::from(&post);
                    match self
                        .posts
                        .apply_update_post(Lifecycle::Fulfilled(echo), Utc::now())
                    {
                        Some(id) => Ok(UpdateOutcome::Fallback(id)),
                        None => Ok(UpdateOutcome::Skipped),
                    }
                }
            },
        }
    }

    /// Delete a post remotely, then locally. A failed call keeps the post.
    pub async fn delete_post(&mut self, id: &PostId) -> BoardResult<Post> {
        let ctx = ErrorContext::new("delete_post")
            .with_post_id(id)
            .with_component("session");

        if !self.posts.contains(id) {
            return Err(BoardError::from(ValidationError::UnknownPost { id: id.clone() })
                .with_context(ctx));
        }

        match self.api.delete_post(id).await {
            Ok(()) => self
                .posts
                .apply_delete_post(Lifecycle::Fulfilled(id.clone()))
                .ok_or_else(|| ValidationError::UnknownPost { id: id.clone() })
                .context(ctx),
            Err(err) => {
                error!(post_id = %id, error = %err, "delete failed; post kept");
                self.posts
                    .apply_delete_post(Lifecycle::Rejected(err.to_string()));
                Err(err).context(ctx)
            }
        }
    }

    // ---- local operations ----

    /// Store a post immediately under a fresh id, without the network.
    pub fn add_local_post(&mut self, draft: PostDraft) -> BoardResult<PostId> {
        self.posts
            .add_local_post(draft, Utc::now())
            .context(ErrorContext::new("add_local_post").with_component("session"))
    }

    /// Returns false if the post is unknown; nothing changes in that case.
    pub fn add_reaction(&mut self, id: &PostId, kind: ReactionKind) -> bool {
        self.posts.add_reaction(id, kind)
    }

    /// Parse a reaction name (`thumbsUp`, `wow`, ...) and apply it.
    pub fn add_reaction_named(&mut self, id: &PostId, name: &str) -> BoardResult<bool> {
        let kind: ReactionKind = name.parse().context(
            ErrorContext::new("add_reaction")
                .with_post_id(id)
                .with_component("session"),
        )?;
        Ok(self.add_reaction(id, kind))
    }

    pub fn increase_count(&mut self) -> u64 {
        self.posts.increase_count()
    }

    // ---- views ----

    pub fn post_ids(&mut self) -> Arc<[PostId]> {
        self.selectors.select_post_ids(&self.posts)
    }

    pub fn all_posts(&mut self) -> Arc<[Post]> {
        self.selectors.select_all_posts(&self.posts)
    }

    pub fn posts_by_user(&mut self, user_id: UserId) -> Arc<[Post]> {
        self.selectors.select_posts_by_user(&self.posts, user_id)
    }

    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    pub fn post(&self, id: &PostId) -> Option<&Post> {
        selectors::select_post_by_id(&self.posts, id)
    }

    pub fn all_users(&self) -> &[User] {
        selectors::select_all_users(&self.users)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        selectors::select_user_by_id(&self.users, id)
    }

    pub fn author_name(&self, user_id: UserId) -> &str {
        selectors::post_author_name(&self.users, user_id)
    }

    pub fn status(&self) -> RequestStatus {
        self.posts.status()
    }

    pub fn error(&self) -> Option<&str> {
        self.posts.error()
    }

    pub fn count(&self) -> u64 {
        self.posts.count()
    }
}
