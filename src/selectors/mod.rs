//! Derived views over the stores.
//!
//! List views are memoized on the post table's revision, so reading them
//! again after an unrelated change (the session counter, the user list)
//! returns the previous `Arc` without recomputing.

mod memo;

pub use memo::Memo;

use std::sync::Arc;

use crate::models::{Post, PostId, User, UserId};
use crate::store::{PostStore, UserStore};

/// Shown when a post's author is not in the user list.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

/// Memoized list views.
#[derive(Debug, Default)]
pub struct Selectors {
    post_ids: Memo<u64, Arc<[PostId]>>,
    all_posts: Memo<u64, Arc<[Post]>>,
    posts_by_user: Memo<(u64, UserId), Arc<[Post]>>,
}

impl Selectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post ids, newest first.
    pub fn select_post_ids(&mut self, posts: &PostStore) -> Arc<[PostId]> {
        self.post_ids
            .get_or_compute(posts.revision(), || Arc::from(posts.table().ids()))
    }

    /// Every post, newest first.
    pub fn select_all_posts(&mut self, posts: &PostStore) -> Arc<[Post]> {
        self.all_posts.get_or_compute(posts.revision(), || {
            posts.table().iter().cloned().collect()
        })
    }

    /// Posts written by `user_id`, in the same order as
    /// [`select_post_ids`](Self::select_post_ids). Empty for an unknown user.
    pub fn select_posts_by_user(&mut self, posts: &PostStore, user_id: UserId) -> Arc<[Post]> {
        self.posts_by_user
            .get_or_compute((posts.revision(), user_id), || {
                posts
                    .table()
                    .iter()
                    .filter(|post| post.user_id == user_id)
                    .cloned()
                    .collect()
            })
    }

    /// (hits, misses) per view: post ids, all posts, posts by user.
    pub fn stats(&self) -> [(u64, u64); 3] {
        [
            self.post_ids.stats(),
            self.all_posts.stats(),
            self.posts_by_user.stats(),
        ]
    }
}

pub fn select_post_by_id<'a>(posts: &'a PostStore, id: &PostId) -> Option<&'a Post> {
    posts.get(id)
}

pub fn select_all_users(users: &UserStore) -> &[User] {
    users.all()
}

pub fn select_user_by_id(users: &UserStore, id: UserId) -> Option<&User> {
    users.get(id)
}

/// Name of the post's author, or [`UNKNOWN_AUTHOR`].
pub fn post_author_name(users: &UserStore, user_id: UserId) -> &str {
    users
        .get(user_id)
        .map(|user| user.name.as_str())
        .unwrap_or(UNKNOWN_AUTHOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReactionKind, RemotePost};
    use crate::store::Lifecycle;
    use chrono::Utc;
    use std::collections::HashSet;

    fn remote(id: u64, user_id: UserId) -> RemotePost {
        RemotePost {
            id: Some(PostId::from(id)),
            title: Some(format!("t{}", id)),
            body: Some(format!("b{}", id)),
            user_id,
            reactions: None,
        }
    }

    fn store_with(posts: Vec<RemotePost>) -> PostStore {
        let mut store = PostStore::new();
        store.apply_fetch_posts(Lifecycle::Fulfilled(posts), Utc::now());
        store
    }

    fn users() -> UserStore {
        let mut store = UserStore::new();
        store.apply_fetch_users(Lifecycle::Fulfilled(vec![User {
            id: 1,
            name: "Leanne Graham".to_string(),
        }]));
        store
    }

    #[test]
    fn test_post_ids_are_permutation_sorted_by_date() {
        let store = store_with(vec![remote(1, 1), remote(2, 2), remote(3, 1)]);
        let mut selectors = Selectors::new();

        let ids = selectors.select_post_ids(&store);

        let key_set: HashSet<_> = store.table().ids().iter().cloned().collect();
        assert_eq!(ids.iter().cloned().collect::<HashSet<_>>(), key_set);
        let dates: Vec<_> = ids.iter().map(|id| store.get(id).unwrap().date).collect();
        assert!(dates.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_post_ids_memoized_on_revision() {
        let mut store = store_with(vec![remote(1, 1)]);
        let mut selectors = Selectors::new();

        let first = selectors.select_post_ids(&store);
        store.increase_count();
        let second = selectors.select_post_ids(&store);
        assert!(Arc::ptr_eq(&first, &second));

        store.add_reaction(&PostId::from(1), ReactionKind::Coffee);
        let third = selectors.select_post_ids(&store);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(selectors.stats()[0], (1, 2));
    }

    #[test]
    fn test_posts_by_user_filters_in_order() {
        let store = store_with(vec![remote(1, 1), remote(2, 2), remote(3, 1)]);
        let mut selectors = Selectors::new();

        let mine = selectors.select_posts_by_user(&store, 1);
        let ids: Vec<_> = mine.iter().map(|post| post.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert!(selectors.select_posts_by_user(&store, 42).is_empty());
    }

    #[test]
    fn test_posts_by_user_memoized_jointly() {
        let mut store = store_with(vec![remote(1, 1), remote(2, 2)]);
        let mut selectors = Selectors::new();

        let first = selectors.select_posts_by_user(&store, 1);
        store.increase_count();
        let again = selectors.select_posts_by_user(&store, 1);
        assert!(Arc::ptr_eq(&first, &again));

        let other = selectors.select_posts_by_user(&store, 2);
        assert_eq!(other.len(), 1);
        assert_eq!(selectors.stats()[2], (1, 2));
    }

    #[test]
    fn test_all_posts_follow_id_order() {
        let store = store_with(vec![remote(1, 1), remote(2, 2)]);
        let mut selectors = Selectors::new();

        let ids = selectors.select_post_ids(&store);
        let posts = selectors.select_all_posts(&store);
        let post_ids: Vec<_> = posts.iter().map(|post| post.id.clone()).collect();
        assert_eq!(&post_ids[..], &ids[..]);
    }

    #[test]
    fn test_lookups() {
        let store = store_with(vec![remote(1, 1)]);
        let users = users();

        assert!(select_post_by_id(&store, &PostId::from(1)).is_some());
        assert!(select_post_by_id(&store, &PostId::from(2)).is_none());
        assert_eq!(select_all_users(&users).len(), 1);
        assert_eq!(select_user_by_id(&users, 1).unwrap().name, "Leanne Graham");
        assert_eq!(post_author_name(&users, 1), "Leanne Graham");
        assert_eq!(post_author_name(&users, 9), UNKNOWN_AUTHOR);
    }
}
