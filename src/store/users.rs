//! User store.

use std::collections::HashSet;

use tracing::{info, warn};

use super::lifecycle::Lifecycle;
use crate::models::{User, UserId};

/// Read-only author list, replaced wholesale on every successful fetch.
#[derive(Debug, Clone)]
pub struct UserStore {
    users: Vec<User>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self { users: Vec::new() }
    }

    pub fn apply_fetch_users(&mut self, phase: Lifecycle<Vec<User>>) {
        match phase {
            Lifecycle::Pending => {}
            Lifecycle::Fulfilled(mut users) => {
                let received = users.len();
                // Later duplicates of an id are dropped
                let mut seen = HashSet::new();
                users.retain(|user| seen.insert(user.id));

                self.users = users;
                info!(received, count = self.users.len(), "users loaded");
            }
            Lifecycle::Rejected(reason) => {
                warn!(error = %reason, kept = self.users.len(), "fetching users failed");
            }
        }
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: UserId, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_fetch_replaces_collection() {
        let mut store = UserStore::new();
        store.apply_fetch_users(Lifecycle::Fulfilled(vec![user(1, "Ann"), user(2, "Bo")]));
        store.apply_fetch_users(Lifecycle::Fulfilled(vec![user(3, "Cy")]));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(3).map(|u| u.name.as_str()), Some("Cy"));
        assert!(store.get(1).is_none());
    }

    #[test]
    fn test_failed_fetch_keeps_users() {
        let mut store = UserStore::new();
        store.apply_fetch_users(Lifecycle::Fulfilled(vec![user(1, "Ann")]));

        store.apply_fetch_users(Lifecycle::Pending);
        store.apply_fetch_users(Lifecycle::Rejected("offline".to_string()));

        assert_eq!(store.all(), &[user(1, "Ann")]);
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let mut store = UserStore::new();
        store.apply_fetch_users(Lifecycle::Fulfilled(vec![user(1, "Ann"), user(1, "Again")]));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().name, "Ann");
    }
}
