//! Normalized entity table: a map from id to entity plus a sorted id index.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Revisions are process-wide so two tables never share one.
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, AtomicOrdering::Relaxed)
}

/// A record that can live in an [`EntityTable`].
pub trait Entity: Debug {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> &Self::Id;
}

/// Ordering used for the id index.
pub type Comparator<E> = fn(&E, &E) -> Ordering;

/// Map of id -> entity with at most one entity per id.
///
/// The id index is re-sorted on every write (stable, so ties keep their
/// previous relative order). Every write also moves the table to a fresh
/// revision, which derived views use as the table's identity.
#[derive(Clone)]
pub struct EntityTable<E: Entity> {
    entities: HashMap<E::Id, E>,
    ids: Vec<E::Id>,
    compare: Option<Comparator<E>>,
    revision: u64,
}

impl<E: Entity> EntityTable<E> {
    /// Table whose ids stay in insertion order.
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            ids: Vec::new(),
            compare: None,
            revision: next_revision(),
        }
    }

    /// Table whose ids are kept sorted by `compare`.
    pub fn sorted_by(compare: Comparator<E>) -> Self {
        Self {
            compare: Some(compare),
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.entities.contains_key(id)
    }

    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.entities.get(id)
    }

    /// Ids in index order.
    pub fn ids(&self) -> &[E::Id] {
        &self.ids
    }

    /// Entities in index order.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.ids.iter().filter_map(move |id| self.entities.get(id))
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Insert or overwrite by id. Returns true if the id was new.
    pub fn upsert(&mut self, entity: E) -> bool {
        let inserted = self.put(entity);
        self.commit();
        inserted
    }

    /// Upsert a batch with a single re-sort. Returns how many ids were new.
    pub fn upsert_many(&mut self, entities: impl IntoIterator<Item = E>) -> usize {
        let inserted = entities
            .into_iter()
            .map(|entity| self.put(entity))
            .filter(|inserted| *inserted)
            .count();
        self.commit();
        inserted
    }

    /// Mutate one entity in place. Returns false if the id is absent.
    pub fn update(&mut self, id: &E::Id, f: impl FnOnce(&mut E)) -> bool {
        match self.entities.get_mut(id) {
            Some(entity) => {
                f(entity);
                self.commit();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &E::Id) -> Option<E> {
        let removed = self.entities.remove(id)?;
        self.ids.retain(|existing| existing != id);
        self.revision = next_revision();
        Some(removed)
    }

    fn put(&mut self, entity: E) -> bool {
        let id = entity.id().clone();
        let inserted = self.entities.insert(id.clone(), entity).is_none();
        if inserted {
            self.ids.push(id);
        }
        inserted
    }

    fn commit(&mut self) {
        if let Some(compare) = self.compare {
            let entities = &self.entities;
            self.ids
                .sort_by(|a, b| compare(&entities[a], &entities[b]));
        }
        self.revision = next_revision();
    }
}

impl<E: Entity> fmt::Debug for EntityTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityTable")
            .field("ids", &self.ids)
            .field("sorted", &self.compare.is_some())
            .field("revision", &self.revision)
            .finish()
    }
}

impl<E: Entity> Default for EntityTable<E> {
    fn default() -> Self {
        Self::new()
    }
}
