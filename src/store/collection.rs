//! One ordered collection of records with its own identifier counter.

use crate::model::{Id, Record};

/// An insertion-ordered list of records.
///
/// Identifiers come from `next_id`, which only ever moves forward: removing a
/// record never makes its identifier available again. `None` once
/// [`Id::MAX`] has been handed out.
#[derive(Debug)]
pub struct Collection<T> {
    records: Vec<T>,
    next_id: Option<Id>,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self { records: Vec::new(), next_id: Some(1) }
    }

    #[cfg(test)]
    pub(crate) fn starting_at(next_id: Id) -> Self {
        Self { records: Vec::new(), next_id: Some(next_id) }
    }

    pub fn list(&self) -> &[T] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Stamps `record` with the next identifier, appends it, and returns the
    /// stored copy. Returns `None`, storing nothing, when identifiers have run
    /// out.
    pub fn insert(&mut self, mut record: T) -> Option<T> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        record.set_id(id);
        self.records.push(record.clone());
        Some(record)
    }

    pub fn get(&self, id: Id) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// Replaces the record at `id` wholesale, keeping `id` itself.
    pub fn replace(&mut self, id: Id, mut record: T) -> Option<T> {
        let slot = self.get_mut(id)?;
        record.set_id(id);
        *slot = record.clone();
        Some(record)
    }

    /// Removes the record at `id`, shifting later records down so relative
    /// order is kept.
    pub fn remove(&mut self, id: Id) -> Option<T> {
        let pos = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(pos))
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self { Self::new() }
}
