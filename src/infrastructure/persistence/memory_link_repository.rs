//! In-memory implementation of link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{LinkRecord, NewLink};
use crate::domain::repositories::{CreateOutcome, LinkRepository, StoreError};

/// Process-local link store backed by a sharded concurrent map.
///
/// `create` goes through the map's entry API, which holds the shard lock
/// across the presence check and the insert. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, LinkRecord>,
}

impl InMemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn exists(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.links.contains_key(code))
    }

    async fn get(&self, code: &str) -> Result<Option<LinkRecord>, StoreError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn create(&self, new_link: NewLink) -> Result<CreateOutcome, StoreError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Ok(CreateOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                let record = new_link.into_record();
                slot.insert(record.clone());
                Ok(CreateOutcome::Created(record))
            }
        }
    }
}
