//! In-process document store backed by `DashMap`.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::{
    Collection, DeleteResult, Document, DocumentStore, Filter, InsertOneResult, StoreError,
    UpdateResult, ID_FIELD,
};

#[derive(Debug, Clone)]
struct Stored {
    seq: u64,
    document: Document,
}

type Documents = DashMap<String, Stored>;

/// Non-persistent store. Documents live as long as the process.
///
/// Reads take the collection's shard for reading; every mutation holds it for
/// writing from the match through the write, so concurrent writers to one
/// collection are serialized.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: DashMap<Collection, Documents>,
    next_seq: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    fn insert_into(&self, docs: &Documents, id: String, mut document: Document) {
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        docs.insert(
            id,
            Stored {
                seq: self.next_seq(),
                document,
            },
        );
    }
}

/// Id of the oldest document matching `filter`. `_id` filters are a direct
/// lookup.
fn first_match(docs: &Documents, filter: &Filter) -> Option<String> {
    if let Some(Value::String(id)) = filter.fields().get(ID_FIELD) {
        return docs
            .get(id)
            .filter(|stored| filter.matches(&stored.document))
            .map(|_| id.clone());
    }

    docs.iter()
        .filter(|entry| filter.matches(&entry.value().document))
        .min_by_key(|entry| entry.value().seq)
        .map(|entry| entry.key().clone())
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        let Some(docs) = self.collections.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut hits: Vec<Stored> = docs
            .iter()
            .filter(|entry| filter.matches(&entry.value().document))
            .map(|entry| entry.value().clone())
            .collect();
        hits.sort_by_key(|stored| stored.seq);

        Ok(hits.into_iter().map(|stored| stored.document).collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let Some(docs) = self.collections.get(&collection) else {
            return Ok(None);
        };

        Ok(first_match(&docs, filter)
            .and_then(|id| docs.get(&id).map(|stored| stored.document.clone())))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<InsertOneResult, StoreError> {
        document.remove(ID_FIELD);
        let id = Uuid::new_v4().to_string();

        let docs = self.collections.entry(collection).or_default();
        self.insert_into(&docs, id.clone(), document);

        debug!(%collection, id = %id, "document inserted");
        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        mut set: Document,
        upsert: bool,
    ) -> Result<UpdateResult, StoreError> {
        set.remove(ID_FIELD);

        let docs = self.collections.entry(collection).or_default();

        if let Some(id) = first_match(&docs, filter) {
            let mut modified = false;
            if let Some(mut stored) = docs.get_mut(&id) {
                for (field, value) in set {
                    if stored.document.get(&field) != Some(&value) {
                        stored.document.insert(field, value);
                        modified = true;
                    }
                }
            }

            return Ok(UpdateResult {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateResult {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_id: None,
            });
        }

        let id = match filter.fields().get(ID_FIELD) {
            Some(Value::String(id)) => id.clone(),
            Some(other) => {
                return Err(StoreError::InvalidDocument(format!(
                    "_id must be a string, got {other}"
                )))
            }
            None => Uuid::new_v4().to_string(),
        };

        let mut document: Document = filter
            .fields()
            .iter()
            .filter(|(field, _)| field.as_str() != ID_FIELD)
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();
        document.extend(set);
        self.insert_into(&docs, id.clone(), document);

        debug!(%collection, id = %id, "document upserted");
        Ok(UpdateResult {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id),
        })
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError> {
        let docs = self.collections.entry(collection).or_default();
        let removed = first_match(&docs, filter)
            .and_then(|id| docs.remove(&id))
            .is_some();

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: u64::from(removed),
        })
    }
}
