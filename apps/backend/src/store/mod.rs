//! Document storage consumed by the route layer.
//!
//! The contract mirrors a document-store driver: collections of JSON
//! objects addressed by an `_id` string, queried with field-equality
//! filters. Handlers only ever talk to [`DocumentStore`].

pub mod memory;

use std::fmt::{self, Debug};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub use memory::InMemoryStore;

/// A stored document: a JSON object. Stored documents always carry `_id`.
pub type Document = Map<String, Value>;

/// Field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Services,
    Bookings,
}

impl Collection {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Bookings => "bookings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field-equality filter. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Map<String, Value>);

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self::all().eq(ID_FIELD, id.into())
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidDocument(detail) => {
                AppError::invalid(ErrorCode::InvalidDocument, detail)
            }
            StoreError::Backend(detail) => AppError::store(detail),
        }
    }
}

#[async_trait]
pub trait DocumentStore: Debug + Send + Sync {
    /// All documents of `collection` matching `filter`, in insertion order.
    async fn find(&self, collection: Collection, filter: &Filter)
        -> Result<Vec<Document>, StoreError>;

    /// First document matching `filter`.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Store `document` under a fresh `_id`. A caller-supplied `_id` is
    /// discarded.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOneResult, StoreError>;

    /// Apply `set` to the first document matching `filter`. With `upsert`, a
    /// miss creates a document from the filter's fields plus `set`.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateResult, StoreError>;

    /// Remove the first document matching `filter`.
    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError>;
}
