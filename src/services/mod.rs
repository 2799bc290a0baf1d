// Service exports
pub mod appwrite;
pub mod memory;

pub use appwrite::{AppwriteCollections, AppwriteStore};
pub use memory::{InMemoryStore, SeedData};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CandidateProfile, Posting, PostingKind, PostingStatus, RecordError};

/// Errors that can occur when talking to a profile or posting store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("Seed file error: {0}")]
    Seed(String),
}

/// Equality constraints a store can evaluate on its side
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreFilter {
    pub region: Option<String>,
    pub status: Option<PostingStatus>,
}

impl StoreFilter {
    /// Only postings that are open for the given kind
    pub fn open(kind: PostingKind) -> Self {
        Self {
            region: None,
            status: Some(kind.open_status()),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Whether a posting satisfies this filter
    pub fn accepts(&self, posting: &Posting) -> bool {
        self.status.map_or(true, |status| posting.status == status)
            && self.region.as_deref().map_or(true, |region| posting.region == region)
    }
}

/// Source of candidate profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a candidate by id; `Ok(None)` when no such profile exists
    async fn get_candidate(&self, id: &str) -> Result<Option<CandidateProfile>, StoreError>;
}

/// Source of job and gig postings
#[async_trait]
pub trait PostingStore: Send + Sync {
    /// List postings of one kind matching `filter`, at most `page_limit` of them,
    /// in store order
    async fn list_postings(
        &self,
        kind: PostingKind,
        filter: &StoreFilter,
        page_limit: usize,
    ) -> Result<Vec<Posting>, StoreError>;

    /// Fetch a single posting by id
    async fn get_posting(&self, kind: PostingKind, id: &str) -> Result<Option<Posting>, StoreError>;
}
