use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::RwLock;

use crate::models::{CandidateProfile, Posting, PostingDocument, PostingKind, ProfileDocument};
use crate::services::{PostingStore, ProfileStore, StoreError, StoreFilter};

/// Seed file for the memory backend, in the same document shape Appwrite returns
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub candidates: Vec<ProfileDocument>,
    #[serde(default)]
    pub jobs: Vec<PostingDocument>,
    #[serde(default)]
    pub gigs: Vec<PostingDocument>,
}

/// Process-local store for development and tests
///
/// Keeps insertion order, which is the "fetch order" the ranking stage
/// uses to break ties.
#[derive(Default)]
pub struct InMemoryStore {
    candidates: RwLock<Vec<CandidateProfile>>,
    postings: RwLock<Vec<Posting>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(candidates: Vec<CandidateProfile>, postings: Vec<Posting>) -> Self {
        Self {
            candidates: RwLock::new(candidates),
            postings: RwLock::new(postings),
        }
    }

    /// Build a store from a JSON seed file
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;
        let seed: SeedData = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;

        let store = Self::new();
        store.load_seed(seed)?;
        Ok(store)
    }

    /// Validate and upsert every seed record, returning how many were loaded
    ///
    /// A single invalid record rejects the whole seed.
    pub fn load_seed(&self, seed: SeedData) -> Result<usize, StoreError> {
        let mut loaded = 0;

        for doc in seed.candidates {
            self.upsert_candidate(CandidateProfile::try_from(doc)?)?;
            loaded += 1;
        }
        for (kind, docs) in [(PostingKind::Job, seed.jobs), (PostingKind::Gig, seed.gigs)] {
            for doc in docs {
                self.upsert_posting(doc.into_posting(kind)?)?;
                loaded += 1;
            }
        }

        tracing::info!("Seeded in-memory store with {} records", loaded);
        Ok(loaded)
    }

    /// Insert or replace a candidate
    pub fn upsert_candidate(&self, candidate: CandidateProfile) -> Result<(), StoreError> {
        let mut candidates = self.candidates.write().map_err(|_| poisoned())?;
        match candidates.iter_mut().find(|c| c.id == candidate.id) {
            Some(existing) => *existing = candidate,
            None => candidates.push(candidate),
        }
        Ok(())
    }

    /// Insert or replace a posting
    pub fn upsert_posting(&self, posting: Posting) -> Result<(), StoreError> {
        let mut postings = self.postings.write().map_err(|_| poisoned())?;
        match postings
            .iter_mut()
            .find(|p| p.id == posting.id && p.kind == posting.kind)
        {
            Some(existing) => *existing = posting,
            None => postings.push(posting),
        }
        Ok(())
    }
}

fn poisoned() -> StoreError {
    StoreError::Api("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_candidate(&self, id: &str) -> Result<Option<CandidateProfile>, StoreError> {
        let candidates = self.candidates.read().map_err(|_| poisoned())?;
        Ok(candidates.iter().find(|c| c.id == id).cloned())
    }
}

#[async_trait]
impl PostingStore for InMemoryStore {
    async fn list_postings(
        &self,
        kind: PostingKind,
        filter: &StoreFilter,
        page_limit: usize,
    ) -> Result<Vec<Posting>, StoreError> {
        let postings = self.postings.read().map_err(|_| poisoned())?;
        Ok(postings
            .iter()
            .filter(|p| p.kind == kind && filter.accepts(p))
            .take(page_limit)
            .cloned()
            .collect())
    }

    async fn get_posting(&self, kind: PostingKind, id: &str) -> Result<Option<Posting>, StoreError> {
        let postings = self.postings.read().map_err(|_| poisoned())?;
        Ok(postings
            .iter()
            .find(|p| p.kind == kind && p.id == id)
            .cloned())
    }
}
