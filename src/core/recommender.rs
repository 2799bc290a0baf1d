use std::sync::Arc;

use crate::core::matcher::{Matcher, Ranking};
use crate::models::{MatchResult, Posting, PostingKind};
use crate::services::{PostingStore, ProfileStore, StoreError, StoreFilter};

/// Default number of recommendations returned
pub const DEFAULT_LIMIT: i64 = 10;

/// Default cap on postings fetched per kind
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Fetch-then-rank orchestration over injected stores
///
/// All I/O happens before the matcher runs; ranking itself is synchronous.
#[derive(Clone)]
pub struct Recommender {
    profiles: Arc<dyn ProfileStore>,
    postings: Arc<dyn PostingStore>,
    matcher: Matcher,
    page_size: usize,
    include_gigs: bool,
}

impl Recommender {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        postings: Arc<dyn PostingStore>,
        matcher: Matcher,
    ) -> Self {
        Self {
            profiles,
            postings,
            matcher,
            page_size: DEFAULT_PAGE_SIZE,
            include_gigs: false,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Also rank open micro-gigs alongside jobs
    pub fn with_gigs(mut self, include_gigs: bool) -> Self {
        self.include_gigs = include_gigs;
        self
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn posting_store(&self) -> &Arc<dyn PostingStore> {
        &self.postings
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Top-ranked postings for a candidate
    ///
    /// An unknown candidate or an empty pool yields an empty list. Store
    /// failures other than "not found" are returned to the caller.
    pub async fn get_recommendations(
        &self,
        candidate_id: &str,
        limit: i64,
    ) -> Result<Vec<MatchResult>, StoreError> {
        Ok(self.rank_for(candidate_id, limit).await?.matches)
    }

    /// Same as [`Recommender::get_recommendations`] but keeps the scored count
    pub async fn rank_for(&self, candidate_id: &str, limit: i64) -> Result<Ranking, StoreError> {
        let empty = Ranking { matches: Vec::new(), total_scored: 0 };

        if limit <= 0 {
            tracing::debug!("Non-positive limit {} for {}, returning nothing", limit, candidate_id);
            return Ok(empty);
        }

        let candidate = match self.profiles.get_candidate(candidate_id).await {
            Ok(Some(candidate)) => candidate,
            Ok(None) | Err(StoreError::NotFound(_)) => {
                tracing::info!("Candidate {} not found, returning no recommendations", candidate_id);
                return Ok(empty);
            }
            Err(e) => return Err(e),
        };

        let pool = self.fetch_pool().await?;

        tracing::debug!("Scoring {} postings for {}", pool.len(), candidate_id);

        let ranking = self.matcher.rank(&candidate, &pool, limit);

        tracing::info!(
            "Returning {} recommendations for {} (from {} postings)",
            ranking.matches.len(),
            candidate_id,
            ranking.total_scored
        );

        Ok(ranking)
    }

    /// Open jobs first, then open gigs if enabled
    async fn fetch_pool(&self) -> Result<Vec<Posting>, StoreError> {
        let mut pool = self
            .postings
            .list_postings(PostingKind::Job, &StoreFilter::open(PostingKind::Job), self.page_size)
            .await?;
        pool.truncate(self.page_size);

        if self.include_gigs {
            let mut gigs = self
                .postings
                .list_postings(PostingKind::Gig, &StoreFilter::open(PostingKind::Gig), self.page_size)
                .await?;
            gigs.truncate(self.page_size);
            pool.extend(gigs);
        }

        Ok(pool)
    }

    /// Score one posting for a candidate
    ///
    /// Both the candidate and the posting must exist.
    pub async fn score_posting(
        &self,
        candidate_id: &str,
        kind: PostingKind,
        posting_id: &str,
    ) -> Result<MatchResult, StoreError> {
        let candidate = self
            .profiles
            .get_candidate(candidate_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Candidate {}", candidate_id)))?;

        let posting = self
            .postings
            .get_posting(kind, posting_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Posting {}", posting_id)))?;

        Ok(self.matcher.score(&candidate, &posting))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateProfile, PostingStatus};
    use crate::services::InMemoryStore;

    fn posting(id: &str, kind: PostingKind, region: &str, skills: &[&str]) -> Posting {
        Posting {
            id: id.to_string(),
            kind,
            title: id.to_string(),
            region: region.to_string(),
            pay: 1000.0,
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            status: kind.open_status(),
            job_type: None,
            owner_id: None,
        }
    }

    fn recommender(postings: Vec<Posting>) -> Recommender {
        let candidate = CandidateProfile {
            id: "seeker".to_string(),
            full_name: None,
            region: "Kingston".to_string(),
            skills: vec!["Python".to_string()],
        };
        let store = Arc::new(InMemoryStore::with_data(vec![candidate], postings));
        Recommender::new(store.clone(), store, Matcher::with_default_weights())
    }

    #[test]
    fn test_unknown_candidate_is_empty() {
        let rec = recommender(vec![posting("j1", PostingKind::Job, "Kingston", &[])]);
        let result = tokio_test::block_on(rec.get_recommendations("nobody", 10)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_gigs_excluded_by_default() {
        let rec = recommender(vec![
            posting("j1", PostingKind::Job, "Portland", &["Python"]),
            posting("g1", PostingKind::Gig, "Kingston", &["Python"]),
        ]);

        let result = tokio_test::block_on(rec.get_recommendations("seeker", 10)).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].posting_id, "j1");

        let rec = rec.with_gigs(true);
        let result = tokio_test::block_on(rec.get_recommendations("seeker", 10)).unwrap();
        let ids: Vec<_> = result.iter().map(|m| m.posting_id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "j1"]);
    }

    #[test]
    fn test_page_size_bounds_pool() {
        let postings: Vec<Posting> = (0..5)
            .map(|i| posting(&format!("j{}", i), PostingKind::Job, "Kingston", &[]))
            .collect();
        let rec = recommender(postings).with_page_size(2);

        let ranking = tokio_test::block_on(rec.rank_for("seeker", 10)).unwrap();
        assert_eq!(ranking.total_scored, 2);
    }

    #[test]
    fn test_score_posting_missing() {
        let rec = recommender(vec![]);
        let result = tokio_test::block_on(rec.score_posting("seeker", PostingKind::Job, "nope"));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_score_posting_ignores_status() {
        let mut filled = posting("j1", PostingKind::Job, "Kingston", &["Python"]);
        filled.status = PostingStatus::Filled;
        let rec = recommender(vec![filled]);

        let result = tokio_test::block_on(rec.score_posting("seeker", PostingKind::Job, "j1")).unwrap();
        assert_eq!(result.score, 1.0);
    }
}
