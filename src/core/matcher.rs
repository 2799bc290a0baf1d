use crate::core::scoring::{compute_match_weighted, DEFAULT_MAX_DISTANCE_KM};
use crate::core::skills::matched_skills;
use crate::models::{CandidateProfile, MatchResult, Posting, ScoringWeights};

/// Result of ranking a pool of postings
#[derive(Debug)]
pub struct Ranking {
    pub matches: Vec<MatchResult>,
    /// Number of open postings that were scored
    pub total_scored: usize,
}

/// Ranks postings for a candidate
///
/// # Pipeline Stages
/// 1. Drop postings that are not open
/// 2. Score each posting (skill overlap + distance)
/// 3. Stable sort by score, descending
/// 4. Truncate to the requested limit
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    max_distance_km: f64,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, max_distance_km: f64) -> Self {
        Self { weights, max_distance_km }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_MAX_DISTANCE_KM)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Score a single posting with this matcher's weights and radius
    pub fn score(&self, candidate: &CandidateProfile, posting: &Posting) -> MatchResult {
        let result = compute_match_weighted(candidate, posting, self.max_distance_km, &self.weights);

        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(
                "Posting {} for {}: score {:.3}, matched skills {:?}",
                posting.id,
                candidate.id,
                result.score,
                matched_skills(&candidate.skills, &posting.required_skills)
            );
        }

        result
    }

    /// Rank postings for a candidate
    ///
    /// Postings with equal scores keep the order they were passed in.
    /// A non-positive `limit` yields no matches.
    ///
    /// # Arguments
    /// * `candidate` - The job seeker being matched
    /// * `postings` - Postings in fetch order
    /// * `limit` - Maximum number of matches to return
    pub fn rank(&self, candidate: &CandidateProfile, postings: &[Posting], limit: i64) -> Ranking {
        let mut scored: Vec<MatchResult> = postings
            .iter()
            .filter(|posting| posting.is_open())
            .map(|posting| self.score(candidate, posting))
            .collect();

        let total_scored = scored.len();

        // sort_by is stable, so ties stay in fetch order
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let limit = usize::try_from(limit).unwrap_or(0);
        scored.truncate(limit);

        Ranking {
            matches: scored,
            total_scored,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PostingKind, PostingStatus};

    fn candidate() -> CandidateProfile {
        CandidateProfile {
            id: "seeker".to_string(),
            full_name: Some("Test Seeker".to_string()),
            region: "Kingston".to_string(),
            skills: vec!["Python".to_string(), "React".to_string()],
        }
    }

    fn posting(id: &str, region: &str, skills: &[&str], status: PostingStatus) -> Posting {
        Posting {
            id: id.to_string(),
            kind: PostingKind::Job,
            title: format!("Job {}", id),
            region: region.to_string(),
            pay: 40000.0,
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            status,
            job_type: None,
            owner_id: None,
        }
    }

    #[test]
    fn test_rank_sorted_by_score() {
        let matcher = Matcher::with_default_weights();
        let postings = vec![
            posting("far", "Hanover", &["Python"], PostingStatus::Active),
            posting("near", "Kingston", &["Python", "React"], PostingStatus::Active),
            posting("partial", "St Andrew", &["Python", "Go"], PostingStatus::Active),
        ];

        let ranking = matcher.rank(&candidate(), &postings, 10);

        let ids: Vec<_> = ranking.matches.iter().map(|m| m.posting_id.as_str()).collect();
        assert_eq!(ids, vec!["near", "partial", "far"]);
        assert_eq!(ranking.total_scored, 3);
    }

    #[test]
    fn test_closed_postings_are_skipped() {
        let matcher = Matcher::with_default_weights();
        let postings = vec![
            posting("filled", "Kingston", &[], PostingStatus::Filled),
            posting("open", "Kingston", &[], PostingStatus::Active),
            posting("gig", "Kingston", &[], PostingStatus::Available),
            posting("claimed", "Kingston", &[], PostingStatus::Claimed),
        ];

        let ranking = matcher.rank(&candidate(), &postings, 10);

        assert_eq!(ranking.total_scored, 2);
        assert!(ranking.matches.iter().all(|m| m.posting_id == "open" || m.posting_id == "gig"));
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        let matcher = Matcher::with_default_weights();
        let postings: Vec<Posting> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| posting(id, "Portland", &["Python"], PostingStatus::Active))
            .collect();

        let ranking = matcher.rank(&candidate(), &postings, 10);

        let ids: Vec<_> = ranking.matches.iter().map(|m| m.posting_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_weights();
        let postings: Vec<Posting> = (0..20)
            .map(|i| posting(&i.to_string(), "Kingston", &["Python"], PostingStatus::Active))
            .collect();

        let ranking = matcher.rank(&candidate(), &postings, 5);

        assert_eq!(ranking.matches.len(), 5);
        assert_eq!(ranking.total_scored, 20);
    }

    #[test]
    fn test_non_positive_limit_is_empty() {
        let matcher = Matcher::with_default_weights();
        let postings = vec![posting("1", "Kingston", &[], PostingStatus::Active)];

        assert!(matcher.rank(&candidate(), &postings, 0).matches.is_empty());
        assert!(matcher.rank(&candidate(), &postings, -3).matches.is_empty());
    }
}
