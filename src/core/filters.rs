use crate::core::skills::skill_match_fraction;
use crate::models::Posting;

/// In-memory constraints applied to a posting listing
///
/// Region and status equality are pushed down to the store; the remaining
/// constraints are checked here.
#[derive(Debug, Clone, Default)]
pub struct PostingFilter {
    pub min_pay: Option<f64>,
    pub max_pay: Option<f64>,
    /// Posting must require every one of these skills
    pub skills: Vec<String>,
    pub job_type: Option<String>,
}

/// Check if a posting satisfies the listing filter
#[inline]
pub fn matches_posting_filter(posting: &Posting, filter: &PostingFilter) -> bool {
    // Closed postings are never listed
    if !posting.is_open() {
        return false;
    }

    // Check pay range
    if filter.min_pay.is_some_and(|min| posting.pay < min) {
        return false;
    }
    if filter.max_pay.is_some_and(|max| posting.pay > max) {
        return false;
    }

    // Check job type
    if let Some(job_type) = &filter.job_type {
        let matches_type = posting
            .job_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(job_type));
        if !matches_type {
            return false;
        }
    }

    // Posting must ask for all requested skills
    if !filter.skills.is_empty()
        && skill_match_fraction(&posting.required_skills, &filter.skills) < 1.0 {
        return false;
    }

    true
}

/// Apply the listing filter, keeping store order
pub fn filter_postings(postings: Vec<Posting>, filter: &PostingFilter) -> Vec<Posting> {
    postings
        .into_iter()
        .filter(|posting| matches_posting_filter(posting, filter))
        .collect()
}
