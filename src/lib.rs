//! LinkWork Match - job and micro-gig recommendation service
//!
//! This library provides the matching engine used by the LinkWork marketplace.
//! Postings are ranked for a job seeker by skill overlap and parish-to-parish
//! distance.

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, Recommender, compute_match, distance_km, resolve_region, skill_match_fraction};
pub use crate::models::{CandidateProfile, Posting, MatchResult, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let kingston = resolve_region("Kingston").unwrap();
        assert_eq!(distance_km(kingston, kingston), 0.0);
    }
}
