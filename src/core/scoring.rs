use crate::core::{
    distance::region_distance_km,
    regions::normalize_region,
    skills::skill_match_fraction,
};
use crate::models::{CandidateProfile, MatchResult, Posting, ScoringWeights};

/// Weight of the skill-overlap term in the final score
pub const SKILL_WEIGHT: f64 = 0.6;

/// Weight of the distance term in the final score
pub const DISTANCE_WEIGHT: f64 = 0.4;

/// Radius at which the distance term reaches zero
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 50.0;

/// Skill match above this fraction earns a "Strong skill match" reason
pub const STRONG_SKILL_THRESHOLD: f64 = 0.7;

/// Distance below this many kilometers earns a "Close proximity" reason
pub const CLOSE_PROXIMITY_KM: f64 = 20.0;

/// Score a posting for a candidate with the default weights
///
/// Scoring formula:
/// score = (
///     skill_match * 0.6 +          # fraction of required skills held
///     distance_score * 0.4         # 1 at the same point, 0 at max_distance_km
/// )
pub fn compute_match(
    candidate: &CandidateProfile,
    posting: &Posting,
    max_distance_km: f64,
) -> MatchResult {
    compute_match_weighted(candidate, posting, max_distance_km, &ScoringWeights::default())
}

/// Score a posting for a candidate
pub fn compute_match_weighted(
    candidate: &CandidateProfile,
    posting: &Posting,
    max_distance_km: f64,
    weights: &ScoringWeights,
) -> MatchResult {
    // Unresolved regions count as co-located
    let distance = region_distance_km(&candidate.region, &posting.region).unwrap_or(0.0);

    let skill_match = skill_match_fraction(&candidate.skills, &posting.required_skills);
    let distance_score = calculate_distance_score(distance, max_distance_km);
    let score = skill_match * weights.skill + distance_score * weights.distance;

    let same_region = {
        let from = normalize_region(&candidate.region);
        !from.is_empty() && from == normalize_region(&posting.region)
    };

    MatchResult {
        posting_id: posting.id.clone(),
        score,
        distance_km: distance,
        skill_match_percentage: skill_match * 100.0,
        reasons: build_reasons(skill_match, distance, same_region),
        title: posting.title.clone(),
        region: posting.region.clone(),
        pay: posting.pay,
    }
}

/// Calculate distance score (0-1)
/// Linear falloff, zero at or beyond the cutoff radius
#[inline]
fn calculate_distance_score(distance_km: f64, max_distance_km: f64) -> f64 {
    if max_distance_km.is_nan() || max_distance_km <= 0.0 {
        return if distance_km == 0.0 { 1.0 } else { 0.0 };
    }

    (1.0 - distance_km / max_distance_km).max(0.0)
}

fn build_reasons(skill_match: f64, distance_km: f64, same_region: bool) -> Vec<String> {
    let mut reasons = Vec::new();

    if skill_match > STRONG_SKILL_THRESHOLD {
        reasons.push(format!("Strong skill match ({:.0}%)", skill_match * 100.0));
    }
    if distance_km < CLOSE_PROXIMITY_KM {
        reasons.push(format!("Close proximity ({:.1}km)", distance_km));
    }
    if same_region {
        reasons.push("Same region".to_string());
    }

    reasons
}
