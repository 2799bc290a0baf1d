// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod recommender;
pub mod regions;
pub mod scoring;
pub mod skills;

pub use distance::{distance_km, region_distance_km};
pub use filters::{filter_postings, matches_posting_filter, PostingFilter};
pub use matcher::{Matcher, Ranking};
pub use recommender::Recommender;
pub use regions::{normalize_region, resolve_region, Coordinates};
pub use scoring::{compute_match, compute_match_weighted, DISTANCE_WEIGHT, SKILL_WEIGHT};
pub use skills::{matched_skills, skill_match_fraction};
