// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateProfile, MatchResult, Posting, PostingDocument, PostingKind, PostingStatus,
    ProfileDocument, RecordError, ScoringWeights,
};
pub use requests::{PostingsQuery, RecommendationsQuery, ScorePostingRequest};
pub use responses::{
    ErrorResponse, HealthResponse, PostingsResponse, RecommendationsResponse, RegionInfo,
    RegionsResponse,
};
