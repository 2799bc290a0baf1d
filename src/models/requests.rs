use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::PostingKind;

/// Query string for the recommendations endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationsQuery {
    /// Signed so that zero and negative limits reach the matcher and yield nothing
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Request to score one posting for the authenticated candidate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScorePostingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "posting_id", alias = "jobId", rename = "postingId")]
    pub posting_id: String,
    #[serde(default = "default_kind")]
    pub kind: PostingKind,
}

fn default_kind() -> PostingKind {
    PostingKind::Job
}

/// Filters for listing open postings
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostingsQuery {
    #[serde(default)]
    pub kind: Option<PostingKind>,
    #[serde(default)]
    pub region: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "min_pay", rename = "minPay", default)]
    pub min_pay: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_pay", rename = "maxPay", default)]
    pub max_pay: Option<f64>,
    /// Comma separated skill labels
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(alias = "job_type", rename = "jobType", default)]
    pub job_type: Option<String>,
}

impl PostingsQuery {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
