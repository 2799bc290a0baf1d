use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a store document cannot become a typed record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("{record} is missing required field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("{record} has invalid field `{field}`: {reason}")]
    InvalidField {
        record: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// Job seeker profile as seen by the matching core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    /// Home parish; empty when the profile never set one
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Postings come from two collections with slightly different shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingKind {
    Job,
    Gig,
}

impl PostingKind {
    /// The status a fresh posting of this kind is created with
    pub fn open_status(self) -> PostingStatus {
        match self {
            PostingKind::Job => PostingStatus::Active,
            PostingKind::Gig => PostingStatus::Available,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    Active,
    Available,
    Filled,
    Expired,
    Claimed,
    Completed,
    #[serde(other)]
    Unknown,
}

impl PostingStatus {
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, PostingStatus::Active | PostingStatus::Available)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PostingStatus::Active => "active",
            PostingStatus::Available => "available",
            PostingStatus::Filled => "filled",
            PostingStatus::Expired => "expired",
            PostingStatus::Claimed => "claimed",
            PostingStatus::Completed => "completed",
            PostingStatus::Unknown => "unknown",
        }
    }
}

/// A job or micro-gig that candidates can be matched against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub id: String,
    pub kind: PostingKind,
    pub title: String,
    pub region: String,
    pub pay: f64,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: Vec<String>,
    pub status: PostingStatus,
    #[serde(rename = "jobType", default)]
    pub job_type: Option<String>,
    #[serde(rename = "ownerId", default)]
    pub owner_id: Option<String>,
}

impl Posting {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// Scored, explained outcome of comparing one candidate to one posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "postingId")]
    pub posting_id: String,
    pub score: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "skillMatchPercentage")]
    pub skill_match_percentage: f64,
    pub reasons: Vec<String>,
    pub title: String,
    pub region: String,
    pub pay: f64,
}

/// User document as stored in the `users` collection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileDocument {
    #[serde(rename = "$id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(alias = "parish", default)]
    pub region: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

impl TryFrom<ProfileDocument> for CandidateProfile {
    type Error = RecordError;

    fn try_from(doc: ProfileDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(RecordError::MissingField { record: "profile", field: "id" })?;

        Ok(CandidateProfile {
            id,
            full_name: doc.full_name,
            region: doc.region.unwrap_or_default(),
            skills: doc.skills.unwrap_or_default(),
        })
    }
}

/// Job or gig document as stored in the `jobs` / `micro_gigs` collections
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostingDocument {
    #[serde(rename = "$id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(alias = "parish", default)]
    pub region: Option<String>,
    #[serde(alias = "payment", default)]
    pub pay: Option<f64>,
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<PostingStatus>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(alias = "employer_id", alias = "agency_id", default)]
    pub owner_id: Option<String>,
}

impl PostingDocument {
    /// Validate the document into a typed posting of the given kind
    pub fn into_posting(self, kind: PostingKind) -> Result<Posting, RecordError> {
        const RECORD: &str = "posting";

        let id = required_text(self.id, RECORD, "id")?;
        let title = required_text(self.title, RECORD, "title")?;
        let region = required_text(self.region, RECORD, "region")?;
        let pay = self
            .pay
            .ok_or(RecordError::MissingField { record: RECORD, field: "pay" })?;

        if !pay.is_finite() || pay < 0.0 {
            return Err(RecordError::InvalidField {
                record: RECORD,
                field: "pay",
                reason: format!("expected a non-negative amount, got {}", pay),
            });
        }

        Ok(Posting {
            id,
            kind,
            title,
            region,
            pay,
            required_skills: self.required_skills.unwrap_or_default(),
            status: self.status.unwrap_or_else(|| kind.open_status()),
            job_type: self.job_type,
            owner_id: self.owner_id,
        })
    }
}

fn required_text(
    value: Option<String>,
    record: &'static str,
    field: &'static str,
) -> Result<String, RecordError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(RecordError::MissingField { record, field })
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skill: f64,
    pub distance: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: crate::core::scoring::SKILL_WEIGHT,
            distance: crate::core::scoring::DISTANCE_WEIGHT,
        }
    }
}
