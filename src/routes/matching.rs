use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::core::{regions, Recommender};
use crate::error::ApiError;
use crate::models::{
    HealthResponse, RecommendationsQuery, RecommendationsResponse, RegionInfo, RegionsResponse,
    ScorePostingRequest,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub default_limit: i64,
    pub max_limit: i64,
}

/// Configure health, region and matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/regions", web::get().to(list_regions))
        .route("/matching/recommendations", web::get().to(get_recommendations))
        .route("/matching/score", web::post().to(score_posting));
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// GET /api/v1/regions
async fn list_regions() -> HttpResponse {
    let regions = regions::regions()
        .map(|(name, coords)| RegionInfo {
            name: name.to_string(),
            latitude: coords.latitude,
            longitude: coords.longitude,
        })
        .collect();

    HttpResponse::Ok().json(RegionsResponse { regions })
}

/// Recommendations endpoint
///
/// GET /api/v1/matching/recommendations?limit=10
///
/// Unknown candidates and empty posting pools both produce an empty list
/// with a 200 status.
async fn get_recommendations(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<RecommendationsQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query.limit.unwrap_or(state.default_limit).min(state.max_limit);

    tracing::info!("Finding recommendations for user: {}, limit: {}", user.user_id, limit);

    let ranking = state
        .recommender
        .rank_for(&user.user_id, limit)
        .await
        .map_err(|e| {
            tracing::error!("Failed to build recommendations for {}: {}", user.user_id, e);
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(RecommendationsResponse {
        total: ranking.total_scored,
        matches: ranking.matches,
    }))
}

/// Score one posting for the caller
///
/// POST /api/v1/matching/score
///
/// Request body:
/// ```json
/// {
///   "postingId": "string",
///   "kind": "job|gig"
/// }
/// ```
async fn score_posting(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<ScorePostingRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for score request: {:?}", errors);
        return Err(ApiError::bad_request("validation_failed", errors.to_string()));
    }

    let result = state
        .recommender
        .score_posting(&user.user_id, req.kind, &req.posting_id)
        .await?;

    tracing::debug!(
        "Scored posting {} for {}: {:.3}",
        req.posting_id,
        user.user_id,
        result.score
    );

    Ok(HttpResponse::Ok().json(result))
}
