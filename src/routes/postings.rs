use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::filters::{filter_postings, PostingFilter};
use crate::error::ApiError;
use crate::models::{PostingKind, PostingsQuery, PostingsResponse};
use crate::routes::matching::AppState;
use crate::services::StoreFilter;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/postings", web::get().to(list_postings));
}

/// List open postings
///
/// GET /api/v1/postings?kind=job&region=Kingston&minPay=30000&skills=python,sql
///
/// Region equality is evaluated by the store; pay, skills and job type are
/// filtered here.
async fn list_postings(
    state: web::Data<AppState>,
    query: web::Query<PostingsQuery>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = query.validate() {
        return Err(ApiError::bad_request("validation_failed", errors.to_string()));
    }

    if let (Some(min), Some(max)) = (query.min_pay, query.max_pay) {
        if min > max {
            return Err(ApiError::bad_request(
                "validation_failed",
                format!("minPay ({}) is greater than maxPay ({})", min, max),
            ));
        }
    }

    let kind = query.kind.unwrap_or(PostingKind::Job);
    let mut store_filter = StoreFilter::open(kind);
    if let Some(region) = query.region.as_deref().filter(|r| !r.trim().is_empty()) {
        store_filter = store_filter.with_region(region);
    }

    let recommender = &state.recommender;
    let postings = recommender
        .posting_store()
        .list_postings(kind, &store_filter, recommender.page_size())
        .await?;

    let filter = PostingFilter {
        min_pay: query.min_pay,
        max_pay: query.max_pay,
        skills: query.skill_list(),
        job_type: query.job_type.clone(),
    };
    let postings = filter_postings(postings, &filter);

    tracing::debug!("Listing {} {:?} postings", postings.len(), kind);

    Ok(HttpResponse::Ok().json(PostingsResponse {
        count: postings.len(),
        postings,
    }))
}
