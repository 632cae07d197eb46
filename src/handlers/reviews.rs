use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::queries::{self, NewReview};
use crate::errors::AppError;
use crate::handlers::{decode, non_empty};
use crate::models::salon::{page_count, page_offset};
use crate::models::{Review, ReviewSummary};
use crate::state::AppState;

const DEFAULT_PER_PAGE: u32 = 10;
const MAX_PER_PAGE: u32 = 50;

// GET /api/salons/:id/reviews
#[derive(Deserialize)]
pub struct ReviewListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize)]
pub struct ReviewListResponse {
    reviews: Vec<Review>,
    pages: i64,
    current_page: u32,
    #[serde(flatten)]
    summary: ReviewSummary,
}

pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(salon_id): Path<i64>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<ReviewListResponse>, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);

    let db = state.db.lock()?;
    if !queries::salon_exists(&db, salon_id)? {
        return Err(AppError::NotFound(format!("salon {salon_id}")));
    }
    let reviews = queries::list_reviews(&db, salon_id, per_page, page_offset(page, per_page))?;
    let summary = queries::review_summary(&db, salon_id)?;

    Ok(Json(ReviewListResponse {
        reviews,
        pages: page_count(summary.total_reviews, per_page),
        current_page: page,
        summary,
    }))
}

// POST /api/salons/:id/reviews
#[derive(Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, max = 100, message = "customer_name is required"))]
    pub customer_name: String,
    #[validate(email(message = "customer_email must be a valid email address"))]
    pub customer_email: String,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Path(salon_id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let request: CreateReviewRequest = decode(body)?;
    request.validate()?;
    let title = non_empty(request.title);
    let comment = non_empty(request.comment);

    let review = {
        let db = state.db.lock()?;
        if !queries::salon_exists(&db, salon_id)? {
            return Err(AppError::NotFound(format!("salon {salon_id}")));
        }
        queries::create_review(
            &db,
            salon_id,
            &NewReview {
                customer_name: request.customer_name.trim(),
                customer_email: request.customer_email.trim(),
                rating: request.rating,
                title: title.as_deref(),
                comment: comment.as_deref(),
            },
        )?
    };
    tracing::info!(salon_id, review_id = review.id, rating = review.rating, "review created");

    Ok((StatusCode::CREATED, Json(review)))
}
