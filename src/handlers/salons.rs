use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::non_empty;
use crate::models::salon::page_count;
use crate::models::{ReviewSummary, Salon, SalonSearch, SalonService, SalonStatus};
use crate::state::AppState;

const DEFAULT_PER_PAGE: u32 = 20;
const MAX_PER_PAGE: u32 = 100;

// GET /api/salons
#[derive(Deserialize)]
pub struct SalonListQuery {
    pub city: Option<String>,
    pub region: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize)]
pub struct SalonListResponse {
    salons: Vec<Salon>,
    total: i64,
    pages: i64,
    current_page: u32,
}

pub async fn list_salons(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SalonListQuery>,
) -> Result<Json<SalonListResponse>, AppError> {
    let search = SalonSearch {
        city: non_empty(query.city),
        region: non_empty(query.region),
        name: non_empty(query.search),
        page: query.page.unwrap_or(1).max(1),
        per_page: query
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE),
    };

    let (salons, total) = {
        let db = state.db.lock()?;
        queries::search_salons(&db, &search)?
    };

    Ok(Json(SalonListResponse {
        salons,
        total,
        pages: page_count(total, search.per_page),
        current_page: search.page,
    }))
}

// GET /api/salons/:id
#[derive(Serialize)]
pub struct SalonDetailResponse {
    #[serde(flatten)]
    salon: Salon,
    services: Vec<SalonService>,
    #[serde(flatten)]
    reviews: ReviewSummary,
}

pub async fn get_salon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SalonDetailResponse>, AppError> {
    let db = state.db.lock()?;
    let salon = queries::get_salon(&db, id)?
        .filter(|s| s.status == SalonStatus::Active)
        .ok_or_else(|| AppError::NotFound(format!("salon {id}")))?;
    let services = queries::list_salon_services(&db, id)?;
    let reviews = queries::review_summary(&db, id)?;

    Ok(Json(SalonDetailResponse {
        salon,
        services,
        reviews,
    }))
}
