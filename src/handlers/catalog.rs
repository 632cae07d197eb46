use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Service;
use crate::state::AppState;

// GET /api/services
#[derive(Deserialize)]
pub struct CatalogQuery {
    pub bio_diamond: Option<bool>,
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = {
        let db = state.db.lock()?;
        queries::list_services(&db, query.bio_diamond.unwrap_or(false))?
    };
    Ok(Json(services))
}
