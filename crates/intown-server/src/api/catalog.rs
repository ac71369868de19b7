//! Read-only catalog handlers: nearby shops, plans, categories.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use intown_core::{query_shops, Category, Coordinate, NearbyShop, Plan};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ShopQuery {
    pub lat: f64,
    pub lng: f64,
    pub category: Option<String>,
}

/// GET /api/shops: catalog shops nearest-first from `lat`/`lng`.
pub(super) async fn list_shops(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<ShopQuery>, QueryRejection>,
) -> Result<Json<Vec<NearbyShop>>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::new(
            req_id.0.clone(),
            "bad_request",
            format!("latitude and longitude are required: {}", rejection.body_text()),
        )
    })?;

    if !query.lat.is_finite() || !query.lng.is_finite() {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "latitude and longitude must be finite numbers",
        ));
    }

    // `category=` with no value means no filter.
    let category = query.category.as_deref().filter(|c| !c.is_empty());

    let shops = query_shops(
        &state.catalog,
        Coordinate::new(query.lat, query.lng),
        category,
    );
    tracing::debug!(
        lat = query.lat,
        lng = query.lng,
        category,
        results = shops.len(),
        "shop query"
    );

    Ok(Json(shops))
}

/// GET /api/plans
pub(super) async fn list_plans(State(state): State<AppState>) -> Json<Vec<Plan>> {
    Json(state.catalog.plans().to_vec())
}

/// GET /api/categories
pub(super) async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog.categories().to_vec())
}
