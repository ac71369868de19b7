//! Member and merchant sign-up forms, stored verbatim.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use intown_db::RegistrationKind;
use serde_json::{json, Value};

use crate::middleware::RequestId;

use super::{json_body, map_db_error, ApiError, AppState};

async fn register(
    state: &AppState,
    req_id: RequestId,
    kind: RegistrationKind,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<uuid::Uuid, ApiError> {
    let payload = json_body(&req_id.0, body)?;
    if !payload.is_object() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "registration body must be a JSON object",
        ));
    }

    let row = intown_db::insert_registration(&state.pool, kind, &payload)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    tracing::info!(%kind, id = %row.id, "registration stored");
    Ok(row.id)
}

/// POST /api/customer
pub(super) async fn register_member(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = register(&state, req_id, RegistrationKind::Member, body).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Member registered successfully",
        "memberId": id,
    })))
}

/// POST /api/merchant
pub(super) async fn register_merchant(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = register(&state, req_id, RegistrationKind::Merchant, body).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Merchant registered successfully",
        "merchantId": id,
    })))
}
