use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use intown_core::{Catalog, ChargeRequest, PaymentError};
use intown_db::NewPayment;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{json_body, map_db_error, require_non_blank, ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PaymentRequest {
    pub user_id: String,
    #[serde(default)]
    pub shop_id: Option<String>,
    #[serde(default)]
    pub plan_id: Option<String>,
    pub amount: f64,
    pub method: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PaymentResponse {
    pub success: bool,
    pub transaction_id: String,
    pub message: &'static str,
    pub savings: f64,
}

fn map_payment_error(req_id: String, error: &PaymentError) -> ApiError {
    match error {
        PaymentError::InvalidAmount(_) => {
            ApiError::new(req_id, "validation_error", error.to_string())
        }
        PaymentError::Declined(_) => {
            tracing::warn!(error = %error, "payment declined");
            ApiError::new(req_id, "payment_declined", error.to_string())
        }
    }
}

/// Blank optional references are treated as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Shop and plan ids that the catalog does not know. They are recorded
/// anyway; the list only feeds a warning.
fn unknown_refs<'a>(
    catalog: &Catalog,
    shop_id: Option<&'a str>,
    plan_id: Option<&'a str>,
) -> Vec<(&'static str, &'a str)> {
    let mut unknown = Vec::new();
    if let Some(id) = shop_id.filter(|id| catalog.shop(id).is_none()) {
        unknown.push(("shopId", id));
    }
    if let Some(id) = plan_id.filter(|id| catalog.plan(id).is_none()) {
        unknown.push(("planId", id));
    }
    unknown
}

/// POST /api/payment: charge through the gateway, then record the payment.
pub(super) async fn process_payment(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let rid = &req_id.0;
    let body = json_body(rid, body)?;
    let user_id = require_non_blank(rid, "userId", &body.user_id)?;
    let method = require_non_blank(rid, "method", &body.method)?;
    let shop_id = non_blank(body.shop_id.as_deref());
    let plan_id = non_blank(body.plan_id.as_deref());
    for (field, id) in unknown_refs(&state.catalog, shop_id, plan_id) {
        tracing::warn!(field, id, "payment references an id missing from the catalog");
    }

    let charge = ChargeRequest {
        user_id: user_id.to_string(),
        shop_id: shop_id.map(String::from),
        plan_id: plan_id.map(String::from),
        amount: body.amount,
        method: method.to_string(),
    };
    let receipt = state
        .payments
        .charge(&charge)
        .await
        .map_err(|e| map_payment_error(rid.clone(), &e))?;

    intown_db::insert_payment(
        &state.pool,
        &NewPayment {
            user_id,
            shop_id,
            plan_id,
            amount: body.amount,
            method,
            transaction_id: &receipt.transaction_id,
            status: "success",
            savings: receipt.savings,
        },
    )
    .await
    .map_err(|e| map_db_error(rid.clone(), &e))?;

    Ok(Json(PaymentResponse {
        success: true,
        transaction_id: receipt.transaction_id,
        message: "Payment successful",
        savings: receipt.savings,
    }))
}
