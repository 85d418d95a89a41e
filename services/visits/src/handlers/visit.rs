use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VisitServiceError;
use crate::state::AppState;
use crate::usecase::visit::{
    RedeemVisitInput, RedeemVisitUseCase, RequestVisitInput, RequestVisitUseCase,
};

// Field names match what the existing front end sends.

#[derive(Deserialize)]
pub struct RequestVisitRequest {
    #[serde(default, rename = "nombre")]
    pub name: Option<String>,
    #[serde(default, rename = "correo")]
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct RedeemVisitRequest {
    #[serde(default, rename = "clave")]
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RedeemVisitResponse {
    pub ok: bool,
    /// Milliseconds left in the visit.
    #[serde(rename = "restante")]
    pub remaining_ms: i64,
    #[serde(rename = "feedback")]
    pub feedback_url: String,
}

pub async fn request_visit(
    State(state): State<AppState>,
    body: Result<Json<RequestVisitRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, VisitServiceError> {
    // A missing, non-JSON or mistyped body is an incomplete request.
    let Json(body) = body.map_err(|rejection| {
        debug!(%rejection, "unreadable visit request body");
        VisitServiceError::InvalidInput
    })?;
    let usecase = RequestVisitUseCase {
        codes: state.code_store(),
        notifier: state.notifier(),
        settings: state.settings(),
    };
    usecase
        .execute(RequestVisitInput {
            name: body.name.unwrap_or_default(),
            email: body.email.unwrap_or_default(),
        })
        .await?;
    Ok(Json(OkResponse { ok: true }))
}

pub async fn redeem_visit(
    State(state): State<AppState>,
    body: Result<Json<RedeemVisitRequest>, JsonRejection>,
) -> Result<Json<RedeemVisitResponse>, VisitServiceError> {
    // Whatever the body was, it did not carry a usable code.
    let Json(body) = body.map_err(|rejection| {
        debug!(%rejection, "unreadable redeem request body");
        VisitServiceError::InvalidCode
    })?;
    let usecase = RedeemVisitUseCase {
        codes: state.code_store(),
        settings: state.settings(),
    };
    let visit = usecase.execute(RedeemVisitInput {
        code: body.code.unwrap_or_default(),
    })?;
    Ok(Json(RedeemVisitResponse {
        ok: true,
        remaining_ms: visit.remaining.num_milliseconds(),
        feedback_url: visit.feedback_url,
    }))
}
