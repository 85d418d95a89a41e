use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure delivering a notification through the mail relay.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("mail relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail relay rejected message (status={status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Visits service error variants.
#[derive(Debug, thiserror::Error)]
pub enum VisitServiceError {
    #[error("incomplete visit request")]
    InvalidInput,
    /// Covers both unknown and expired codes.
    #[error("invalid access code")]
    InvalidCode,
    /// The code was issued and stays redeemable; only the email failed.
    #[error("failed to send access code email")]
    NotificationFailed(#[source] NotifyError),
}

impl VisitServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::InvalidCode => "INVALID_CODE",
            Self::NotificationFailed(_) => "NOTIFICATION_FAILED",
        }
    }
}

impl IntoResponse for VisitServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::InvalidCode => StatusCode::FORBIDDEN,
            Self::NotificationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are already visible through the TraceLayer; only the relay
        // failure carries a cause worth logging.
        if let Self::NotificationFailed(ref e) = self {
            tracing::error!(error = %e, kind = self.kind(), "notification failed");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
