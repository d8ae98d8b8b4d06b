use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use orderflow_core::ErrorResponse;
use orderflow_order::OrderError;

#[derive(Debug)]
pub enum AppError {
    Order(OrderError),
    /// Body or path could not be extracted
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        AppError::Order(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Order(err) => {
                let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!("Request failed: {}", err);
                } else {
                    tracing::info!("Request rejected: {}", err);
                }
                (
                    status,
                    ErrorResponse {
                        error_message: err.to_string(),
                        error_code: err.code().to_string(),
                    },
                )
            }
            AppError::Rejected { status, message } => {
                tracing::info!("Malformed request: {}", message);
                (
                    status,
                    ErrorResponse {
                        error_message: message,
                        error_code: "INVALID_REQUEST".to_string(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
