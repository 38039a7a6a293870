use axum::{http::StatusCode, response::IntoResponse};

/// An error that can be returned by the API. The Kubernetes API server logs
/// the body of failed webhook calls verbatim, so this renders as plain text
/// rather than a JSON envelope.
#[derive(Debug)]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
