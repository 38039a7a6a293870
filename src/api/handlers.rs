use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use tracing::{debug, error, Span};

use crate::{
    api::{
        admission_review::{AdmissionRequest, AdmissionReviewRequest, AdmissionReviewResponse},
        api_error::ApiError,
        state::ApiServerState,
    },
    mutation::{self, errors::MutationError},
};

use super::admission_review::AdmissionResponse;

#[tracing::instrument(
    name = "mutate",
    fields(
        request_uid=tracing::field::Empty,
        host=crate::config::HOSTNAME.as_str(),
        name=tracing::field::Empty,
        namespace=tracing::field::Empty,
        operation=tracing::field::Empty,
        kind_group=tracing::field::Empty,
        kind_version=tracing::field::Empty,
        kind=tracing::field::Empty,
        allowed=tracing::field::Empty,
        mutated=tracing::field::Empty,
    ),
    skip_all)]
pub(crate) async fn mutate_handler(
    State(state): State<Arc<ApiServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AdmissionReviewResponse>, ApiError> {
    validate_content_type(&headers)?;

    debug!(admission_review = %String::from_utf8_lossy(&body));

    let admission_review: AdmissionReviewRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError {
            status: StatusCode::BAD_REQUEST,
            message: format!("could not deserialize admission review: {e}"),
        })?;
    let request = admission_review.request.ok_or_else(|| ApiError {
        status: StatusCode::BAD_REQUEST,
        message: "malformed admission review: request is null".to_owned(),
    })?;

    populate_span_with_admission_request_data(&request);

    let response = mutation::mutate(&request, &state.settings).map_err(handle_mutation_error)?;

    populate_span_with_mutation_results(&response);

    Ok(Json(AdmissionReviewResponse::new(response)))
}

pub(crate) async fn healthz_handler() -> StatusCode {
    StatusCode::OK
}

fn validate_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if content_type != mime::APPLICATION_JSON.as_ref() {
        return Err(ApiError {
            status: StatusCode::BAD_REQUEST,
            message: format!("invalid content type {content_type}, expected application/json"),
        });
    }

    Ok(())
}

fn populate_span_with_admission_request_data(adm_req: &AdmissionRequest) {
    Span::current().record("request_uid", adm_req.uid.as_str());
    Span::current().record("kind", adm_req.kind.kind.as_str());
    Span::current().record("kind_group", adm_req.kind.group.as_str());
    Span::current().record("kind_version", adm_req.kind.version.as_str());
    Span::current().record("name", adm_req.name.clone().unwrap_or_default().as_str());
    Span::current().record(
        "namespace",
        adm_req.namespace.clone().unwrap_or_default().as_str(),
    );
    Span::current().record("operation", adm_req.operation.as_str());
}

fn populate_span_with_mutation_results(response: &AdmissionResponse) {
    Span::current().record("allowed", response.allowed);
    Span::current().record("mutated", response.patch.is_some());
}

fn handle_mutation_error(error: MutationError) -> ApiError {
    error!(error = error.to_string().as_str(), "mutation error");

    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: error.to_string(),
    }
}
