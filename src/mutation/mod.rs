mod decision;
pub mod errors;
mod patch;
mod workload;

use tracing::info;

use crate::{
    api::admission_review::{AdmissionRequest, AdmissionResponse, PatchType},
    config::TARGET_PRIORITY_CLASS,
    mutation::{errors::Result, workload::Workload},
};

/// Knobs that change how admission responses are assembled.
#[derive(Clone, Debug)]
pub struct MutationSettings {
    pub emit_audit_annotations: bool,
}

impl Default for MutationSettings {
    fn default() -> Self {
        MutationSettings {
            emit_audit_annotations: true,
        }
    }
}

/// Evaluates an admission request against the target priority class and
/// builds the response. Requests are always allowed; the only question is
/// whether a patch and its warnings are attached.
pub fn mutate(
    request: &AdmissionRequest,
    settings: &MutationSettings,
) -> Result<AdmissionResponse> {
    let workload = Workload::from_request(request)?;

    info!(
        kind = workload.kind(),
        workload = workload.display_name().as_str(),
        operation = request.operation.as_str(),
        username = request.user_info.username.as_deref().unwrap_or_default(),
        "evaluating workload"
    );

    let decision = decision::decide(
        workload.kind(),
        &workload.display_name(),
        workload.priority_class_name(),
        TARGET_PRIORITY_CLASS,
    );

    let mut response = AdmissionResponse::allow(request.uid.clone());
    if !decision.needs_patch {
        return Ok(response);
    }

    // The audit annotations mirror what the object looked like before the
    // patch, so they are captured before the provenance marker is inserted.
    let annotations = workload.annotations();
    if settings.emit_audit_annotations && !annotations.is_empty() {
        response.audit_annotations = Some(annotations.clone());
    }

    let patch = patch::build(TARGET_PRIORITY_CLASS, annotations);
    response.patch = Some(patch::encode(&patch)?);
    response.patch_type = Some(PatchType::JSONPatch);
    response.warnings = Some(decision.warnings);

    Ok(response)
}

/// Decodes a base64 `patch` field back into its operations. Used by tests
/// and kept here so the encoding and decoding sides stay next to each other.
#[cfg(test)]
pub(crate) fn decode_patch(encoded: &str) -> serde_json::Value {
    use base64::{engine::general_purpose, Engine};

    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .expect("patch should be valid base64");
    serde_json::from_slice(&bytes).expect("patch should be valid JSON")
}
