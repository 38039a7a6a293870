use std::collections::BTreeMap;

use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};

use crate::config::SERVICE_NAME;
use crate::mutation::errors::{MutationError, Result};

pub(crate) const PRIORITY_CLASS_NAME_PATH: &str = "/spec/template/spec/priorityClassName";
pub(crate) const ANNOTATIONS_PATH: &str = "/metadata/annotations";
pub(crate) const UPDATED_BY_ANNOTATION: &str = "priorityClassWebhook/updated_by";

/// A single RFC 6902 JSON Patch operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct PatchOperation {
    pub(crate) op: PatchOp,
    pub(crate) path: String,
    pub(crate) value: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PatchOp {
    Add,
    Replace,
}

/// Builds the two-operation patch: set the pod template's priority class and
/// replace the workload annotations with a copy that carries the provenance
/// marker. The annotation replace keeps every annotation already present.
pub(crate) fn build(
    target_priority_class: &str,
    mut annotations: BTreeMap<String, String>,
) -> Vec<PatchOperation> {
    annotations.insert(UPDATED_BY_ANNOTATION.to_owned(), SERVICE_NAME.to_owned());

    vec![
        PatchOperation {
            op: PatchOp::Add,
            path: PRIORITY_CLASS_NAME_PATH.to_owned(),
            value: serde_json::Value::String(target_priority_class.to_owned()),
        },
        PatchOperation {
            op: PatchOp::Replace,
            path: ANNOTATIONS_PATH.to_owned(),
            value: serde_json::json!(annotations),
        },
    ]
}

/// Serializes the patch and base64-encodes it the way the API server expects
/// the `patch` field of an AdmissionResponse.
pub(crate) fn encode(patch: &[PatchOperation]) -> Result<String> {
    let bytes = serde_json::to_vec(patch).map_err(MutationError::PatchEncode)?;
    Ok(general_purpose::STANDARD.encode(bytes))
}
