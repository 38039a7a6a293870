use thiserror::Error;

pub type Result<T> = std::result::Result<T, MutationError>;

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("admission request has no object")]
    MissingObject,

    #[error("unsupported workload kind: {0}")]
    UnsupportedKind(String),

    #[error("cannot decode workload: {0}")]
    WorkloadDecode(#[source] serde_json::Error),

    #[error("cannot encode patch: {0}")]
    PatchEncode(#[source] serde_json::Error),
}
