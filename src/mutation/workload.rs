use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{DaemonSet, Deployment};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::api::admission_review::AdmissionRequest;
use crate::mutation::errors::{MutationError, Result};

/// The workload kinds this webhook knows how to mutate. Both carry their pod
/// template under `/spec/template/spec`, which is what keeps the patch paths
/// identical across the two.
#[derive(Debug)]
pub(crate) enum Workload {
    Deployment(Deployment),
    DaemonSet(DaemonSet),
}

impl Workload {
    pub(crate) fn from_request(request: &AdmissionRequest) -> Result<Workload> {
        let object = request
            .object
            .as_ref()
            .ok_or(MutationError::MissingObject)?;

        match request.kind.kind.as_str() {
            "Deployment" => {
                let deployment: Deployment = serde_json::from_value(object.0.clone())
                    .map_err(MutationError::WorkloadDecode)?;
                Ok(Workload::Deployment(deployment))
            }
            "DaemonSet" => {
                let daemon_set: DaemonSet = serde_json::from_value(object.0.clone())
                    .map_err(MutationError::WorkloadDecode)?;
                Ok(Workload::DaemonSet(daemon_set))
            }
            other => Err(MutationError::UnsupportedKind(other.to_owned())),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Workload::Deployment(_) => "Deployment",
            Workload::DaemonSet(_) => "DaemonSet",
        }
    }

    /// `namespace/name` as used in the warning messages. Objects created with
    /// `generateName` have no name yet at admission time, fall back to that.
    pub(crate) fn display_name(&self) -> String {
        let metadata = self.metadata();
        let name = match &metadata.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => metadata.generate_name.clone().unwrap_or_default(),
        };
        let namespace = metadata.namespace.clone().unwrap_or_default();

        format!("{namespace}/{name}")
    }

    /// The priority class currently set on the pod template. An empty string
    /// means unset, mirroring how the field round-trips through the API.
    pub(crate) fn priority_class_name(&self) -> &str {
        let priority_class_name = match self {
            Workload::Deployment(deployment) => deployment
                .spec
                .as_ref()
                .and_then(|spec| spec.template.spec.as_ref())
                .and_then(|pod_spec| pod_spec.priority_class_name.as_deref()),
            Workload::DaemonSet(daemon_set) => daemon_set
                .spec
                .as_ref()
                .and_then(|spec| spec.template.spec.as_ref())
                .and_then(|pod_spec| pod_spec.priority_class_name.as_deref()),
        };

        priority_class_name.unwrap_or_default()
    }

    pub(crate) fn annotations(&self) -> BTreeMap<String, String> {
        self.metadata().annotations.clone().unwrap_or_default()
    }

    fn metadata(&self) -> &ObjectMeta {
        match self {
            Workload::Deployment(deployment) => &deployment.metadata,
            Workload::DaemonSet(daemon_set) => &daemon_set.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{admission_request, workload_object};

    #[test]
    fn decodes_a_deployment() {
        let request = admission_request(
            "Deployment",
            workload_object("Deployment", "test-deployment", "foo", None),
        );

        let workload = Workload::from_request(&request).unwrap();
        assert_eq!(workload.kind(), "Deployment");
        assert_eq!(workload.display_name(), "foo/test-deployment");
        assert_eq!(workload.priority_class_name(), "");
    }

    #[test]
    fn decodes_a_daemon_set_with_a_priority_class() {
        let request = admission_request(
            "DaemonSet",
            workload_object("DaemonSet", "test-ds", "foo", Some("system-node-critical")),
        );

        let workload = Workload::from_request(&request).unwrap();
        assert_eq!(workload.kind(), "DaemonSet");
        assert_eq!(workload.priority_class_name(), "system-node-critical");
    }

    #[test]
    fn rejects_unsupported_kinds() {
        let request = admission_request(
            "StatefulSet",
            serde_json::json!({"apiVersion": "apps/v1", "kind": "StatefulSet"}),
        );

        let error = Workload::from_request(&request).unwrap_err();
        assert!(matches!(error, MutationError::UnsupportedKind(kind) if kind == "StatefulSet"));
    }

    #[test]
    fn rejects_a_missing_object() {
        let mut request = admission_request(
            "Deployment",
            workload_object("Deployment", "test-deployment", "foo", None),
        );
        request.object = None;

        let error = Workload::from_request(&request).unwrap_err();
        assert!(matches!(error, MutationError::MissingObject));
    }

    #[test]
    fn display_name_falls_back_to_generate_name() {
        let mut object = workload_object("Deployment", "", "foo", None);
        object["metadata"]["generateName"] = serde_json::json!("test-deployment-");
        let request = admission_request("Deployment", object);

        let workload = Workload::from_request(&request).unwrap();
        assert_eq!(workload.display_name(), "foo/test-deployment-");
    }
}
