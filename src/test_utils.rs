use k8s_openapi::apimachinery::pkg::runtime::RawExtension;

use crate::api::admission_review::{AdmissionRequest, GroupVersionKind, GroupVersionResource};

pub(crate) fn admission_request(kind: &str, object: serde_json::Value) -> AdmissionRequest {
    AdmissionRequest {
        uid: String::from("f0b23c24-35f6-42a3-99e3-aa4ccab85f91"),
        kind: GroupVersionKind {
            group: String::from("apps"),
            version: String::from("v1"),
            kind: kind.to_owned(),
        },
        resource: Some(GroupVersionResource {
            group: String::from("apps"),
            version: String::from("v1"),
            resource: format!("{}s", kind.to_lowercase()),
        }),
        sub_resource: None,
        request_kind: None,
        request_resource: None,
        request_sub_resource: None,
        name: object
            .pointer("/metadata/name")
            .and_then(|name| name.as_str())
            .map(ToOwned::to_owned),
        namespace: object
            .pointer("/metadata/namespace")
            .and_then(|namespace| namespace.as_str())
            .map(ToOwned::to_owned),
        operation: String::from("CREATE"),
        user_info: k8s_openapi::api::authentication::v1::UserInfo {
            username: Some(String::from("someuser@gmail.com")),
            ..Default::default()
        },
        object: Some(RawExtension(object)),
        old_object: None,
        dry_run: Some(false),
        options: None,
    }
}

pub(crate) fn workload_object(
    kind: &str,
    name: &str,
    namespace: &str,
    priority_class_name: Option<&str>,
) -> serde_json::Value {
    let mut pod_spec = serde_json::json!({
        "containers": [
            {
                "name": "nginx",
                "image": "nginx:1.27"
            }
        ]
    });
    if let Some(priority_class_name) = priority_class_name {
        pod_spec["priorityClassName"] = serde_json::json!(priority_class_name);
    }

    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": kind,
        "metadata": {
            "name": name,
            "namespace": namespace
        },
        "spec": {
            "selector": {
                "matchLabels": {
                    "app": "nginx"
                }
            },
            "template": {
                "metadata": {
                    "labels": {
                        "app": "nginx"
                    }
                },
                "spec": pod_spec
            }
        }
    })
}
