use std::net::SocketAddr;

use axum::Router;
use priority_class_webhook::{config::Config, WebhookServer};

pub(crate) fn default_test_config() -> Config {
    Config {
        addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
        tls_config: None,
        emit_audit_annotations: true,
        log_level: "info".to_owned(),
        log_fmt: "json".to_owned(),
        log_no_color: false,
    }
}

pub(crate) fn app(config: Config) -> Router {
    WebhookServer::new_from_config(config).router()
}

/// An AdmissionReview body for a workload in namespace `foo`, carrying one
/// pre-existing annotation so patches and audit annotations have something
/// to preserve.
pub(crate) fn admission_review_body(
    kind: &str,
    name: &str,
    operation: &str,
    priority_class_name: Option<&str>,
) -> String {
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
        "kind": "AdmissionReview",
        "apiVersion": "admission.k8s.io/v1",
        "request": {
            "uid": "f0b23c24-35f6-42a3-99e3-aa4ccab85f91",
            "kind": {"group": "apps", "version": "v1", "kind": kind},
            "resource": {
                "group": "apps",
                "version": "v1",
                "resource": format!("{}s", kind.to_lowercase())
            },
            "name": name,
            "namespace": "foo",
            "operation": operation,
            "userInfo": {
                "username": "someuser@gmail.com"
            },
            "object": {
                "apiVersion": "apps/v1",
                "kind": kind,
                "metadata": {
                    "name": name,
                    "namespace": "foo",
                    "annotations": {
                        "some_annotation": "some_value"
                    }
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
            },
            "dryRun": false
        }
    })
    .to_string()
}
