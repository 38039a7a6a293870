pub mod api;
pub mod cli;
pub mod config;
pub mod mutation;
pub mod tracing;

mod certs;
#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use ::tracing::info;
use anyhow::Result;
use axum::Router;

use crate::{api::state::ApiServerState, config::Config, mutation::MutationSettings};

pub struct WebhookServer {
    config: Config,
    router: Router,
}

impl WebhookServer {
    pub fn new_from_config(config: Config) -> Self {
        let state = Arc::new(ApiServerState {
            settings: MutationSettings {
                emit_audit_annotations: config.emit_audit_annotations,
            },
        });
        let router = api::router(state);

        Self { config, router }
    }

    /// The axum router serving the webhook endpoints. Useful for tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn run(self) -> Result<()> {
        match self.config.tls_config {
            Some(tls_config) => {
                let rustls_config =
                    certs::create_tls_config_and_watch_certificate_changes(tls_config).await?;

                info!(
                    address = self.config.addr.to_string().as_str(),
                    "started HTTPS server"
                );
                axum_server::bind_rustls(self.config.addr, rustls_config)
                    .serve(self.router.into_make_service())
                    .await?;
            }
            None => {
                let listener = tokio::net::TcpListener::bind(self.config.addr).await?;

                info!(
                    address = self.config.addr.to_string().as_str(),
                    "started HTTP server"
                );
                axum::serve(listener, self.router).await?;
            }
        }

        Ok(())
    }
}
