use anyhow::{anyhow, Result};
use priority_class_webhook::{cli, config::Config, tracing::setup_tracing, WebhookServer};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let config = Config::from_args(&matches)?;

    setup_tracing(&config.log_level, &config.log_fmt, config.log_no_color)?;

    // Starting from rustls 0.22, each application must set its default crypto
    // provider before any TLS configuration is built.
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("cannot install default crypto provider"))?;

    let server = WebhookServer::new_from_config(config);
    server.run().await
}
