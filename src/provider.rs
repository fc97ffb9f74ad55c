//! Provider configuration: building an authenticated API client

use anyhow::{Context, Result};
use ctclient::{Client, Transport};

use crate::config::ProviderConfig;

/// Endpoint every API key may read; used to verify credentials
const AUTH_CHECK_PATH: &str = "/v3/me/cloud-access-role";

/// Build a client from validated settings and verify it can authenticate
pub fn configure(config: &ProviderConfig) -> Result<Client> {
    config.validate()?;
    let client = Client::new(&config.url, &config.apikey, config.skip_ssl_validation)
        .context("Unable to create client")?;
    if config.skip_ssl_validation {
        log::warn!("TLS certificate validation is disabled");
    }
    authenticate(client)
}

/// Like [`configure`], over a custom transport
pub fn configure_with_transport(
    config: &ProviderConfig,
    transport: impl Transport + 'static,
) -> Result<Client> {
    config.validate()?;
    let client = Client::with_transport(&config.url, &config.apikey, transport)
        .context("Unable to create client")?;
    authenticate(client)
}

fn authenticate(client: Client) -> Result<Client> {
    client
        .get_value(AUTH_CHECK_PATH)
        .context("Unable to authenticate")?;
    log::info!("Authenticated against {}", client.base_url());
    Ok(client)
}
