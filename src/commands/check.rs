use anyhow::Result;
use ctclient::Client;

use crate::Context;
use crate::provider;
use crate::ui;

/// Verify the configured credentials against the server
pub fn run(ctx: &Context) -> Result<()> {
    let config = super::load_config(ctx)?;

    if !ctx.quiet {
        ui::header("Provider");
        ui::kv("url", &config.url);
        ui::kv("skip_ssl_validation", &config.skip_ssl_validation.to_string());
    }

    let client = provider::configure(&config)?;
    if let Some(message) = confirmation(ctx, &client) {
        ui::success(&message);
    }
    Ok(())
}

/// The success line, unless output is quiet
fn confirmation(ctx: &Context, client: &Client) -> Option<String> {
    (!ctx.quiet).then(|| format!("Authenticated against {}", client.base_url()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overrides;
    use ctclient::MockTransport;

    fn context(quiet: bool) -> Context {
        Context {
            quiet,
            config: None,
            overrides: Overrides::default(),
        }
    }

    #[test]
    fn test_confirmation_respects_quiet() {
        let client =
            Client::with_transport("https://ct.example.com", "key", MockTransport::new()).unwrap();

        let message = confirmation(&context(false), &client).unwrap();
        assert!(message.starts_with("Authenticated against https://ct.example.com"));
        assert!(confirmation(&context(true), &client).is_none());
    }
}
