//! Payment Gateway Config

use clap::Args;

/// Payment gateway settings.
#[derive(Debug, Args)]
pub struct GatewayConfig {
    /// Gateway checkout URL users are redirected to
    #[arg(long, env = "GATEWAY_URL")]
    pub gateway_url: String,

    /// Merchant secret shared with the gateway for request signing
    #[arg(long, env = "GATEWAY_SECRET", hide_env_values = true)]
    pub gateway_secret: String,
}
