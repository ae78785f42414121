//! Auth Config

use clap::Args;

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret keying session token and password digests
    #[arg(long, env = "APP_SECRET", hide_env_values = true)]
    pub app_secret: String,
}
