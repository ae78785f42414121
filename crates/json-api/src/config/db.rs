//! Database Config

use clap::Args;

/// Storefront database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string for the store database
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}
