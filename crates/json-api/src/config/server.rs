//! Server Config

use clap::Args;

/// Listener address settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Address the server binds to
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the server listens on
    #[arg(short, long, env = "SERVER_PORT", default_value = "8690")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// Bind address in `host:port` form.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_joins_host_and_port() {
        let config = ServerRuntimeConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
        };

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
    }
}
