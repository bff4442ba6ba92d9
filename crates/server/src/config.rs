use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    Stdio,
    Http,
}

#[derive(Parser, Debug)]
#[command(name = "brave-search-mcp-server")]
#[command(about = "MCP server for the Brave Search API", long_about = None)]
pub struct Args {
    /// Transport carrying MCP traffic
    #[arg(long, value_enum, default_value = "stdio", env = "BRAVE_MCP_TRANSPORT")]
    pub transport: Transport,

    /// Port to listen on (http transport only)
    #[arg(long, default_value = "8080", env = "BRAVE_MCP_PORT")]
    pub port: u16,

    /// Host to bind to (http transport only)
    #[arg(long, default_value = "0.0.0.0", env = "BRAVE_MCP_HOST")]
    pub host: String,

    /// Brave Search API subscription key
    #[arg(long, env = "BRAVE_API_KEY")]
    pub brave_api_key: Option<String>,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, env = "BRAVE_MCP_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    /// Validate the settings and surface the API key.
    pub fn api_key(&self) -> Result<String> {
        let Some(key) = self.brave_api_key.as_ref().filter(|k| !k.trim().is_empty())
        else {
            bail!(
                "no Brave Search API key configured; pass --brave-api-key or set \
                 BRAVE_API_KEY (get a key at https://brave.com/search/api/)"
            );
        };

        if self.transport == Transport::Http {
            if self.port == 0 {
                bail!("port must be between 1 and 65535");
            }
            if self.host.trim().is_empty() {
                bail!("host must not be empty");
            }
        }

        Ok(key.clone())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            transport: Transport::Http,
            port: 8080,
            host: "0.0.0.0".to_string(),
            brave_api_key: Some("key".to_string()),
            log_level: None,
        }
    }

    #[test]
    fn valid_settings_yield_the_key() {
        assert_eq!(args().api_key().unwrap(), "key");
    }

    #[test]
    fn missing_key_mentions_where_to_get_one() {
        let mut args = args();
        args.brave_api_key = None;
        let error = args.api_key().unwrap_err().to_string();
        assert!(error.contains("https://brave.com/search/api/"));
    }

    #[test]
    fn blank_key_is_missing() {
        let mut args = args();
        args.brave_api_key = Some("   ".to_string());
        assert!(args.api_key().is_err());
    }

    #[test]
    fn http_transport_rejects_port_zero() {
        let mut args = args();
        args.port = 0;
        assert!(args.api_key().is_err());
    }

    #[test]
    fn http_transport_rejects_empty_host() {
        let mut args = args();
        args.host = String::new();
        assert!(args.api_key().is_err());
    }

    #[test]
    fn stdio_transport_ignores_network_settings() {
        let mut args = args();
        args.transport = Transport::Stdio;
        args.port = 0;
        args.host = String::new();
        assert!(args.api_key().is_ok());
    }
}
