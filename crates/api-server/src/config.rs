//! Environment configuration

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use agent_client::AgentConfig;

const DEFAULT_TOOL_SERVER_URL: &str = "http://localhost:5000";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:5174";

fn parse<T: FromStr>(raw: Option<String>) -> Option<T> {
    raw.and_then(|raw| raw.parse().ok())
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub tool_server_url: String,
    pub allowed_origins: Vec<String>,
    pub agent: AgentConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let defaults = AgentConfig::default();
        let agent = AgentConfig {
            api_key: var("OPENAI_API_KEY").unwrap_or_default(),
            base_url: var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: var("AGENT_MODEL").unwrap_or(defaults.model),
            name: var("AGENT_NAME").unwrap_or(defaults.name),
            instructions: defaults.instructions,
            timeout: parse(var("AGENT_TIMEOUT_SECS"))
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        };

        Self {
            host: parse(var("CHAT_HOST")).unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: parse(var("CHAT_PORT")).unwrap_or(3000),
            tool_server_url: var("TOOL_SERVER_URL")
                .unwrap_or_else(|| DEFAULT_TOOL_SERVER_URL.to_string()),
            allowed_origins: var("CHAT_ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            agent,
        }
    }
}
