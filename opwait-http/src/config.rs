//! Transport configuration

use opwait_config::domains::http::{HttpConfig as ConfigHttpConfig, ProxyConfig as ConfigProxy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP transport configuration.
///
/// Authentication headers and proxies are explicit configuration passed
/// into [`crate::HttpTransport::new`]; the transport keeps no module-level
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Maximum number of redirects to follow
    pub max_redirects: u32,

    /// User agent string
    pub user_agent: String,

    /// Whether to verify SSL certificates
    pub verify_ssl: bool,

    /// Headers attached to every request
    pub default_headers: HashMap<String, String>,

    /// Proxy configuration
    pub proxy: Option<ProxyConfig>,
}

/// Proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub http_proxy: Option<String>,
    pub https_proxy: Option<String>,
    pub no_proxy: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            user_agent: "Opwait/0.1".to_string(),
            verify_ssl: true,
            default_headers: HashMap::new(),
            proxy: None,
        }
    }
}

impl From<ConfigHttpConfig> for TransportConfig {
    fn from(config: ConfigHttpConfig) -> Self {
        Self {
            timeout: config.timeout,
            max_redirects: config.max_redirects,
            user_agent: config.user_agent,
            verify_ssl: config.verify_ssl,
            default_headers: config.default_headers,
            proxy: config.proxy.map(ProxyConfig::from),
        }
    }
}

impl From<ConfigProxy> for ProxyConfig {
    fn from(proxy: ConfigProxy) -> Self {
        Self {
            http_proxy: proxy.http_proxy,
            https_proxy: proxy.https_proxy,
            no_proxy: proxy.no_proxy,
        }
    }
}
