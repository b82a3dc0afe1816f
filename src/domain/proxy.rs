use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    Http,
    Https,
    Socks5,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub enabled: bool,
    pub proxy_type: ProxyType,
    pub host: String,
    pub port: u16,
}

impl ProxyConfig {
    /// Proxy address when enabled and well formed
    pub fn proxy_url(&self) -> Option<Url> {
        if !self.enabled || self.host.trim().is_empty() {
            return None;
        }
        let scheme = match self.proxy_type {
            ProxyType::Http => "http",
            ProxyType::Https => "https",
            ProxyType::Socks5 => "socks5",
        };
        Url::parse(&format!("{scheme}://{}:{}", self.host.trim(), self.port)).ok()
    }
}
