//! Configuration for the Solana RPC endpoint.
use eyre::eyre;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RPC_TIMEOUT_SECONDS;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RpcConfig {
    /// The RPC endpoint URL.
    pub url: String,
    /// Per-request timeout.
    pub timeout_seconds: u64,
}

impl RpcConfig {
    /// Creates a configuration with the default request timeout.
    pub fn new(url: String) -> Self {
        Self {
            url,
            timeout_seconds: DEFAULT_RPC_TIMEOUT_SECONDS,
        }
    }

    /// Validates that the URL parses and uses HTTP or HTTPS.
    pub fn validate(&self) -> Result<(), eyre::Report> {
        let url = Url::parse(&self.url).map_err(|e| eyre!("Invalid URL {}: {}", self.url, e))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(eyre!(
                "Invalid URL scheme {} for {}: Only HTTP and HTTPS are supported",
                scheme,
                mask_url(&self.url)
            )),
        }
    }
}

/// Masks a URL by showing only the scheme and host, hiding the path and query,
/// which often carry provider API keys.
///
/// - `https://rpc.example.com/v2/abc123` → `https://rpc.example.com/***`
/// - `http://localhost:8899` → `http://localhost:8899`
/// - `invalid-url` → `***`
pub fn mask_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return "***".to_string();
    };
    let Some(host) = parsed.host_str() else {
        return "***".to_string();
    };

    let origin = match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    };

    if parsed.path() == "/" && parsed.query().is_none() {
        origin
    } else {
        format!("{origin}/***")
    }
}
