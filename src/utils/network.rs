use crate::error::{Result, StorsmokeError};
use reqwest::Client;
use std::time::Duration;

/// Configuration for the HTTP client with proper timeouts
pub struct NetworkConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(120),
            user_agent: format!("storsmoke/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create a properly configured HTTP client with timeouts
pub fn create_http_client(config: &NetworkConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| StorsmokeError::network(format!("Failed to create HTTP client: {}", e)))
}

/// Classify a reqwest transport error into a user-facing error
pub fn classify_network_error(error: &reqwest::Error, url: &str) -> StorsmokeError {
    let host = extract_host(url);

    if error.is_timeout() {
        return StorsmokeError::ConnectionTimeout(host);
    }

    if error.is_connect() {
        return StorsmokeError::network(format!(
            "Failed to connect to '{}'. Please check your network connection and the endpoint address.",
            host
        ));
    }

    let message = error.to_string().to_lowercase();
    if message.contains("ssl") || message.contains("tls") || message.contains("certificate") {
        return StorsmokeError::network(format!(
            "TLS error when connecting to '{}'. This may be due to certificate issues on the endpoint.",
            host
        ));
    }

    if let Some(status) = error.status() {
        match status.as_u16() {
            503 => {
                return StorsmokeError::network(format!(
                    "'{}' is temporarily unavailable. Please try again later.",
                    host
                ))
            }
            502 | 504 => {
                return StorsmokeError::network(format!(
                    "Gateway error when calling '{}'. The service may be experiencing issues.",
                    host
                ))
            }
            _ => {}
        }
    }

    StorsmokeError::network(format!("Network error when calling '{}': {}", host, error))
}

/// Extract the host component of a request URL for error messages
fn extract_host(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_host() {
        let url = "https://management.azure.com/subscriptions/x/resourcegroups/y";
        assert_eq!(extract_host(url), "management.azure.com");
    }

    #[test]
    fn test_extract_host_falls_back_to_input() {
        assert_eq!(extract_host("not a url"), "not a url");
    }
}
