use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::SimulationError;

/// where the trip ledger and bike mover live and how to reach them
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    pub backend_url: String,
    pub hivemind_url: String,
    /// bearer token sent with every request
    pub token: Option<String>,
    /// per-request timeout in human-readable form, e.g. `20s` or `1m 30s`
    pub request_timeout: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend_url: String::from("http://api:8000/"),
            hivemind_url: String::from("http://bike_hivemind:8001/"),
            token: None,
            request_timeout: String::from("20s"),
        }
    }
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Result<Duration, SimulationError> {
        let timeout = humantime::parse_duration(&self.request_timeout).map_err(|e| {
            SimulationError::InvalidConfiguration(format!(
                "invalid request_timeout '{}': {e}",
                self.request_timeout
            ))
        })?;
        if timeout.is_zero() {
            return Err(SimulationError::InvalidConfiguration(String::from(
                "request_timeout must be positive",
            )));
        }
        Ok(timeout)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        for (name, url) in [
            ("backend_url", &self.backend_url),
            ("hivemind_url", &self.hivemind_url),
        ] {
            let parsed = Url::parse(url).map_err(|e| {
                SimulationError::InvalidConfiguration(format!("invalid {name} '{url}': {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
                return Err(SimulationError::InvalidConfiguration(format!(
                    "{name} '{url}' must be an http(s) URL with a host"
                )));
            }
        }
        self.request_timeout()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceConfig;
    use std::time::Duration;

    #[test]
    fn test_request_timeout() {
        let config = ServiceConfig {
            request_timeout: String::from("1m 30s"),
            ..Default::default()
        };
        assert_eq!(
            config.request_timeout().expect("valid timeout"),
            Duration::from_secs(90)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let config = ServiceConfig {
            request_timeout: String::from("soon"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        for url in ["api:8000 not a url", "api:8000", "localhost:8001/", "ftp://api:8000/"] {
            let config = ServiceConfig {
                backend_url: String::from(url),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "expected {url} to be rejected");
        }
        let config = ServiceConfig {
            hivemind_url: String::from("bike_hivemind:8001"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
