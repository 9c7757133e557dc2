use std::env;
use std::time::Duration;

use dotenv::dotenv;

use crate::error::ConfigError;

pub const DEFAULT_GEOCODE_API_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Geocoding credential. `None` keeps the server up but rejects every request.
    pub api_key: Option<String>,
    pub geocode_url: String,
    pub bind_address: String,
    pub geocode_timeout: Option<Duration>,
}

impl Settings {
    pub fn from_env() -> Result<Settings, ConfigError> {
        dotenv().ok();

        let api_key = env::var("API_KEY")
            .ok()
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty());

        let geocode_url = env::var("GEOCODE_API_URL")
            .unwrap_or_else(|_| DEFAULT_GEOCODE_API_URL.to_owned());

        let bind_address = env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned());

        let geocode_timeout = match env::var("GEOCODE_TIMEOUT_SECS") {
            Ok(secs) => Some(parse_timeout(&secs)?),
            Err(_) => None,
        };

        Ok(Settings { api_key, geocode_url, bind_address, geocode_timeout })
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|err| ConfigError {
            variable: "GEOCODE_TIMEOUT_SECS",
            reason: err.to_string(),
        })?;

    if secs == 0 {
        return Err(ConfigError {
            variable: "GEOCODE_TIMEOUT_SECS",
            reason: "must be greater than zero".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::parse_timeout;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_timeout(" 5 ").unwrap(), Duration::from_secs(5));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }
}
