use std::fmt::Formatter;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::config::Settings;
use crate::data::models::{AddressResult, Coordinate, CoordinateMap};

const RESULT_TYPE: &str = "street_address";

#[derive(Debug)]
pub enum GeocodeError {
    /// Non-success HTTP status from the provider
    Status(u16),
    /// Request never completed (connection, timeout, ...).
    /// Holds the error text stripped of the URL, which carries the API key.
    Transport(String),
    /// Body was not the JSON we expect
    InvalidBody(String),
    /// Body was fine but carried no usable result
    NoResults { status: String, message: Option<String> },
}

impl std::fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            GeocodeError::Status(status) => write!(f, "provider returned status {}", status),
            GeocodeError::Transport(reason) => write!(f, "request failed: {}", reason),
            GeocodeError::InvalidBody(msg) => write!(f, "unreadable body: {}", msg),
            GeocodeError::NoResults { status, message: Some(message) } => {
                write!(f, "no results (status {}: {})", status, message)
            },
            GeocodeError::NoResults { status, message: None } => {
                write!(f, "no results (status {})", status)
            },
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(error: reqwest::Error) -> Self {
        GeocodeError::Transport(error.without_url().to_string())
    }
}

/// Reverse geocoding: coordinate to a formatted street address
#[async_trait(?Send)]
pub trait Geocoder {
    async fn lookup_address(&self, coordinate: &Coordinate) -> Result<String, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
}

/// Extracts the first result's formatted address from a provider response body.
pub fn first_formatted_address(body: &[u8]) -> Result<String, GeocodeError> {
    let response: GeocodeResponse = serde_json::from_slice(body)
        .map_err(|err| GeocodeError::InvalidBody(err.to_string()))?;

    match response.results.into_iter().next() {
        Some(result) => Ok(result.formatted_address),
        None => Err(GeocodeError::NoResults {
            status: response.status.unwrap_or_else(|| "UNKNOWN".into()),
            message: response.error_message,
        }),
    }
}

/// Google Maps Geocoding API client
pub struct GoogleGeocoder {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(settings: &Settings) -> Result<GoogleGeocoder, GeocodeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.geocode_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(GoogleGeocoder {
            client: builder.build()?,
            url: settings.geocode_url.clone(),
            api_key: settings.api_key.clone().unwrap_or_default(),
        })
    }
}

#[async_trait(?Send)]
impl Geocoder for GoogleGeocoder {
    async fn lookup_address(&self, coordinate: &Coordinate) -> Result<String, GeocodeError> {
        let latlng = format!("{},{}", coordinate.latitude, coordinate.longitude);
        debug!("Looking up address for {}", latlng);

        let response = self.client
            .get(&self.url)
            .query(&[
                ("latlng", latlng.as_str()),
                ("result_type", RESULT_TYPE),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        first_formatted_address(&body)
    }
}

/// One lookup per point, sequentially. The first failure aborts the whole batch.
pub async fn resolve_addresses(
    geocoder: &dyn Geocoder,
    map: &CoordinateMap
) -> Result<AddressResult, GeocodeError> {
    let mut addresses = Vec::with_capacity(map.len());
    for (point, coordinate) in map.iter() {
        let address = geocoder.lookup_address(coordinate).await?;
        addresses.push((point.to_owned(), address));
    }
    Ok(addresses)
}
