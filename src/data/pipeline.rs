use std::sync::Arc;

use log::info;

use crate::config::Settings;
use crate::data::coordinates::parse_coordinates;
use crate::data::distance::pairwise_distances;
use crate::data::geocode::{resolve_addresses, Geocoder};
use crate::data::models::{AddressResult, DistanceEdge, DistanceLink, DistanceReport, PointAddress};
use crate::data::validate::{check_upload, FileHeader};
use crate::error::ApiError;

/// Everything a request needs, built once at startup
pub struct Pipeline {
    settings: Settings,
    geocoder: Arc<dyn Geocoder + Send + Sync>,
}

impl Pipeline {
    pub fn new(settings: Settings, geocoder: Arc<dyn Geocoder + Send + Sync>) -> Pipeline {
        Pipeline { settings, geocoder }
    }

    pub fn check_upload(&self, file: Option<&FileHeader>) -> Result<(), ApiError> {
        check_upload(self.settings.api_key.as_deref(), file)
    }

    pub async fn run(&self, content: &[u8]) -> Result<DistanceReport, ApiError> {
        let parsed = parse_coordinates(content)?;
        info!("Parsed {} points", parsed.records.len());

        let edges = pairwise_distances(&parsed.records);
        let addresses = resolve_addresses(self.geocoder.as_ref(), &parsed.map).await?;

        Ok(assemble(addresses, edges))
    }
}

pub fn assemble(addresses: AddressResult, edges: Vec<DistanceEdge>) -> DistanceReport {
    DistanceReport {
        points: addresses
            .into_iter()
            .map(|(name, address)| PointAddress { name, address })
            .collect(),
        links: edges
            .into_iter()
            .map(|edge| DistanceLink { name: edge.name, distance: edge.distance })
            .collect(),
    }
}
