use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One data row of the uploaded CSV
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRecord {
    pub point: String,
    pub coordinate: Coordinate,
}

/// Point label to coordinate, iterated in insertion order.
#[derive(Debug, Default)]
pub struct CoordinateMap {
    labels: Vec<String>,
    coordinates: HashMap<String, Coordinate>,
}

impl CoordinateMap {
    pub fn with_capacity(capacity: usize) -> CoordinateMap {
        CoordinateMap {
            labels: Vec::with_capacity(capacity),
            coordinates: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the previous coordinate if the label was already present.
    pub(crate) fn insert(&mut self, point: &str, coordinate: Coordinate) -> Option<Coordinate> {
        let previous = self.coordinates.insert(point.to_owned(), coordinate);
        if previous.is_none() {
            self.labels.push(point.to_owned());
        }
        previous
    }

    pub fn get(&self, point: &str) -> Option<&Coordinate> {
        self.coordinates.get(point)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Coordinate)> + '_ {
        self.labels
            .iter()
            .filter_map(move |label| self.coordinates.get(label).map(|c| (label.as_str(), c)))
    }
}

/// Resolved address per point, in the coordinate map's order
pub type AddressResult = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceEdge {
    pub name: String,
    pub distance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointAddress {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceLink {
    pub name: String,
    pub distance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceReport {
    pub points: Vec<PointAddress>,
    pub links: Vec<DistanceLink>,
}
