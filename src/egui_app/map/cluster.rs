//! Grid clustering of map markers
//!
//! Points are projected to Web Mercator pixels for the current zoom and
//! bucketed into square cells of [`CLUSTER_CELL_PX`]. Every non-empty cell is
//! one cluster; a cluster of one is a plain marker.

use std::collections::HashMap;
use std::f64::consts::PI;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 18;
/// Side of a clustering cell in screen pixels
pub const CLUSTER_CELL_PX: f64 = 64.0;
const TILE_PX: f64 = 256.0;
/// Web Mercator cannot represent the poles
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub label: String,
}

impl MapPoint {
    /// `None` for coordinates outside WGS84 ranges
    pub fn new(id: i64, lat: f64, lon: f64, label: impl Into<String>) -> Option<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            tracing::debug!("Skipping point {} with invalid coordinates ({}, {})", id, lat, lon);
            return None;
        }
        Some(Self {
            id,
            lat,
            lon,
            label: label.into(),
        })
    }

    /// Great-circle distance in kilometres
    pub fn distance_km(&self, other: &MapPoint) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Mean of the member coordinates
    pub center: (f64, f64),
    pub members: Vec<MapPoint>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.members.len() == 1
    }

    /// Distance from the center to the farthest member
    pub fn spread_km(&self) -> f64 {
        let (lat, lon) = self.center;
        let center = MapPoint {
            id: 0,
            lat,
            lon,
            label: String::new(),
        };
        self.members.iter().map(|m| center.distance_km(m)).fold(0.0, f64::max)
    }
}

/// Pixel position of a coordinate in the world map at `zoom`
pub fn project(lat: f64, lon: f64, zoom: u8) -> (f64, f64) {
    let scale = TILE_PX * f64::from(1u32 << zoom.min(MAX_ZOOM));
    let lat = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (lon + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    (x, y)
}

/// Group `points` into clusters for `zoom`. Clusters come out in the order of
/// their first member in `points`, members keep input order.
pub fn cluster_points(points: &[MapPoint], zoom: u8) -> Vec<Cluster> {
    let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    let mut cells: HashMap<(i64, i64), usize> = HashMap::new();
    let mut clusters: Vec<Cluster> = Vec::new();

    for point in points {
        let (x, y) = project(point.lat, point.lon, zoom);
        let cell = ((x / CLUSTER_CELL_PX).floor() as i64, (y / CLUSTER_CELL_PX).floor() as i64);
        match cells.get(&cell) {
            Some(&index) => clusters[index].members.push(point.clone()),
            None => {
                cells.insert(cell, clusters.len());
                clusters.push(Cluster {
                    center: (point.lat, point.lon),
                    members: vec![point.clone()],
                });
            }
        }
    }

    for cluster in &mut clusters {
        let n = cluster.members.len() as f64;
        let (lat, lon) = cluster
            .members
            .iter()
            .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
        cluster.center = (lat / n, lon / n);
    }
    clusters
}
