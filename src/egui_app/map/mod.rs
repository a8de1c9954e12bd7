//! Map of bar locations with marker clustering
//!
//! [`MapView`] keeps the clusters for the point set and zoom it last saw and
//! re-clusters only when either changes.

pub mod cluster;

pub use cluster::{cluster_points, project, Cluster, MapPoint, MAX_ZOOM, MIN_ZOOM};

use crate::shared::models::Bar;

pub const DEFAULT_ZOOM: u8 = 12;

/// One marker per bar that has a usable location
pub fn bar_points<'a>(bars: impl IntoIterator<Item = &'a Bar>) -> Vec<MapPoint> {
    bars.into_iter()
        .filter_map(|bar| {
            let (lat, lon) = bar.location()?;
            MapPoint::new(bar.id, lat, lon, bar.name.clone())
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct MapView {
    zoom: u8,
    /// Point ids and zoom the cached clusters were built from
    built_for: Option<(Vec<i64>, u8)>,
    clusters: Vec<Cluster>,
    rebuilds: usize,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView {
    pub fn new() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            built_for: None,
            clusters: Vec::new(),
            rebuilds: 0,
        }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom.saturating_add(1));
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom.saturating_sub(1));
    }

    /// Clusters for `points` at the current zoom
    pub fn clusters(&mut self, points: &[MapPoint]) -> &[Cluster] {
        let ids: Vec<i64> = points.iter().map(|p| p.id).collect();
        let stale = match &self.built_for {
            Some((built_ids, zoom)) => *zoom != self.zoom || *built_ids != ids,
            None => true,
        };
        if stale {
            self.clusters = cluster_points(points, self.zoom);
            tracing::debug!(
                "Re-clustered {} points into {} clusters at zoom {}",
                points.len(),
                self.clusters.len(),
                self.zoom
            );
            self.built_for = Some((ids, self.zoom));
            self.rebuilds += 1;
        }
        &self.clusters
    }

    /// How many times clustering actually ran
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}

/// Mean position of `points`, used to centre the map
pub fn centroid(points: &[MapPoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat, lon) = points.iter().fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    Some((lat / n, lon / n))
}
