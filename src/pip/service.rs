//! Border lookup service shared between query threads.

use std::sync::Arc;

use geo::{coord, Coord};
use rayon::prelude::*;
use tracing::debug;

use super::{BorderIndex, BoundaryPolygon};

/// Cheaply clonable handle to a built [`BorderIndex`]
#[derive(Debug)]
pub struct BorderService<P> {
    index: Arc<BorderIndex<P>>,
}

impl<P> Clone for BorderService<P> {
    fn clone(&self) -> Self {
        Self {
            index: Arc::clone(&self.index),
        }
    }
}

impl<P: BoundaryPolygon> BorderService<P> {
    pub fn new(index: BorderIndex<P>) -> Self {
        Self::from_shared(Arc::new(index))
    }

    pub fn from_shared(index: Arc<BorderIndex<P>>) -> Self {
        Self { index }
    }

    /// Boundaries containing a lon/lat point
    pub fn lookup(&self, lon: f64, lat: f64) -> Vec<&P> {
        self.index.lookup(coord! { x: lon, y: lat })
    }

    /// Ids of the hierarchies (e.g. countries) containing a lon/lat point
    pub fn lookup_ids(&self, lon: f64, lat: f64) -> Vec<i64> {
        self.index
            .lookup_grouped(coord! { x: lon, y: lat })
            .into_iter()
            .map(|(hierarchy, _)| hierarchy.id())
            .collect()
    }

    /// Look up many coordinates, one result list per input in input order.
    ///
    /// Batches of at least `parallel_min_batch` coordinates are spread over
    /// the rayon thread pool.
    pub fn lookup_many(&self, coords: &[Coord<f64>]) -> Vec<Vec<&P>>
    where
        P: Sync,
    {
        let index: &BorderIndex<P> = &self.index;

        if coords.len() < index.config().parallel_min_batch {
            return coords.iter().map(|&c| index.lookup(c)).collect();
        }

        debug!("Parallel border lookup for {} coordinates", coords.len());

        coords.par_iter().map(|&c| index.lookup(c)).collect()
    }

    /// Get the underlying index (for stats/debugging)
    pub fn index(&self) -> &BorderIndex<P> {
        &self.index
    }
}
