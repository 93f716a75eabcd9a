//! Two-tier index over border hierarchies.

use geo::Coord;
use hashbrown::HashMap;
use tracing::{debug, info};

use super::{BorderHierarchy, BoundaryPolygon, HierarchyBuilder};
use crate::config::LookupConfig;
use crate::models::EdgePolicy;

/// Collects `(hierarchy id, polygon)` pairs from a loader during startup
#[derive(Debug)]
pub struct BorderIndexBuilder<P> {
    hierarchies: Vec<HierarchyBuilder<P>>,
    /// Hierarchy id -> position in `hierarchies`
    positions: HashMap<i64, usize>,
}

impl<P: BoundaryPolygon> Default for BorderIndexBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: BoundaryPolygon> BorderIndexBuilder<P> {
    pub fn new() -> Self {
        Self {
            hierarchies: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Add a polygon to the hierarchy with the given id, creating it on first use.
    pub fn insert(&mut self, hierarchy_id: i64, polygon: P) {
        let pos = *self.positions.entry(hierarchy_id).or_insert_with(|| {
            self.hierarchies.push(HierarchyBuilder::new(hierarchy_id));
            self.hierarchies.len() - 1
        });
        self.hierarchies[pos].add(polygon);
    }

    pub fn build(self) -> BorderIndex<P> {
        self.build_with(LookupConfig::default())
    }

    pub fn build_with(self, config: LookupConfig) -> BorderIndex<P> {
        let hierarchies: Vec<BorderHierarchy<P>> = self
            .hierarchies
            .into_iter()
            .map(HierarchyBuilder::build)
            .collect();

        let polygon_count: usize = hierarchies.iter().map(BorderHierarchy::len).sum();

        info!(
            "Border index built with {} hierarchies, {} polygons",
            hierarchies.len(),
            polygon_count
        );

        BorderIndex {
            hierarchies,
            positions: self.positions,
            polygon_count,
            config,
        }
    }
}

impl<P: BoundaryPolygon> Extend<(i64, P)> for BorderIndexBuilder<P> {
    fn extend<I: IntoIterator<Item = (i64, P)>>(&mut self, iter: I) {
        for (hierarchy_id, polygon) in iter {
            self.insert(hierarchy_id, polygon);
        }
    }
}

impl<P: BoundaryPolygon> FromIterator<(i64, P)> for BorderIndexBuilder<P> {
    fn from_iter<I: IntoIterator<Item = (i64, P)>>(iter: I) -> Self {
        let mut builder = Self::new();
        builder.extend(iter);
        builder
    }
}

/// Immutable set of hierarchies, shared by reference (or `Arc`) with lookup callers.
#[derive(Debug)]
pub struct BorderIndex<P> {
    /// Hierarchies in first-seen order
    hierarchies: Vec<BorderHierarchy<P>>,
    positions: HashMap<i64, usize>,
    polygon_count: usize,
    config: LookupConfig,
}

impl<P: BoundaryPolygon> BorderIndex<P> {
    pub fn builder() -> BorderIndexBuilder<P> {
        BorderIndexBuilder::new()
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Hierarchies whose aggregate extent contains the coordinate
    pub fn lookup_hierarchies(&self, coord: Coord<f64>) -> Vec<&BorderHierarchy<P>> {
        self.hierarchies
            .iter()
            .filter(|h| h.contains_bbox_with(coord, self.config.edge_policy))
            .collect()
    }

    /// Find every polygon containing a point.
    ///
    /// Hierarchies are rejected by their aggregate extent first, then members
    /// by their own extent; with `exact` enabled the survivors must also pass
    /// the exact polygon test.
    pub fn lookup(&self, coord: Coord<f64>) -> Vec<&P> {
        self.lookup_grouped(coord)
            .into_iter()
            .flat_map(|(_, found)| found)
            .collect()
    }

    /// Like [`lookup`](Self::lookup), keeping hits grouped by hierarchy.
    /// Hierarchies without any hit are left out.
    pub fn lookup_grouped(&self, coord: Coord<f64>) -> Vec<(&BorderHierarchy<P>, Vec<&P>)> {
        let grouped: Vec<_> = self
            .hierarchies
            .iter()
            .map(|h| (h, self.containing_in(h, coord)))
            .filter(|(_, found)| !found.is_empty())
            .collect();

        debug!(
            "Border lookup at ({}, {}): hits in {} hierarchies",
            coord.x,
            coord.y,
            grouped.len()
        );

        grouped
    }

    fn containing_in<'a>(
        &self,
        hierarchy: &'a BorderHierarchy<P>,
        coord: Coord<f64>,
    ) -> Vec<&'a P> {
        let (exact, policy) = (self.config.exact, self.config.edge_policy);
        hierarchy.collect_containing(coord, policy, |p| {
            member_in_bbox(p, coord, policy) && (!exact || p.contains(coord))
        })
    }

    pub fn hierarchy(&self, id: i64) -> Option<&BorderHierarchy<P>> {
        self.positions.get(&id).map(|&pos| &self.hierarchies[pos])
    }

    pub fn hierarchies(&self) -> &[BorderHierarchy<P>] {
        &self.hierarchies
    }

    /// Number of hierarchies
    pub fn len(&self) -> usize {
        self.hierarchies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hierarchies.is_empty()
    }

    /// Total number of polygons across all hierarchies
    pub fn polygon_count(&self) -> usize {
        self.polygon_count
    }
}

/// Member-level box test; the inclusive policy bypasses `in_bbox`, which is strict.
fn member_in_bbox<P: BoundaryPolygon>(
    polygon: &P,
    coord: Coord<f64>,
    policy: EdgePolicy,
) -> bool {
    match policy {
        EdgePolicy::Strict => polygon.in_bbox(coord),
        EdgePolicy::Inclusive => polygon.extent().contains_with(coord, policy),
    }
}
