//! Groups of boundary polygons sharing one aggregate extent.
//!
//! A hierarchy is filled once through a [`HierarchyBuilder`] and then frozen
//! into a [`BorderHierarchy`], which only answers queries. Lookups first test
//! the aggregate extent and only then ask individual members.

use geo::Coord;
use tracing::debug;

use super::BoundaryPolygon;
use crate::models::{EdgePolicy, Extent};

/// Build-phase hierarchy. Members can only be appended.
#[derive(Debug, Clone)]
pub struct HierarchyBuilder<P> {
    id: i64,
    extent: Extent,
    members: Vec<P>,
}

impl<P: BoundaryPolygon> HierarchyBuilder<P> {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            extent: Extent::EMPTY,
            members: Vec::new(),
        }
    }

    /// Add a boundary polygon and widen the aggregate extent to cover it.
    pub fn add(&mut self, polygon: P) {
        self.extent.widen(&polygon.extent());
        self.members.push(polygon);
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn members(&self) -> &[P] {
        &self.members
    }

    /// Freeze the hierarchy. No members can be added afterwards.
    pub fn build(self) -> BorderHierarchy<P> {
        debug!(
            "Hierarchy {} built with {} polygons, extent {:?}",
            self.id,
            self.members.len(),
            self.extent.to_array()
        );

        BorderHierarchy {
            id: self.id,
            extent: self.extent,
            members: self.members,
        }
    }
}

impl<P: BoundaryPolygon> Extend<P> for HierarchyBuilder<P> {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for polygon in iter {
            self.add(polygon);
        }
    }
}

/// Read-only group of boundary polygons, e.g. every ring of one country.
#[derive(Debug, Clone)]
pub struct BorderHierarchy<P> {
    id: i64,
    extent: Extent,
    members: Vec<P>,
}

impl<P: BoundaryPolygon> BorderHierarchy<P> {
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Smallest box covering every member's extent
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Members in insertion order
    pub fn members(&self) -> &[P] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if the coordinate lies strictly inside the aggregate extent.
    ///
    /// A coordinate exactly on an edge is reported as outside.
    pub fn contains_bbox(&self, coord: Coord<f64>) -> bool {
        self.extent.contains(coord)
    }

    pub fn contains_bbox_with(&self, coord: Coord<f64>, policy: EdgePolicy) -> bool {
        self.extent.contains_with(coord, policy)
    }

    /// Members whose own bounding box contains the coordinate.
    ///
    /// Returns an empty list without touching any member when an ordinate is
    /// NaN or the coordinate falls outside the aggregate extent.
    pub fn containing_polygons(&self, coord: Coord<f64>) -> Vec<&P> {
        self.collect_containing(coord, EdgePolicy::Strict, |p| p.in_bbox(coord))
    }

    /// Like [`containing_polygons`](Self::containing_polygons), but each
    /// candidate must also pass its exact containment test.
    pub fn containing_polygons_exact(&self, coord: Coord<f64>) -> Vec<&P> {
        self.collect_containing(coord, EdgePolicy::Strict, |p| {
            p.in_bbox(coord) && p.contains(coord)
        })
    }

    pub(crate) fn collect_containing<F>(
        &self,
        coord: Coord<f64>,
        policy: EdgePolicy,
        accept: F,
    ) -> Vec<&P>
    where
        F: Fn(&P) -> bool,
    {
        if coord.x.is_nan() || coord.y.is_nan() || !self.contains_bbox_with(coord, policy) {
            return Vec::new();
        }

        self.members.iter().filter(|p| accept(p)).collect()
    }
}

impl<P: BoundaryPolygon> BoundaryPolygon for BorderHierarchy<P> {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn contains(&self, coord: Coord<f64>) -> bool {
        self.contains_bbox(coord)
            && self
                .members
                .iter()
                .any(|p| p.in_bbox(coord) && p.contains(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    /// Box-shaped stand-in whose exact answer is fixed
    #[derive(Debug, Clone, PartialEq)]
    struct TestPolygon {
        name: &'static str,
        extent: Extent,
        exact: bool,
    }

    impl TestPolygon {
        fn new(name: &'static str, extent: [f64; 4], exact: bool) -> Self {
            Self {
                name,
                extent: Extent::new(extent[0], extent[1], extent[2], extent[3]),
                exact,
            }
        }
    }

    impl BoundaryPolygon for TestPolygon {
        fn extent(&self) -> Extent {
            self.extent
        }

        fn contains(&self, coord: Coord<f64>) -> bool {
            self.exact && self.extent.contains(coord)
        }
    }

    fn names(polygons: &[&TestPolygon]) -> Vec<&'static str> {
        polygons.iter().map(|p| p.name).collect()
    }

    #[test]
    fn test_empty_hierarchy() {
        let hierarchy = HierarchyBuilder::<TestPolygon>::new(7).build();

        assert_eq!(hierarchy.id(), 7);
        assert!(hierarchy.is_empty());
        assert_eq!(hierarchy.extent(), Extent::EMPTY);
        assert_eq!(hierarchy.extent().to_array(), [180.0, -180.0, 180.0, -180.0]);
        assert!(!hierarchy.contains_bbox(coord! { x: 0.0, y: 0.0 }));
        assert!(hierarchy.containing_polygons(coord! { x: 0.0, y: 0.0 }).is_empty());
    }

    #[test]
    fn test_single_member() {
        let mut builder = HierarchyBuilder::new(1);
        builder.add(TestPolygon::new("a", [-10.0, 10.0, -5.0, 5.0], true));
        let hierarchy = builder.build();

        assert_eq!(hierarchy.extent().to_array(), [-10.0, 10.0, -5.0, 5.0]);
        assert!(hierarchy.contains_bbox(coord! { x: 0.0, y: 0.0 }));
        assert!(!hierarchy.contains_bbox(coord! { x: 10.0, y: 0.0 }));
    }

    #[test]
    fn test_two_members_select_second() {
        let mut builder = HierarchyBuilder::new(2);
        builder.add(TestPolygon::new("west", [-10.0, 0.0, -5.0, 5.0], true));
        builder.add(TestPolygon::new("east", [0.0, 10.0, -5.0, 5.0], true));
        let hierarchy = builder.build();

        assert_eq!(hierarchy.extent().to_array(), [-10.0, 10.0, -5.0, 5.0]);

        let c = coord! { x: 5.0, y: 2.0 };
        assert_eq!(names(&hierarchy.containing_polygons(c)), vec!["east"]);
        assert_eq!(names(&hierarchy.containing_polygons_exact(c)), vec!["east"]);
    }

    #[test]
    fn test_edges_are_outside() {
        let mut builder = HierarchyBuilder::new(3);
        builder.add(TestPolygon::new("a", [-10.0, 10.0, -5.0, 5.0], true));
        let hierarchy = builder.build();

        for c in [
            coord! { x: -10.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 0.0, y: -5.0 },
            coord! { x: 0.0, y: 5.0 },
        ] {
            assert!(!hierarchy.contains_bbox(c));
            assert!(hierarchy.containing_polygons(c).is_empty());
            assert!(hierarchy.contains_bbox_with(c, EdgePolicy::Inclusive));
        }
    }

    #[test]
    fn test_nan_returns_empty() {
        let mut builder = HierarchyBuilder::new(4);
        builder.add(TestPolygon::new("world", [-180.0, 180.0, -90.0, 90.0], true));
        let hierarchy = builder.build();

        assert!(hierarchy.containing_polygons(coord! { x: f64::NAN, y: 0.0 }).is_empty());
        assert!(hierarchy.containing_polygons(coord! { x: 0.0, y: f64::NAN }).is_empty());
        assert!(hierarchy
            .containing_polygons_exact(coord! { x: f64::NAN, y: f64::NAN })
            .is_empty());
    }

    #[test]
    fn test_exact_filters_bbox_hits() {
        let mut builder = HierarchyBuilder::new(5);
        builder.add(TestPolygon::new("hole", [0.0, 4.0, 0.0, 4.0], false));
        builder.add(TestPolygon::new("solid", [1.0, 3.0, 1.0, 3.0], true));
        let hierarchy = builder.build();

        let c = coord! { x: 2.0, y: 2.0 };
        assert_eq!(names(&hierarchy.containing_polygons(c)), vec!["hole", "solid"]);
        assert_eq!(names(&hierarchy.containing_polygons_exact(c)), vec!["solid"]);
    }

    #[test]
    fn test_extent_monotonic_and_minimal() {
        // Deterministic pseudo-random extents
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % 3_400) as f64 / 10.0 - 170.0
        };

        let mut builder = HierarchyBuilder::new(6);
        let mut added = Vec::new();

        for _ in 0..50 {
            let (a, b, c, d) = (next(), next(), next() / 2.0, next() / 2.0);
            let polygon = TestPolygon::new("p", [a.min(b), a.max(b), c.min(d), c.max(d)], true);
            let before = builder.extent();

            builder.add(polygon.clone());
            added.push(polygon.extent);

            let after = builder.extent();
            assert!(after.covers(&before));
            assert!(after.covers(&polygon.extent));
        }

        let hierarchy = builder.build();
        let expected = [
            added.iter().map(|e| e.min_lon).fold(f64::INFINITY, f64::min),
            added.iter().map(|e| e.max_lon).fold(f64::NEG_INFINITY, f64::max),
            added.iter().map(|e| e.min_lat).fold(f64::INFINITY, f64::min),
            added.iter().map(|e| e.max_lat).fold(f64::NEG_INFINITY, f64::max),
        ];
        assert_eq!(hierarchy.extent().to_array(), expected);
        assert_eq!(hierarchy.len(), 50);
    }

    #[test]
    fn test_members_keep_insertion_order() {
        let mut builder = HierarchyBuilder::new(8);
        builder.extend([
            TestPolygon::new("c", [0.0, 1.0, 0.0, 1.0], true),
            TestPolygon::new("a", [0.0, 2.0, 0.0, 2.0], true),
            TestPolygon::new("b", [0.0, 3.0, 0.0, 3.0], true),
        ]);
        assert_eq!(builder.members().len(), 3);

        let hierarchy = builder.build();
        let order: Vec<_> = hierarchy.members().iter().map(|p| p.name).collect();
        assert_eq!(order, vec!["c", "a", "b"]);

        let hits = hierarchy.containing_polygons(coord! { x: 0.5, y: 0.5 });
        assert_eq!(names(&hits), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_phase_one_soundness() {
        let mut builder = HierarchyBuilder::new(9);
        builder.add(TestPolygon::new("a", [-3.0, 3.0, -3.0, 3.0], true));
        builder.add(TestPolygon::new("b", [2.0, 6.0, 2.0, 6.0], true));
        let hierarchy = builder.build();

        for x in -8..=8 {
            for y in -8..=8 {
                let c = coord! { x: x as f64 * 0.75, y: y as f64 * 0.75 };
                if !hierarchy.containing_polygons(c).is_empty() {
                    assert!(hierarchy.contains_bbox(c));
                }
            }
        }
    }

    #[test]
    fn test_nested_hierarchy_as_member() {
        let mut inner = HierarchyBuilder::new(10);
        inner.add(TestPolygon::new("island", [1.0, 2.0, 1.0, 2.0], true));
        let inner = inner.build();

        let mut outer = HierarchyBuilder::new(11);
        outer.add(inner);
        let outer = outer.build();

        assert_eq!(outer.extent(), Extent::new(1.0, 2.0, 1.0, 2.0));
        assert_eq!(outer.containing_polygons_exact(coord! { x: 1.5, y: 1.5 }).len(), 1);
        assert!(outer.contains(coord! { x: 1.5, y: 1.5 }));
        assert!(!outer.contains(coord! { x: 3.0, y: 1.5 }));
    }
}
