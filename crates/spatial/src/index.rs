//! SpatialIndex: named collection of k-d trees
//!
//! ## Design
//!
//! - Each name maps to one immutable tree, either planar (2-D points) or
//!   volumetric (3-D "triangles")
//! - Re-ingesting under an existing name builds a fresh tree and swaps it in
//!   wholesale; there is no incremental insert
//! - Trees are built outside the lock and published behind an `Arc`, so a
//!   search that started before a swap finishes against the complete old tree
//!
//! ## Thread Safety
//!
//! The name map is guarded by a `parking_lot::RwLock`. Publishing takes the
//! write lock; lookups take the read lock only long enough to clone the `Arc`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use magnetic_core::{Dist, MagneticError, Point, Point3, Result};

use crate::kdtree::KdTree;

/// One named spatial partition
#[derive(Debug)]
enum SpatialTree {
    Planar(KdTree<2, Point>),
    Volumetric(KdTree<3, Point3>),
}

impl SpatialTree {
    fn dimension(&self) -> usize {
        match self {
            SpatialTree::Planar(_) => 2,
            SpatialTree::Volumetric(_) => 3,
        }
    }

    fn len(&self) -> usize {
        match self {
            SpatialTree::Planar(t) => t.len(),
            SpatialTree::Volumetric(t) => t.len(),
        }
    }
}

/// Named 2-D / 3-D point sets queryable by radius
#[derive(Debug, Default)]
pub struct SpatialIndex {
    trees: RwLock<HashMap<String, Arc<SpatialTree>>>,
}

fn check_finite(coords: &[f64]) -> Result<()> {
    if coords.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(MagneticError::invalid_input(
            "point coordinates must be finite",
        ))
    }
}

impl SpatialIndex {
    /// Create an empty spatial index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a 2-D tree over `points` under `name`, replacing any previous one
    pub fn put_points(&self, name: &str, points: Vec<Point>) -> Result<()> {
        if points.is_empty() {
            return Err(MagneticError::EmptyPointSet);
        }
        let mut entries = Vec::with_capacity(points.len());
        for p in points {
            let coords = p.coords();
            check_finite(&coords)?;
            entries.push((coords, p));
        }
        let tree = KdTree::build(entries);
        debug!(target: "magnetic::spatial", name, points = tree.len(), "Built planar tree");
        self.publish(name, SpatialTree::Planar(tree));
        Ok(())
    }

    /// Build a 3-D tree over `points` under `name`, replacing any previous one
    pub fn put_triangles(&self, name: &str, points: Vec<Point3>) -> Result<()> {
        if points.is_empty() {
            return Err(MagneticError::EmptyPointSet);
        }
        let mut entries = Vec::with_capacity(points.len());
        for p in points {
            let coords = p.coords();
            check_finite(&coords)?;
            entries.push((coords, p));
        }
        let tree = KdTree::build(entries);
        debug!(target: "magnetic::spatial", name, points = tree.len(), "Built volumetric tree");
        self.publish(name, SpatialTree::Volumetric(tree));
        Ok(())
    }

    fn publish(&self, name: &str, tree: SpatialTree) {
        self.trees.write().insert(name.to_string(), Arc::new(tree));
    }

    fn tree(&self, name: &str) -> Result<Arc<SpatialTree>> {
        self.trees
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| MagneticError::SpatialTreeNotFound(name.to_string()))
    }

    /// All 2-D points within `radius` of `query`
    ///
    /// Fails with `NotFound` when nothing matches and with
    /// `DimensionMismatch` when `name` holds a 3-D set.
    pub fn search_points(&self, name: &str, query: &Point, radius: f64) -> Result<Vec<Point>> {
        let tree = self.tree(name)?;
        let hits: Vec<Point> = match tree.as_ref() {
            SpatialTree::Planar(t) => t
                .within_radius(&query.coords(), radius)
                .into_iter()
                .cloned()
                .collect(),
            other => {
                return Err(MagneticError::DimensionMismatch {
                    expected: other.dimension(),
                    actual: 2,
                })
            }
        };
        trace!(target: "magnetic::spatial", name, radius, hits = hits.len(), "Radius search");
        if hits.is_empty() {
            return Err(MagneticError::NotFound);
        }
        Ok(hits)
    }

    /// All 3-D points within `radius` of `query`
    pub fn search_triangles(
        &self,
        name: &str,
        query: &Point3,
        radius: f64,
    ) -> Result<Vec<Point3>> {
        let tree = self.tree(name)?;
        let hits: Vec<Point3> = match tree.as_ref() {
            SpatialTree::Volumetric(t) => t
                .within_radius(&query.coords(), radius)
                .into_iter()
                .cloned()
                .collect(),
            other => {
                return Err(MagneticError::DimensionMismatch {
                    expected: other.dimension(),
                    actual: 3,
                })
            }
        };
        trace!(target: "magnetic::spatial", name, radius, hits = hits.len(), "Radius search");
        if hits.is_empty() {
            return Err(MagneticError::NotFound);
        }
        Ok(hits)
    }

    /// Distance between two named collections
    ///
    /// Reserved: always returns an empty result.
    pub fn distance(&self, _name1: &str, _name2: &str) -> Dist {
        Dist::default()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.trees.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of points under `name`
    pub fn point_count(&self, name: &str) -> Result<usize> {
        Ok(self.tree(name)?.len())
    }

    /// Dimension (2 or 3) of the set under `name`
    pub fn dimension(&self, name: &str) -> Result<usize> {
        Ok(self.tree(name)?.dimension())
    }
}
