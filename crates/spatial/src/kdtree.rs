//! Static k-d tree with radius search
//!
//! Built once from a fixed point set; there is no incremental insert.
//!
//! ## Layout
//!
//! Nodes live in one flat `Vec`. The subtree for the range `[lo, hi)` has its
//! root at `lo + (hi - lo) / 2`; everything left of the root has a splitting
//! coordinate `<=` the root's, everything right of it `>=`. The splitting
//! axis cycles with depth.
//!
//! ## Complexity
//!
//! - Build: `select_nth_unstable` per level, O(n log n) on average
//! - Radius search: O(log n + k) nodes visited on average for small radii
//!
//! ## Exactness
//!
//! Candidate points are accepted with [`euclidean_distance`]` <= radius`.
//! Pruning only skips subtrees whose splitting plane is farther than the
//! radius (with a small slack for rounding), so no point within the radius
//! is ever missed.

use magnetic_core::euclidean_distance;

/// Relative widening applied to the pruning test, never to acceptance
const PRUNE_SLACK: f64 = 1e-12;

#[derive(Debug, Clone)]
struct KdNode<const D: usize, T> {
    coords: [f64; D],
    item: T,
}

/// k-d tree over `D`-dimensional points carrying a payload `T`
#[derive(Debug, Clone)]
pub struct KdTree<const D: usize, T> {
    nodes: Vec<KdNode<D, T>>,
}

impl<const D: usize, T> KdTree<D, T> {
    /// Build a balanced tree from `(coordinates, payload)` pairs
    pub fn build(points: Vec<([f64; D], T)>) -> Self {
        let mut nodes: Vec<KdNode<D, T>> = points
            .into_iter()
            .map(|(coords, item)| KdNode { coords, item })
            .collect();
        Self::partition(&mut nodes, 0);
        KdTree { nodes }
    }

    fn partition(nodes: &mut [KdNode<D, T>], depth: usize) {
        if nodes.len() <= 1 {
            return;
        }
        let axis = depth % D;
        let mid = nodes.len() / 2;
        nodes.select_nth_unstable_by(mid, |a, b| a.coords[axis].total_cmp(&b.coords[axis]));
        let (left, rest) = nodes.split_at_mut(mid);
        Self::partition(left, depth + 1);
        Self::partition(&mut rest[1..], depth + 1);
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no points
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All payloads within `radius` of `query` (inclusive boundary)
    ///
    /// Order follows the tree layout and is not meaningful.
    pub fn within_radius(&self, query: &[f64; D], radius: f64) -> Vec<&T> {
        let mut out = Vec::new();
        self.search(0, self.nodes.len(), 0, query, radius, &mut out);
        out
    }

    fn search<'a>(
        &'a self,
        lo: usize,
        hi: usize,
        depth: usize,
        query: &[f64; D],
        radius: f64,
        out: &mut Vec<&'a T>,
    ) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let node = &self.nodes[mid];
        if euclidean_distance(&node.coords, query) <= radius {
            out.push(&node.item);
        }

        let axis = depth % D;
        let split = node.coords[axis];
        let diff = query[axis] - split;
        // Widened so rounding in `diff` cannot prune a boundary point
        let reach = radius + (radius.abs() + query[axis].abs() + split.abs()) * PRUNE_SLACK;
        if diff <= reach {
            self.search(lo, mid, depth + 1, query, radius, out);
        }
        if -diff <= reach {
            self.search(mid + 1, hi, depth + 1, query, radius, out);
        }
    }

    /// Iterate payloads in storage order
    pub fn iter(&self) -> impl Iterator<Item = (&[f64; D], &T)> {
        self.nodes.iter().map(|n| (&n.coords, &n.item))
    }
}
