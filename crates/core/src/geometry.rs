//! Geometry types for the spatial index
//!
//! "Triangles" in the public API are plain 3-coordinate points; there is no
//! edge or face information attached to them.

use serde::{Deserialize, Serialize};

/// A 2-D point with an optional label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Optional caller-supplied label, carried through queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Unlabelled point
    pub fn new(x: f64, y: f64) -> Self {
        Point { name: None, x, y }
    }

    /// Labelled point
    pub fn named(name: impl Into<String>, x: f64, y: f64) -> Self {
        Point {
            name: Some(name.into()),
            x,
            y,
        }
    }

    /// Coordinates as an array
    #[inline]
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// A 3-D point, called a "triangle" by the spatial API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// Optional caller-supplied label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Point3 {
    /// Unlabelled point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { name: None, x, y, z }
    }

    /// Labelled point
    pub fn named(name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Point3 {
            name: Some(name.into()),
            x,
            y,
            z,
        }
    }

    /// Coordinates as an array
    #[inline]
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Result of an inter-collection distance request
///
/// Reserved: the distance operation currently returns an empty result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dist {
    /// Distances, one per compared pair
    pub result: Vec<f64>,
}

impl Dist {
    /// True when no distances were computed
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// Exact Euclidean distance between two coordinate arrays
///
/// Both the index and any brute-force check must use this function so that
/// boundary points compare identically.
#[inline]
pub fn euclidean_distance<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
