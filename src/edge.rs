//! A module for working with edges.

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// A pair of vertices representing a graph edge, with an optional weight.
///
/// Edges don't have a direction, despite the `source`-`target` nomenclature
/// used. The weight takes part in matrix construction but not in edge
/// identity: two edges over the same vertex pair are equal regardless of
/// their weights.
#[derive(Clone, Debug)]
pub struct Edge<T> {
    source: T,
    target: T,
    weight: f64,
}

impl<T> Edge<T> {
    /// Creates a new edge from two vertices, with a weight of `1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use versatility::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge, Edge::new("b", "a"));
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self::weighted(source, target, 1.0)
    }

    /// Creates a new edge from two vertices and a weight.
    ///
    /// # Examples
    ///
    /// ```
    /// use versatility::edge::Edge;
    ///
    /// let edge = Edge::weighted("a", "b", 0.5);
    /// assert_eq!(edge.weight(), 0.5);
    /// ```
    pub fn weighted(source: T, target: T, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the first vertex forming the edge.
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the second vertex forming the edge.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the weight of the edge.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns whether the edge contains the given vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use versatility::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    ///
    /// assert_eq!(edge.contains(&"a"), true);
    /// assert_eq!(edge.contains(&"b"), true);
    /// assert_eq!(edge.contains(&"c"), false);
    /// ```
    pub fn contains(&self, vertex: &T) -> bool
    where
        T: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }
}

//
// Trait implementations
//

impl<T: PartialEq> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.source, &self.target);
        let (c, d) = (&other.source, &other.target);

        a == d && b == c || a == c && b == d
    }
}

impl<T: Eq> Eq for Edge<T> {}

impl<T: Hash + Ord> Hash for Edge<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (a, b) = (&self.source, &self.target);

        // This ensures the hash is the same for (a, b) as it is for (b, a).
        match a.cmp(b) {
            Ordering::Greater => {
                b.hash(state);
                a.hash(state);
            }
            _ => {
                a.hash(state);
                b.hash(state);
            }
        }
    }
}
