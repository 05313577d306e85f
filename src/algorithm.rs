//! The community-detection collaborator contract.
//!
//! The crate does not implement community detection itself; it drives any
//! algorithm satisfying [`CommunityAlgorithm`] and consumes the partitions it
//! produces. Plain closures over `(&Graph<T>, &Params)` satisfy the trait,
//! so no wrapper type is needed for the common case.

use std::collections::{BTreeMap, HashMap};

use crate::graph::Graph;

/// A community assignment for one algorithm run: node to community id.
///
/// Partitions are ephemeral; they are consumed immediately to update a
/// consensus matrix and never retained. A valid partition's key set equals
/// the graph's node set exactly, which the consensus estimator enforces.
pub type Partition<T> = HashMap<T, usize>;

/// Named numeric parameters passed through to a community algorithm, e.g. a
/// resolution parameter `{"gamma": 1.5}`.
///
/// Parameter sets are plain values constructed at call sites; nothing in the
/// crate keeps global defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(BTreeMap<String, f64>);

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parameter set with `name` set to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use versatility::algorithm::Params;
    ///
    /// let params = Params::new().with("gamma", 1.5);
    /// assert_eq!(params.get("gamma"), Some(1.5));
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Sets `name` to `value`, overwriting any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    /// Returns the value of `name`, if set.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Returns whether the parameter set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A pluggable community-detection algorithm.
///
/// One invocation runs the algorithm once over the graph and returns a fresh
/// partition. Implementations may be stochastic; repeated invocations over
/// the same graph are how the consensus matrix is estimated.
///
/// Implementations must not mutate the graph: the parallel estimator hands
/// the same graph to several workers as a shared read-only view. This is a
/// documented precondition, not separately enforced (the `&Graph<T>`
/// receiver rules out direct mutation already).
pub trait CommunityAlgorithm<T> {
    /// Runs the algorithm once and returns the resulting partition.
    fn detect(&self, graph: &Graph<T>, params: &Params) -> Partition<T>;
}

impl<T, F> CommunityAlgorithm<T> for F
where
    F: Fn(&Graph<T>, &Params) -> Partition<T>,
{
    fn detect(&self, graph: &Graph<T>, params: &Params) -> Partition<T> {
        self(graph, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;

    #[test]
    fn params_set_get() {
        let mut params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.get("gamma"), None);

        params.set("gamma", 0.4);
        assert_eq!(params.get("gamma"), Some(0.4));

        params.set("gamma", 0.6);
        assert_eq!(params.get("gamma"), Some(0.6));
        assert!(!params.is_empty());
    }

    #[test]
    fn closures_are_algorithms() {
        let mut graph = Graph::new();
        graph.insert(Edge::new("a", "b"));

        let singletons = |g: &Graph<&'static str>, _: &Params| -> Partition<&'static str> {
            g.nodes().into_iter().enumerate().map(|(i, n)| (n, i)).collect()
        };

        let partition = singletons.detect(&graph, &Params::new());
        assert_eq!(partition.len(), 2);
        assert_ne!(partition["a"], partition["b"]);
    }

    #[test]
    fn algorithms_see_params() {
        let mut graph = Graph::new();
        graph.insert(Edge::new("a", "b"));

        // Group everything together below the threshold, split above it.
        let thresholded = |g: &Graph<&'static str>, p: &Params| -> Partition<&'static str> {
            let gamma = p.get("gamma").unwrap_or(1.0);
            g.nodes()
                .into_iter()
                .enumerate()
                .map(|(i, n)| (n, if gamma < 1.0 { 0 } else { i }))
                .collect()
        };

        let merged = thresholded.detect(&graph, &Params::new().with("gamma", 0.5));
        assert_eq!(merged["a"], merged["b"]);

        let split = thresholded.detect(&graph, &Params::new().with("gamma", 2.0));
        assert_ne!(split["a"], split["b"]);
    }
}
