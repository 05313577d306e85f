//! Versatility is a small toolkit for measuring how ambiguously the nodes of
//! a graph sit within its community structure.
//!
//! A stochastic community-detection algorithm rarely returns the same
//! partition twice. Running it many times over a fixed graph and recording
//! how often each pair of nodes lands in the same community yields a
//! consensus matrix; a node whose co-membership probabilities hover between
//! 0 and 1 is hard to pin to a single module, and scores a high
//! *versatility*. Perfectly consistent assignments score zero; the measure
//! has no fixed upper bound. It is used in network science, e.g. to find
//! brain-network regions that bridge modules.
//!
//! The crate estimates consensus matrices (optionally across a thread pool),
//! derives per-node versatility scores, and aggregates them over a sweep of
//! an algorithm parameter such as a resolution. Community detection itself
//! is pluggable: anything satisfying
//! [`CommunityAlgorithm`](algorithm::CommunityAlgorithm), plain closures
//! included, can be driven.
//!
//! # Basic usage
//!
//! ```rust
//! use versatility::algorithm::{Params, Partition};
//! use versatility::edge::Edge;
//! use versatility::graph::Graph;
//! use versatility::versatility::nodal_versatility;
//!
//! // Two disjoint pairs of nodes.
//! let mut graph = Graph::new();
//! graph.insert(Edge::new("a", "b"));
//! graph.insert(Edge::new("c", "d"));
//!
//! // A toy detector that always returns the same two communities. A real
//! // caller would plug in a stochastic algorithm such as Louvain here.
//! let pairs = |g: &Graph<&'static str>, _: &Params| -> Partition<&'static str> {
//!     g.nodes()
//!         .into_iter()
//!         .map(|n| (n, usize::from(n == "c" || n == "d")))
//!         .collect()
//! };
//!
//! let scores = nodal_versatility(&mut graph, &pairs, "pairs", 100, 1, &Params::new()).unwrap();
//!
//! // A perfectly consistent partition means zero versatility everywhere.
//! assert_eq!(scores["a"], 0.0);
//!
//! // The scores are also attached to the graph's attribute store.
//! assert!(graph.node_attribute(&"a", "pairsvers").is_some());
//! assert!(graph.graph_attribute("pairsconsmatrix").is_some());
//! ```

pub mod algorithm;
pub mod consensus;
pub mod edge;
pub mod error;
pub mod graph;
pub mod versatility;

pub use error::{Error, Result};
