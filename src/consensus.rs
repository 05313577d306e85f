//! Consensus (association) matrix estimation.
//!
//! A consensus matrix records, for every pair of nodes, the empirical
//! probability that a community-detection algorithm assigns them to the same
//! community across repeated runs. It is the input to the versatility score.

use std::{fmt::Debug, hash::Hash, thread};

use nalgebra::DMatrix;

use crate::{
    algorithm::{CommunityAlgorithm, Params, Partition},
    edge::Edge,
    error::{Error, Result},
    graph::Graph,
};

/// Estimates the consensus matrix of `graph` under `algorithm`.
///
/// Runs the algorithm `iterations` times, counting for each node pair the
/// trials in which both nodes shared a community, and divides the counts by
/// `iterations`. Rows and columns are indexed by the graph's sorted node
/// order ([`Graph::nodes`]). The result is symmetric with a unit diagonal by
/// construction, and every entry lies in `[0, 1]`.
///
/// Each trial's partition is validated before it is accumulated: its key set
/// must equal the graph's node set exactly, anything else fails with
/// [`Error::ContractViolation`]. The graph is never mutated.
///
/// `iterations` should generally not be lower than 100, and there is little
/// need to make it higher than 1000.
pub fn consensus_matrix<T, A>(
    graph: &Graph<T>,
    algorithm: &A,
    iterations: usize,
    params: &Params,
) -> Result<DMatrix<f64>>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug,
    A: CommunityAlgorithm<T>,
{
    if iterations == 0 {
        return Err(Error::InvalidParameter {
            name: "iterations",
            message: "must be greater than zero",
        });
    }

    let nodes = graph.nodes();
    let n = nodes.len();
    if n == 0 {
        return Err(Error::EmptyGraph);
    }

    let mut consensus = DMatrix::<f64>::zeros(n, n);

    for _ in 0..iterations {
        let partition = algorithm.detect(graph, params);
        let labels = partition_labels(&partition, &nodes)?;

        for i in 0..n {
            for j in 0..n {
                if labels[i] == labels[j] {
                    consensus[(i, j)] += 1.0;
                }
            }
        }
    }

    consensus.unscale_mut(iterations as f64);

    Ok(consensus)
}

/// Estimates the consensus matrix using a pool of `workers` threads.
///
/// The requested `iterations` are split into `workers` shards of
/// `ceil(iterations / workers)` trials, each run as an independent
/// [`consensus_matrix`] call on its own thread over a shared read-only view
/// of the graph. Shard results are combined by plain arithmetic mean.
///
/// Two consequences of this sharding are intentional and preserved from the
/// reference behaviour of the measure:
///
/// - when `workers` does not divide `iterations`, slightly more trials are
///   executed in total than requested;
/// - shards contribute to the average with equal weight, not weighted by
///   trial count.
///
/// The worker pool is scoped to this call: every thread is joined before the
/// function returns, on the error path as much as on the happy one, so no
/// worker outlives the call.
pub fn consensus_matrix_parallel<T, A>(
    graph: &Graph<T>,
    algorithm: &A,
    iterations: usize,
    workers: usize,
    params: &Params,
) -> Result<DMatrix<f64>>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug + Send + Sync,
    A: CommunityAlgorithm<T> + Sync,
{
    if workers == 0 {
        return Err(Error::InvalidParameter {
            name: "workers",
            message: "must be greater than zero",
        });
    }
    if iterations == 0 {
        return Err(Error::InvalidParameter {
            name: "iterations",
            message: "must be greater than zero",
        });
    }
    if graph.vertex_count() == 0 {
        return Err(Error::EmptyGraph);
    }

    let shard_iterations = iterations.div_ceil(workers);

    // The scope joins every worker before it exits, whichever way the shards
    // turn out, so errors below can propagate without orphaning threads.
    let partials: Vec<Result<DMatrix<f64>>> = thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| s.spawn(move || consensus_matrix(graph, algorithm, shard_iterations, params)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let n = graph.vertex_count();
    let shard_count = partials.len() as f64;
    let mut combined = DMatrix::<f64>::zeros(n, n);

    for partial in partials {
        combined += partial?;
    }

    combined.unscale_mut(shard_count);

    Ok(combined)
}

/// Maps a partition onto the graph's node order, validating the partition
/// contract: the key set must equal the node set exactly.
fn partition_labels<T>(partition: &Partition<T>, nodes: &[T]) -> Result<Vec<usize>>
where
    T: Copy + Eq + Hash + Debug,
{
    if partition.len() != nodes.len() {
        return Err(Error::ContractViolation(format!(
            "partition has {} entries for a graph of {} nodes",
            partition.len(),
            nodes.len()
        )));
    }

    // Equal sizes plus full node coverage imply the key sets are equal.
    nodes
        .iter()
        .map(|node| {
            partition
                .get(node)
                .copied()
                .ok_or_else(|| Error::ContractViolation(format!("partition is missing node {node:?}")))
        })
        .collect()
}
