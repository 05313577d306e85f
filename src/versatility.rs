//! Nodal versatility: how ambiguously a node sits in community structure.
//!
//! The versatility of node `n` under a (possibly stochastic) community
//! algorithm is
//!
//! ```text
//! U_n = Σ_i sin(π a_{n,i}) / Σ_i a_{n,i}
//! ```
//!
//! where `a` is the consensus matrix estimated by repeated runs of the
//! algorithm. A node that is always grouped the same way has consensus
//! entries at 0 or 1, where the sine vanishes, and scores near zero; a node
//! whose co-memberships hover mid-range scores high. Scores are
//! non-negative but carry no upper bound: a row with several entries near
//! the sine peak pushes the ratio past 1.

use std::{collections::HashMap, f64::consts::PI, fmt::Debug, hash::Hash};

use crate::{
    algorithm::{CommunityAlgorithm, Params},
    consensus::{consensus_matrix, consensus_matrix_parallel},
    edge::Edge,
    error::{Error, Result},
    graph::{Attribute, Graph},
};

/// Scores below this are floating-point noise around a true zero and clamp
/// to exactly 0.
const CLAMP_THRESHOLD: f64 = 1e-10;

/// Computes the versatility of each node of `graph` under `algorithm`.
///
/// The consensus matrix is estimated over `iterations` runs, in parallel iff
/// `workers > 1`. Per-node scores are written to the graph as node attribute
/// `"{algorithm_name}vers"`, their mean as the graph attribute of the same
/// name, and an `f32` snapshot of the consensus matrix as graph attribute
/// `"{algorithm_name}consmatrix"`. Returns the node to score map.
///
/// Both the consensus matrix and its sine transform must be exactly
/// symmetric; a violation means the algorithm broke its contract in a way
/// the per-run checks can't see, and fails with
/// [`Error::InvariantViolation`].
pub fn nodal_versatility<T, A>(
    graph: &mut Graph<T>,
    algorithm: &A,
    algorithm_name: &str,
    iterations: usize,
    workers: usize,
    params: &Params,
) -> Result<HashMap<T, f64>>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug + Send + Sync,
    A: CommunityAlgorithm<T> + Sync,
{
    let consensus = if workers > 1 {
        consensus_matrix_parallel(graph, algorithm, iterations, workers, params)?
    } else if workers == 1 {
        consensus_matrix(graph, algorithm, iterations, params)?
    } else {
        return Err(Error::InvalidParameter {
            name: "workers",
            message: "must be greater than zero",
        });
    };

    // Keep a reduced-precision snapshot around for inspection.
    graph.set_graph_attribute(
        format!("{algorithm_name}consmatrix"),
        Attribute::Matrix(consensus.map(|x| x as f32)),
    );

    let transformed = consensus.map(|x| (PI * x).sin());

    if consensus != consensus.transpose() || transformed != transformed.transpose() {
        return Err(Error::InvariantViolation(
            "consensus or transformed matrix is not symmetric".into(),
        ));
    }

    let nodes = graph.nodes();
    let mut scores = HashMap::with_capacity(nodes.len());
    let mut total = 0.0;

    for (i, node) in nodes.iter().enumerate() {
        // The diagonal of the consensus matrix is 1, so the denominator is
        // at least 1 and the ratio is well-defined.
        let raw = transformed.column(i).sum() / consensus.column(i).sum();
        let score = if raw < CLAMP_THRESHOLD { 0.0 } else { raw };

        graph.set_node_attribute(*node, format!("{algorithm_name}vers"), Attribute::Scalar(score));
        scores.insert(*node, score);
        total += score;
    }

    graph.set_graph_attribute(
        format!("{algorithm_name}vers"),
        Attribute::Scalar(total / nodes.len() as f64),
    );

    Ok(scores)
}

/// Computes each node's mean versatility across a spectrum of values for one
/// algorithm parameter.
///
/// For each value `v` in `values` (sequentially; parallelism, if any, lives
/// inside the per-value scorer call), [`nodal_versatility`] is invoked with
/// `{parameter: v}` under the algorithm name `v.to_string()`. Those
/// per-value runs land on an internal copy of the graph, so their attribute
/// writes never touch the original.
///
/// The original graph receives, per node, the mean score as
/// `"{algorithm_name}meanvers"` and the full (value, score) series as
/// `"{algorithm_name}meanversvals"`, plus the mean of all per-node means as
/// a graph attribute under `"{algorithm_name}meanvers"`. Returns the node to
/// mean map.
pub fn nodal_mean_versatility<T, A>(
    graph: &mut Graph<T>,
    algorithm: &A,
    algorithm_name: &str,
    parameter: &str,
    values: &[f64],
    iterations: usize,
    workers: usize,
) -> Result<HashMap<T, f64>>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug + Send + Sync,
    A: CommunityAlgorithm<T> + Sync,
{
    if values.is_empty() {
        return Err(Error::InvalidParameter {
            name: "values",
            message: "must contain at least one parameter value",
        });
    }

    let mut scratch = graph.clone();

    for &value in values {
        let params = Params::new().with(parameter, value);
        nodal_versatility(
            &mut scratch,
            algorithm,
            &value.to_string(),
            iterations,
            workers,
            &params,
        )?;
    }

    let nodes = graph.nodes();
    let mut means = HashMap::with_capacity(nodes.len());
    let mut total = 0.0;

    for node in &nodes {
        let series: Vec<(f64, f64)> = values
            .iter()
            .map(|&value| {
                // Safety: the loop above wrote this attribute for every node
                // and every value.
                let score = scratch
                    .node_attribute(node, &format!("{value}vers"))
                    .and_then(Attribute::as_scalar)
                    .unwrap();
                (value, score)
            })
            .collect();

        let mean = series.iter().map(|(_, score)| score).sum::<f64>() / values.len() as f64;

        graph.set_node_attribute(
            *node,
            format!("{algorithm_name}meanvers"),
            Attribute::Scalar(mean),
        );
        graph.set_node_attribute(
            *node,
            format!("{algorithm_name}meanversvals"),
            Attribute::Series(series),
        );

        means.insert(*node, mean);
        total += mean;
    }

    graph.set_graph_attribute(
        format!("{algorithm_name}meanvers"),
        Attribute::Scalar(total / nodes.len() as f64),
    );

    Ok(means)
}

/// Computes the mean network versatility across a parameter spectrum, in the
/// shape an error-bar plot consumes.
///
/// For each value, returns `(value, mean score, standard error of the
/// mean)`. Rendering is left to the caller; this only supplies the data.
/// The runs operate on an internal copy of the graph, so the caller's graph
/// keeps its attributes.
pub fn versatility_curve<T, A>(
    graph: &Graph<T>,
    algorithm: &A,
    parameter: &str,
    values: &[f64],
    iterations: usize,
    workers: usize,
) -> Result<Vec<(f64, f64, f64)>>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug + Send + Sync,
    A: CommunityAlgorithm<T> + Sync,
{
    if values.is_empty() {
        return Err(Error::InvalidParameter {
            name: "values",
            message: "must contain at least one parameter value",
        });
    }

    let mut scratch = graph.clone();
    let mut points = Vec::with_capacity(values.len());

    for &value in values {
        let params = Params::new().with(parameter, value);
        let scores = nodal_versatility(
            &mut scratch,
            algorithm,
            &value.to_string(),
            iterations,
            workers,
            &params,
        )?;

        let samples: Vec<f64> = scores.values().copied().collect();
        points.push((value, mean(&samples), standard_error(&samples)));
    }

    Ok(points)
}

/// The default resolution spectrum for mean-versatility sweeps: 0.4 to 2.4
/// in steps of 0.1.
pub fn default_sweep_values() -> Vec<f64> {
    (4..25).map(|v| v as f64 / 10.0).collect()
}

/// The default resolution spectrum for versatility curves: 0.1 to 4.0 in
/// steps of 0.1.
pub fn default_curve_values() -> Vec<f64> {
    (0..40).map(|v| v as f64 / 10.0 + 0.1).collect()
}

//
// Helpers
//

fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Standard error of the mean, with the sample (n - 1) variance. Zero for
/// fewer than two samples.
fn standard_error(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }

    let m = mean(samples);
    let variance = samples.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64;

    (variance / n as f64).sqrt()
}
