//! A module for working with graphs and their attribute stores.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
};

use nalgebra::DMatrix;

use crate::edge::Edge;

/// A value stored in a graph's attribute store.
///
/// Attributes are string-keyed and last-write-wins; the consensus and
/// versatility routines use the `"{name}{suffix}"` naming scheme, e.g.
/// `"louvainvers"` or `"louvainconsmatrix"`.
#[derive(Clone, Debug, PartialEq)]
pub enum Attribute {
    /// A single score, e.g. a node's versatility.
    Scalar(f64),
    /// A reduced-precision matrix snapshot, e.g. a consensus matrix.
    Matrix(DMatrix<f32>),
    /// A (parameter value, score) series, e.g. a node's sweep distribution.
    Series(Vec<(f64, f64)>),
}

impl Attribute {
    /// Returns the scalar value, if this attribute is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Attribute::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the matrix snapshot, if this attribute is one.
    pub fn as_matrix(&self) -> Option<&DMatrix<f32>> {
        match self {
            Attribute::Matrix(matrix) => Some(matrix),
            _ => None,
        }
    }

    /// Returns the (parameter value, score) series, if this attribute is one.
    pub fn as_series(&self) -> Option<&[(f64, f64)]> {
        match self {
            Attribute::Series(series) => Some(series),
            _ => None,
        }
    }
}

/// An undirected graph, made up of weighted edges and an attribute store.
///
/// Vertices are kept in a sorted set, which fixes the node ordering used to
/// index the matrices derived from the graph: row and column `i` correspond
/// to the `i`-th vertex in `T`'s `Ord` order. The sorted collection is why we
/// need the `Ord` bound on `T`, and it keeps the ordering stable between
/// computations.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    /// The edges in the graph.
    edges: HashSet<Edge<T>>,
    /// The vertices in the graph, including isolated ones.
    vertices: BTreeSet<T>,
    /// Node-level attributes, keyed by attribute name and then by vertex.
    node_attributes: HashMap<String, BTreeMap<T, Attribute>>,
    /// Graph-level attributes, keyed by attribute name.
    graph_attributes: HashMap<String, Attribute>,
}

impl<T> Default for Graph<T>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug,
{
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use versatility::graph::Graph;
    ///
    /// let graph: Graph<&str> = Graph::new();
    /// ```
    pub fn new() -> Self {
        Self {
            edges: Default::default(),
            vertices: Default::default(),
            node_attributes: Default::default(),
            graph_attributes: Default::default(),
        }
    }

    /// Inserts an edge into the graph, along with both of its endpoints.
    ///
    /// Returns whether the edge was newly inserted.
    pub fn insert(&mut self, edge: Edge<T>) -> bool {
        self.vertices.insert(*edge.source());
        self.vertices.insert(*edge.target());

        self.edges.insert(edge)
    }

    /// Inserts an isolated vertex into the graph.
    ///
    /// Returns whether the vertex was newly inserted.
    pub fn insert_vertex(&mut self, vertex: T) -> bool {
        self.vertices.insert(vertex)
    }

    /// Removes an edge from the set and returns whether it was present.
    ///
    /// The endpoints remain part of the vertex set, as do their attributes.
    ///
    /// # Examples
    ///
    /// ```
    /// use versatility::edge::Edge;
    /// use versatility::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new("a", "b"));
    ///
    /// assert_eq!(graph.remove(&Edge::new("a", "b")), true);
    /// assert_eq!(graph.remove(&Edge::new("a", "c")), false);
    /// assert_eq!(graph.vertex_count(), 2);
    /// ```
    pub fn remove(&mut self, edge: &Edge<T>) -> bool {
        self.edges.remove(edge)
    }

    /// Checks if the graph contains an edge.
    pub fn contains(&self, edge: &Edge<T>) -> bool {
        self.edges.contains(edge)
    }

    /// Returns the vertex count of the graph.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the vertices in sorted order.
    ///
    /// This is the node ordering used to index the matrices derived from the
    /// graph, so `nodes()[i]` labels row and column `i`.
    ///
    /// # Examples
    ///
    /// ```
    /// use versatility::edge::Edge;
    /// use versatility::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new("b", "a"));
    /// graph.insert_vertex("c");
    ///
    /// assert_eq!(graph.nodes(), vec!["a", "b", "c"]);
    /// ```
    pub fn nodes(&self) -> Vec<T> {
        self.vertices.iter().copied().collect()
    }

    /// Constructs the weighted adjacency matrix for this graph.
    ///
    /// This is the representation a community-detection algorithm typically
    /// consumes. As the graph is undirected, the matrix is symmetric.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use versatility::edge::Edge;
    /// use versatility::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     dmatrix![0.0, 1.0;
    ///              1.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let index: BTreeMap<T, usize> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, &vertex)| (vertex, i))
            .collect();

        let n = index.len();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        for edge in &self.edges {
            // Safety: the vertex set contains every edge endpoint, as
            // `insert` keeps the two collections in sync.
            let i = *index.get(edge.source()).unwrap();
            let j = *index.get(edge.target()).unwrap();

            // Edges are unique and undirected, so both triangles are written
            // once per edge.
            matrix[(i, j)] = edge.weight();
            matrix[(j, i)] = edge.weight();
        }

        matrix
    }

    /// Sets a named attribute on a node, overwriting any previous value.
    pub fn set_node_attribute(&mut self, node: T, name: impl Into<String>, value: Attribute) {
        self.node_attributes
            .entry(name.into())
            .or_default()
            .insert(node, value);
    }

    /// Returns a node's named attribute, if set.
    pub fn node_attribute(&self, node: &T, name: &str) -> Option<&Attribute> {
        self.node_attributes.get(name)?.get(node)
    }

    /// Sets a named graph-level attribute, overwriting any previous value.
    pub fn set_graph_attribute(&mut self, name: impl Into<String>, value: Attribute) {
        self.graph_attributes.insert(name.into(), value);
    }

    /// Returns a named graph-level attribute, if set.
    pub fn graph_attribute(&self, name: &str) -> Option<&Attribute> {
        self.graph_attributes.get(name)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::dmatrix;

    use super::*;

    #[test]
    fn new() {
        let _: Graph<()> = Graph::new();
    }

    #[test]
    fn insert() {
        let mut graph = Graph::new();
        let edge = Edge::new("a", "b");

        assert!(graph.insert(edge.clone()));
        assert!(!graph.insert(edge));
    }

    #[test]
    fn insert_vertex() {
        let mut graph = Graph::new();

        assert!(graph.insert_vertex("a"));
        assert!(!graph.insert_vertex("a"));
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn remove() {
        let edge = Edge::new("a", "b");
        let uninserted_edge = Edge::new("a", "c");

        let mut graph = Graph::new();
        graph.insert(edge.clone());

        assert!(graph.remove(&edge));
        assert!(!graph.remove(&uninserted_edge));

        // The endpoints survive edge removal.
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn contains() {
        let mut graph = Graph::new();
        let edge = Edge::new("a", "b");

        graph.insert(edge.clone());

        assert!(graph.contains(&edge));
        assert!(!graph.contains(&Edge::new("b", "c")));
    }

    #[test]
    fn vertex_count() {
        let mut graph = Graph::new();
        assert_eq!(graph.vertex_count(), 0);

        graph.insert(Edge::new("a", "b"));
        assert_eq!(graph.vertex_count(), 2);

        graph.insert(Edge::new("a", "c"));
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn edge_count() {
        let mut graph = Graph::new();
        assert_eq!(graph.edge_count(), 0);

        graph.insert(Edge::new("a", "b"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn nodes_are_sorted() {
        let mut graph = Graph::new();
        graph.insert(Edge::new("c", "a"));
        graph.insert(Edge::new("b", "c"));
        graph.insert_vertex("d");

        assert_eq!(graph.nodes(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn adjacency_matrix() {
        let mut graph = Graph::new();
        assert_eq!(graph.adjacency_matrix(), dmatrix![]);

        graph.insert(Edge::new("a", "b"));
        assert_eq!(
            graph.adjacency_matrix(),
            dmatrix![0.0, 1.0;
                     1.0, 0.0]
        );

        graph.insert(Edge::new("a", "c"));
        assert_eq!(
            graph.adjacency_matrix(),
            dmatrix![0.0, 1.0, 1.0;
                     1.0, 0.0, 0.0;
                     1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn adjacency_matrix_weighted() {
        let mut graph = Graph::new();
        graph.insert(Edge::weighted("a", "b", 0.5));

        assert_eq!(
            graph.adjacency_matrix(),
            dmatrix![0.0, 0.5;
                     0.5, 0.0]
        );
    }

    #[test]
    fn node_attributes() {
        let mut graph = Graph::new();
        graph.insert(Edge::new("a", "b"));

        assert!(graph.node_attribute(&"a", "vers").is_none());

        graph.set_node_attribute("a", "vers", Attribute::Scalar(0.3));
        assert_eq!(
            graph.node_attribute(&"a", "vers"),
            Some(&Attribute::Scalar(0.3))
        );
        assert!(graph.node_attribute(&"b", "vers").is_none());

        // Last write wins.
        graph.set_node_attribute("a", "vers", Attribute::Scalar(0.7));
        assert_eq!(
            graph.node_attribute(&"a", "vers"),
            Some(&Attribute::Scalar(0.7))
        );
    }

    #[test]
    fn graph_attributes() {
        let mut graph: Graph<&str> = Graph::new();

        assert!(graph.graph_attribute("meanvers").is_none());

        graph.set_graph_attribute("meanvers", Attribute::Scalar(0.1));
        assert_eq!(
            graph.graph_attribute("meanvers"),
            Some(&Attribute::Scalar(0.1))
        );

        graph.set_graph_attribute("meanvers", Attribute::Scalar(0.2));
        assert_eq!(
            graph.graph_attribute("meanvers"),
            Some(&Attribute::Scalar(0.2))
        );
    }

    #[test]
    fn clone_is_isolated() {
        let mut graph = Graph::new();
        graph.insert(Edge::new("a", "b"));

        let mut copy = graph.clone();
        copy.set_node_attribute("a", "vers", Attribute::Scalar(1.0));
        copy.set_graph_attribute("vers", Attribute::Scalar(1.0));

        assert!(graph.node_attribute(&"a", "vers").is_none());
        assert!(graph.graph_attribute("vers").is_none());
    }

    #[test]
    fn attribute_accessors() {
        let scalar = Attribute::Scalar(0.5);
        let matrix = Attribute::Matrix(dmatrix![1.0f32]);
        let series = Attribute::Series(vec![(0.4, 0.1)]);

        assert_eq!(scalar.as_scalar(), Some(0.5));
        assert!(scalar.as_matrix().is_none());
        assert!(scalar.as_series().is_none());

        assert_eq!(matrix.as_matrix(), Some(&dmatrix![1.0f32]));
        assert!(matrix.as_scalar().is_none());

        assert_eq!(series.as_series(), Some(&[(0.4, 0.1)][..]));
        assert!(series.as_scalar().is_none());
    }
}
