//! Conversion to and from `petgraph`.

use super::{positional_labels, Edge, SparseGraph};
use petgraph::graph::{DiGraph, Graph, IndexType, NodeIndex, UnGraph};
use petgraph::EdgeType;

impl SparseGraph {
    /// Undirected `petgraph` view, node weights are the item labels.
    ///
    /// Directed edges collapse: when both i → j and j → i exist, only the
    /// first (in `(source, target)` order) is kept.
    pub fn to_petgraph(&self) -> UnGraph<String, f64> {
        let mut graph = UnGraph::with_capacity(self.node_count(), self.edge_count());
        let nodes: Vec<NodeIndex> = self
            .items
            .iter()
            .map(|label| graph.add_node(label.clone()))
            .collect();
        for e in &self.edges {
            let (a, b) = (nodes[e.source], nodes[e.target]);
            if graph.find_edge(a, b).is_none() {
                let _ = graph.add_edge(a, b, e.weight);
            }
        }
        graph
    }

    /// Directed `petgraph` view. Undirected edges become a pair of arcs.
    pub fn to_directed_petgraph(&self) -> DiGraph<String, f64> {
        let arcs = if self.directed {
            self.edge_count()
        } else {
            2 * self.edge_count()
        };
        let mut graph = DiGraph::with_capacity(self.node_count(), arcs);
        let nodes: Vec<NodeIndex> = self
            .items
            .iter()
            .map(|label| graph.add_node(label.clone()))
            .collect();
        for e in &self.edges {
            let _ = graph.add_edge(nodes[e.source], nodes[e.target], e.weight);
            if !self.directed {
                let _ = graph.add_edge(nodes[e.target], nodes[e.source], e.weight);
            }
        }
        graph
    }

    /// Import a `petgraph` graph.
    ///
    /// Nodes are labeled by position, self loops are dropped and parallel
    /// edges keep the first weight. `weight` maps each edge weight to both
    /// [`Edge::weight`] and [`Edge::distance`]; pass `|_| 1.0` for an
    /// unweighted import.
    pub fn from_petgraph<N, E, Ty, Ix>(
        graph: &Graph<N, E, Ty, Ix>,
        weight: impl Fn(&E) -> f64,
    ) -> Self
    where
        Ty: EdgeType,
        Ix: IndexType,
    {
        let edges = graph
            .raw_edges()
            .iter()
            .map(|e| {
                Edge::from_distance(e.source().index(), e.target().index(), weight(&e.weight))
            })
            .collect();
        Self::from_parts(
            positional_labels(graph.node_count()),
            edges,
            graph.is_directed(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, KnnGraphBuilder, RngGraphBuilder};
    use crate::matrix::DistanceMatrix;

    fn three() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 4.0],
            vec![1.0, 0.0, 2.0],
            vec![4.0, 2.0, 0.0],
        ])
        .unwrap()
        .with_labels(vec!["a".into(), "b".into(), "c".into()])
    }

    #[test]
    fn test_undirected_round_trip() {
        let g = RngGraphBuilder::new().build(&three()).unwrap().value;
        let pg = g.to_petgraph();
        assert_eq!(pg.node_count(), 3);
        assert_eq!(pg.edge_count(), 2);
        assert_eq!(pg[NodeIndex::new(2)], "c");

        let back = SparseGraph::from_petgraph(&pg, |w| *w);
        assert!(!back.is_directed());
        assert_eq!(back.edges(), g.edges());
        assert_eq!(back.items(), ["0", "1", "2"]);
    }

    #[test]
    fn test_directed_collapses_to_undirected() {
        // 0 -> 1 and 1 -> 0 both exist for k = 1.
        let g = KnnGraphBuilder::new(1).build(&three()).unwrap().value;
        assert_eq!(g.edge_count(), 3);
        let pg = g.to_petgraph();
        assert_eq!(pg.edge_count(), 2);

        let dg = g.to_directed_petgraph();
        assert_eq!(dg.edge_count(), 3);
        let back = SparseGraph::from_petgraph(&dg, |w| *w);
        assert!(back.is_directed());
        assert_eq!(back.edges(), g.edges());
    }

    #[test]
    fn test_undirected_to_directed_doubles_arcs() {
        let g = RngGraphBuilder::new().build(&three()).unwrap().value;
        assert_eq!(g.to_directed_petgraph().edge_count(), 4);
    }

    #[test]
    fn test_from_petgraph_unweighted_drops_loops_and_parallels() {
        let mut pg = UnGraph::<(), ()>::new_undirected();
        let a = pg.add_node(());
        let b = pg.add_node(());
        let c = pg.add_node(());
        let _ = pg.add_edge(a, b, ());
        let _ = pg.add_edge(b, a, ());
        let _ = pg.add_edge(c, c, ());

        let g = SparseGraph::from_petgraph(&pg, |_| 1.0);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge(0, 1).map(|e| e.weight), Some(1.0));
        assert_eq!(g.degree(2), 0);
    }
}
