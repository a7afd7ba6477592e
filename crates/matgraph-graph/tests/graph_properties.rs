//! Structural properties of the graph algorithms over generated graphs.

use matgraph_graph::{
    Orientation, WeightedGraph, connected_components, is_bipartite, is_connected,
    minimum_spanning_tree_kruskal, minimum_spanning_tree_prim, shortest_path,
};
use proptest::prelude::*;

/// Symmetric grid with integer weights in `1..=9` and no self-loops.
fn arb_undirected(max_n: usize) -> impl Strategy<Value = WeightedGraph> {
    (1..=max_n).prop_flat_map(|n| {
        prop::collection::vec(prop::option::weighted(0.4, 1u8..=9), n * n).prop_map(move |cells| {
            let edges: Vec<_> = (0..n)
                .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
                .filter_map(|(i, j)| cells[i * n + j].map(|w| (i, j, f64::from(w))))
                .collect();
            WeightedGraph::from_edges(n, &edges, Orientation::Undirected).expect("valid edges")
        })
    })
}

/// Arbitrary (possibly asymmetric) grid, self-loops included.
fn arb_directed(max_n: usize) -> impl Strategy<Value = WeightedGraph> {
    (1..=max_n).prop_flat_map(|n| {
        prop::collection::vec(prop::option::weighted(0.3, 1u8..=9), n * n).prop_map(move |cells| {
            let grid = cells
                .chunks(n)
                .map(|row| row.iter().map(|c| c.map_or(0.0, f64::from)).collect())
                .collect();
            WeightedGraph::new(grid).expect("square and non-negative")
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn components_partition_the_vertices(g in arb_directed(9)) {
        let components = connected_components(&g);
        let mut seen: Vec<usize> = components.iter().flatten().copied().collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..g.vertex_count()).collect::<Vec<_>>());

        for c in &components {
            prop_assert!(c.windows(2).all(|w| w[0] < w[1]));
        }
        prop_assert!(components.windows(2).all(|w| w[0][0] < w[1][0]));
    }

    #[test]
    fn connected_symmetric_graphs_have_one_component(g in arb_undirected(9)) {
        prop_assert_eq!(is_connected(&g), connected_components(&g).len() == 1);
    }

    #[test]
    fn prim_and_kruskal_agree_when_connected(g in arb_undirected(9)) {
        prop_assume!(is_connected(&g));
        let prim = minimum_spanning_tree_prim(&g);
        let kruskal = minimum_spanning_tree_kruskal(&g);
        prop_assert_eq!(prim.total_weight, kruskal.total_weight);
        prop_assert!(prim.spans(g.vertex_count()));
        prop_assert!(kruskal.spans(g.vertex_count()));
    }

    #[test]
    fn kruskal_forest_has_one_edge_fewer_per_component(g in arb_undirected(9)) {
        let forest = minimum_spanning_tree_kruskal(&g);
        let components = connected_components(&g).len();
        prop_assert_eq!(forest.edges.len(), g.vertex_count() - components);
    }

    #[test]
    fn shortest_paths_follow_real_edges(g in arb_directed(8), start in 0usize..8, end in 0usize..8) {
        if let Some(path) = shortest_path(&g, start, end) {
            prop_assert_eq!(path.vertices.first().copied(), Some(start));
            prop_assert_eq!(path.vertices.last().copied(), Some(end));

            let mut total = 0.0;
            for hop in path.vertices.windows(2) {
                let w = g.weight(hop[0], hop[1]).unwrap_or(0.0);
                prop_assert!(w > 0.0);
                total += w;
            }
            prop_assert_eq!(total, path.total_weight);
        } else if start < g.vertex_count() && end < g.vertex_count() && g.is_symmetric() {
            // Symmetric grids: unreachable means a different component.
            let components = connected_components(&g);
            let same = components.iter().any(|c| c.contains(&start) && c.contains(&end));
            prop_assert!(!same);
        }
    }

    #[test]
    fn shortest_path_obeys_the_triangle_inequality(
        g in arb_undirected(8), a in 0usize..8, b in 0usize..8, c in 0usize..8
    ) {
        let d = |x, y| shortest_path(&g, x, y).map(|p| p.total_weight);
        if let (Some(ab), Some(bc), Some(ac)) = (d(a, b), d(b, c), d(a, c)) {
            prop_assert!(ac <= ab + bc);
        }
    }

    #[test]
    fn algorithms_are_repeatable(g in arb_directed(7)) {
        prop_assert_eq!(is_connected(&g), is_connected(&g));
        prop_assert_eq!(is_bipartite(&g), is_bipartite(&g));
        prop_assert_eq!(connected_components(&g), connected_components(&g));
        prop_assert_eq!(shortest_path(&g, 0, g.vertex_count() - 1), shortest_path(&g, 0, g.vertex_count() - 1));
        prop_assert_eq!(minimum_spanning_tree_prim(&g), minimum_spanning_tree_prim(&g));
        prop_assert_eq!(minimum_spanning_tree_kruskal(&g), minimum_spanning_tree_kruskal(&g));
    }

    #[test]
    fn subgraphs_of_bipartite_graphs_stay_bipartite(g in arb_undirected(8)) {
        prop_assume!(is_bipartite(&g));
        let n = g.vertex_count();
        let trimmed: Vec<_> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .filter(|&(i, j)| (i + j) % 2 == 1)
            .filter_map(|(i, j)| g.weight(i, j).filter(|&w| w > 0.0).map(|w| (i, j, w)))
            .collect();
        let sub = WeightedGraph::from_edges(n, &trimmed, Orientation::Undirected).expect("valid edges");
        prop_assert!(is_bipartite(&sub));
    }
}
