//! Two-colouring bipartiteness test.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::graph::WeightedGraph;

/// `true` when the vertices split into two sides with every edge crossing
/// between them.
///
/// The graph is read as undirected (an edge in either direction links two
/// vertices). BFS starts from every uncoloured vertex in index order, so
/// disconnected graphs are handled component by component. A self-loop
/// joins a vertex to its own colour and makes the graph non-bipartite. The
/// empty graph is bipartite.
#[must_use]
#[instrument(skip(g), fields(n = g.vertex_count()))]
pub fn is_bipartite(g: &WeightedGraph) -> bool {
    let n = g.vertex_count();
    let mut color: Vec<Option<bool>> = vec![None; n];
    let mut queue = VecDeque::new();

    for start in 0..n {
        if color[start].is_some() {
            continue;
        }
        color[start] = Some(false);
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            let side = color[u].unwrap_or_default();
            for v in 0..n {
                if !g.linked(u, v) {
                    continue;
                }
                match color[v] {
                    None => {
                        color[v] = Some(!side);
                        queue.push_back(v);
                    }
                    Some(c) if c == side => {
                        debug!(u, v, "odd cycle: edge joins same-coloured vertices");
                        return false;
                    }
                    Some(_) => {}
                }
            }
        }
    }

    true
}
