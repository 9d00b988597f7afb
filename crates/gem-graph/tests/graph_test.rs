use gem_graph::{EdgeId, Error, Graph, Limits, VertexId};

fn vid(n: u32) -> VertexId {
    VertexId::new(n).expect("non-zero id")
}

fn graph_with_edges(n: usize, edges: &[(u32, u32)]) -> Graph {
    let mut g = Graph::new();
    g.create(n, edges.len()).unwrap();
    for _ in 0..n {
        g.add_vertex().unwrap();
    }
    for &(v, w) in edges {
        g.add_edge(vid(v), vid(w)).unwrap();
    }
    g
}

#[test]
fn adjacency_is_reciprocal_and_matches_degree() {
    let edges = [(1, 2), (2, 3), (3, 1), (3, 4), (5, 4)];
    let g = graph_with_edges(5, &edges);

    for &(v, w) in &edges {
        assert!(g.adjacency(vid(v)).any(|u| u == vid(w)), "{w} missing from adjacency({v})");
        assert!(g.adjacency(vid(w)).any(|u| u == vid(v)), "{v} missing from adjacency({w})");
    }
    for v in g.vertices() {
        let incident = edges
            .iter()
            .filter(|&&(a, b)| a == v.get() || b == v.get())
            .count();
        assert_eq!(g.degree(v), incident);
        assert_eq!(g.adjacency(v).count(), g.degree(v));
    }
}

#[test]
fn half_edges_point_back_to_their_origin() {
    let g = graph_with_edges(3, &[(1, 2), (2, 3)]);
    for v in g.vertices() {
        for &h in g.half_edges(v) {
            assert_eq!(g.origin(h), v);
            assert_eq!(g.destination(h.twin()), v);
        }
    }
    let e = EdgeId::new(2).unwrap();
    assert_eq!(e.forward().signed(), 2);
    assert_eq!(e.backward().signed(), -2);
    assert_eq!(g.destination(e.forward()), vid(3));
    assert_eq!(g.destination(e.backward()), vid(2));
    assert_eq!(g.endpoints(e), Some((vid(2), vid(3))));
}

#[test]
fn adjacency_walk_can_be_restarted() {
    let g = graph_with_edges(4, &[(1, 2), (1, 3), (1, 4)]);
    let mut walk = g.adjacency(vid(1));
    assert_eq!(walk.next(), Some(vid(2)));
    let rest = walk.clone();
    assert_eq!(walk.collect::<Vec<_>>(), vec![vid(3), vid(4)]);
    assert_eq!(rest.collect::<Vec<_>>(), vec![vid(3), vid(4)]);
    assert_eq!(g.adjacency(vid(1)).len(), 3);
}

#[test]
fn capacity_is_a_recoverable_error() {
    let mut g = Graph::with_limits(Limits {
        max_vertices: 2,
        max_edges: 1,
    });
    assert_eq!(
        g.create(3, 0),
        Err(Error::CapacityExceeded {
            what: "vertices",
            limit: 2
        })
    );
    assert_eq!(
        g.create(2, 2),
        Err(Error::CapacityExceeded {
            what: "edges",
            limit: 1
        })
    );

    g.create(2, 1).unwrap();
    let a = g.add_vertex().unwrap();
    let b = g.add_vertex().unwrap();
    assert!(matches!(g.add_vertex(), Err(Error::CapacityExceeded { .. })));
    g.add_edge(a, b).unwrap();
    assert!(matches!(g.add_edge(b, a), Err(Error::CapacityExceeded { .. })));

    // The graph is still usable after the refusal.
    assert_eq!(g.vertex_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.degree(a), 1);
}

#[test]
fn edges_to_unknown_vertices_are_rejected() {
    let mut g = graph_with_edges(2, &[]);
    assert_eq!(g.add_edge(vid(1), vid(3)), Err(Error::UnknownVertex(vid(3))));
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.degree(vid(1)), 0);
}

#[test]
fn create_resets_a_previous_graph() {
    let mut g = graph_with_edges(3, &[(1, 2), (2, 3)]);
    g.create(1, 0).unwrap();
    assert!(g.is_empty());
    assert_eq!(g.edge_count(), 0);
    let v = g.add_labeled_vertex("solo").unwrap();
    assert_eq!(v, vid(1));
    assert_eq!(g.find_vertex("solo"), Some(v));
    assert_eq!(g.label(v), Some("solo"));
    assert_eq!(g.find_vertex("2"), None);
}

#[test]
fn self_loops_count_twice_towards_degree() {
    let g = graph_with_edges(1, &[(1, 1)]);
    assert_eq!(g.degree(vid(1)), 2);
    assert_eq!(g.adjacency(vid(1)).collect::<Vec<_>>(), vec![vid(1), vid(1)]);
}
