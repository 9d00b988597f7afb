use gem_layout::{
    CancelToken, GemConfig, Input, NodeRecord, PhaseConfig, Point, bounding_box, layout,
    layout_with_cancel,
};

fn cycle(ids: &[&str]) -> Input {
    let nodes = ids
        .iter()
        .enumerate()
        .map(|(i, id)| NodeRecord::new(*id).with_neighbors([ids[(i + 1) % ids.len()]]))
        .collect();
    Input { nodes }
}

#[test]
fn four_cycle_settles_near_the_edge_length() {
    let config = GemConfig::default();
    let result = layout(&cycle(&["a", "b", "c", "d"]), &config).unwrap();

    let ids: Vec<&str> = result.positions.keys().map(String::as_str).collect();
    assert_eq!(ids, ["a", "b", "c", "d"]);

    let p: Vec<Point> = result.positions.values().copied().collect();
    assert!(p.iter().all(|q| q.x.is_finite() && q.y.is_finite()));
    for i in 0..4 {
        let d = p[i].distance(&p[(i + 1) % 4]);
        assert!(
            d > 1.0 * config.edge_length && d < 1.5 * config.edge_length,
            "edge {i} has length {d}"
        );
    }

    let bbox = bounding_box(&p).unwrap();
    assert!(bbox.width > 0.0 && bbox.height > 0.0);

    let report = result.report.unwrap();
    assert!(!report.insertion.skipped);
    assert!(!report.arrangement.skipped);
    assert!(report.optimization.skipped);
    assert!(result.heat.values().all(|&h| h >= gem_layout::HEAT_FLOOR));
}

#[test]
fn empty_input_gives_an_empty_result() {
    let result = layout(&Input::default(), &GemConfig::default()).unwrap();
    assert!(result.positions.is_empty());
    assert!(result.heat.is_empty());
    assert!(result.report.is_none());
}

#[test]
fn ids_are_collected_in_first_seen_order() {
    let input = Input {
        nodes: vec![
            NodeRecord::new("n7").with_neighbors(["n42", "n7", "n42"]),
            NodeRecord::new("n42").with_neighbors(["n7", "n3"]),
        ],
    };
    let prepared = input.build().unwrap();
    let g = &prepared.graph;
    assert_eq!(g.vertex_count(), 3);
    // n7-n42 listed three times (once reversed) and a self-reference: one edge survives.
    assert_eq!(g.edge_count(), 2);
    let labels: Vec<&str> = g.vertices().filter_map(|v| g.label(v)).collect();
    assert_eq!(labels, ["n7", "n42", "n3"]);

    let result = layout(&input, &GemConfig::default()).unwrap();
    let keys: Vec<&str> = result.positions.keys().map(String::as_str).collect();
    assert_eq!(keys, ["n7", "n42", "n3"]);
}

#[test]
fn given_positions_survive_when_every_phase_is_off() {
    let mut config = GemConfig::default();
    config.insertion = PhaseConfig::INSERTION.disabled();
    config.arrangement = PhaseConfig::ARRANGEMENT.disabled();
    let input = Input {
        nodes: vec![
            NodeRecord::new("a").at(10.0, -4.0).with_neighbors(["b"]),
            NodeRecord::new("b").at(-3.0, 8.5),
        ],
    };
    let result = layout(&input, &config).unwrap();
    assert_eq!(result.positions["a"], Point::new(10.0, -4.0));
    assert_eq!(result.positions["b"], Point::new(-3.0, 8.5));
    assert_eq!(result.report.unwrap().total_steps, 0);
}

#[test]
fn a_cancelled_token_ends_arrangement_after_one_round() {
    let token = CancelToken::new();
    token.cancel();
    let input = cycle(&["a", "b", "c", "d", "e", "f"]);
    let result = layout_with_cancel(&input, &GemConfig::default(), &mut token.clone()).unwrap();

    let report = result.report.unwrap();
    assert!(!report.insertion.cancelled);
    assert!(report.arrangement.cancelled);
    assert_eq!(report.arrangement.rounds, 1);
    assert_eq!(report.arrangement.steps, 6);
    assert_eq!(result.positions.len(), 6);
}

#[test]
fn same_input_same_layout() {
    let input = cycle(&["x", "y", "z"]);
    let mut config = GemConfig::default();
    config.random_seed = 9;
    let a = layout(&input, &config).unwrap();
    let b = layout(&input, &config).unwrap();
    assert_eq!(a.positions, b.positions);
}

#[test]
fn random_start_still_settles() {
    let mut config = GemConfig::default();
    config.random_start = true;
    config.random_seed = 3;
    let result = layout(&cycle(&["a", "b", "c", "d"]), &config).unwrap();

    let report = result.report.unwrap();
    assert!(report.insertion.skipped);
    let p: Vec<Point> = result.positions.values().copied().collect();
    for i in 0..4 {
        let d = p[i].distance(&p[(i + 1) % 4]);
        assert!(d > 0.5 * config.edge_length && d < 2.0 * config.edge_length, "edge {i}: {d}");
    }
}
