use std::collections::HashSet;
use std::path::Path;

use bikeshare_network::graph::StationGraph;
use bikeshare_network::plot::render_to_buffer;
use bikeshare_network::report::NetworkStats;
use bikeshare_network::stations::{Station, load_stations};
use bikeshare_network::trips::{RawTrip, reconcile_trips, resolve};

fn fixture(name: &str) -> &'static Path {
    match name {
        "stations" => Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/station_information.json"
        )),
        "ridership" => Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/ridership.csv"
        )),
        _ => panic!("unknown fixture {name}"),
    }
}

fn run_pipeline() -> (Vec<Station>, StationGraph, NetworkStats) {
    let stations = load_stations(fixture("stations")).expect("failed to load stations");
    let reconciled =
        reconcile_trips(fixture("ridership"), &stations).expect("failed to reconcile trips");
    let graph = StationGraph::build(&stations, &reconciled.trips);
    let stats = NetworkStats::from_graph(&graph, reconciled.dropped);
    (stations, graph, stats)
}

#[test]
fn test_full_pipeline() {
    let (stations, graph, stats) = run_pipeline();

    // 4 stations, 6 ridership rows of which 2 have unknown endpoint names
    assert_eq!(stats.node_count, 4);
    assert_eq!(stats.edge_count, 4);
    assert_eq!(stats.dropped_trips, 2);

    // Node coverage: exactly the station id set, isolated stations included
    let station_ids: HashSet<u32> = stations.iter().map(|s| s.station_id).collect();
    let node_ids: HashSet<u32> = graph.nodes().iter().copied().collect();
    assert_eq!(node_ids, station_ids);
    assert_eq!(graph.degree(7003), 0);

    // Join soundness: every edge endpoint is a known station id
    for &(from, to) in graph.edges() {
        assert!(station_ids.contains(&from));
        assert!(station_ids.contains(&to));
    }

    // Multigraph fidelity: the two duplicate rides stay as parallel edges
    assert_eq!(graph.parallel_edges(7000, 7001), 2);
}

#[test]
fn test_pipeline_is_idempotent() {
    let (_, _, first) = run_pipeline();
    let (_, _, second) = run_pipeline();

    assert_eq!(first.node_count, second.node_count);
    assert_eq!(first.edge_count, second.edge_count);
    assert_eq!(first.dropped_trips, second.dropped_trips);

    for (a, b) in first.nodes.iter().zip(&second.nodes) {
        assert_eq!(a.station_id, b.station_id);
        assert_eq!(a.degree, b.degree);
        assert_eq!(a.in_degree_centrality, b.in_degree_centrality);
        assert_eq!(a.out_degree_centrality, b.out_degree_centrality);
    }
}

#[test]
fn test_centrality_values_are_in_bounds() {
    let (_, _, stats) = run_pipeline();

    for node in &stats.nodes {
        assert!((0.0..=1.0).contains(&node.in_degree_centrality));
        assert!((0.0..=1.0).contains(&node.out_degree_centrality));
    }

    // The isolated station has centrality exactly 0 in both directions
    let isolated = stats
        .nodes
        .iter()
        .find(|n| n.station_id == 7003)
        .expect("station 7003 missing from report");
    assert_eq!(isolated.in_degree_centrality, 0.0);
    assert_eq!(isolated.out_degree_centrality, 0.0);
}

#[test]
fn test_plot_renders_fixture_network() {
    let (_, graph, _) = run_pipeline();

    let buffer = render_to_buffer(&graph, (128, 128)).expect("render failed");
    assert_eq!(buffer.len(), 128 * 128 * 3);
    assert!(buffer.iter().any(|&b| b != 0xFF));
}

#[test]
fn test_worked_example_scenario() {
    // Stations A and B; trips A→B, A→B, and B→Z where Z is unknown
    let stations = vec![
        Station {
            station_id: 1,
            name: "A".to_string(),
            address: "A St".to_string(),
            capacity: 10,
            lon: 0.0,
            lat: 0.0,
        },
        Station {
            station_id: 2,
            name: "B".to_string(),
            address: "B St".to_string(),
            capacity: 10,
            lon: 1.0,
            lat: 1.0,
        },
    ];
    let rows = vec![
        RawTrip {
            from_station_name: "A".to_string(),
            to_station_name: "B".to_string(),
        },
        RawTrip {
            from_station_name: "A".to_string(),
            to_station_name: "B".to_string(),
        },
        RawTrip {
            from_station_name: "B".to_string(),
            to_station_name: "Z".to_string(),
        },
    ];

    let reconciled = resolve(rows, &stations);
    let graph = StationGraph::build(&stations, &reconciled.trips);

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(reconciled.dropped, 1);
    assert_eq!(graph.out_degree(1), 2);
    assert_eq!(graph.in_degree(1), 0);
    assert_eq!(graph.in_degree(2), 2);
    assert_eq!(graph.out_degree(2), 0);
}
