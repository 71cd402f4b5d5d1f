// Integration tests for linkpath
use linkpath::prelude::*;
use linkpath::{generator, script, RandomGraphConfig, SessionError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::BufReader;

/// A(0,0), B(3,4), C(6,8); A-B and B-C active, A-C inactive; A start, C finish
fn abc() -> (Graph, NodeId, NodeId, NodeId) {
    let mut graph = Graph::new();
    let a = graph.add_node(0, 0);
    let b = graph.add_node(3, 4);
    let c = graph.add_node(6, 8);
    let ab = graph.link_between(a, b).unwrap();
    let bc = graph.link_between(b, c).unwrap();
    graph.activate_link(ab).unwrap();
    graph.activate_link(bc).unwrap();
    graph.set_node_state(a, NodeState::Start).unwrap();
    graph.set_node_state(c, NodeState::Finish).unwrap();
    (graph, a, b, c)
}

#[test]
fn test_two_hop_scenario() {
    let (graph, a, b, c) = abc();
    let ac = graph.link_between(a, c).unwrap();
    assert_eq!(graph.link(ac).unwrap().state(), LinkState::Inactive);

    let path = shortest_path(&graph, a, 10).unwrap();
    assert_eq!(
        path.links(),
        &[graph.link_between(a, b).unwrap(), graph.link_between(b, c).unwrap()]
    );
    assert_eq!(graph.path_length(path.links()), 10.0);
}

#[test]
fn test_depth_one_is_not_enough() {
    let (graph, a, ..) = abc();
    assert!(shortest_path(&graph, a, 1).is_none());
}

#[test]
fn test_start_that_is_finish() {
    let (mut graph, a, ..) = abc();
    graph.set_node_state(a, NodeState::Finish).unwrap();
    let path = shortest_path(&graph, a, 10).unwrap();
    assert!(path.is_empty());
    assert_eq!(graph.path_length(path.links()), 0.0);
}

#[test]
fn test_random_generation_without_links_leaves_nothing() {
    let mut rng = StdRng::seed_from_u64(99);
    let config = RandomGraphConfig { min_nodes: 5, max_nodes: 5, links_per_node: 0 };
    let graph = generator::generate(&config, &mut rng).unwrap();
    assert!(graph.active_links().is_empty());
    assert_eq!(graph.node_count(), 0);
}

#[test]
fn test_startup_configuration() {
    let mut rng = StdRng::seed_from_u64(5);
    let state = StartupConfig::from_args(&[6, 10, 10, 3])
        .unwrap()
        .into_state(&mut rng)
        .unwrap();
    assert_eq!(state.max_depth(), 6);
    assert!(state.graph().node_count() <= 10);
    for node in state.graph().nodes() {
        assert!(state.graph().active_links_of(node.id()).next().is_some());
    }

    assert!(matches!(
        StartupConfig::from_args(&[1, 2]),
        Err(SessionError::ArgumentCount(2))
    ));
}

#[test]
fn test_interactive_session() {
    // Build the graph with clicks only, the way a user would
    let state = AppState::new(Graph::new(), 10);
    let click = |x, y| Event::Click { button: PointerButton::Primary, point: Point::new(x, y) };

    let mut state = state;
    for (x, y) in [(50, 50), (150, 50), (250, 50)] {
        let (next, feedback) = state.handle(click(x, y));
        assert!(matches!(feedback.unwrap(), Feedback::NodeAdded(_)));
        state = next;
    }

    // The first hover sits over both links leaving the left node, the
    // second one over the remaining short link
    for x in [100, 200] {
        let (next, _) = state.handle(Event::PointerMoved(Point::new(x, 52)));
        let (next, feedback) = next.handle(click(x, 52));
        let Feedback::LinksActivated(links) = feedback.unwrap() else {
            panic!("expected activation");
        };
        assert!(!links.is_empty());
        state = next;
    }

    let (state, _) = state.handle(Event::SetMode(InteractionMode::PickStart));
    let (state, _) = state.handle(click(50, 50));
    let (state, _) = state.handle(Event::SetMode(InteractionMode::PickFinish));
    let (state, _) = state.handle(click(250, 50));

    let (state, feedback) = state.handle(Event::FindPath);
    let Feedback::PathFound { path, length } = feedback.unwrap() else {
        panic!("expected a path");
    };
    assert_eq!(length, 200.0);
    // Straight link and detour tie on length; the detour is found first
    assert_eq!(path.len(), 2);
    for id in path.links() {
        assert_eq!(state.graph().link(*id).unwrap().state(), LinkState::PathLeg);
    }
}

#[test]
fn test_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.txt");
    fs::write(
        &path,
        "# three nodes, two links\n\
         add 0 0\n\
         add 30 40\n\
         add 60 80\n\
         link 0 1\n\
         link n1 n2\n\
         find\n\
         mode start\n\
         click left 0 0\n\
         mode finish\n\
         click left 60 80\n\
         find\n\
         show\n",
    )
    .unwrap();

    let mut out = Vec::new();
    let file = fs::File::open(&path).unwrap();
    let state = script::run(AppState::new(Graph::new(), 10), BufReader::new(file), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Please select a beginning node and an ending node"));
    assert!(text.contains("Shortest path: 2 link(s), length 100.00"));
    assert!(text.contains("\"path_leg\""));
    assert_eq!(state.last_path().map(|p| p.len()), Some(2));
}

#[test]
fn test_script_error_reports_line() {
    let mut out = Vec::new();
    let result = script::run(AppState::default(), "add 1 1\n\nteleport 3 3\n".as_bytes(), &mut out);
    match result {
        Err(SessionError::InvalidCommand { line, .. }) => assert_eq!(line, 3),
        other => panic!("unexpected {:?}", other.map(|s| s.graph().node_count())),
    }
}
