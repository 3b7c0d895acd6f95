//! End-to-end selection tests: state transitions, highlight overlay and
//! query results over a small leaf catalogue.

use leafgraph::{LeafGraph, NodeId, NodeStyle, QueryResult, SelectionMode};
use pretty_assertions::assert_eq;

// ============================================================================
// Helper: seed the seven leaf types the classifier knows about.
// ============================================================================

fn seed_catalogue() -> LeafGraph {
    let mut graph = LeafGraph::new();
    let leaves: [(&str, &[&str]); 7] = [
        ("Acer Palmatum", &["palmate", "lobed", "serrated", "red"]),
        ("Acer Rubrum", &["palmate", "lobed", "serrated", "red"]),
        ("Aesculus Hippocastanum", &["palmate", "compound", "serrated"]),
        ("Betula Pendula", &["simple", "serrated", "triangular"]),
        ("Fagus Sylvatica", &["simple", "entire", "oval"]),
        ("Quercus Robur", &["simple", "lobed"]),
        ("Tilia Cordata", &["simple", "serrated", "cordate"]),
    ];
    for (leaf, features) in leaves {
        graph.submit_observation(leaf, features).unwrap();
    }
    graph
}

fn subject(graph: &LeafGraph, name: &str) -> NodeId {
    graph.store().subject_id(name).unwrap()
}

fn attribute(graph: &LeafGraph, name: &str) -> NodeId {
    graph.store().attribute_id(name).unwrap()
}

fn highlighted_labels(graph: &LeafGraph) -> Vec<String> {
    graph.render_model().highlighted().map(|n| n.label.clone()).collect()
}

// ============================================================================
// Subjects
// ============================================================================

#[test]
fn test_most_similar_prefers_full_overlap() {
    let mut graph = seed_catalogue();
    let id = subject(&graph, "Acer Palmatum");
    graph.handle_node_click(id, false).unwrap();
    assert_eq!(graph.last_query_result().most_similar(), Some(("Acer Rubrum", 4)));
    assert_eq!(highlighted_labels(&graph), vec!["palmate", "lobed", "serrated", "red"]);
}

#[test]
fn test_most_similar_tie_goes_to_smallest_name() {
    let mut graph = seed_catalogue();
    // Betula shares {simple, serrated} with Tilia and {serrated} / {simple}
    // with others; Tilia is the unique best at 2.
    let id = subject(&graph, "Betula Pendula");
    graph.handle_node_click(id, false).unwrap();
    assert_eq!(graph.last_query_result().most_similar(), Some(("Tilia Cordata", 2)));

    // Quercus shares 1 with Acer Palmatum, Acer Rubrum (lobed) and with
    // Betula, Fagus, Tilia (simple). Alphabetically first wins.
    let id = subject(&graph, "Quercus Robur");
    graph.handle_node_click(id, false).unwrap();
    assert_eq!(graph.last_query_result().most_similar(), Some(("Acer Palmatum", 1)));
}

#[test]
fn test_multi_subject_intersection_narrows() {
    let mut graph = seed_catalogue();
    graph.handle_node_click(subject(&graph, "Acer Palmatum"), false).unwrap();
    graph.handle_node_click(subject(&graph, "Aesculus Hippocastanum"), true).unwrap();
    assert_eq!(highlighted_labels(&graph), vec!["palmate", "serrated"]);

    let result = graph
        .handle_node_click(subject(&graph, "Betula Pendula"), true)
        .unwrap()
        .clone();
    assert_eq!(result, QueryResult::CommonAttributes {
        subjects: vec![
            "Acer Palmatum".into(),
            "Aesculus Hippocastanum".into(),
            "Betula Pendula".into(),
        ],
        attributes: vec!["serrated".into()],
    });

    let result = graph
        .handle_node_click(subject(&graph, "Fagus Sylvatica"), true)
        .unwrap()
        .clone();
    assert_eq!(result, QueryResult::CommonAttributes {
        subjects: vec![
            "Acer Palmatum".into(),
            "Aesculus Hippocastanum".into(),
            "Betula Pendula".into(),
            "Fagus Sylvatica".into(),
        ],
        attributes: vec![],
    });
    assert!(highlighted_labels(&graph).is_empty());
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_multi_attribute_containment() {
    let mut graph = seed_catalogue();
    graph.handle_node_click(attribute(&graph, "simple"), false).unwrap();
    assert_eq!(
        highlighted_labels(&graph),
        vec!["Betula Pendula", "Fagus Sylvatica", "Quercus Robur", "Tilia Cordata"],
    );

    let result = graph
        .handle_node_click(attribute(&graph, "serrated"), true)
        .unwrap()
        .clone();
    assert_eq!(graph.selection().mode(), SelectionMode::MultiAttribute);
    assert_eq!(result, QueryResult::MatchingSubjects {
        query_attributes: vec!["simple".into(), "serrated".into()],
        subjects: vec!["Betula Pendula".into(), "Tilia Cordata".into()],
    });
}

#[test]
fn test_containment_picks_up_new_observations() {
    let config = leafgraph::GraphConfig {
        reset_selection_on_observation: false,
        ..leafgraph::GraphConfig::default()
    };
    let mut graph = LeafGraph::with_config(config);
    graph.submit_observation("Oak", &["lobed", "green"]).unwrap();
    graph.submit_observation("Maple", &["lobed"]).unwrap();

    graph.handle_node_click(attribute(&graph, "lobed"), false).unwrap();
    graph.handle_node_click(attribute(&graph, "green"), true).unwrap();
    assert_eq!(graph.last_query_result(), &QueryResult::MatchingSubjects {
        query_attributes: vec!["lobed".into(), "green".into()],
        subjects: vec!["Oak".into()],
    });

    graph.submit_observation("Maple", &["green"]).unwrap();
    assert_eq!(graph.last_query_result(), &QueryResult::MatchingSubjects {
        query_attributes: vec!["lobed".into(), "green".into()],
        subjects: vec!["Oak".into(), "Maple".into()],
    });
}

// ============================================================================
// Highlight hygiene
// ============================================================================

#[test]
fn test_every_click_clears_previous_highlight() {
    let mut graph = seed_catalogue();
    graph.handle_node_click(subject(&graph, "Acer Palmatum"), false).unwrap();
    assert_eq!(highlighted_labels(&graph).len(), 4);

    graph.handle_node_click(subject(&graph, "Fagus Sylvatica"), false).unwrap();
    assert_eq!(highlighted_labels(&graph), vec!["simple", "entire", "oval"]);

    graph.handle_node_click(attribute(&graph, "cordate"), false).unwrap();
    assert_eq!(highlighted_labels(&graph), vec!["Tilia Cordata"]);
}

#[test]
fn test_reset_selection_restores_default_styles() {
    let mut graph = seed_catalogue();
    graph.handle_node_click(attribute(&graph, "serrated"), false).unwrap();
    assert!(!highlighted_labels(&graph).is_empty());

    graph.reset_selection();
    assert!(graph.last_query_result().is_no_selection());
    for node in graph.render_model().nodes {
        assert_eq!(node.style, node.kind.default_style());
    }
}

#[test]
fn test_render_model_hit_test_feeds_clicks() {
    let mut graph = seed_catalogue();
    let model = graph.render_model();
    let target = model.node(subject(&graph, "Fagus Sylvatica")).unwrap().clone();

    let hit = model.node_at(target.position.x, target.position.y).unwrap();
    assert_eq!(hit, target.id);
    graph.handle_node_click(hit, false).unwrap();
    assert_eq!(graph.selection().mode(), SelectionMode::SingleSubject);
    assert_eq!(
        graph.render_model().node(target.id).unwrap().style,
        NodeStyle::SubjectDefault,
    );
}
