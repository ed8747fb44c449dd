//! End-to-end scenarios driven through the public command surface.
//!
//! Everything here runs headless: clicks and drags are fed to the state
//! directly, no canvas involved.

use diagram_builder::components::category_diagram::scale::ScaleConfig;
use diagram_builder::{
	Click, DiagramConfig, DiagramState, GraphError, MorphismKind, NodeId, NodeKind, Selection, Vec2,
};

const DT: f64 = 1.0 / 60.0;

fn new_state() -> DiagramState {
	DiagramState::new(DiagramConfig::default(), 800.0, 600.0)
}

fn run(state: &mut DiagramState, ticks: usize) {
	for _ in 0..ticks {
		state.tick(DT);
	}
}

fn connect(state: &mut DiagramState, source: NodeId, target: NodeId) {
	state.click(Click::Node(source)).unwrap();
	state.click(Click::Node(target)).unwrap();
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn first_object_becomes_the_terminal_object() {
	let mut state = new_state();
	let id = state.add_object("X").unwrap();
	let node = state.graph().node(id).unwrap();
	assert_eq!(node.kind, NodeKind::Terminal);
	assert_eq!(node.label, "1");
}

#[test]
fn two_clicks_draw_one_morphism() {
	let mut state = new_state();
	let a = state.add_object("A").unwrap();
	let b = state.add_object("B").unwrap();
	state.add_object("C").unwrap();

	state.click(Click::Node(a)).unwrap();
	assert_eq!(state.selection(), Selection::SourceSelected(a));
	state.click(Click::Node(b)).unwrap();
	assert_eq!(state.selection(), Selection::Idle);

	let edges: Vec<_> = state.graph().edges().collect();
	assert_eq!(edges.len(), 1);
	assert_eq!((edges[0].source, edges[0].target), (a, b));

	let props = state.properties();
	assert!(props.has_terminal);
	assert!(!props.has_classifier);
}

#[test]
fn classifier_requested_twice_exists_once() {
	let mut state = new_state();
	let omega = state.add_classifier().unwrap();
	assert_eq!(state.add_classifier(), Err(GraphError::DuplicateClassifier(omega)));
	let classifiers = state
		.graph()
		.nodes()
		.filter(|n| n.kind == NodeKind::Classifier)
		.count();
	assert_eq!(classifiers, 1);
	assert!(state.properties().has_classifier);
}

#[test]
fn dense_diagram_looks_closed_with_products() {
	let mut state = new_state();
	let ids: Vec<NodeId> = ["A", "B", "C", "D"]
		.into_iter()
		.map(|l| state.add_object(l).unwrap())
		.collect();
	for (s, t) in [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (1, 3)] {
		connect(&mut state, ids[s], ids[t]);
	}
	assert_eq!(state.graph().edge_count(), 6);

	let props = state.properties();
	assert!(props.looks_like_it_has_products);
	assert!(props.looks_cartesian_closed);
	assert!(!props.looks_like_a_topos());

	state.add_classifier().unwrap();
	assert!(state.properties().looks_like_a_topos());
}

#[test]
fn dragged_node_tracks_pointer_then_resumes() {
	let mut state = new_state();
	let a = state.add_object("A").unwrap();
	let b = state.add_object("B").unwrap();
	connect(&mut state, a, b);
	run(&mut state, 30);

	let before_drag = state.layout().position(b).unwrap();
	state.drag_start(b).unwrap();
	assert!(state.layout().body(b).unwrap().pinned);

	let mut pointer = before_drag;
	for _ in 0..10 {
		pointer += Vec2::new(25.0, 10.0);
		assert!(state.drag_move(b, pointer));
		state.tick(DT);
		assert_eq!(state.layout().position(b), Some(pointer));
	}

	assert!(state.drag_end(b));
	assert!(!state.layout().body(b).unwrap().pinned);
	let released = state.layout().position(b).unwrap();
	assert_eq!(released, pointer);

	state.tick(DT);
	let first_step = state.layout().position(b).unwrap();
	assert!(
		released.distance(first_step) < 60.0,
		"node jumped {} units after release",
		released.distance(first_step)
	);
	assert!(first_step.distance(before_drag) > 100.0);

	run(&mut state, 30);
	assert_ne!(state.layout().position(b), Some(released));
}

// ============================================================================
// Interaction details
// ============================================================================

#[test]
fn morphism_kind_comes_from_the_second_click() {
	let mut state = new_state();
	let a = state.add_object("A").unwrap();
	let b = state.add_object("B").unwrap();
	state.set_morphism_kind(MorphismKind::Continuous);
	state.click(Click::Node(a)).unwrap();
	state.set_morphism_kind(MorphismKind::Homomorphism);
	let edge = state.click(Click::Node(b)).unwrap().unwrap();
	assert_eq!(edge.kind, MorphismKind::Homomorphism);
}

#[test]
fn canvas_click_cancels_pending_source() {
	let mut state = new_state();
	let a = state.add_object("A").unwrap();
	state.add_object("B").unwrap();
	state.click(Click::Node(a)).unwrap();
	assert_eq!(state.click(Click::Canvas), Ok(None));
	assert_eq!(state.selection(), Selection::Idle);
	assert_eq!(state.graph().edge_count(), 0);
}

#[test]
fn invalid_label_changes_nothing() {
	let mut state = new_state();
	assert_eq!(state.add_object(" \t "), Err(GraphError::InvalidLabel));
	assert!(state.graph().is_empty());
	assert_eq!(state.add_object("Y").map(|id| state.graph().node(id).is_some()), Ok(true));
}

#[test]
fn pointer_gestures_drive_selection() {
	let mut state = new_state();
	let scale = ScaleConfig::default();
	let a = state.add_object("A").unwrap();
	let b = state.add_object("B").unwrap();
	run(&mut state, 400);

	let on_a = state.graph_to_screen(state.layout().position(a).unwrap());
	let on_b = state.graph_to_screen(state.layout().position(b).unwrap());

	state.pointer_down(on_a, &scale);
	state.pointer_up();
	state.pointer_down(on_b, &scale);
	let edge = state.pointer_up().expect("second click should draw a morphism");
	assert_eq!((edge.source, edge.target), (a, b));

	// A press that wanders off is a drag, not a click.
	state.pointer_down(on_a, &scale);
	state.pointer_move(on_a + Vec2::new(40.0, 0.0), &scale);
	assert_eq!(state.dragging(), Some(a));
	assert_eq!(state.pointer_up(), None);
	assert_eq!(state.selection(), Selection::Idle);
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn static_topology_settles() {
	let mut state = new_state();
	for i in 0..10 {
		state.add_object(&format!("N{i}")).unwrap();
	}
	let settled_after = (0..3000).find(|_| {
		state.tick(DT);
		state.layout().is_settled()
	});
	assert!(settled_after.is_some(), "layout never settled");
	assert!(!state.tick(DT));

	state.add_object("late").unwrap();
	assert!(!state.layout().is_settled());
	assert!(state.tick(DT));
}

#[test]
fn self_loop_reheats_a_settled_layout() {
	let mut state = new_state();
	let a = state.add_object("A").unwrap();
	state.add_object("B").unwrap();
	run(&mut state, 3000);
	assert!(state.layout().is_settled());

	state.click(Click::Node(a)).unwrap();
	let edge = state.click(Click::Node(a)).unwrap().expect("self-loop drawn");
	assert!(edge.is_loop());
	assert!(!state.layout().is_settled());
	assert!(state.tick(DT));
}

#[test]
fn degenerate_diagrams_are_settled() {
	let mut state = new_state();
	assert!(state.layout().is_settled());
	assert!(!state.tick(DT));

	state.add_object("X").unwrap();
	assert!(!state.tick(DT));
	assert!(state.layout().is_settled());
}

#[test]
fn frame_mirrors_state() {
	let mut state = new_state();
	let a = state.add_object("A").unwrap();
	let b = state.add_object("B").unwrap();
	connect(&mut state, a, b);
	run(&mut state, 10);

	let scale = ScaleConfig::default();
	let frame = state.frame(&scale);
	assert_eq!(frame, state.frame(&scale));
	assert_eq!(frame.properties, state.properties());
	assert_eq!(frame.nodes.len(), state.graph().node_count());
	assert_eq!(frame.edges.len(), state.graph().edge_count());
	for sprite in &frame.nodes {
		assert_eq!(Some(sprite.position), state.layout().position(sprite.id));
	}
}
