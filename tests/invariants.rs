//! Property tests: arbitrary command sequences never break the graph.

use diagram_builder::components::category_diagram::infer;
use diagram_builder::components::category_diagram::scale::ScaleConfig;
use diagram_builder::{Click, DiagramConfig, DiagramState, MorphismKind, NodeId, NodeKind};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Command {
	AddObject(String),
	AddClassifier,
	ClickNode(usize),
	ClickCanvas,
	Remove(usize),
	SetKind(MorphismKind),
	Drag(usize, f64, f64),
	Tick(usize),
}

fn arb_kind() -> impl Strategy<Value = MorphismKind> {
	prop_oneof![
		Just(MorphismKind::Function),
		Just(MorphismKind::Homomorphism),
		Just(MorphismKind::Continuous),
		Just(MorphismKind::Natural),
		"[a-z]{1,6}".prop_map(MorphismKind::Custom),
	]
}

fn arb_command() -> impl Strategy<Value = Command> {
	prop_oneof![
		4 => "[ A-Za-z]{0,4}".prop_map(Command::AddObject),
		1 => Just(Command::AddClassifier),
		6 => (0usize..16).prop_map(Command::ClickNode),
		1 => Just(Command::ClickCanvas),
		1 => (0usize..16).prop_map(Command::Remove),
		1 => arb_kind().prop_map(Command::SetKind),
		1 => (0usize..16, -200.0..200.0f64, -200.0..200.0f64)
			.prop_map(|(i, dx, dy)| Command::Drag(i, dx, dy)),
		1 => (1usize..20).prop_map(Command::Tick),
	]
}

/// Pick a live node by position, wrapping around the current node list.
fn pick(state: &DiagramState, index: usize) -> Option<NodeId> {
	let ids: Vec<NodeId> = state.graph().nodes().map(|n| n.id).collect();
	if ids.is_empty() {
		None
	} else {
		Some(ids[index % ids.len()])
	}
}

fn apply(state: &mut DiagramState, command: Command) {
	match command {
		Command::AddObject(label) => {
			let _ = state.add_object(&label);
		}
		Command::AddClassifier => {
			let _ = state.add_classifier();
		}
		Command::ClickNode(i) => {
			if let Some(id) = pick(state, i) {
				let _ = state.click(Click::Node(id));
			}
		}
		Command::ClickCanvas => {
			let _ = state.click(Click::Canvas);
		}
		Command::Remove(i) => {
			if let Some(id) = pick(state, i) {
				let _ = state.remove_node(id);
			}
		}
		Command::SetKind(kind) => state.set_morphism_kind(kind),
		Command::Drag(i, dx, dy) => {
			if let Some(id) = pick(state, i) {
				if let Some(start) = state.layout().position(id) {
					let _ = state.drag_start(id);
					state.drag_move(id, start + diagram_builder::Vec2::new(dx, dy));
					state.tick(1.0 / 60.0);
					state.drag_end(id);
				}
			}
		}
		Command::Tick(n) => {
			for _ in 0..n {
				state.tick(1.0 / 60.0);
			}
		}
	}
}

fn check(state: &DiagramState) -> Result<(), TestCaseError> {
	let graph = state.graph();

	for edge in graph.edges() {
		prop_assert!(graph.contains_node(edge.source), "dangling source on {}", edge.id);
		prop_assert!(graph.contains_node(edge.target), "dangling target on {}", edge.id);
	}

	let classifiers = graph
		.nodes()
		.filter(|n| n.kind == NodeKind::Classifier)
		.count();
	prop_assert!(classifiers <= 1);

	let terminals = graph.nodes().filter(|n| n.kind == NodeKind::Terminal).count();
	prop_assert!(terminals <= 1);

	for node in graph.nodes() {
		prop_assert!(!node.label.trim().is_empty());
	}

	if let Some(source) = state.selection().selected() {
		prop_assert!(graph.contains_node(source));
	}

	prop_assert_eq!(state.layout().bodies().len(), graph.node_count());
	for node in graph.nodes() {
		let position = state.layout().position(node.id);
		prop_assert!(position.is_some());
		if let Some(p) = position {
			prop_assert!(p.x.is_finite() && p.y.is_finite());
		}
	}

	prop_assert_eq!(state.properties(), infer(graph, &state.config().heuristics));
	Ok(())
}

proptest! {
	#[test]
	fn commands_preserve_graph_invariants(commands in prop::collection::vec(arb_command(), 0..60)) {
		let mut state = DiagramState::new(DiagramConfig::default(), 800.0, 600.0);
		for command in commands {
			apply(&mut state, command);
			check(&state)?;
		}
	}

	#[test]
	fn projection_is_stable(commands in prop::collection::vec(arb_command(), 0..30)) {
		let mut state = DiagramState::new(DiagramConfig::default(), 800.0, 600.0);
		for command in commands {
			apply(&mut state, command);
		}
		let scale = ScaleConfig::default();
		let frame = state.frame(&scale);
		prop_assert_eq!(&frame, &state.frame(&scale));
		prop_assert_eq!(frame.nodes.len(), state.graph().node_count());
		prop_assert_eq!(frame.edges.len(), state.graph().edge_count());
	}
}
