//! Pointer interaction: the morphism-drawing state machine and gesture
//! tracking.
//!
//! [`Selection::on_click`] is a pure transition function so it can be driven
//! by synthetic clicks. Applying the resulting [`Action`] to the graph is the
//! caller's job.

use serde::Deserialize;

use super::types::{NodeId, Vec2};

/// What clicking the already-selected source node does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfClick {
	/// Draw a self-loop on the node.
	#[default]
	Loop,
	/// Ignore the click and keep waiting for a target.
	Keep,
	/// Drop the selection.
	Cancel,
}

/// Morphism-drawing state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	Idle,
	/// A node was clicked and waits to become the source of a morphism.
	SourceSelected(NodeId),
}

/// A completed click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Click {
	Node(NodeId),
	/// Empty canvas.
	Canvas,
}

/// Side effect requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
	None,
	/// Highlight the node as pending source.
	Select(NodeId),
	/// Create a morphism; the highlight is cleared.
	Connect { source: NodeId, target: NodeId },
	/// Clear the highlight without creating anything.
	Cancel,
}

impl Selection {
	pub fn selected(&self) -> Option<NodeId> {
		match self {
			Selection::Idle => None,
			Selection::SourceSelected(id) => Some(*id),
		}
	}

	pub fn on_click(self, click: Click, self_click: SelfClick) -> (Selection, Action) {
		match (self, click) {
			(Selection::Idle, Click::Node(id)) => (Selection::SourceSelected(id), Action::Select(id)),
			(Selection::Idle, Click::Canvas) => (Selection::Idle, Action::None),
			(Selection::SourceSelected(source), Click::Node(target)) if source != target => {
				(Selection::Idle, Action::Connect { source, target })
			}
			(Selection::SourceSelected(id), Click::Node(_)) => match self_click {
				SelfClick::Loop => (
					Selection::Idle,
					Action::Connect {
						source: id,
						target: id,
					},
				),
				SelfClick::Keep => (self, Action::None),
				SelfClick::Cancel => (Selection::Idle, Action::Cancel),
			},
			(Selection::SourceSelected(_), Click::Canvas) => (Selection::Idle, Action::Cancel),
		}
	}
}

/// Node held by an in-progress drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
	pub node: NodeId,
	/// Alpha target in effect before the drag, restored on release.
	pub restore_alpha_target: f64,
}

/// Where a pointer press landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Press {
	Node(NodeId),
	Canvas,
}

/// A pointer press that has not been released yet.
///
/// Until the pointer travels further than the click tolerance the press may
/// still turn out to be a click; after that it is a drag or a pan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
	pub press: Press,
	/// Screen position of the press.
	pub origin: Vec2,
	pub moved: bool,
}

impl Gesture {
	pub fn new(press: Press, origin: Vec2) -> Self {
		Self {
			press,
			origin,
			moved: false,
		}
	}

	/// Record pointer motion. Returns true exactly once, when the pointer
	/// first leaves the tolerance radius.
	pub fn track(&mut self, pointer: Vec2, tolerance: f64) -> bool {
		if !self.moved && self.origin.distance(pointer) > tolerance {
			self.moved = true;
			return true;
		}
		false
	}

	/// The click this press amounts to, if the pointer never moved.
	pub fn release(self) -> Option<Click> {
		if self.moved {
			return None;
		}
		Some(match self.press {
			Press::Node(id) => Click::Node(id),
			Press::Canvas => Click::Canvas,
		})
	}
}
