//! Category diagram builder.
//!
//! A live graph of typed objects and morphisms with:
//! - a graph model that keeps edges attached to live nodes and allows a single classifier
//! - a force-directed layout simulation that settles and reheats on edits
//! - a click-to-connect state machine plus drag, pan and zoom handling
//! - heuristic property inference recomputed after every mutation
//! - a stateless projection and canvas renderer
//!
//! # Example
//!
//! ```
//! use diagram_builder::{Click, DiagramConfig, DiagramState, NodeKind};
//!
//! let mut state = DiagramState::new(DiagramConfig::default(), 800.0, 600.0);
//! let one = state.add_object("X").unwrap();
//! let a = state.add_object("A").unwrap();
//! assert_eq!(state.graph().node(one).unwrap().kind, NodeKind::Terminal);
//!
//! state.click(Click::Node(a)).unwrap();
//! let edge = state.click(Click::Node(one)).unwrap().unwrap();
//! assert_eq!((edge.source, edge.target), (a, one));
//! assert!(state.properties().has_terminal);
//! ```

mod component;
mod config;
mod error;
mod graph;
mod inference;
mod interaction;
mod layout;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;
mod view;

pub use component::DiagramBuilder;
pub use config::DiagramConfig;
pub use error::GraphError;
pub use graph::{CLASSIFIER_LABEL, Graph, TERMINAL_LABEL};
pub use inference::{DerivedProperties, Heuristics, PanelLine, infer};
pub use interaction::{Action, Click, Drag, Gesture, Press, SelfClick, Selection};
pub use layout::{Body, LayoutConfig, Simulation};
pub use state::{DiagramState, ViewTransform};
pub use theme::Theme;
pub use types::{Edge, EdgeId, MorphismKind, Node, NodeId, NodeKind, Vec2};
pub use view::{EdgeShape, EdgeSprite, Frame, NodeSprite};
