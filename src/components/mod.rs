//! UI components.

pub mod category_diagram;
