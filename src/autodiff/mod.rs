//! Reverse-mode automatic differentiation over dimensioned quantities.
//!
//! Graphs are built eagerly: every operation on a [`Node`] evaluates its
//! forward value immediately and returns a new node that remembers its
//! inputs. [`differentiate`] then walks the graph backwards from an output.

pub mod differentiator;
pub mod node;
pub mod operation;
mod ops;

pub use differentiator::{differentiate, topological_order, Differentiator, Gradients};
pub use node::{variable, Node, NodeId};
pub use operation::Operation;
