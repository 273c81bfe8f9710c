//! Graph nodes.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::errors::Result;
use crate::math::Scalar;
use crate::units::{Quantity, Unit};

use super::operation::Operation;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Derived labels longer than this appear in their consumers' labels by id.
const MAX_INLINE_LABEL: usize = 40;

fn next_id() -> NodeId {
    NodeId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Process-unique identity of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct NodeData {
    id: NodeId,
    name: String,
    value: Quantity,
    op: Operation,
    inputs: Vec<Node>,
    constant: Option<Quantity>,
}

impl Drop for NodeData {
    // Tear chains down iteratively; the default drop recurses once per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.inputs);
        while let Some(Node(data)) = pending.pop() {
            if let Ok(mut data) = Arc::try_unwrap(data) {
                pending.append(&mut data.inputs);
            }
        }
    }
}

/// A vertex of the computation graph.
///
/// Nodes are cheap to clone: clones share the same immutable data and the
/// same [`NodeId`]. The forward value is computed when the node is built, so
/// a dimension or domain error surfaces at the call that creates the node.
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    /// Creates a leaf holding `value`.
    #[must_use]
    pub fn variable(name: impl Into<String>, value: Quantity) -> Self {
        Self(Arc::new(NodeData {
            id: next_id(),
            name: name.into(),
            value,
            op: Operation::Variable,
            inputs: Vec::new(),
            constant: None,
        }))
    }

    /// Evaluates `op` on `inputs` (and `constant`) and records the result.
    pub(crate) fn apply(
        op: Operation,
        inputs: Vec<Self>,
        constant: Option<Quantity>,
    ) -> Result<Self> {
        let values: Vec<&Quantity> = inputs.iter().map(Self::value).collect();
        let value = op.forward(&values, constant.as_ref())?;
        let inline: Vec<Cow<'_, str>> = inputs.iter().map(Self::inline_label).collect();
        let labels: Vec<&str> = inline.iter().map(AsRef::as_ref).collect();
        let name = op.label(&labels, constant.as_ref());
        Ok(Self(Arc::new(NodeData {
            id: next_id(),
            name,
            value,
            op,
            inputs,
            constant,
        })))
    }

    /// Contribution of `grad` (the gradient at this node) to each input.
    pub(crate) fn backward(&self, grad: &Quantity) -> Result<Vec<Quantity>> {
        let values: Vec<&Quantity> = self.0.inputs.iter().map(Self::value).collect();
        self.0
            .op
            .backward(&values, self.0.constant.as_ref(), &self.0.value, grad)
    }

    /// Identity of the node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// Display name; variables keep the name they were created with,
    /// derived nodes are labelled from their inputs, e.g. `(a+b)`.
    ///
    /// A derived input whose own label is long is referred to by its id, so
    /// a long chain is labelled `(#41+1)` rather than by its whole expression.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    fn inline_label(&self) -> Cow<'_, str> {
        if self.is_variable() || self.0.name.len() <= MAX_INLINE_LABEL {
            Cow::Borrowed(&self.0.name)
        } else {
            Cow::Owned(self.id().to_string())
        }
    }

    /// Forward value.
    #[must_use]
    pub fn value(&self) -> &Quantity {
        &self.0.value
    }

    /// Unit of the forward value.
    #[must_use]
    pub fn unit(&self) -> &Unit {
        self.0.value.unit()
    }

    /// Scalar forward value, if the value is a scalar.
    #[must_use]
    pub fn scalar(&self) -> Option<Scalar> {
        self.0.value.scalar()
    }

    /// Operation that produced the node.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.0.op
    }

    /// Input nodes in operand order.
    #[must_use]
    pub fn inputs(&self) -> &[Self] {
        &self.0.inputs
    }

    /// Constant operand of a by-constant operation.
    #[must_use]
    pub fn constant(&self) -> Option<&Quantity> {
        self.0.constant.as_ref()
    }

    /// True for leaves created with [`Node::variable`].
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.0.op == Operation::Variable
    }
}

/// Creates a leaf node; shorthand for [`Node::variable`].
#[must_use]
pub fn variable(name: impl Into<String>, value: Quantity) -> Node {
    Node::variable(name, value)
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("op", &self.0.op)
            .field("value", &self.0.value)
            .field("inputs", &self.0.inputs.len())
            .finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.0.name, self.0.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::definitions::{METRE, SECOND};

    #[test]
    fn ids_are_unique_and_shared_by_clones() {
        let a = variable("a", Quantity::new(1.0, METRE));
        let b = variable("a", Quantity::new(1.0, METRE));
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
        let c = a.clone();
        assert_eq!(a, c);
        assert!(a.is_variable());
    }

    #[test]
    fn applied_nodes_keep_inputs_and_value() {
        let x = variable("x", Quantity::new(6.0, METRE));
        let t = variable("t", Quantity::new(2.0, SECOND));
        let v = Node::apply(Operation::Div, vec![x.clone(), t.clone()], None).unwrap();
        assert_eq!(v.scalar(), Some(3.0));
        assert_eq!(v.inputs(), &[x, t]);
        assert_eq!(v.name(), "(x/t)");
        assert_eq!(v.operation(), Operation::Div);
        assert_eq!(v.to_string(), "(x/t) = 3 m s^-1");
    }

    #[test]
    fn failed_forward_builds_nothing() {
        let x = variable("x", Quantity::new(1.0, METRE));
        let t = variable("t", Quantity::new(1.0, SECOND));
        assert!(Node::apply(Operation::Add, vec![x, t], None).is_err());
    }

    #[test]
    fn long_labels_are_referenced_by_id() {
        let x = variable("position_of_the_first_body", Quantity::new(1.0, METRE));
        let sum = Node::apply(Operation::Add, vec![x.clone(), x.clone()], None).unwrap();
        assert_eq!(sum.name(), "(position_of_the_first_body+position_of_the_first_body)");

        let next = sum.add_const(Quantity::new(1.0, METRE)).unwrap();
        assert_eq!(next.name(), format!("({}+1 m)", sum.id()));

        let mut y = variable("y", Quantity::dimensionless(0.0));
        for _ in 0..1_000 {
            y = y.add_const(1.0).unwrap();
            assert!(y.name().len() <= MAX_INLINE_LABEL + 24);
        }
    }

    #[test]
    fn deep_chains_drop_iteratively() {
        let x = variable("x", Quantity::dimensionless(0.0));
        let mut y = x.clone();
        let mut middle = None;
        for i in 0..100_000 {
            y = y.add_const(1.0).unwrap();
            if i == 50_000 {
                middle = Some(y.clone());
            }
        }
        assert_eq!(y.scalar(), Some(100_000.0));
        drop(y);

        let middle = middle.unwrap();
        assert_eq!(middle.scalar(), Some(50_001.0));
        assert_eq!(middle.inputs().len(), 1);
        drop(middle);
        assert!(x.is_variable());
    }

    #[test]
    fn nodes_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Node>();
    }
}
