//! Reverse-mode differentiation over a node graph.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::ops::Index;

use log::{debug, trace};

use crate::errors::{Error, Result};
use crate::units::{Quantity, Unit};

use super::node::{Node, NodeId};

/// Returns every node reachable from `output`, each input before the nodes
/// that consume it. `output` is last.
///
/// The walk uses an explicit stack rather than recursion.
#[must_use]
pub fn topological_order(output: &Node) -> Vec<Node> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![(output.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
            continue;
        }
        if !visited.insert(node.id()) {
            continue;
        }
        stack.push((node.clone(), true));
        for input in node.inputs().iter().rev() {
            if !visited.contains(&input.id()) {
                stack.push((input.clone(), false));
            }
        }
    }

    order
}

/// Gradients of one output with respect to a set of nodes.
#[derive(Debug, Clone, Default)]
pub struct Gradients {
    inner: HashMap<NodeId, Quantity>,
}

impl Gradients {
    /// Gradient for `node`, if one was requested or reached.
    #[must_use]
    pub fn get(&self, node: &Node) -> Option<&Quantity> {
        self.inner.get(&node.id())
    }

    /// Gradient by node id.
    #[must_use]
    pub fn get_by_id(&self, id: NodeId) -> Option<&Quantity> {
        self.inner.get(&id)
    }

    /// Number of stored gradients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when no gradient is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over `(id, gradient)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Quantity)> {
        self.inner.iter()
    }
}

impl Index<&Node> for Gradients {
    type Output = Quantity;

    fn index(&self, node: &Node) -> &Quantity {
        match self.get(node) {
            Some(grad) => grad,
            None => panic!("no gradient recorded for node `{}`", node.name()),
        }
    }
}

/// Reverse-mode differentiation settings.
///
/// ```
/// use dimdiff::prelude::*;
///
/// # fn main() -> dimdiff::Result<()> {
/// let x = variable("x", Quantity::new(2.0, METRE));
/// let t = variable("t", Quantity::new(4.0, SECOND));
/// let v = (&x / &t)?;
/// let grads = Differentiator::new().differentiate(&v, [&x, &t])?;
/// assert_eq!(grads[&x].unit(), &SECOND.recip());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Differentiator {
    seed: Option<Quantity>,
    strict: bool,
}

impl Differentiator {
    /// Default settings: unit seed, non-differentiable nodes skipped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `seed` as the gradient of the output instead of a dimensionless one.
    /// The seed must have the output's shape.
    #[must_use]
    pub fn with_seed(mut self, seed: Quantity) -> Self {
        self.seed = Some(seed);
        self
    }

    /// When `true`, a non-differentiable node that receives a gradient is an
    /// error rather than a dead end.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Gradients of `output` with respect to each node in `wrt`.
    ///
    /// Every requested node gets an entry expressed in
    /// `unit(seed) * unit(output) / unit(node)`; nodes the output does not
    /// depend on get zeros of their own shape.
    pub fn differentiate<'a>(
        &self,
        output: &Node,
        wrt: impl IntoIterator<Item = &'a Node>,
    ) -> Result<Gradients> {
        let wrt: Vec<&Node> = wrt.into_iter().collect();
        let (mut raw, seed_unit) = self.reverse_pass(output, wrt.len())?;

        let mut inner = HashMap::with_capacity(wrt.len());
        for node in wrt {
            let unit = gradient_unit(&seed_unit, output, node)?;
            let grad = match raw.remove(&node.id()) {
                Some(grad) => grad.to(&unit)?,
                None => Quantity::new(node.value().value().full_like(0.0), unit),
            };
            inner.insert(node.id(), grad);
        }
        Ok(Gradients { inner })
    }

    /// Gradients of `output` with respect to every node it depends on,
    /// including itself.
    pub fn all_gradients(&self, output: &Node) -> Result<Gradients> {
        let (raw, seed_unit) = self.reverse_pass(output, 0)?;
        let nodes: HashMap<NodeId, Node> = topological_order(output)
            .into_iter()
            .map(|node| (node.id(), node))
            .collect();

        let mut inner = HashMap::with_capacity(raw.len());
        for (id, grad) in raw {
            let grad = match nodes.get(&id) {
                Some(node) => grad.to(&gradient_unit(&seed_unit, output, node)?)?,
                None => grad,
            };
            inner.insert(id, grad);
        }
        Ok(Gradients { inner })
    }

    fn seed_for(&self, output: &Node) -> Result<Quantity> {
        let Some(seed) = &self.seed else {
            return Ok(Quantity::dimensionless(output.value().value().full_like(1.0)));
        };
        let (given, expected) = (seed.value(), output.value().value());
        match (given.shape(), expected.shape()) {
            (None, None) => Ok(seed.clone()),
            (Some(lhs), Some(rhs)) if lhs == rhs => Ok(seed.clone()),
            (Some(lhs), Some(rhs)) => Err(Error::ShapeMismatch {
                op: "seed",
                lhs,
                rhs,
            }),
            _ => Err(Error::UnsupportedOperand {
                op: "seed",
                operand: given.kind(),
            }),
        }
    }

    /// Accumulates the gradient of every node reachable from `output`.
    /// Gradients are physically correct but not yet in their display unit.
    fn reverse_pass(
        &self,
        output: &Node,
        requested: usize,
    ) -> Result<(HashMap<NodeId, Quantity>, Unit)> {
        let seed = self.seed_for(output)?;
        let seed_unit = seed.unit().clone();
        let order = topological_order(output);
        debug!(
            "differentiating `{}`: {} nodes, {} inputs requested",
            output.name(),
            order.len(),
            requested
        );

        let mut grads: HashMap<NodeId, Quantity> = HashMap::with_capacity(order.len());
        grads.insert(output.id(), seed);

        for node in order.iter().rev() {
            if node.inputs().is_empty() {
                continue;
            }
            let Some(grad) = grads.get(&node.id()) else {
                continue;
            };
            let contributions = match node.backward(grad) {
                Ok(contributions) => contributions,
                Err(Error::NotDifferentiable { op }) if !self.strict => {
                    trace!("skipping non-differentiable `{}` ({op})", node.name());
                    continue;
                }
                Err(err) => return Err(err),
            };
            for (input, contribution) in node.inputs().iter().zip(contributions) {
                accumulate(&mut grads, input.id(), contribution)?;
            }
        }

        Ok((grads, seed_unit))
    }
}

fn accumulate(grads: &mut HashMap<NodeId, Quantity>, id: NodeId, grad: Quantity) -> Result<()> {
    match grads.entry(id) {
        Entry::Occupied(mut slot) => {
            let total = slot.get().try_add(&grad)?;
            slot.insert(total);
        }
        Entry::Vacant(slot) => {
            slot.insert(grad);
        }
    }
    Ok(())
}

fn gradient_unit(seed: &Unit, output: &Node, input: &Node) -> Result<Unit> {
    seed.try_multiply(&output.unit().try_divide(input.unit())?)
}

/// Gradients of `output` with respect to `wrt` using default settings.
pub fn differentiate<'a>(
    output: &Node,
    wrt: impl IntoIterator<Item = &'a Node>,
) -> Result<Gradients> {
    Differentiator::new().differentiate(output, wrt)
}
