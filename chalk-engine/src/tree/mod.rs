//! The equation tree: an arena of nodes addressed by [`NodeId`] handles.
//!
//! Every node stores the handle of its parent and the ordered handles of its children. The arena
//! doubles as the node registry: a handle resolves only while its node is part of the equation.
//! Node ids come from a process-wide counter, so a handle taken from an older snapshot of an
//! equation never resolves to an unrelated node of a newer one.

pub mod build;
pub mod fmt;

use crate::error::{kind, Error};
use std::{
    collections::HashMap,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

pub use fmt::Rendered;

/// Source of fresh node ids.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle of a node. Stable for the lifetime of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Returns a handle that has never been given out before.
    pub(crate) fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value of the handle.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_start_matches('#').parse().map(Self)
    }
}

/// The tag of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// A number other than the identities. Always non-negative once normalized; negative numbers
    /// are a [`Kind::Minus`] wrapping a positive number.
    Number(f64),

    /// A variable, such as `x`.
    Variable(String),

    /// A string literal.
    Str(String),

    /// The additive identity `0`.
    Zero,

    /// The multiplicative identity `1`.
    One,

    /// The number `-1`.
    NegOne,

    /// An n-ary sum.
    Sum,

    /// An n-ary product.
    Product,

    /// The multiplicative inverse of its single child.
    Inverse,

    /// The negation of its single child.
    Minus,

    /// The root of an equation, with exactly two children.
    Equality,

    /// An opaque function-like node, such as `f(a, b)`.
    Custom(String),
}

impl Kind {
    /// Returns true if the kind is a numeric literal: a number or one of the identities.
    pub fn is_numeric_literal(&self) -> bool {
        matches!(self, Kind::Number(_) | Kind::Zero | Kind::One | Kind::NegOne)
    }

    /// Returns true if the kind is an operator that can have children.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Kind::Sum | Kind::Product | Kind::Inverse | Kind::Minus | Kind::Equality | Kind::Custom(_)
        )
    }

    /// Returns true if both kinds denote the same operator. Payloads of literals are ignored, but
    /// custom nodes must share a name.
    pub fn same_operator(&self, other: &Kind) -> bool {
        match (self, other) {
            (Kind::Custom(a), Kind::Custom(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }

    /// A short human-readable name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Number(_) => "number",
            Kind::Variable(_) => "variable",
            Kind::Str(_) => "string",
            Kind::Zero => "zero",
            Kind::One => "one",
            Kind::NegOne => "negative one",
            Kind::Sum => "sum",
            Kind::Product => "product",
            Kind::Inverse => "inverse",
            Kind::Minus => "negation",
            Kind::Equality => "equality",
            Kind::Custom(_) => "function",
        }
    }

    /// The operator symbol of the kind. Numbers, variables and strings have none; custom nodes
    /// share the default symbol `o-`.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Kind::Number(_) | Kind::Variable(_) | Kind::Str(_) => None,
            Kind::Zero => Some("0"),
            Kind::One => Some("1"),
            Kind::NegOne => Some("-1"),
            Kind::Sum => Some("+"),
            Kind::Product => Some("*"),
            Kind::Inverse => Some("1/"),
            Kind::Minus => Some("-"),
            Kind::Equality => Some("="),
            Kind::Custom(_) => Some("o-"),
        }
    }
}

/// A node of the equation tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// The tag and payload of the node.
    pub kind: Kind,

    /// The handle of the parent, or [`None`] for the root.
    pub parent: Option<NodeId>,

    /// The ordered handles of the children.
    pub children: Vec<NodeId>,
}

/// An equation: an arena of nodes rooted at an [`Kind::Equality`] node.
///
/// Cloning an equation keeps every node id, so an operation can run on a clone and the clone can
/// replace the original only when the operation succeeds.
#[derive(Debug, Clone)]
pub struct Equation {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
}

impl Equation {
    /// Creates the equation `lhs = rhs`, where both sides are leaves.
    pub fn from_leaves(lhs: Kind, rhs: Kind) -> Self {
        let mut eq = Self { nodes: HashMap::new(), root: NodeId::fresh() };
        let lhs = eq.alloc(lhs, Vec::new());
        let rhs = eq.alloc(rhs, Vec::new());
        eq.root = eq.alloc(Kind::Equality, vec![lhs, rhs]);
        eq
    }

    /// Returns the handle of the root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of nodes in the equation.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the equation has no nodes. A well-formed equation never does.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolves a handle against this equation. Returns [`None`] if the node is not part of it.
    pub fn lookup(&self, id: NodeId) -> Option<&Node> {
        let node = self.nodes.get(&id)?;

        // the node must also be attached to the root
        let mut current = id;
        while let Some(parent) = self.nodes.get(&current)?.parent {
            current = parent;
        }

        (current == self.root).then_some(node)
    }

    /// Resolves a handle, failing with [`kind::UnknownNode`].
    pub(crate) fn get(&self, id: NodeId) -> Result<&Node, Error> {
        self.lookup(id).ok_or_else(|| Error::new(Vec::new(), kind::UnknownNode { id }))
    }

    /// Internal accessor for a node that may currently be detached from the root.
    pub(crate) fn raw(&self, id: NodeId) -> Result<&Node, Error> {
        self.nodes.get(&id).ok_or_else(|| Error::new(Vec::new(), kind::Malformed {
            detail: "a node refers to a missing node",
        }))
    }

    fn raw_mut(&mut self, id: NodeId) -> Result<&mut Node, Error> {
        self.nodes.get_mut(&id).ok_or_else(|| Error::new(Vec::new(), kind::Malformed {
            detail: "a node refers to a missing node",
        }))
    }

    /// Returns the kind of the node, if it is part of the equation.
    pub fn kind(&self, id: NodeId) -> Option<&Kind> {
        self.lookup(id).map(|node| &node.kind)
    }

    /// Returns the parent of the node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.lookup(id).and_then(|node| node.parent)
    }

    /// Returns the children of the node, or an empty slice if the node is not part of the
    /// equation.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.lookup(id).map_or(&[], |node| &node.children)
    }

    /// Returns the node reached by following the given child indices from the root.
    pub fn at(&self, path: &[usize]) -> Option<NodeId> {
        path.iter().try_fold(self.root, |id, &index| {
            self.nodes.get(&id)?.children.get(index).copied()
        })
    }

    /// Returns every node id in pre-order, starting at the root.
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            ids.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev());
            }
        }
        ids
    }

    /// Returns the position of `child` among the children of `parent`.
    pub(crate) fn index_of(&self, parent: NodeId, child: NodeId) -> Result<usize, Error> {
        self.raw(parent)?
            .children
            .iter()
            .position(|&id| id == child)
            .ok_or_else(|| Error::new(vec![child], kind::Malformed {
                detail: "a node is missing from the children of its parent",
            }))
    }

    /// Returns the side of the equation (0 for the left, 1 for the right) that contains the node.
    pub fn side_of(&self, id: NodeId) -> Option<usize> {
        let mut current = id;
        loop {
            let parent = self.lookup(current)?.parent?;
            if parent == self.root {
                return self.nodes.get(&parent)?.children.iter().position(|&c| c == current);
            }
            current = parent;
        }
    }

    /// Creates a detached node with the given children, linking each child to it.
    pub(crate) fn alloc(&mut self, kind: Kind, children: Vec<NodeId>) -> NodeId {
        let id = NodeId::fresh();
        for child in &children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = Some(id);
            }
        }
        self.nodes.insert(id, Node { kind, parent: None, children });
        id
    }

    /// Creates a detached leaf holding a number, normalized to the identity tags where possible.
    /// Negative numbers become a negation of their absolute value.
    pub(crate) fn number(&mut self, value: f64) -> NodeId {
        if value == 0.0 {
            self.alloc(Kind::Zero, Vec::new())
        } else if value == 1.0 {
            self.alloc(Kind::One, Vec::new())
        } else if value == -1.0 {
            self.alloc(Kind::NegOne, Vec::new())
        } else if value < 0.0 {
            let abs = self.alloc(Kind::Number(-value), Vec::new());
            self.alloc(Kind::Minus, vec![abs])
        } else {
            self.alloc(Kind::Number(value), Vec::new())
        }
    }

    /// Replaces the children of a node, linking each new child to it.
    pub(crate) fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) -> Result<(), Error> {
        for child in &children {
            self.raw_mut(*child)?.parent = Some(id);
        }
        self.raw_mut(id)?.children = children;
        Ok(())
    }

    /// Mutable access to the children of a node. Callers must keep parent links consistent.
    pub(crate) fn children_mut(&mut self, id: NodeId) -> Result<&mut Vec<NodeId>, Error> {
        Ok(&mut self.raw_mut(id)?.children)
    }

    /// Removes a single node from the arena and returns it. Its children stay in the arena and
    /// must be re-linked or removed by the caller.
    pub(crate) fn dismantle(&mut self, id: NodeId) -> Result<Node, Error> {
        self.nodes.remove(&id).ok_or_else(|| Error::new(vec![id], kind::Malformed {
            detail: "tried to remove a missing node",
        }))
    }

    /// Removes a node and all of its descendants from the arena.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(&id) {
                stack.extend(node.children);
            }
        }
    }

    /// Replaces `target` with the node returned by `rule`, in the same child slot of the same
    /// parent (or as the new root).
    ///
    /// The rule receives `target` still in the arena; it may reuse it as part of the replacement,
    /// or dismantle it.
    pub(crate) fn rewrite<F>(&mut self, target: NodeId, rule: F) -> Result<NodeId, Error>
    where
        F: FnOnce(&mut Equation, NodeId) -> Result<NodeId, Error>,
    {
        let parent = self.raw(target)?.parent;
        let slot = match parent {
            Some(parent) => Some(self.index_of(parent, target)?),
            None => None,
        };

        let replacement = rule(self, target)?;
        match (parent, slot) {
            (Some(parent), Some(slot)) => {
                self.raw_mut(replacement)?.parent = Some(parent);
                self.children_mut(parent)?[slot] = replacement;
            },
            _ => {
                self.raw_mut(replacement)?.parent = None;
                self.root = replacement;
            },
        }

        Ok(replacement)
    }

    /// Returns the numeric value of a node, if it is a numeric literal or the negation of a
    /// number.
    pub fn numeric_value(&self, id: NodeId) -> Option<f64> {
        let node = self.nodes.get(&id)?;
        match &node.kind {
            Kind::Number(value) => Some(*value),
            Kind::Zero => Some(0.0),
            Kind::One => Some(1.0),
            Kind::NegOne => Some(-1.0),
            Kind::Minus => match node.children.as_slice() {
                [child] => match self.nodes.get(child)?.kind {
                    Kind::Number(value) => Some(-value),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        }
    }

    /// Structural equality of two subtrees of this equation: same kinds, same payloads, and
    /// structurally equal children in the same order. Ids are ignored.
    pub fn structural_eq(&self, a: NodeId, b: NodeId) -> bool {
        self.subtree_eq(a, self, b)
    }

    /// Structural equality of a subtree of this equation and a subtree of another.
    pub fn subtree_eq(&self, a: NodeId, other: &Equation, b: NodeId) -> bool {
        let (Some(left), Some(right)) = (self.nodes.get(&a), other.nodes.get(&b)) else {
            return false;
        };

        left.kind == right.kind
            && left.children.len() == right.children.len()
            && left.children
                .iter()
                .zip(&right.children)
                .all(|(&l, &r)| self.subtree_eq(l, other, r))
    }

    /// Checks that every parent link matches the actual tree shape, and that every node of the
    /// arena is reachable from the root.
    pub fn check_links(&self) -> bool {
        let Some(root) = self.nodes.get(&self.root) else {
            return false;
        };
        if root.parent.is_some() {
            return false;
        }

        let mut reached = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                return false;
            };
            reached += 1;
            for child in &node.children {
                match self.nodes.get(child) {
                    Some(child_node) if child_node.parent == Some(id) => stack.push(*child),
                    _ => return false,
                }
            }
        }

        reached == self.nodes.len()
    }

    /// Returns the operator symbol of the node. See [`Kind::symbol`].
    pub fn operator_symbol(&self, id: NodeId) -> Option<&'static str> {
        self.kind(id)?.symbol()
    }

    /// Returns the operator symbol of the parent of the node.
    pub fn parent_operator_symbol(&self, id: NodeId) -> Option<&'static str> {
        self.operator_symbol(self.parent(id)?)
    }

    /// Returns the operator symbol of the grandparent of the node.
    pub fn grandparent_operator_symbol(&self, id: NodeId) -> Option<&'static str> {
        self.operator_symbol(self.parent(self.parent(id)?)?)
    }

    /// Returns the operator symbol of the node, or its literal text if it has no symbol.
    pub fn symbol_text(&self, id: NodeId) -> Option<String> {
        let kind = self.kind(id)?;
        if let Some(symbol) = kind.symbol() {
            return Some(symbol.to_string());
        }

        match kind {
            Kind::Number(value) => Some(format!("{}", value)),
            Kind::Variable(name) => Some(name.clone()),
            Kind::Str(value) => Some(format!("\"{}\"", value)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn number_normalization() {
        let mut eq = Equation::from_leaves(Kind::Zero, Kind::Zero);
        let cases = [
            (0.0, Kind::Zero),
            (1.0, Kind::One),
            (-1.0, Kind::NegOne),
            (2.5, Kind::Number(2.5)),
        ];
        for (value, expected) in cases {
            let id = eq.number(value);
            assert_eq!(eq.raw(id).unwrap().kind, expected);
        }

        let negative = eq.number(-4.0);
        let node = eq.raw(negative).unwrap();
        assert_eq!(node.kind, Kind::Minus);
        assert_eq!(eq.raw(node.children[0]).unwrap().kind, Kind::Number(4.0));
        assert_eq!(eq.numeric_value(negative), Some(-4.0));
    }

    #[test]
    fn detached_nodes_do_not_resolve() {
        let mut eq = Equation::parse("a+b=c").unwrap();
        let b = eq.at(&[0, 1]).unwrap();
        assert!(eq.lookup(b).is_some());

        let detached = eq.alloc(Kind::Variable("z".to_string()), Vec::new());
        assert!(eq.lookup(detached).is_none());

        let other = Equation::parse("a+b=c").unwrap();
        assert!(other.lookup(b).is_none());
    }

    #[test]
    fn rewrite_relinks_parent() {
        let mut eq = Equation::parse("a+b=c").unwrap();
        let b = eq.at(&[0, 1]).unwrap();
        let new = eq.rewrite(b, |eq, target| {
            eq.dismantle(target)?;
            Ok(eq.alloc(Kind::Variable("z".to_string()), Vec::new()))
        }).unwrap();

        assert_eq!(eq.at(&[0, 1]), Some(new));
        assert_eq!(eq.parent(new), eq.at(&[0]));
        assert!(eq.check_links());
        assert_eq!(eq.to_string(), "a+z=c");
    }

    #[test]
    fn structural_equality_ignores_ids() {
        let eq = Equation::parse("a*(x+1)+b*(x+1)=0").unwrap();
        let first = eq.at(&[0, 0, 1]).unwrap();
        let second = eq.at(&[0, 1, 1]).unwrap();
        assert_ne!(first, second);
        assert!(eq.structural_eq(first, second));
        assert!(!eq.structural_eq(first, eq.at(&[0, 0]).unwrap()));
    }

    #[test]
    fn side_and_symbols() {
        let eq = Equation::parse("a*b=c+f(d)").unwrap();
        let b = eq.at(&[0, 1]).unwrap();
        let d = eq.at(&[1, 1, 0]).unwrap();
        assert_eq!(eq.side_of(b), Some(0));
        assert_eq!(eq.side_of(d), Some(1));
        assert_eq!(eq.side_of(eq.root()), None);

        assert_eq!(eq.operator_symbol(b), None);
        assert_eq!(eq.parent_operator_symbol(b), Some("*"));
        assert_eq!(eq.grandparent_operator_symbol(b), Some("="));
        assert_eq!(eq.parent_operator_symbol(d), Some("o-"));
        assert_eq!(eq.symbol_text(b), Some("b".to_string()));
        assert_eq!(eq.symbol_text(eq.root()), Some("=".to_string()));
    }

    #[test]
    fn pre_order_ids() {
        let eq = Equation::parse("a+b=c").unwrap();
        let ids = eq.ids();
        assert_eq!(ids.len(), eq.len());
        assert_eq!(ids[0], eq.root());
        assert_eq!(ids[1], eq.at(&[0]).unwrap());
        assert_eq!(ids[2], eq.at(&[0, 0]).unwrap());
        assert_eq!(ids[4], eq.at(&[1]).unwrap());
    }

    #[test]
    fn node_id_from_str() {
        assert_eq!("#12".parse::<NodeId>(), Ok(NodeId(12)));
        assert_eq!("7".parse::<NodeId>(), Ok(NodeId(7)));
        assert!("x".parse::<NodeId>().is_err());
    }
}
