//! The algebraic properties a user can apply to a selection.
//!
//! Every function in this module validates the selection, then edits the equation with a short
//! sequence of [`primitive`] edits and [`rules`](crate::rules). The functions run on whatever
//! equation they are given; atomicity is the job of the [`Session`](crate::Session), which hands
//! them a copy of the committed equation.

pub mod distribute;
pub mod factor;
pub mod operate;
pub mod side;

use crate::{
    error::{kind, Error},
    primitive,
    step::{Step, StepCollector},
    tree::{Equation, Kind, NodeId},
};
use std::{fmt, str::FromStr};

pub use distribute::{distribute, is_on_distributive_form};
pub use factor::common_factor;
pub use operate::operate;
pub use side::change_side;

/// The direction in which to move a term with the commutative property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Returns the parent of a node of the equation, failing with [`kind::NoParent`] for the root.
pub(crate) fn parent_of(eq: &Equation, id: NodeId) -> Result<NodeId, Error> {
    eq.get(id)?
        .parent
        .ok_or_else(|| Error::new(vec![id], kind::NoParent))
}

/// Swaps a term with its left or right neighbor.
pub fn commute(
    eq: &mut Equation,
    node: NodeId,
    direction: Direction,
    steps: &mut dyn StepCollector<Step>,
) -> Result<(), Error> {
    let parent = parent_of(eq, node)?;
    let parent_kind = eq.raw(parent)?.kind.clone();
    if !matches!(parent_kind, Kind::Sum | Kind::Product | Kind::Equality) {
        return Err(Error::new(vec![node], kind::NotCommutative { operator: parent_kind.name() }));
    }

    let index = eq.index_of(parent, node)?;
    let len = eq.raw(parent)?.children.len();
    let neighbor = match direction {
        Direction::Left => index.checked_sub(1),
        Direction::Right => Some(index + 1).filter(|&i| i < len),
    };
    let Some(neighbor) = neighbor else {
        return Err(Error::new(vec![node], kind::IndexExceeded {
            left: direction == Direction::Left,
            len,
        }));
    };

    primitive::swap(eq, parent, index, neighbor, steps)
}

/// Groups the run of sibling terms from `start` to `end` (in either order) into one operand.
/// Returns the new operand.
pub fn associate(
    eq: &mut Equation,
    start: NodeId,
    end: NodeId,
    steps: &mut dyn StepCollector<Step>,
) -> Result<NodeId, Error> {
    let parent = parent_of(eq, start)?;
    if eq.get(end)?.parent != Some(parent) {
        return Err(Error::new(vec![start, end], kind::ParentsDiffer));
    }

    let parent_kind = eq.raw(parent)?.kind.clone();
    if !matches!(parent_kind, Kind::Sum | Kind::Product) {
        return Err(Error::new(vec![start], kind::NotAssociative { operator: parent_kind.name() }));
    }

    let i = eq.index_of(parent, start)?;
    let j = eq.index_of(parent, end)?;
    let (i, j) = (i.min(j), i.max(j));
    let len = eq.raw(parent)?.children.len();
    if i == j || (i == 0 && j == len - 1) {
        return Err(Error::new(vec![start, end], kind::NothingToAssociate));
    }

    primitive::associate(eq, parent, i, j, steps)
}

/// Splits a sum inside a sum (or a product inside a product) into operands of its parent.
pub fn dissociate(
    eq: &mut Equation,
    node: NodeId,
    steps: &mut dyn StepCollector<Step>,
) -> Result<(), Error> {
    let parent = parent_of(eq, node)?;
    let parent_kind = eq.raw(parent)?.kind.clone();
    let node_kind = eq.raw(node)?.kind.clone();
    if !parent_kind.same_operator(&node_kind) {
        return Err(Error::new(vec![node], kind::OperatorsDiffer {
            child: node_kind.name(),
            parent: parent_kind.name(),
        }));
    }
    if !matches!(parent_kind, Kind::Sum | Kind::Product) {
        return Err(Error::new(vec![node], kind::NotAssociative { operator: parent_kind.name() }));
    }

    let index = eq.index_of(parent, node)?;
    primitive::dissociate(eq, parent, index, steps)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn commute_neighbors() {
        let mut eq = Equation::parse("a+b+c=d").unwrap();
        let b = eq.at(&[0, 1]).unwrap();
        commute(&mut eq, b, Direction::Left, &mut ()).unwrap();
        assert_eq!(eq.to_string(), "b+a+c=d");
        commute(&mut eq, b, Direction::Right, &mut ()).unwrap();
        commute(&mut eq, b, Direction::Right, &mut ()).unwrap();
        assert_eq!(eq.to_string(), "a+c+b=d");

        let err = commute(&mut eq, b, Direction::Right, &mut ()).unwrap_err();
        assert_eq!(err.downcast_ref::<kind::IndexExceeded>(), Some(&kind::IndexExceeded { left: false, len: 3 }));
    }

    #[test]
    fn commute_sides() {
        let mut eq = Equation::parse("a+b=c").unwrap();
        let lhs = eq.at(&[0]).unwrap();
        commute(&mut eq, lhs, Direction::Right, &mut ()).unwrap();
        assert_eq!(eq.to_string(), "c=a+b");
    }

    #[test]
    fn commute_root_has_no_parent() {
        let mut eq = Equation::parse("a=b").unwrap();
        let root = eq.root();
        let err = commute(&mut eq, root, Direction::Left, &mut ()).unwrap_err();
        assert!(err.is::<kind::NoParent>());
        assert_eq!(err.nodes, vec![root]);
    }

    #[test]
    fn commute_inside_negation() {
        let mut eq = Equation::parse("-a=b").unwrap();
        let a = eq.at(&[0, 0]).unwrap();
        let err = commute(&mut eq, a, Direction::Left, &mut ()).unwrap_err();
        assert!(err.is::<kind::NotCommutative>());
    }

    #[test]
    fn associate_run() {
        let mut eq = Equation::parse("a*b*c*d=e").unwrap();
        let d = eq.at(&[0, 3]).unwrap();
        let b = eq.at(&[0, 1]).unwrap();
        associate(&mut eq, d, b, &mut ()).unwrap();
        assert_eq!(eq.to_string(), "a*(b*c*d)=e");
    }

    #[test]
    fn associate_rejections() {
        let mut eq = Equation::parse("a+b=c+d").unwrap();
        let a = eq.at(&[0, 0]).unwrap();
        let b = eq.at(&[0, 1]).unwrap();
        let c = eq.at(&[1, 0]).unwrap();
        assert!(associate(&mut eq, a, c, &mut ()).unwrap_err().is::<kind::ParentsDiffer>());
        assert!(associate(&mut eq, a, b, &mut ()).unwrap_err().is::<kind::NothingToAssociate>());
        assert!(associate(&mut eq, a, a, &mut ()).unwrap_err().is::<kind::NothingToAssociate>());

        let lhs = eq.at(&[0]).unwrap();
        let rhs = eq.at(&[1]).unwrap();
        assert!(associate(&mut eq, lhs, rhs, &mut ()).unwrap_err().is::<kind::NotAssociative>());
        assert_eq!(eq.to_string(), "a+b=c+d");
    }

    #[test]
    fn dissociate_nested() {
        let mut eq = Equation::parse("a+(b+c)=d*(e*f)").unwrap();
        let inner = eq.at(&[0, 1]).unwrap();
        dissociate(&mut eq, inner, &mut ()).unwrap();
        assert_eq!(eq.to_string(), "a+b+c=d*(e*f)");

        let product = eq.at(&[1, 1]).unwrap();
        dissociate(&mut eq, product, &mut ()).unwrap();
        assert_eq!(eq.to_string(), "a+b+c=d*e*f");
    }

    #[test]
    fn dissociate_mismatched() {
        let mut eq = Equation::parse("a+b*c=d").unwrap();
        let product = eq.at(&[0, 1]).unwrap();
        let err = dissociate(&mut eq, product, &mut ()).unwrap_err();
        assert_eq!(err.downcast_ref::<kind::OperatorsDiffer>(), Some(&kind::OperatorsDiffer { child: "product", parent: "sum" }));
    }
}
