//! Rules that move a term across the equality.
//!
//! Every rule here is applied to the [`Kind::Equality`] root and edits it in place. A main term is
//! moved from a side of the shape `rest + term` (or `rest * term`), leaving `rest` behind. The
//! moved term is added to (or multiplied into) the other side, appending to it if it is already a
//! sum (or product).

use crate::{error::Error, tree::{Equation, Kind, NodeId}};
use super::{malformed, negate, pair, single, unnegate};

/// Combines `side` and `term` with the given operator. If `side` is already that operator, the
/// term is appended to its operands.
fn append(eq: &mut Equation, op: Kind, side: NodeId, term: NodeId) -> Result<NodeId, Error> {
    if eq.raw(side)?.kind == op {
        let mut children = eq.raw(side)?.children.clone();
        children.push(term);
        eq.set_children(side, children)?;
        Ok(side)
    } else {
        Ok(eq.alloc(op, vec![side, term]))
    }
}

/// The inverse of a detached node. The identities `1` and `-1` are their own inverses.
fn invert(eq: &mut Equation, id: NodeId) -> Result<NodeId, Error> {
    let kind = eq.raw(id)?.kind.clone();
    match kind {
        Kind::One | Kind::NegOne => Ok(id),
        Kind::Zero => Err(malformed(id, "tried to invert zero")),
        _ => Ok(eq.alloc(Kind::Inverse, vec![id])),
    }
}

/// The operand of a detached inverse.
fn uninvert(eq: &mut Equation, id: NodeId) -> Result<NodeId, Error> {
    let operand = single(eq, id, Kind::Inverse)?;
    eq.dismantle(id)?;
    Ok(operand)
}

/// Moves the last operand of the side `from` to the other side.
fn move_term(
    eq: &mut Equation,
    root: NodeId,
    from: usize,
    op: Kind,
    convert: fn(&mut Equation, NodeId) -> Result<NodeId, Error>,
) -> Result<NodeId, Error> {
    let (lhs, rhs) = pair(eq, root, Kind::Equality)?;
    let (source, other) = if from == 0 { (lhs, rhs) } else { (rhs, lhs) };
    let (rest, term) = pair(eq, source, op.clone())?;

    eq.dismantle(source)?;
    let moved = convert(eq, term)?;
    let other = append(eq, op, other, moved)?;

    let sides = if from == 0 { vec![rest, other] } else { vec![other, rest] };
    eq.set_children(root, sides)?;
    Ok(root)
}

/// `r+t = R` to `r = R-t`
pub fn move_addend_left_to_right(eq: &mut Equation, root: NodeId) -> Result<NodeId, Error> {
    move_term(eq, root, 0, Kind::Sum, negate)
}

/// `r-t = R` to `r = R+t`
pub fn move_neg_addend_left_to_right(eq: &mut Equation, root: NodeId) -> Result<NodeId, Error> {
    move_term(eq, root, 0, Kind::Sum, unnegate)
}

/// `L = r+t` to `L-t = r`
pub fn move_addend_right_to_left(eq: &mut Equation, root: NodeId) -> Result<NodeId, Error> {
    move_term(eq, root, 1, Kind::Sum, negate)
}

/// `L = r-t` to `L+t = r`
pub fn move_neg_addend_right_to_left(eq: &mut Equation, root: NodeId) -> Result<NodeId, Error> {
    move_term(eq, root, 1, Kind::Sum, unnegate)
}

/// `r*t = R` to `r = R/t`
pub fn move_factor_left_to_right(eq: &mut Equation, root: NodeId) -> Result<NodeId, Error> {
    move_term(eq, root, 0, Kind::Product, invert)
}

/// `r/t = R` to `r = R*t`
pub fn move_inv_factor_left_to_right(eq: &mut Equation, root: NodeId) -> Result<NodeId, Error> {
    move_term(eq, root, 0, Kind::Product, uninvert)
}

/// `L = r*t` to `L/t = r`
pub fn move_factor_right_to_left(eq: &mut Equation, root: NodeId) -> Result<NodeId, Error> {
    move_term(eq, root, 1, Kind::Product, invert)
}

/// `L = r/t` to `L*t = r`
pub fn move_inv_factor_right_to_left(eq: &mut Equation, root: NodeId) -> Result<NodeId, Error> {
    move_term(eq, root, 1, Kind::Product, uninvert)
}

/// `L = R` to `0 = R-L`
pub fn move_left_side(eq: &mut Equation, root: NodeId) -> Result<NodeId, Error> {
    let (lhs, rhs) = pair(eq, root, Kind::Equality)?;
    let moved = negate(eq, lhs)?;
    let rhs = append(eq, Kind::Sum, rhs, moved)?;
    let zero = eq.alloc(Kind::Zero, Vec::new());
    eq.set_children(root, vec![zero, rhs])?;
    Ok(root)
}

/// `L = R` to `L-R = 0`
pub fn move_right_side(eq: &mut Equation, root: NodeId) -> Result<NodeId, Error> {
    let (lhs, rhs) = pair(eq, root, Kind::Equality)?;
    let moved = negate(eq, rhs)?;
    let lhs = append(eq, Kind::Sum, lhs, moved)?;
    let zero = eq.alloc(Kind::Zero, Vec::new());
    eq.set_children(root, vec![lhs, zero])?;
    Ok(root)
}
