//! Rules that reshape sums and products without folding numbers.

use crate::{error::Error, primitive::clone_subtree, tree::{Equation, Kind, NodeId}};
use super::{malformed, pair, single};

/// `a = 1*a`
pub fn multiply_by_one(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    let one = eq.alloc(Kind::One, Vec::new());
    Ok(eq.alloc(Kind::Product, vec![one, target]))
}

/// `-a = (-1)*a`
pub fn negation_to_product(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    let operand = single(eq, target, Kind::Minus)?;
    eq.dismantle(target)?;
    let neg_one = eq.alloc(Kind::NegOne, Vec::new());
    Ok(eq.alloc(Kind::Product, vec![neg_one, operand]))
}

/// `r1*x + r2*x = (r1+r2)*x`
///
/// Both addends must be products of two factors whose second factors are structurally equal. The
/// second factor of the first addend is kept.
pub fn common_factor(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    let (first, second) = pair(eq, target, Kind::Sum)?;
    let (r1, x1) = pair(eq, first, Kind::Product)?;
    let (r2, x2) = pair(eq, second, Kind::Product)?;
    if !eq.structural_eq(x1, x2) {
        return Err(malformed(x2, "the factors to extract are not equal"));
    }

    eq.remove_subtree(x2);
    eq.dismantle(second)?;
    eq.dismantle(first)?;
    eq.dismantle(target)?;
    let remainders = eq.alloc(Kind::Sum, vec![r1, r2]);
    Ok(eq.alloc(Kind::Product, vec![remainders, x1]))
}

/// `n*(a+b) = n*a + n*b`
///
/// An addend that is a product receives `n` as its new first factor instead of being nested.
pub fn distribute(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    let (single, sum) = pair(eq, target, Kind::Product)?;
    let addends = eq.raw(sum)?.children.clone();
    if addends.is_empty() || eq.raw(sum)?.kind != Kind::Sum {
        return Err(malformed(sum, "can only distribute over a sum"));
    }

    eq.dismantle(target)?;
    eq.dismantle(sum)?;

    let mut terms = Vec::with_capacity(addends.len());
    for (i, addend) in addends.into_iter().enumerate() {
        let factor = if i == 0 { single } else { clone_subtree(eq, single)? };
        let term = if eq.raw(addend)?.kind == Kind::Product {
            let mut factors = eq.raw(addend)?.children.clone();
            factors.insert(0, factor);
            eq.set_children(addend, factors)?;
            addend
        } else {
            eq.alloc(Kind::Product, vec![factor, addend])
        };
        terms.push(term);
    }

    Ok(eq.alloc(Kind::Sum, terms))
}
