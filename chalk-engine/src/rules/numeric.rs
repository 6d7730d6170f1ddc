//! Rules that fold numeric operations, and the identity rules that also apply to symbolic
//! operands.
//!
//! Results are normalized the way parsed literals are: `0`, `1` and `-1` become their identity
//! tags, and other negative numbers become the negation of a positive number.

use crate::{error::{kind, Error}, tree::{Equation, Kind, NodeId}};
use super::{expect_kind, malformed, negate, pair, single};

/// Returns the numeric value of an operand, or fails if the operand is not a number.
fn value(eq: &Equation, id: NodeId) -> Result<f64, Error> {
    eq.numeric_value(id)
        .ok_or_else(|| malformed(id, "a numeric rule was given an operand that is not a number"))
}

/// Fails if a folded value cannot be written as a number.
fn finite(target: NodeId, result: f64) -> Result<f64, Error> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(Error::new(vec![target], kind::NotFinite))
    }
}

/// Replaces a binary operation of numbers with the result of `op`.
fn fold(
    eq: &mut Equation,
    target: NodeId,
    kind: Kind,
    op: fn(f64, f64) -> f64,
) -> Result<NodeId, Error> {
    let (a, b) = pair(eq, target, kind)?;
    let result = finite(target, op(value(eq, a)?, value(eq, b)?))?;
    eq.remove_subtree(target);
    Ok(eq.number(result))
}

/// Replaces a unary operation of a number with the result of `op`.
fn fold_unary(
    eq: &mut Equation,
    target: NodeId,
    kind: Kind,
    op: fn(f64) -> f64,
) -> Result<NodeId, Error> {
    let a = single(eq, target, kind)?;
    let result = finite(target, op(value(eq, a)?))?;
    eq.remove_subtree(target);
    Ok(eq.number(result))
}

/// Replaces a binary operation with its first operand, dropping the second.
fn keep_first(eq: &mut Equation, target: NodeId, kind: Kind, dropped: Kind) -> Result<NodeId, Error> {
    let (a, b) = pair(eq, target, kind)?;
    expect_kind(eq, b, dropped)?;
    eq.remove_subtree(b);
    eq.dismantle(target)?;
    Ok(a)
}

/// Replaces a unary operation of an identity with another identity.
fn replace_unary(eq: &mut Equation, target: NodeId, kind: Kind, operand: Kind, result: Kind) -> Result<NodeId, Error> {
    let a = single(eq, target, kind)?;
    expect_kind(eq, a, operand)?;
    eq.remove_subtree(target);
    Ok(eq.alloc(result, Vec::new()))
}

/// `a+b = c`
pub fn add_numbers(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    fold(eq, target, Kind::Sum, |a, b| a + b)
}

/// `a+1 = c`
pub fn add_one(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    let (_, one) = pair(eq, target, Kind::Sum)?;
    expect_kind(eq, one, Kind::One)?;
    fold(eq, target, Kind::Sum, |a, _| a + 1.0)
}

/// `1+1 = 2`
pub fn one_plus_one(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    let (a, b) = pair(eq, target, Kind::Sum)?;
    expect_kind(eq, a, Kind::One)?;
    expect_kind(eq, b, Kind::One)?;
    eq.remove_subtree(target);
    Ok(eq.alloc(Kind::Number(2.0), Vec::new()))
}

/// `a+0 = a`
pub fn add_zero(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    keep_first(eq, target, Kind::Sum, Kind::Zero)
}

/// `a+(-1) = c`
pub fn add_neg_one(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    let (_, neg_one) = pair(eq, target, Kind::Sum)?;
    expect_kind(eq, neg_one, Kind::NegOne)?;
    fold(eq, target, Kind::Sum, |a, _| a - 1.0)
}

/// `(-1)+(-1) = -2`
pub fn neg_one_plus_neg_one(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    let (a, b) = pair(eq, target, Kind::Sum)?;
    expect_kind(eq, a, Kind::NegOne)?;
    expect_kind(eq, b, Kind::NegOne)?;
    eq.remove_subtree(target);
    Ok(eq.number(-2.0))
}

/// `a*b = c`
pub fn multiply_numbers(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    fold(eq, target, Kind::Product, |a, b| a * b)
}

/// `a*0 = 0`
pub fn multiply_zero(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    let (_, zero) = pair(eq, target, Kind::Product)?;
    expect_kind(eq, zero, Kind::Zero)?;
    eq.remove_subtree(target);
    Ok(eq.alloc(Kind::Zero, Vec::new()))
}

/// `a*1 = a`
pub fn multiply_one(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    keep_first(eq, target, Kind::Product, Kind::One)
}

/// `a*(-1) = -a`
pub fn multiply_neg_one(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    let a = keep_first(eq, target, Kind::Product, Kind::NegOne)?;
    match eq.numeric_value(a) {
        Some(value) => {
            eq.remove_subtree(a);
            Ok(eq.number(-value))
        },
        None => negate(eq, a),
    }
}

/// `1/a = b`
pub fn inverse_number(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    let a = single(eq, target, Kind::Inverse)?;
    if value(eq, a)? == 0.0 {
        return Err(malformed(a, "tried to invert zero"));
    }
    fold_unary(eq, target, Kind::Inverse, |a| 1.0 / a)
}

/// `1/1 = 1`
pub fn inverse_one(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    replace_unary(eq, target, Kind::Inverse, Kind::One, Kind::One)
}

/// `1/(-1) = -1`
pub fn inverse_neg_one(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    replace_unary(eq, target, Kind::Inverse, Kind::NegOne, Kind::NegOne)
}

/// `-(a) = b`
pub fn negate_number(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    fold_unary(eq, target, Kind::Minus, |a| -a)
}

/// `-0 = 0`
pub fn negate_zero(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    replace_unary(eq, target, Kind::Minus, Kind::Zero, Kind::Zero)
}

/// `-(1) = -1`
pub fn negate_one(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    replace_unary(eq, target, Kind::Minus, Kind::One, Kind::NegOne)
}

/// `-(-1) = 1`
pub fn negate_neg_one(eq: &mut Equation, target: NodeId) -> Result<NodeId, Error> {
    replace_unary(eq, target, Kind::Minus, Kind::NegOne, Kind::One)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_f64_near;
    use pretty_assertions::assert_eq;
    use crate::{error::kind, rules::{apply, Rule}};
    use super::*;

    /// Applies a rule to the node at `path` and renders the result.
    fn rewrite(input: &str, path: &[usize], rule: Rule) -> String {
        let mut eq = Equation::parse(input).unwrap();
        let target = eq.at(path).unwrap();
        apply(&mut eq, rule, target, &mut ()).unwrap();
        assert!(eq.check_links());
        eq.to_string()
    }

    #[test]
    fn sums() {
        assert_eq!(rewrite("2+3=x", &[0], Rule::AddNumbers), "5=x");
        assert_eq!(rewrite("2-3=x", &[0], Rule::AddNumbers), "-1=x");
        assert_eq!(rewrite("4+1=x", &[0], Rule::AddOne), "5=x");
        assert_eq!(rewrite("1+1=x", &[0], Rule::OnePlusOne), "2=x");
        assert_eq!(rewrite("y+0=x", &[0], Rule::AddZero), "y=x");
        assert_eq!(rewrite("3-1=x", &[0], Rule::AddNegOne), "2=x");
        assert_eq!(rewrite("2-1=x", &[0], Rule::AddNegOne), "1=x");
        assert_eq!(rewrite("-1-1=x", &[0], Rule::NegOnePlusNegOne), "-2=x");
    }

    #[test]
    fn products() {
        assert_eq!(rewrite("2*3=x", &[0], Rule::MultiplyNumbers), "6=x");
        assert_eq!(rewrite("2*(-3)=x", &[0], Rule::MultiplyNumbers), "-6=x");
        assert_eq!(rewrite("(a+b)*0=x", &[0], Rule::MultiplyZero), "0=x");
        assert_eq!(rewrite("(a+b)*1=x", &[0], Rule::MultiplyOne), "a+b=x");
        assert_eq!(rewrite("a*(-1)=x", &[0], Rule::MultiplyNegOne), "-a=x");
        assert_eq!(rewrite("(-a)*(-1)=x", &[0], Rule::MultiplyNegOne), "a=x");
        assert_eq!(rewrite("4*(-1)=x", &[0], Rule::MultiplyNegOne), "-4=x");
    }

    #[test]
    fn unary() {
        assert_eq!(rewrite("x=a/4", &[1, 1], Rule::InverseNumber), "x=a*0.25");
        assert_eq!(rewrite("x=a/1", &[1, 1], Rule::InverseOne), "x=a*1");
        assert_eq!(rewrite("x=a/(-1)", &[1, 1], Rule::InverseNegOne), "x=a*(-1)");
        assert_eq!(rewrite("x=-(-4)", &[1], Rule::NegateNumber), "x=4");
        assert_eq!(rewrite("x=-(0)", &[1], Rule::NegateZero), "x=0");
        assert_eq!(rewrite("x=-(-1)", &[1], Rule::NegateNegOne), "x=1");
    }

    #[test]
    fn results_are_normalized() {
        let mut eq = Equation::parse("0.5+0.5=x").unwrap();
        let sum = eq.at(&[0]).unwrap();
        let one = apply(&mut eq, Rule::AddNumbers, sum, &mut ()).unwrap();
        assert_eq!(eq.kind(one), Some(&Kind::One));

        let mut eq = Equation::parse("1.5*3=x").unwrap();
        let product = eq.at(&[0]).unwrap();
        let result = apply(&mut eq, Rule::MultiplyNumbers, product, &mut ()).unwrap();
        assert_f64_near!(eq.numeric_value(result).unwrap(), 4.5);
    }

    #[test]
    fn identity_rules_check_their_operand() {
        let mut eq = Equation::parse("a+b=x").unwrap();
        let sum = eq.at(&[0]).unwrap();
        let err = apply(&mut eq, Rule::AddZero, sum, &mut ()).unwrap_err();
        assert!(err.is::<kind::Malformed>());
        assert_eq!(eq.to_string(), "a+b=x");
    }
}
