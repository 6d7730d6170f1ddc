//! The catalogue of elementary rewrite rules.
//!
//! Each rule is a function that takes the node to rewrite and returns its replacement. A rule is
//! total only on the operand shape it is named after; the callers in [`crate::transform`] decide
//! which rule applies (see [`table`]) and bring the operands into that shape first. A rule that
//! receives any other shape fails with [`kind::Malformed`] instead of guessing.

pub mod numeric;
pub mod side;
pub mod structural;
pub mod table;

use crate::{
    error::{kind, Error},
    step::{Step, StepCollector},
    tree::{Equation, Kind, NodeId},
};
use std::fmt;
use tracing::debug;

/// An elementary rewrite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `a+b = c`, where `a`, `b` and `c` are numbers
    AddNumbers,

    /// `a+1 = c`
    AddOne,

    /// `1+1 = 2`
    OnePlusOne,

    /// `a+0 = a`
    AddZero,

    /// `a+(-1) = c`
    AddNegOne,

    /// `(-1)+(-1) = -2`
    NegOnePlusNegOne,

    /// `a*b = c`, where `a`, `b` and `c` are numbers
    MultiplyNumbers,

    /// `a*0 = 0`
    MultiplyZero,

    /// `a*1 = a`
    MultiplyOne,

    /// `a*(-1) = -a`
    MultiplyNegOne,

    /// `1/a = b`, where `a` and `b` are numbers
    InverseNumber,

    /// `1/1 = 1`
    InverseOne,

    /// `1/(-1) = -1`
    InverseNegOne,

    /// `-(a) = b`, where `a` and `b` are numbers
    NegateNumber,

    /// `-0 = 0`
    NegateZero,

    /// `-(1) = -1`
    NegateOne,

    /// `-(-1) = 1`
    NegateNegOne,

    /// `a = 1*a`
    MultiplyByOne,

    /// `-a = (-1)*a`
    NegationToProduct,

    /// `r1*x + r2*x = (r1+r2)*x`
    CommonFactor,

    /// `n*(a+b) = n*a + n*b`
    Distribute,

    /// `r+t = R` to `r = R-t`
    MoveAddendLeftToRight,

    /// `r-t = R` to `r = R+t`
    MoveNegAddendLeftToRight,

    /// `L = r+t` to `L-t = r`
    MoveAddendRightToLeft,

    /// `L = r-t` to `L+t = r`
    MoveNegAddendRightToLeft,

    /// `r*t = R` to `r = R/t`
    MoveFactorLeftToRight,

    /// `r/t = R` to `r = R*t`
    MoveInvFactorLeftToRight,

    /// `L = r*t` to `L/t = r`
    MoveFactorRightToLeft,

    /// `L = r/t` to `L*t = r`
    MoveInvFactorRightToLeft,

    /// `L = R` to `0 = R-L`
    MoveLeftSide,

    /// `L = R` to `L-R = 0`
    MoveRightSide,
}

impl Rule {
    /// A short, kebab-case name of the rule.
    pub fn name(self) -> &'static str {
        match self {
            Rule::AddNumbers => "add-numbers",
            Rule::AddOne => "add-one",
            Rule::OnePlusOne => "one-plus-one",
            Rule::AddZero => "add-zero",
            Rule::AddNegOne => "add-neg-one",
            Rule::NegOnePlusNegOne => "neg-one-plus-neg-one",
            Rule::MultiplyNumbers => "multiply-numbers",
            Rule::MultiplyZero => "multiply-zero",
            Rule::MultiplyOne => "multiply-one",
            Rule::MultiplyNegOne => "multiply-neg-one",
            Rule::InverseNumber => "inverse-number",
            Rule::InverseOne => "inverse-one",
            Rule::InverseNegOne => "inverse-neg-one",
            Rule::NegateNumber => "negate-number",
            Rule::NegateZero => "negate-zero",
            Rule::NegateOne => "negate-one",
            Rule::NegateNegOne => "negate-neg-one",
            Rule::MultiplyByOne => "multiply-by-one",
            Rule::NegationToProduct => "negation-to-product",
            Rule::CommonFactor => "common-factor",
            Rule::Distribute => "distribute",
            Rule::MoveAddendLeftToRight => "move-addend-left-to-right",
            Rule::MoveNegAddendLeftToRight => "move-neg-addend-left-to-right",
            Rule::MoveAddendRightToLeft => "move-addend-right-to-left",
            Rule::MoveNegAddendRightToLeft => "move-neg-addend-right-to-left",
            Rule::MoveFactorLeftToRight => "move-factor-left-to-right",
            Rule::MoveInvFactorLeftToRight => "move-inv-factor-left-to-right",
            Rule::MoveFactorRightToLeft => "move-factor-right-to-left",
            Rule::MoveInvFactorRightToLeft => "move-inv-factor-right-to-left",
            Rule::MoveLeftSide => "move-left-side",
            Rule::MoveRightSide => "move-right-side",
        }
    }

    /// The function implementing the rule.
    fn function(self) -> fn(&mut Equation, NodeId) -> Result<NodeId, Error> {
        match self {
            Rule::AddNumbers => numeric::add_numbers,
            Rule::AddOne => numeric::add_one,
            Rule::OnePlusOne => numeric::one_plus_one,
            Rule::AddZero => numeric::add_zero,
            Rule::AddNegOne => numeric::add_neg_one,
            Rule::NegOnePlusNegOne => numeric::neg_one_plus_neg_one,
            Rule::MultiplyNumbers => numeric::multiply_numbers,
            Rule::MultiplyZero => numeric::multiply_zero,
            Rule::MultiplyOne => numeric::multiply_one,
            Rule::MultiplyNegOne => numeric::multiply_neg_one,
            Rule::InverseNumber => numeric::inverse_number,
            Rule::InverseOne => numeric::inverse_one,
            Rule::InverseNegOne => numeric::inverse_neg_one,
            Rule::NegateNumber => numeric::negate_number,
            Rule::NegateZero => numeric::negate_zero,
            Rule::NegateOne => numeric::negate_one,
            Rule::NegateNegOne => numeric::negate_neg_one,
            Rule::MultiplyByOne => structural::multiply_by_one,
            Rule::NegationToProduct => structural::negation_to_product,
            Rule::CommonFactor => structural::common_factor,
            Rule::Distribute => structural::distribute,
            Rule::MoveAddendLeftToRight => side::move_addend_left_to_right,
            Rule::MoveNegAddendLeftToRight => side::move_neg_addend_left_to_right,
            Rule::MoveAddendRightToLeft => side::move_addend_right_to_left,
            Rule::MoveNegAddendRightToLeft => side::move_neg_addend_right_to_left,
            Rule::MoveFactorLeftToRight => side::move_factor_left_to_right,
            Rule::MoveInvFactorLeftToRight => side::move_inv_factor_left_to_right,
            Rule::MoveFactorRightToLeft => side::move_factor_right_to_left,
            Rule::MoveInvFactorRightToLeft => side::move_inv_factor_right_to_left,
            Rule::MoveLeftSide => side::move_left_side,
            Rule::MoveRightSide => side::move_right_side,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Applies a rule to `target`, linking the replacement into the place of `target`. Returns the
/// replacement.
pub(crate) fn apply(
    eq: &mut Equation,
    rule: Rule,
    target: NodeId,
    steps: &mut dyn StepCollector<Step>,
) -> Result<NodeId, Error> {
    let replacement = eq.rewrite(target, rule.function())
        .map_err(|err| err.at(&[target]))?;
    debug!(%rule, %target, %replacement, "applied rule");
    steps.push(Step::Rule(rule));
    Ok(replacement)
}

/// Returns the two children of a binary node of the given kind.
pub(crate) fn pair(eq: &Equation, id: NodeId, expected: Kind) -> Result<(NodeId, NodeId), Error> {
    let node = eq.raw(id)?;
    match node.children.as_slice() {
        [a, b] if node.kind.same_operator(&expected) => Ok((*a, *b)),
        _ => Err(malformed(id, "a rule was given an operation of the wrong shape")),
    }
}

/// Returns the single child of a unary node of the given kind.
pub(crate) fn single(eq: &Equation, id: NodeId, expected: Kind) -> Result<NodeId, Error> {
    let node = eq.raw(id)?;
    match node.children.as_slice() {
        [a] if node.kind.same_operator(&expected) => Ok(*a),
        _ => Err(malformed(id, "a rule was given an operation of the wrong shape")),
    }
}

/// Fails unless the node has the given kind.
pub(crate) fn expect_kind(eq: &Equation, id: NodeId, expected: Kind) -> Result<(), Error> {
    if eq.raw(id)?.kind == expected {
        Ok(())
    } else {
        Err(malformed(id, "a rule was given an operand of the wrong kind"))
    }
}

pub(crate) fn malformed(id: NodeId, detail: &'static str) -> Error {
    Error::new(vec![id], kind::Malformed { detail })
}

/// Builds the negation of a detached node, folding identities and double negations: `0` stays
/// `0`, `1` becomes `-1`, `-1` becomes `1` and `-a` becomes `a`.
pub(crate) fn negate(eq: &mut Equation, id: NodeId) -> Result<NodeId, Error> {
    let kind = eq.raw(id)?.kind.clone();
    match kind {
        Kind::Zero => Ok(id),
        Kind::One => {
            eq.dismantle(id)?;
            Ok(eq.alloc(Kind::NegOne, Vec::new()))
        },
        Kind::NegOne | Kind::Minus => unnegate(eq, id),
        _ => Ok(eq.alloc(Kind::Minus, vec![id])),
    }
}

/// Removes the negation of a detached node that is negated: `-1` becomes `1` and `-a` becomes
/// `a`.
pub(crate) fn unnegate(eq: &mut Equation, id: NodeId) -> Result<NodeId, Error> {
    let kind = eq.raw(id)?.kind.clone();
    match kind {
        Kind::NegOne => {
            eq.dismantle(id)?;
            Ok(eq.alloc(Kind::One, Vec::new()))
        },
        Kind::Minus => {
            let operand = single(eq, id, Kind::Minus)?;
            eq.dismantle(id)?;
            Ok(operand)
        },
        _ => Err(malformed(id, "tried to remove the sign of a term that is not negated")),
    }
}

/// Returns true if the node is negated: `-1`, or a negation.
pub(crate) fn is_negated(kind: &Kind) -> bool {
    matches!(kind, Kind::NegOne | Kind::Minus)
}
