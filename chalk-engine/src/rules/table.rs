//! The decision table that picks the numeric rule folding an operation.
//!
//! Operands are classified as one of the identities, a plain number, or anything else. Identities
//! in the first operand slot are moved to the second slot by swapping the operands first, so each
//! identity only needs a rule for one position.

use crate::{
    error::{kind, Error},
    primitive,
    step::{Step, StepCollector},
    tree::{Equation, Kind, NodeId},
};
use super::{apply, Rule};

/// The class of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Zero,
    One,
    NegOne,

    /// A number other than the identities, including a negated number.
    Number,

    /// Anything that is not a number.
    Symbolic,
}

impl Class {
    /// Classifies a node of the equation.
    pub fn of(eq: &Equation, id: NodeId) -> Self {
        match eq.raw(id).map(|node| &node.kind) {
            Ok(Kind::Zero) => Class::Zero,
            Ok(Kind::One) => Class::One,
            Ok(Kind::NegOne) => Class::NegOne,
            _ if eq.numeric_value(id).is_some() => Class::Number,
            _ => Class::Symbolic,
        }
    }
}

/// What to do to fold an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Apply the rule to the operation as it is.
    Rule(Rule),

    /// Swap the two operands, then apply the rule.
    SwapThen(Rule),
}

/// Why an operation cannot be folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocked {
    VariablesPresent,
    DivisionByZero,
}

impl Blocked {
    /// Converts into an error pointing at the operation.
    pub(crate) fn into_error(self, node: NodeId) -> Error {
        match self {
            Blocked::VariablesPresent => Error::new(vec![node], kind::VariablesPresent),
            Blocked::DivisionByZero => Error::new(vec![node], kind::DivisionByZero),
        }
    }
}

/// Picks the rule folding a sum of two operands.
pub fn sum(a: Class, b: Class) -> Result<Dispatch, Blocked> {
    use Class::*;
    Ok(match (a, b) {
        (Zero, _) => Dispatch::SwapThen(Rule::AddZero),
        (_, Zero) => Dispatch::Rule(Rule::AddZero),
        (One, One) => Dispatch::Rule(Rule::OnePlusOne),
        (One, NegOne | Number) => Dispatch::SwapThen(Rule::AddOne),
        (NegOne | Number, One) => Dispatch::Rule(Rule::AddOne),
        (NegOne, NegOne) => Dispatch::Rule(Rule::NegOnePlusNegOne),
        (NegOne, Number) => Dispatch::SwapThen(Rule::AddNegOne),
        (Number, NegOne) => Dispatch::Rule(Rule::AddNegOne),
        (Number, Number) => Dispatch::Rule(Rule::AddNumbers),
        (Symbolic, _) | (_, Symbolic) => return Err(Blocked::VariablesPresent),
    })
}

/// Picks the rule folding a product of two operands.
pub fn product(a: Class, b: Class) -> Result<Dispatch, Blocked> {
    use Class::*;
    Ok(match (a, b) {
        (Zero, _) => Dispatch::SwapThen(Rule::MultiplyZero),
        (_, Zero) => Dispatch::Rule(Rule::MultiplyZero),
        (One, _) => Dispatch::SwapThen(Rule::MultiplyOne),
        (_, One) => Dispatch::Rule(Rule::MultiplyOne),
        (NegOne, _) => Dispatch::SwapThen(Rule::MultiplyNegOne),
        (_, NegOne) => Dispatch::Rule(Rule::MultiplyNegOne),
        (Number, Number) => Dispatch::Rule(Rule::MultiplyNumbers),
        (Symbolic, _) | (_, Symbolic) => return Err(Blocked::VariablesPresent),
    })
}

/// Picks the rule folding the inverse of an operand.
pub fn inverse(a: Class) -> Result<Dispatch, Blocked> {
    match a {
        Class::Zero => Err(Blocked::DivisionByZero),
        Class::One => Ok(Dispatch::Rule(Rule::InverseOne)),
        Class::NegOne => Ok(Dispatch::Rule(Rule::InverseNegOne)),
        Class::Number => Ok(Dispatch::Rule(Rule::InverseNumber)),
        Class::Symbolic => Err(Blocked::VariablesPresent),
    }
}

/// Picks the rule folding the negation of an operand.
pub fn minus(a: Class) -> Result<Dispatch, Blocked> {
    match a {
        Class::Zero => Ok(Dispatch::Rule(Rule::NegateZero)),
        Class::One => Ok(Dispatch::Rule(Rule::NegateOne)),
        Class::NegOne => Ok(Dispatch::Rule(Rule::NegateNegOne)),
        Class::Number => Ok(Dispatch::Rule(Rule::NegateNumber)),
        Class::Symbolic => Err(Blocked::VariablesPresent),
    }
}

/// Picks the rule folding an operation whose operands are all folded already. Sums and products
/// must have exactly two operands.
pub fn lookup(eq: &Equation, id: NodeId) -> Result<Dispatch, Error> {
    let node = eq.raw(id)?;
    let classes = node.children.iter().map(|&child| Class::of(eq, child)).collect::<Vec<_>>();
    let dispatch = match (&node.kind, classes.as_slice()) {
        (Kind::Sum, &[a, b]) => sum(a, b),
        (Kind::Product, &[a, b]) => product(a, b),
        (Kind::Inverse, &[a]) => inverse(a),
        (Kind::Minus, &[a]) => minus(a),
        _ => return Err(Error::new(vec![id], kind::NothingToOperate)),
    };
    dispatch.map_err(|blocked| blocked.into_error(id))
}

impl Dispatch {
    /// The rule that is applied.
    pub fn rule(self) -> Rule {
        match self {
            Dispatch::Rule(rule) | Dispatch::SwapThen(rule) => rule,
        }
    }

    /// Carries out the dispatch on the operation. Returns the node that replaced it.
    pub(crate) fn run(
        self,
        eq: &mut Equation,
        target: NodeId,
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<NodeId, Error> {
        if let Dispatch::SwapThen(_) = self {
            primitive::swap(eq, target, 0, 1, steps)?;
        }
        apply(eq, self.rule(), target, steps)
    }
}
