use ariadne::Fmt;
use chalk_attrs::ErrorKind;
use chalk_error::{ErrorKind, EXPR};
use crate::tree::NodeId;

/// The selected node is the root of the equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the selected node has no parent",
    labels = ["this is the whole equation"],
    help = "select a term inside one of the sides instead",
)]
pub struct NoParent;

/// Moving a node would take it past the first or last position of its parent.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "index exceeded",
    labels = [format!("there is nothing to the {} of this term", if *left { "left" } else { "right" })],
    help = format!("its parent has {} operand(s)", len),
)]
pub struct IndexExceeded {
    /// Whether the node was moved to the left.
    pub left: bool,

    /// The number of children of the parent.
    pub len: usize,
}

/// The selected id does not resolve to a node of the current equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("there is no node `{}` in the current equation", id),
    help = "node ids change when the equation is replaced; list them again",
)]
pub struct UnknownNode {
    /// The id that failed to resolve.
    pub id: NodeId,
}

/// The selected nodes do not share a parent.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the selected terms have different parents",
    labels = ["this term...", "...and this term are not operands of the same operation"],
)]
pub struct ParentsDiffer;

/// A node can only be dissociated into a parent of the same operator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot dissociate a {} from a {}", child, parent),
    labels = ["this operation"],
    help = "only a sum inside a sum, or a product inside a product, can be dissociated",
)]
pub struct OperatorsDiffer {
    /// The name of the operator of the selected node.
    pub child: &'static str,

    /// The name of the operator of its parent.
    pub parent: &'static str,
}

/// The commutative property does not hold for the operator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the operands of a {} cannot be swapped", operator),
    labels = ["this term"],
)]
pub struct NotCommutative {
    /// The name of the parent operator.
    pub operator: &'static str,
}

/// The associative property does not hold for the operator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the operands of a {} cannot be grouped", operator),
    labels = ["this term"],
    help = "only sums and products can be associated or dissociated",
)]
pub struct NotAssociative {
    /// The name of the parent operator.
    pub operator: &'static str,
}

/// The range to associate is a single operand or every operand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "nothing to associate",
    labels = ["from this term...", "...to this term"],
    help = "select a run of at least two operands that is not the whole operation",
)]
pub struct NothingToAssociate;

/// A numeric fold reached an operand that is not a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "there are variables",
    labels = [format!("this {} has operands that are not numbers", "operation".fg(EXPR))],
)]
pub struct VariablesPresent;

/// The selected node is not an operation that can be folded.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "nothing to operate",
    labels = ["this is not a sum, product, inverse or negation"],
)]
pub struct NothingToOperate;

/// Dividing by zero, either by inverting zero or by moving a zero factor across the equality.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this factor is zero"],
)]
pub struct DivisionByZero;

/// Folding the operation gives a number too large to represent.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the result is not a finite number",
    labels = [format!("this {} overflows", "operation".fg(EXPR))],
)]
pub struct NotFinite;

/// A common factor cannot be extracted from the selected terms.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = reason,
    labels = ["this term"],
    help = "select equal terms, each in a different addend of the same sum",
)]
pub struct CannotFactor {
    /// Why the factor cannot be extracted.
    pub reason: &'static str,
}

/// The selected term is neither a main term nor a whole side of the equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "not a main term or side",
    labels = ["this term"],
    help = "select a whole side, or an operand of the sum or product that forms a side",
)]
pub struct NotMainTermOrSide;

/// The selection is not of the form `n*(a+b+...)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "bad distributive form",
    labels = ["this element...", "...and this sum"],
    help = reason,
)]
pub struct BadDistributiveForm {
    /// Why the selection cannot be distributed.
    pub reason: &'static str,
}

/// The equation tree is corrupt. This indicates a bug.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "internal error: malformed equation",
    help = detail,
)]
pub struct Malformed {
    /// What was found to be inconsistent.
    pub detail: &'static str,
}
