//! Records of the edits issued by a transformation.

use crate::rules::Rule;
use std::fmt;

/// A type that collects the steps of an algorithm.
///
/// [`StepCollector`] is also implemented for the unit type `()`. This is useful when you don't
/// want to know the steps taken by an operation.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        self.push(step);
    }
}

/// The user-facing algebraic properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// Swap an operand with its neighbor.
    Commutative,

    /// Group a run of operands.
    Associative,

    /// Ungroup a nested operation of the same kind.
    Dissociative,

    /// Fold a numeric operation into a number.
    Operate,

    /// Extract a shared factor from the addends of a sum.
    CommonFactor,

    /// Move a term across the equals sign.
    ChangeSide,

    /// Multiply a number into a sum.
    Distributive,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::Commutative => "the commutative property",
            Property::Associative => "the associative property",
            Property::Dissociative => "the dissociative property",
            Property::Operate => "operate",
            Property::CommonFactor => "common factor",
            Property::ChangeSide => "change side",
            Property::Distributive => "the distributive property",
        };
        write!(f, "{}", name)
    }
}

/// A single edit issued while applying a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Two children of a node were swapped.
    Commute { i: usize, j: usize },

    /// The children `start..=end` of a node were grouped into one child.
    Associate { start: usize, end: usize },

    /// The child at `index` was split into its children.
    Dissociate { index: usize },

    /// An elementary rule rewrote a node.
    Rule(Rule),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Commute { i, j } => write!(f, "commute({}, {})", i, j),
            Step::Associate { start, end } => write!(f, "associate({}..={})", start, end),
            Step::Dissociate { index } => write!(f, "dissociate({})", index),
            Step::Rule(rule) => write!(f, "rule({})", rule),
        }
    }
}

/// A committed transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    /// The property that was applied.
    pub property: Property,

    /// The edits that were issued, in order.
    pub steps: Vec<Step>,

    /// The rendered equation before the transformation.
    pub before: String,

    /// The rendered equation after the transformation.
    pub after: String,
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({}", self.before, self.after, self.property)?;
        if !self.steps.is_empty() {
            write!(f, ":")?;
            for step in &self.steps {
                write!(f, " {}", step)?;
            }
        }
        write!(f, ")")
    }
}
