//! Distribution of a number over a sum.

use crate::{
    error::{kind, Error},
    primitive,
    rules::{self, Rule},
    step::{Step, StepCollector},
    tree::{Equation, Kind, NodeId},
};

fn bad_form(single: NodeId, sum: NodeId, reason: &'static str) -> Error {
    Error::new(vec![single, sum], kind::BadDistributiveForm { reason })
}

/// Returns true if the node is a number, or the negation of a number.
fn is_single_number(eq: &Equation, id: NodeId) -> bool {
    match eq.kind(id) {
        Some(kind) if kind.is_numeric_literal() => true,
        Some(Kind::Minus) => matches!(
            eq.children(id),
            [operand] if eq.kind(*operand).map_or(false, Kind::is_numeric_literal)
        ),
        _ => false,
    }
}

/// Checks that `single` and `sum` are operands of the same product, that `sum` is a sum, and that
/// `single` is a number or the negation of a number. Returns the product.
fn check(eq: &Equation, single: NodeId, sum: NodeId) -> Result<NodeId, Error> {
    let parent = eq.get(single)?.parent;
    let sum_node = eq.get(sum)?;
    if single == sum {
        return Err(bad_form(single, sum, "select a number and a sum"));
    }

    let Some(parent) = parent.filter(|&parent| sum_node.parent == Some(parent)) else {
        return Err(bad_form(single, sum, "the number and the sum must be operands of the same product"));
    };
    if eq.kind(parent) != Some(&Kind::Product) {
        return Err(bad_form(single, sum, "the number and the sum must be operands of the same product"));
    }
    if sum_node.kind != Kind::Sum {
        return Err(bad_form(single, sum, "the second selection must be a sum"));
    }
    if !is_single_number(eq, single) {
        return Err(bad_form(single, sum, "the first selection must be a number, or the negation of a number"));
    }

    Ok(parent)
}

/// Returns true if `single` can be distributed over `sum`. Never modifies the equation.
pub fn is_on_distributive_form(eq: &Equation, single: NodeId, sum: NodeId) -> bool {
    check(eq, single, sum).is_ok()
}

/// Multiplies a number into each addend of a sum it multiplies, `n*(a+b)` to `n*a+n*b`. Returns
/// the resulting sum.
///
/// If the product has other factors, the number and the sum are grouped first, and the result
/// stays a factor of the product.
pub fn distribute(
    eq: &mut Equation,
    single: NodeId,
    sum: NodeId,
    steps: &mut dyn StepCollector<Step>,
) -> Result<NodeId, Error> {
    let product = check(eq, single, sum)?;

    let index = eq.index_of(product, single)?;
    if index != 0 {
        primitive::swap(eq, product, index, 0, steps)?;
    }
    let index = eq.index_of(product, sum)?;
    if index != 1 {
        primitive::swap(eq, product, index, 1, steps)?;
    }

    let target = if eq.raw(product)?.children.len() > 2 {
        primitive::associate(eq, product, 0, 1, steps)?
    } else {
        product
    };
    rules::apply(eq, Rule::Distribute, target, steps)
}
