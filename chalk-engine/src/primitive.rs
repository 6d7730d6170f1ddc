//! Structural edits of the equation tree: swap, associate, dissociate and clone.
//!
//! Primitives check only what they need to stay well-formed (bounds and operator kinds). Whether
//! an edit is a legal algebraic step is decided by the callers in [`crate::transform`].

use crate::{
    error::{kind, Error},
    step::{Step, StepCollector},
    tree::{Equation, NodeId},
};
use tracing::debug;

/// Swaps the children at `i` and `j` of `node`.
pub fn swap(
    eq: &mut Equation,
    node: NodeId,
    i: usize,
    j: usize,
    steps: &mut dyn StepCollector<Step>,
) -> Result<(), Error> {
    let children = eq.children_mut(node)?;
    let len = children.len();
    if i >= len || j >= len {
        return Err(Error::new(vec![node], kind::IndexExceeded { left: j < i, len }));
    }

    children.swap(i, j);
    debug!(%node, i, j, "swap");
    steps.push(Step::Commute { i, j });
    Ok(())
}

/// Groups the children `i..=j` of `node` into a single new child of the same operator, placed
/// at position `i`. Returns the new child.
pub fn associate(
    eq: &mut Equation,
    node: NodeId,
    i: usize,
    j: usize,
    steps: &mut dyn StepCollector<Step>,
) -> Result<NodeId, Error> {
    let parent = eq.raw(node)?;
    let len = parent.children.len();
    if j >= len {
        return Err(Error::new(vec![node], kind::IndexExceeded { left: false, len }));
    }
    if i >= j {
        return Err(Error::new(vec![node], kind::NothingToAssociate));
    }

    let kind = parent.kind.clone();
    let mut children = parent.children.clone();
    let run = children.drain(i..=j).collect::<Vec<_>>();
    let group = eq.alloc(kind, run);
    children.insert(i, group);
    eq.set_children(node, children)?;

    debug!(%node, i, j, %group, "associate");
    steps.push(Step::Associate { start: i, end: j });
    Ok(group)
}

/// Replaces the child at `i` of `node` with the children of that child. The child must have the
/// same operator as `node`.
pub fn dissociate(
    eq: &mut Equation,
    node: NodeId,
    i: usize,
    steps: &mut dyn StepCollector<Step>,
) -> Result<(), Error> {
    let parent = eq.raw(node)?;
    let Some(&child) = parent.children.get(i) else {
        return Err(Error::new(vec![node], kind::IndexExceeded {
            left: false,
            len: parent.children.len(),
        }));
    };
    let parent_kind = parent.kind.clone();
    let child_kind = eq.raw(child)?.kind.clone();
    if !parent_kind.same_operator(&child_kind) {
        return Err(Error::new(vec![child], kind::OperatorsDiffer {
            child: child_kind.name(),
            parent: parent_kind.name(),
        }));
    }

    let grandchildren = eq.dismantle(child)?.children;
    let mut children = eq.raw(node)?.children.clone();
    children.splice(i..=i, grandchildren);
    eq.set_children(node, children)?;

    debug!(%node, i, "dissociate");
    steps.push(Step::Dissociate { index: i });
    Ok(())
}

/// Deep-copies a subtree. The copy is detached and every node in it gets a fresh id.
pub fn clone_subtree(eq: &mut Equation, id: NodeId) -> Result<NodeId, Error> {
    let node = eq.raw(id)?;
    let kind = node.kind.clone();
    let children = node.children.clone();

    let copies = children
        .into_iter()
        .map(|child| clone_subtree(eq, child))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(eq.alloc(kind, copies))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::tree::Kind;
    use super::*;

    #[test]
    fn swap_children() {
        let mut eq = Equation::parse("a+b+c=d").unwrap();
        let sum = eq.at(&[0]).unwrap();
        let mut steps = Vec::new();
        swap(&mut eq, sum, 0, 2, &mut steps).unwrap();
        assert_eq!(eq.to_string(), "c+b+a=d");
        assert_eq!(steps, vec![Step::Commute { i: 0, j: 2 }]);

        let err = swap(&mut eq, sum, 0, 3, &mut ()).unwrap_err();
        assert!(err.is::<kind::IndexExceeded>());
    }

    #[test]
    fn associate_then_dissociate() {
        let mut eq = Equation::parse("a*b*c*d=e").unwrap();
        let product = eq.at(&[0]).unwrap();
        let b = eq.at(&[0, 1]).unwrap();

        let group = associate(&mut eq, product, 1, 2, &mut ()).unwrap();
        assert_eq!(eq.to_string(), "a*(b*c)*d=e");
        assert_eq!(eq.kind(group), Some(&Kind::Product));
        assert_eq!(eq.parent(b), Some(group));
        assert!(eq.check_links());

        dissociate(&mut eq, product, 1, &mut ()).unwrap();
        assert_eq!(eq.to_string(), "a*b*c*d=e");
        assert_eq!(eq.parent(b), Some(product));
        assert!(eq.lookup(group).is_none());
        assert!(eq.check_links());
    }

    #[test]
    fn associate_bad_ranges() {
        let mut eq = Equation::parse("a+b=c").unwrap();
        let sum = eq.at(&[0]).unwrap();
        assert!(associate(&mut eq, sum, 1, 1, &mut ()).unwrap_err().is::<kind::NothingToAssociate>());
        assert!(associate(&mut eq, sum, 0, 2, &mut ()).unwrap_err().is::<kind::IndexExceeded>());
    }

    #[test]
    fn dissociate_requires_same_operator() {
        let mut eq = Equation::parse("a+b*c=d").unwrap();
        let sum = eq.at(&[0]).unwrap();
        let err = dissociate(&mut eq, sum, 1, &mut ()).unwrap_err();
        assert!(err.is::<kind::OperatorsDiffer>());
        assert_eq!(eq.to_string(), "a+b*c=d");
    }

    #[test]
    fn clone_gets_fresh_ids() {
        let mut eq = Equation::parse("a*(x+1)=0").unwrap();
        let sum = eq.at(&[0, 1]).unwrap();
        let copy = clone_subtree(&mut eq, sum).unwrap();
        assert_ne!(copy, sum);
        assert!(eq.structural_eq(copy, sum));
        assert!(eq.children(sum).iter().all(|id| !eq.raw(copy).unwrap().children.contains(id)));
    }
}
