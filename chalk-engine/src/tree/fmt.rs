//! Compact text rendering of equations.
//!
//! The rendered form has no spaces: `a+b`, `a-b` for a negated addend, `a*b`, `a/b` for an
//! inverse factor, `1/x` for a free-standing inverse, `-x`, `f(a,b)`. Parentheses appear only
//! where the tree nests.

use super::{Equation, Kind, NodeId};
use std::{collections::HashMap, fmt, ops::Range};

/// The rendered text of an equation, with the byte range every node occupies in it.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    /// The rendered text.
    pub text: String,

    /// The region of [`Rendered::text`] that each node was rendered to.
    pub spans: HashMap<NodeId, Range<usize>>,
}

impl Rendered {
    /// Returns the spans of the given nodes, skipping nodes that were not rendered.
    pub fn spans_of(&self, ids: &[NodeId]) -> Vec<Range<usize>> {
        ids.iter().filter_map(|id| self.spans.get(id).cloned()).collect()
    }
}

/// Where a node is being written, which decides if it needs parentheses.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Position {
    /// Side of the equation, function argument, or inside parentheses already.
    Free,

    /// An addend of a sum.
    Addend,

    /// The first factor of a product.
    FirstFactor,

    /// Any other factor of a product.
    Factor,

    /// Operand of a negation or inverse.
    Operand,
}

/// Returns true if the node must be wrapped in parentheses at the given position.
fn needs_parens(kind: &Kind, position: Position) -> bool {
    match position {
        Position::Free => false,
        Position::Addend => matches!(kind, Kind::Sum | Kind::Equality),
        Position::FirstFactor => matches!(kind, Kind::Sum | Kind::Product | Kind::Equality),
        Position::Factor => matches!(
            kind,
            Kind::Sum | Kind::Product | Kind::Minus | Kind::NegOne | Kind::Equality
        ),
        Position::Operand => matches!(
            kind,
            Kind::Sum | Kind::Product | Kind::Minus | Kind::NegOne | Kind::Inverse | Kind::Equality
        ),
    }
}

struct Renderer<'a> {
    eq: &'a Equation,
    out: Rendered,
}

impl Renderer<'_> {
    fn write(&mut self, id: NodeId, position: Position) {
        let Some(node) = self.eq.nodes.get(&id) else {
            self.out.text.push('?');
            return;
        };

        let parens = needs_parens(&node.kind, position);
        if parens {
            self.out.text.push('(');
        }

        let start = self.out.text.len();
        match &node.kind {
            Kind::Number(value) => self.out.text.push_str(&format!("{}", value)),
            Kind::Variable(name) => self.out.text.push_str(name),
            Kind::Str(value) => {
                self.out.text.push('"');
                self.out.text.push_str(value);
                self.out.text.push('"');
            },
            Kind::Zero => self.out.text.push('0'),
            Kind::One => self.out.text.push('1'),
            Kind::NegOne => self.out.text.push_str("-1"),
            Kind::Sum => {
                for (i, &child) in node.children.iter().enumerate() {
                    let negated = self.eq.nodes.get(&child)
                        .map_or(false, |c| matches!(c.kind, Kind::Minus | Kind::NegOne));
                    if i > 0 && !negated {
                        self.out.text.push('+');
                    }
                    self.write(child, Position::Addend);
                }
            },
            Kind::Product => {
                for (i, &child) in node.children.iter().enumerate() {
                    let inverse = self.eq.nodes.get(&child)
                        .map_or(false, |c| c.kind == Kind::Inverse);
                    if i == 0 {
                        if inverse {
                            // `(1/x)*y` reads better than `1/x*y`
                            self.out.text.push('(');
                            self.write(child, Position::Free);
                            self.out.text.push(')');
                        } else {
                            self.write(child, Position::FirstFactor);
                        }
                    } else if inverse {
                        self.write_divisor(child);
                    } else {
                        self.out.text.push('*');
                        self.write(child, Position::Factor);
                    }
                }
            },
            Kind::Inverse => {
                self.out.text.push_str("1/");
                self.write_operands(&node.children);
            },
            Kind::Minus => {
                self.out.text.push('-');
                self.write_operands(&node.children);
            },
            Kind::Equality => {
                for (i, &child) in node.children.iter().enumerate() {
                    if i > 0 {
                        self.out.text.push('=');
                    }
                    self.write(child, Position::Free);
                }
            },
            Kind::Custom(name) => {
                self.out.text.push_str(name);
                self.out.text.push('(');
                for (i, &child) in node.children.iter().enumerate() {
                    if i > 0 {
                        self.out.text.push(',');
                    }
                    self.write(child, Position::Free);
                }
                self.out.text.push(')');
            },
        }

        let end = self.out.text.len();
        self.out.spans.insert(id, start..end);

        if parens {
            self.out.text.push(')');
        }
    }

    /// Writes the operands of a negation or inverse.
    fn write_operands(&mut self, children: &[NodeId]) {
        for &child in children {
            self.write(child, Position::Operand);
        }
    }

    /// Writes an inverse factor that is not the first factor of its product as `/x`.
    fn write_divisor(&mut self, id: NodeId) {
        let start = self.out.text.len();
        self.out.text.push('/');
        if let Some(node) = self.eq.nodes.get(&id) {
            self.write_operands(&node.children);
        }
        let end = self.out.text.len();
        self.out.spans.insert(id, start..end);
    }
}

impl Equation {
    /// Renders the equation, recording the span of every node.
    pub fn render(&self) -> Rendered {
        let mut renderer = Renderer { eq: self, out: Rendered::default() };
        renderer.write(self.root, Position::Free);
        renderer.out
    }

    /// Renders a single subtree.
    pub fn render_node(&self, id: NodeId) -> String {
        let mut renderer = Renderer { eq: self, out: Rendered::default() };
        renderer.write(id, Position::Free);
        renderer.out.text
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render().text)
    }
}
