//! Conversion of the parsed syntax tree into an [`Equation`].

use chalk_error::Error;
use chalk_parser::parser::{
    ast::{self, Expr, Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use super::{Equation, Kind, NodeId};
use std::collections::HashMap;

impl Equation {
    /// Parses an equation from text.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let ast = chalk_parser::parse_equation(text)?;
        Ok(Self::from_ast(&ast))
    }

    /// Builds an equation from its syntax tree.
    ///
    /// An unparenthesized chain of `+` and `-` becomes one n-ary sum, and an unparenthesized chain
    /// of `*` and `/` becomes one n-ary product. Parentheses always produce a nested child.
    pub fn from_ast(ast: &ast::Equation) -> Self {
        let mut eq = Self { nodes: HashMap::new(), root: NodeId::fresh() };
        let lhs = eq.build(&ast.lhs);
        let rhs = eq.build(&ast.rhs);
        eq.root = eq.alloc(Kind::Equality, vec![lhs, rhs]);
        eq
    }

    fn build(&mut self, expr: &Expr) -> NodeId {
        match expr {
            Expr::Literal(Literal::Number(num)) => self.number(num.value),
            Expr::Literal(Literal::Symbol(sym)) => self.alloc(Kind::Variable(sym.name.clone()), Vec::new()),
            Expr::Literal(Literal::Str(s)) => self.alloc(Kind::Str(s.value.clone()), Vec::new()),
            Expr::Paren(paren) => self.build(paren.innermost()),
            Expr::Call(call) => {
                let args = call.args.iter().map(|arg| self.build(arg)).collect();
                self.alloc(Kind::Custom(call.name.name.clone()), args)
            },
            Expr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => self.negated(&unary.operand),
            },
            Expr::Binary(binary) => match binary.op.kind {
                BinOpKind::Add | BinOpKind::Sub => {
                    let mut terms = Vec::new();
                    self.collect_terms(expr, &mut terms);
                    self.alloc(Kind::Sum, terms)
                },
                BinOpKind::Mul | BinOpKind::Div => {
                    let mut factors = Vec::new();
                    self.collect_factors(expr, &mut factors);
                    self.alloc(Kind::Product, factors)
                },
            },
        }
    }

    /// Builds the negation of an expression. Negated number literals are normalized like any
    /// other number.
    fn negated(&mut self, operand: &Expr) -> NodeId {
        match operand {
            Expr::Literal(Literal::Number(num)) => self.number(-num.value),
            _ => {
                let operand = self.build(operand);
                self.alloc(Kind::Minus, vec![operand])
            },
        }
    }

    /// Flattens a chain of `+` and `-` into the addends of one sum.
    fn collect_terms(&mut self, expr: &Expr, terms: &mut Vec<NodeId>) {
        match expr {
            Expr::Binary(binary) if matches!(binary.op.kind, BinOpKind::Add | BinOpKind::Sub) => {
                self.collect_terms(&binary.lhs, terms);
                let term = match binary.op.kind {
                    BinOpKind::Sub => self.negated(&binary.rhs),
                    _ => self.build(&binary.rhs),
                };
                terms.push(term);
            },
            _ => terms.push(self.build(expr)),
        }
    }

    /// Flattens a chain of `*` and `/` into the factors of one product.
    fn collect_factors(&mut self, expr: &Expr, factors: &mut Vec<NodeId>) {
        match expr {
            Expr::Binary(binary) if matches!(binary.op.kind, BinOpKind::Mul | BinOpKind::Div) => {
                self.collect_factors(&binary.lhs, factors);
                let factor = self.build(&binary.rhs);
                let factor = match binary.op.kind {
                    BinOpKind::Div => self.alloc(Kind::Inverse, vec![factor]),
                    _ => factor,
                };
                factors.push(factor);
            },
            _ => factors.push(self.build(expr)),
        }
    }
}
